//! View models handed to the page templates.

use std::str::FromStr;

use serde::Serialize;

use crate::api::{Artist, DateEntry, Location, Relation, format_location, strip_date_marker};
use crate::filter::ArtistFilter;

/// Which part of an artist page to expand, from `?section=`.
#[derive(Clone, Copy, Debug, Default, Eq, PartialEq, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum Section {
    /// No `section` given: artist card and navigation only.
    #[default]
    Overview,
    Locations,
    Dates,
    Relations,
    All,
}

impl Section {
    fn shows(self, part: Section) -> bool {
        self == part || self == Section::All
    }
}

/// Accepts the empty string (overview) and the four section names.
impl FromStr for Section {
    type Err = ();

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            ""          => Ok(Self::Overview),
            "locations" => Ok(Self::Locations),
            "dates"     => Ok(Self::Dates),
            "relations" => Ok(Self::Relations),
            "all"       => Ok(Self::All),
            _           => Err(()),
        }
    }
}

/// A location with the concert dates played there.
#[derive(Clone, Debug, Eq, PartialEq, Serialize)]
pub struct Stop {
    pub location: String,
    pub dates: Vec<String>,
}

/// Everything `artist.html` needs: the artist plus its three related records.
#[derive(Clone, Debug, Serialize)]
pub struct ArtistPage {
    pub artist: Artist,
    pub section: Section,
    pub dates: Vec<String>,
    pub locations: Vec<String>,
    pub stops: Vec<Stop>,
    pub show_dates: bool,
    pub show_locations: bool,
    pub show_relations: bool,
}

impl ArtistPage {
    pub fn new(
        artist: Artist,
        dates: DateEntry,
        locations: Location,
        relations: Relation,
        section: Section,
    ) -> Self {
        let stops = relations.dates_locations
            .into_iter()
            .map(|(slug, dates)| Stop {
                location: format_location(&slug),
                dates: dates.iter().map(|d| strip_date_marker(d).to_owned()).collect(),
            })
            .collect();

        Self {
            artist,
            section,
            dates: dates.dates.iter().map(|d| strip_date_marker(d).to_owned()).collect(),
            locations: locations.locations.iter().map(|l| format_location(l)).collect(),
            stops,
            show_dates: section.shows(Section::Dates),
            show_locations: section.shows(Section::Locations),
            show_relations: section.shows(Section::Relations),
        }
    }
}

/// Everything `artists.html` needs.
#[derive(Debug, Serialize)]
pub struct ArtistsPage<'a> {
    pub artists: Vec<&'a Artist>,
    pub total: usize,
    pub filter: &'a ArtistFilter,
    pub filtered: bool,
}

impl<'a> ArtistsPage<'a> {
    pub fn new(all: &'a [Artist], filter: &'a ArtistFilter) -> Self {
        Self {
            artists: all.iter().filter(|a| filter.matches(a)).collect(),
            total: all.len(),
            filter,
            filtered: !filter.is_empty(),
        }
    }
}
