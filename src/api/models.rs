//! Records as served by the upstream API.
//!
//! Field names follow the upstream JSON (`creationDate`, `firstAlbum`,
//! `datesLocations`); the same names are used when records are echoed back
//! as search results or handed to templates.

use std::collections::BTreeMap;

use serde::{Deserialize, Deserializer, Serialize};

/// One band or solo artist.
///
/// Unknown IDs come back from upstream as an all-default record, so every
/// field defaults and `id == 0` means "no such artist".
#[derive(Clone, Debug, Default, Deserialize, PartialEq, Serialize)]
#[serde(default, rename_all = "camelCase")]
pub struct Artist {
    pub id: u32,
    pub image: String,
    pub name: String,
    #[serde(deserialize_with = "null_as_default")]
    pub members: Vec<String>,
    pub creation_date: i32,
    /// `DD-MM-YYYY`
    pub first_album: String,
    /// URL of this artist's locations record.
    pub locations: String,
    /// URL of this artist's dates record.
    pub concert_dates: String,
    /// URL of this artist's relation record.
    pub relations: String,
}

impl Artist {
    /// Year of the first album, taken from the last `-` separated field.
    pub fn first_album_year(&self) -> Option<i32> {
        self.first_album.rsplit('-').next()?.trim().parse().ok()
    }
}

/// Concert dates for one artist. A leading `*` marks a date upstream.
#[derive(Clone, Debug, Default, Deserialize, PartialEq, Serialize)]
#[serde(default)]
pub struct DateEntry {
    pub id: u32,
    #[serde(deserialize_with = "null_as_default")]
    pub dates: Vec<String>,
}

/// Concert locations for one artist, as `city-country` slugs.
#[derive(Clone, Debug, Default, Deserialize, PartialEq, Serialize)]
#[serde(default)]
pub struct Location {
    pub id: u32,
    #[serde(deserialize_with = "null_as_default")]
    pub locations: Vec<String>,
    /// URL of the matching dates record.
    pub dates: String,
}

/// Location slug to concert dates at that location.
#[derive(Clone, Debug, Default, Deserialize, PartialEq, Serialize)]
#[serde(default, rename_all = "camelCase")]
pub struct Relation {
    pub id: u32,
    #[serde(deserialize_with = "null_as_default")]
    pub dates_locations: BTreeMap<String, Vec<String>>,
}

// Upstream encodes empty lists as `null`.
fn null_as_default<'de, D, T>(deserializer: D) -> Result<T, D::Error>
where
    D: Deserializer<'de>,
    T: Default + Deserialize<'de>,
{
    Ok(Option::<T>::deserialize(deserializer)?.unwrap_or_default())
}

/// Drops the upstream `*` marker from a concert date.
pub fn strip_date_marker(date: &str) -> &str {
    date.trim_start_matches('*')
}

/// Turns a location slug into a display name:
/// `north_carolina-usa` becomes `North Carolina, USA`.
///
/// Country parts of three letters or fewer are treated as abbreviations.
pub fn format_location(slug: &str) -> String {
    let parts: Vec<&str> = slug.split('-').filter(|p| !p.is_empty()).collect();
    let last = parts.len().saturating_sub(1);

    parts.iter()
        .enumerate()
        .map(|(i, part)| {
            if i == last && i > 0 && part.len() <= 3 {
                part.to_uppercase()
            } else {
                title_case(&part.replace('_', " "))
            }
        })
        .collect::<Vec<_>>()
        .join(", ")
}

fn title_case(s: &str) -> String {
    s.split(' ')
        .map(|word| {
            let mut chars = word.chars();
            match chars.next() {
                Some(first) => first.to_uppercase().chain(chars).collect(),
                None => String::new(),
            }
        })
        .collect::<Vec<_>>()
        .join(" ")
}
