//! Query-string filters for the artist listing.
//!
//! ```text
//! /artists?creation_from=1960&creation_to=1990&album_from=1970&members=4,5
//! ```
//!
//! Every bound is optional and inclusive. Empty values are ignored so a
//! submitted-but-blank form field does not filter anything.

use std::collections::HashMap;
use std::str::FromStr;

use serde::Serialize;
use thiserror::Error;

use crate::api::Artist;

/// A filter value that is not a number.
#[derive(Debug, Error, Eq, PartialEq)]
#[error("Invalid value {value:?} for filter {field}")]
pub struct FilterError {
    pub field: &'static str,
    pub value: String,
}

/// The active filter for one request to `/artists`.
#[derive(Clone, Debug, Default, Eq, PartialEq, Serialize)]
pub struct ArtistFilter {
    pub creation_from: Option<i32>,
    pub creation_to: Option<i32>,
    pub album_from: Option<i32>,
    pub album_to: Option<i32>,
    /// Accepted member counts; empty accepts any.
    pub members: Vec<usize>,
}

impl ArtistFilter {
    pub fn from_query(query: &HashMap<String, String>) -> Result<Self, FilterError> {
        let members = match present(query, "members") {
            None => Vec::new(),
            Some(raw) => raw
                .split(',')
                .map(str::trim)
                .filter(|part| !part.is_empty())
                .map(|part| number("members", part))
                .collect::<Result<Vec<usize>, _>>()?,
        };

        Ok(Self {
            creation_from: optional(query, "creation_from")?,
            creation_to: optional(query, "creation_to")?,
            album_from: optional(query, "album_from")?,
            album_to: optional(query, "album_to")?,
            members,
        })
    }

    pub fn is_empty(&self) -> bool {
        *self == Self::default()
    }

    pub fn matches(&self, artist: &Artist) -> bool {
        within(Some(artist.creation_date), self.creation_from, self.creation_to)
            && within(artist.first_album_year(), self.album_from, self.album_to)
            && (self.members.is_empty() || self.members.contains(&artist.members.len()))
    }
}

// An artist without a parsable album year only passes when no album bound is set.
fn within(value: Option<i32>, from: Option<i32>, to: Option<i32>) -> bool {
    if from.is_none() && to.is_none() {
        return true;
    }
    let Some(value) = value else { return false };
    from.is_none_or(|lo| value >= lo) && to.is_none_or(|hi| value <= hi)
}

fn present<'a>(query: &'a HashMap<String, String>, field: &str) -> Option<&'a str> {
    query.get(field).map(|v| v.trim()).filter(|v| !v.is_empty())
}

fn optional<T: FromStr>(query: &HashMap<String, String>, field: &'static str) -> Result<Option<T>, FilterError> {
    present(query, field).map(|raw| number(field, raw)).transpose()
}

fn number<T: FromStr>(field: &'static str, raw: &str) -> Result<T, FilterError> {
    raw.parse().map_err(|_| FilterError { field, value: raw.to_owned() })
}
