//! Linear search over the in-memory artist list.
//!
//! Both searches keep upstream order and never touch the network.

use serde::Serialize;

use crate::api::Artist;

/// Artists matching `query`, case-insensitively, by name, member, or
/// first-album date; or whose creation year equals `query` exactly.
///
/// Each artist appears at most once. A blank query matches nothing.
pub fn search_artists<'a>(artists: &'a [Artist], query: &str) -> Vec<&'a Artist> {
    let query = query.trim();
    if query.is_empty() {
        return Vec::new();
    }
    let needle = query.to_lowercase();
    let year = query.parse::<i32>().ok();

    artists.iter()
        .filter(|artist| {
            artist.name.to_lowercase().contains(&needle)
                || artist.members.iter().any(|m| m.to_lowercase().contains(&needle))
                || artist.first_album.to_lowercase().contains(&needle)
                || year == Some(artist.creation_date)
        })
        .collect()
}

/// What a [`SearchHit`] matched on.
#[derive(Clone, Copy, Debug, Eq, PartialEq, Serialize)]
pub enum HitKind {
    #[serde(rename = "first album date")]
    FirstAlbum,
    #[serde(rename = "creation date")]
    CreationDate,
}

/// One date search result: the artist and which date matched.
#[derive(Clone, Debug, Eq, PartialEq, Serialize)]
pub struct SearchHit {
    pub name: String,
    #[serde(rename = "type")]
    pub kind: HitKind,
}

/// Date search: an artist yields a first-album hit when its first-album date
/// contains `query`, and independently a creation hit when its creation year
/// written in decimal contains `query`.
pub fn search_dates(artists: &[Artist], query: &str) -> Vec<SearchHit> {
    let needle = query.to_lowercase();
    let mut hits = Vec::new();

    for artist in artists {
        if artist.first_album.to_lowercase().contains(&needle) {
            hits.push(SearchHit { name: artist.name.clone(), kind: HitKind::FirstAlbum });
        }
        if artist.creation_date.to_string().contains(&needle) {
            hits.push(SearchHit { name: artist.name.clone(), kind: HitKind::CreationDate });
        }
    }
    hits
}

#[cfg(test)]
mod tests {
    use super::*;

    fn artist(id: u32, name: &str, members: &[&str], created: i32, album: &str) -> Artist {
        Artist {
            id,
            name: name.into(),
            members: members.iter().map(|m| (*m).to_owned()).collect(),
            creation_date: created,
            first_album: album.into(),
            ..Artist::default()
        }
    }

    fn roster() -> Vec<Artist> {
        vec![
            artist(1, "Queen", &["Freddie Mercury", "Brian May"], 1970, "14-12-1973"),
            artist(2, "SOJA", &["Jacob Hemphill", "Bob Jefferson"], 1997, "05-06-2002"),
            artist(3, "Pink Floyd", &["Roger Waters", "David Gilmour"], 1965, "05-08-1967"),
        ]
    }

    fn ids(found: &[&Artist]) -> Vec<u32> {
        found.iter().map(|a| a.id).collect()
    }

    #[test]
    fn matches_name_case_insensitively() {
        let all = roster();
        assert_eq!(ids(&search_artists(&all, "qUeEn")), [1]);
    }

    #[test]
    fn matches_members() {
        let all = roster();
        assert_eq!(ids(&search_artists(&all, "gilmour")), [3]);
    }

    #[test]
    fn artist_listed_once_when_several_fields_match() {
        let all = roster();
        let both = vec![artist(9, "May Queen", &["May"], 2000, "01-05-2001")];
        assert_eq!(ids(&search_artists(&both, "may")), [9]);
        assert_eq!(ids(&search_artists(&all, "o")), [2, 3]);
    }

    #[test]
    fn creation_year_must_be_exact() {
        let all = roster();
        assert_eq!(ids(&search_artists(&all, "1997")), [2]);
        assert!(search_artists(&all, "199").is_empty());
    }

    #[test]
    fn matches_first_album_date() {
        let all = roster();
        assert_eq!(ids(&search_artists(&all, "05-08")), [3]);
    }

    #[test]
    fn blank_query_finds_nothing() {
        assert!(search_artists(&roster(), "   ").is_empty());
    }

    #[test]
    fn date_search_reports_both_kinds() {
        let hits = search_dates(&roster(), "197");
        assert_eq!(
            hits,
            [
                SearchHit { name: "Queen".into(), kind: HitKind::FirstAlbum },
                SearchHit { name: "Queen".into(), kind: HitKind::CreationDate },
            ]
        );
    }

    #[test]
    fn date_search_serialises_type_labels() {
        let hits = search_dates(&roster(), "2002");
        let json = serde_json::to_string(&hits).unwrap();
        assert_eq!(json, r#"[{"name":"SOJA","type":"first album date"}]"#);
    }
}
