//! Route handlers.
//!
//! Each handler validates its path and query first, then calls the upstream
//! API, then renders. Failures end in an error page via [`PageError`].

use minijinja::context;
use tracing::{debug, error, warn};

use crate::api::ApiError;
use crate::error::PageError;
use crate::filter::ArtistFilter;
use crate::pages::{ArtistPage, ArtistsPage, Section};
use crate::request::Request;
use crate::response::Response;
use crate::search::{search_artists, search_dates};
use crate::status::Status;
use crate::views;

const SECTION_UNAVAILABLE: &str = "The section you're trying to access is unavailable";

/// `GET /`
pub async fn home(_req: Request) -> Result<Response, PageError> {
    views::page("home.html", context! {})
}

/// `GET /artists` and `GET /artists/`
///
/// With a non-empty `q`, answers with the matching artists as JSON.
/// Otherwise renders the listing, narrowed by any [`ArtistFilter`] params.
pub async fn artists(req: Request) -> Result<Response, PageError> {
    let query = req.query("q").filter(|q| !q.is_empty());
    let filter = match query {
        Some(_) => ArtistFilter::default(),
        None => ArtistFilter::from_query(req.query_map())
            .map_err(|e| PageError::bad_request(e.to_string()))?,
    };

    let all = req.state().api().artists().await
        .map_err(|e| upstream_failure("artists", &e, "Error fetching artists"))?;

    if let Some(q) = query {
        let found = search_artists(&all, q);
        debug!(query = q, hits = found.len(), "artist search");
        return Ok(Response::json(&found));
    }

    views::page("artists.html", ArtistsPage::new(&all, &filter))
}

/// `GET /artist/{id}?section=`
///
/// Fetches the artist, then its dates, locations and relations, one after
/// another. The first failure ends the request.
pub async fn artist(req: Request) -> Result<Response, PageError> {
    let section = req.query("section")
        .map_or(Ok(Section::Overview), str::parse)
        .map_err(|()| PageError::new(Status::NotFound, SECTION_UNAVAILABLE))?;

    let id = req.param("id").and_then(parse_id).ok_or_else(PageError::not_found)?;
    let api = req.state().api();

    let artist = api.artist(id).await.map_err(|e| {
        if e.is_not_found() {
            debug!(id, "no such artist");
        } else {
            warn!(id, "artist lookup failed: {e}");
        }
        PageError::not_found()
    })?;

    let dates = api.dates(id).await
        .map_err(|e| upstream_failure("dates", &e, "Error fetching dates"))?;
    let locations = api.locations(id).await
        .map_err(|e| upstream_failure("locations", &e, "Error fetching locations"))?;
    let relations = api.relations(id).await
        .map_err(|e| upstream_failure("relations", &e, "Error fetching relations"))?;

    views::page("artist.html", ArtistPage::new(artist, dates, locations, relations, section))
}

/// `GET /search?query=`
///
/// JSON list of artists whose first-album date or creation year contains
/// `query`.
pub async fn search(req: Request) -> Result<Response, PageError> {
    let query = req.query("query")
        .map(str::trim)
        .filter(|q| !q.is_empty())
        .ok_or_else(|| PageError::bad_request("Query parameter is missing"))?;

    let artists = req.state().api().artists().await
        .map_err(|e| upstream_failure("artists", &e, "Error fetching artist data"))?;

    let hits = search_dates(&artists, query);
    debug!(query, hits = hits.len(), "date search");
    Ok(Response::json(&hits))
}

/// Artist IDs are positive integers; anything else never reaches upstream.
fn parse_id(raw: &str) -> Option<u32> {
    raw.parse().ok().filter(|&id| id > 0)
}

fn upstream_failure(resource: &str, err: &ApiError, message: &'static str) -> PageError {
    error!(resource, "upstream fetch failed: {err}");
    PageError::internal(message)
}
