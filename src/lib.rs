//! # groupie-tracker
//!
//! A server-rendered browser for the public groupie tracker artist API.
//!
//! Every page is built on demand from upstream data: the artist list for
//! browsing, filtering and search, and for a single artist the four related
//! records (artist, dates, locations, relations) fetched one after another
//! and merged into one page. Nothing is stored or cached.
//!
//! ## Routes
//!
//! | Path | Answer |
//! |---|---|
//! | `/` | home page |
//! | `/artists`, `/artists/` | listing (HTML), or search results (JSON) with `?q=` |
//! | `/artist/{id}` | one artist, `?section=locations\|dates\|relations\|all` |
//! | `/search?query=` | first-album / creation-date search (JSON) |
//! | `/healthz`, `/readyz` | probes |
//!
//! Anything else is a `404` page; a known path with the wrong method is a
//! `405` page.
//!
//! ## Quick start
//!
//! ```rust,no_run
//! use std::time::Duration;
//! use groupie_tracker::{ApiClient, AppState, Server, DEFAULT_API_URL};
//!
//! #[tokio::main]
//! async fn main() -> Result<(), groupie_tracker::Error> {
//!     let api = ApiClient::new(DEFAULT_API_URL, Duration::from_secs(10))?;
//!     Server::bind("0.0.0.0:8080".parse().unwrap())
//!         .serve(groupie_tracker::app(), AppState::new(api))
//!         .await
//! }
//! ```

mod error;
mod handler;
mod middleware;
mod request;
mod response;
mod router;
mod server;
mod state;
mod status;

pub mod api;
pub mod config;
pub mod filter;
pub mod handlers;
pub mod health;
pub mod pages;
pub mod search;
pub mod views;

pub use api::{ApiClient, ApiError, DEFAULT_API_URL};
pub use config::Config;
pub use error::{Error, PageError};
pub use handler::Handler;
pub use request::Request;
pub use response::{ContentType, IntoResponse, Response};
pub use router::Router;
pub use server::{Server, serve_until};
pub use state::AppState;
pub use status::Status;

/// The full route table.
pub fn app() -> Router {
    Router::new()
        .get("/",             handlers::home)
        .get("/artists",      handlers::artists)
        .get("/artists/",     handlers::artists)
        .get("/artist/{id}",  handlers::artist)
        .get("/search",       handlers::search)
        .get("/healthz",      health::liveness)
        .get("/readyz",       health::readiness)
}
