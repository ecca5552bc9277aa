//! Client for the upstream artist tracker REST API.

mod client;
mod error;
mod models;

pub use client::{ApiClient, DEFAULT_API_URL};
pub use error::{ApiError, ApiResult};
pub use models::{Artist, DateEntry, Location, Relation, format_location, strip_date_marker};
