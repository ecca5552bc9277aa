//! Upstream API error types.

use thiserror::Error;

/// Errors returned by [`ApiClient`](super::ApiClient).
#[derive(Debug, Error)]
pub enum ApiError {
    /// Transport failure, timeout, or client construction error.
    #[error("request error: {0}")]
    Request(#[from] reqwest::Error),

    /// The upstream answered with a non-success status other than 404.
    #[error("upstream returned {status} for {url}")]
    Status { url: String, status: u16 },

    /// The record does not exist upstream.
    #[error("not found: {url}")]
    NotFound { url: String },

    /// The body was not the JSON shape we expected.
    #[error("could not decode {url}: {source}")]
    Decode {
        url: String,
        #[source]
        source: serde_json::Error,
    },
}

impl ApiError {
    /// Returns `true` when the requested record does not exist.
    pub fn is_not_found(&self) -> bool {
        matches!(self, Self::NotFound { .. })
    }
}

/// Convenience alias for upstream results.
pub type ApiResult<T> = std::result::Result<T, ApiError>;
