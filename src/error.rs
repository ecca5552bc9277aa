//! Error types.
//!
//! Two kinds of failure live here. [`Error`] is infrastructure: binding a
//! port, building the upstream client, rendering a template. [`PageError`]
//! is what a handler returns when a request cannot be served; it becomes an
//! HTML error page carrying the matching status code.

use std::borrow::Cow;
use std::net::AddrParseError;

use thiserror::Error;

use crate::api::ApiError;
use crate::response::{IntoResponse, Response};
use crate::status::Status;
use crate::views;

/// Infrastructure failures surfaced by startup and rendering.
#[derive(Debug, Error)]
pub enum Error {
    /// Binding the listener or accepting a connection failed.
    #[error("io: {0}")]
    Io(#[from] std::io::Error),

    /// The configured bind address is not a valid `host:port`.
    #[error("invalid bind address {addr:?}: {source}")]
    InvalidAddr {
        addr: String,
        #[source]
        source: AddrParseError,
    },

    /// The upstream API client could not be built or called.
    #[error("upstream: {0}")]
    Api(#[from] ApiError),

    /// A page template failed to load or render.
    #[error("template: {0}")]
    Template(#[from] minijinja::Error),
}

pub(crate) const PAGE_UNAVAILABLE: &str = "The Page you're trying to access is unavailable";

/// A request that ends in an error page.
#[derive(Clone, Debug)]
pub struct PageError {
    status: Status,
    message: Cow<'static, str>,
}

impl PageError {
    pub fn new(status: Status, message: impl Into<Cow<'static, str>>) -> Self {
        Self { status, message: message.into() }
    }

    pub fn not_found() -> Self {
        Self::new(Status::NotFound, PAGE_UNAVAILABLE)
    }

    pub fn method_not_allowed() -> Self {
        Self::new(Status::MethodNotAllowed, "Wrong method")
    }

    pub fn bad_request(message: impl Into<Cow<'static, str>>) -> Self {
        Self::new(Status::BadRequest, message)
    }

    pub fn internal(message: impl Into<Cow<'static, str>>) -> Self {
        Self::new(Status::InternalServerError, message)
    }

    pub fn status(&self) -> Status {
        self.status
    }

    pub fn message(&self) -> &str {
        &self.message
    }
}

impl IntoResponse for PageError {
    fn into_response(self) -> Response {
        views::render_error(self.status, &self.message)
    }
}
