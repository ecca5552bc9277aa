//! Incoming HTTP request type.

use std::collections::HashMap;
use std::sync::Arc;

use tracing::debug;

use crate::state::AppState;

/// An incoming request after routing: decoded query string, decoded path
/// parameters, and a handle to the shared application state.
pub struct Request {
    query: HashMap<String, String>,
    params: HashMap<String, String>,
    state: Arc<AppState>,
}

impl Request {
    pub(crate) fn new(
        uri: &http::Uri,
        params: HashMap<String, String>,
        state: Arc<AppState>,
    ) -> Self {
        Self {
            query: parse_query(uri.query().unwrap_or("")),
            params,
            state,
        }
    }

    pub fn state(&self) -> &AppState { &self.state }

    /// Returns a named path parameter.
    ///
    /// For a route `/artist/{id}`, `req.param("id")` on `/artist/42` returns `Some("42")`.
    pub fn param(&self, key: &str) -> Option<&str> {
        self.params.get(key).map(String::as_str)
    }

    /// Returns the first value of a query parameter, percent-decoded.
    pub fn query(&self, key: &str) -> Option<&str> {
        self.query.get(key).map(String::as_str)
    }

    /// All query parameters (first value wins for repeated keys).
    pub fn query_map(&self) -> &HashMap<String, String> {
        &self.query
    }
}

fn parse_query(raw: &str) -> HashMap<String, String> {
    let pairs: Vec<(String, String)> = match serde_urlencoded::from_str(raw) {
        Ok(pairs) => pairs,
        Err(e) => {
            debug!(query = raw, "ignoring undecodable query string: {e}");
            return HashMap::new();
        }
    };

    let mut query = HashMap::with_capacity(pairs.len());
    for (key, value) in pairs {
        query.entry(key).or_insert(value);
    }
    query
}
