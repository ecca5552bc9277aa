//! Radix-tree request router.
//!
//! One `matchit` tree per HTTP method. A path that exists under some other
//! method is reported separately so the server can answer `405` instead of
//! `404`.
//!
//! Path parameters are percent-decoded before handlers see them, so
//! `/artist/%31` and `/artist/1` reach the same artist.

use std::collections::HashMap;
use std::sync::Arc;

use http::Method;
use matchit::Router as MatchitRouter;

use crate::handler::{BoxedHandler, Handler};

/// The application route table.
///
/// Build it once at startup with [`crate::app`] (or by hand) and pass it to
/// [`Server::serve`](crate::Server::serve).
pub struct Router {
    routes: HashMap<Method, MatchitRouter<BoxedHandler>>,
}

impl Router {
    pub fn new() -> Self {
        Self { routes: HashMap::new() }
    }

    /// Register a `GET` handler. Path parameters use `{name}` syntax.
    ///
    /// # Panics
    ///
    /// Panics if `path` is not a valid route or conflicts with one already
    /// registered.
    pub fn get(mut self, path: &str, handler: impl Handler) -> Self {
        self.routes
            .entry(Method::GET)
            .or_default()
            .insert(path, handler.into_boxed_handler())
            .unwrap_or_else(|e| panic!("invalid route `{path}`: {e}"));
        self
    }

    pub(crate) fn lookup(
        &self,
        method: &Method,
        path: &str,
    ) -> Option<(BoxedHandler, HashMap<String, String>)> {
        let tree = self.routes.get(method)?;
        let matched = tree.at(path).ok()?;
        let handler = Arc::clone(matched.value);
        let params = matched.params.iter()
            .map(|(k, v)| (k.to_owned(), decode_param(v)))
            .collect();
        Some((handler, params))
    }

    /// True when any method has a route matching `path`.
    pub(crate) fn has_path(&self, path: &str) -> bool {
        self.routes.values().any(|tree| tree.at(path).is_ok())
    }
}

impl Default for Router {
    fn default() -> Self { Self::new() }
}

// A segment that is not valid UTF-8 once decoded is passed through untouched.
fn decode_param(raw: &str) -> String {
    urlencoding::decode(raw).map_or_else(|_| raw.to_owned(), |v| v.into_owned())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::response::Response;
    use crate::request::Request;

    async fn noop(_req: Request) -> Response {
        Response::html("")
    }

    fn table() -> Router {
        Router::new()
            .get("/", noop)
            .get("/artists", noop)
            .get("/artists/", noop)
            .get("/artist/{id}", noop)
    }

    #[test]
    fn matches_static_and_param_routes() {
        let router = table();
        assert!(router.lookup(&Method::GET, "/").is_some());
        assert!(router.lookup(&Method::GET, "/artists/").is_some());

        let (_, params) = router.lookup(&Method::GET, "/artist/7").unwrap();
        assert_eq!(params.get("id").map(String::as_str), Some("7"));
    }

    #[test]
    fn params_are_percent_decoded() {
        let router = table();
        let (_, params) = router.lookup(&Method::GET, "/artist/%31").unwrap();
        assert_eq!(params.get("id").map(String::as_str), Some("1"));

        let (_, params) = router.lookup(&Method::GET, "/artist/%FF").unwrap();
        assert_eq!(params.get("id").map(String::as_str), Some("%FF"));
    }

    #[test]
    fn rejects_extra_or_missing_segments() {
        let router = table();
        assert!(router.lookup(&Method::GET, "/artist/7/dates").is_none());
        assert!(router.lookup(&Method::GET, "/artist/").is_none());
        assert!(router.lookup(&Method::GET, "/nowhere").is_none());
    }

    #[test]
    fn other_methods_see_the_path_but_not_the_handler() {
        let router = table();
        assert!(router.lookup(&Method::POST, "/artists").is_none());
        assert!(router.has_path("/artists"));
        assert!(!router.has_path("/nowhere"));
    }

    #[test]
    #[should_panic(expected = "invalid route")]
    fn duplicate_route_panics() {
        let _ = Router::new().get("/", noop).get("/", noop);
    }
}
