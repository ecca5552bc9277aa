//! Shared application state handed to every request.

use crate::api::ApiClient;

/// Everything a handler needs beyond the request itself.
#[derive(Clone, Debug)]
pub struct AppState {
    api: ApiClient,
}

impl AppState {
    pub fn new(api: ApiClient) -> Self {
        Self { api }
    }

    pub fn api(&self) -> &ApiClient {
        &self.api
    }
}
