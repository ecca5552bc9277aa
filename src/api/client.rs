use std::time::Duration;

use reqwest::{Client, StatusCode};
use serde::de::DeserializeOwned;
use tracing::debug;

use super::error::{ApiError, ApiResult};
use super::models::{Artist, DateEntry, Location, Relation};

/// Public instance of the artist tracker API.
pub const DEFAULT_API_URL: &str = "https://groupietrackers.herokuapp.com/api";

/// Upstream API client.
///
/// Every operation is a single `GET`; nothing is cached between requests.
#[derive(Clone, Debug)]
pub struct ApiClient {
    http: Client,
    base: String,
}

impl ApiClient {
    /// Create a client for the API rooted at `base_url`.
    ///
    /// # Errors
    /// Returns an error if the HTTP client cannot be created.
    pub fn new(base_url: impl Into<String>, timeout: Duration) -> ApiResult<Self> {
        let http = Client::builder()
            .timeout(timeout)
            .user_agent(concat!("groupie-tracker/", env!("CARGO_PKG_VERSION")))
            .build()?;

        let base = base_url.into().trim_end_matches('/').to_owned();
        Ok(Self { http, base })
    }

    pub fn base_url(&self) -> &str {
        &self.base
    }

    /// `GET /artists`
    pub async fn artists(&self) -> ApiResult<Vec<Artist>> {
        self.get("artists").await
    }

    /// `GET /artists/{id}`. An all-default record (`id == 0`) is reported as
    /// [`ApiError::NotFound`].
    pub async fn artist(&self, id: u32) -> ApiResult<Artist> {
        let path = format!("artists/{id}");
        let artist: Artist = self.get(&path).await?;
        if artist.id == 0 {
            return Err(ApiError::NotFound { url: self.url(&path) });
        }
        Ok(artist)
    }

    /// `GET /dates/{id}`
    pub async fn dates(&self, id: u32) -> ApiResult<DateEntry> {
        self.get(&format!("dates/{id}")).await
    }

    /// `GET /locations/{id}`
    pub async fn locations(&self, id: u32) -> ApiResult<Location> {
        self.get(&format!("locations/{id}")).await
    }

    /// `GET /relation/{id}`
    pub async fn relations(&self, id: u32) -> ApiResult<Relation> {
        self.get(&format!("relation/{id}")).await
    }

    /// Checks that the API root answers with a success status.
    pub async fn ping(&self) -> ApiResult<()> {
        let response = self.http.get(&self.base).send().await?;
        check_status(response.status(), &self.base)
    }

    fn url(&self, path: &str) -> String {
        format!("{}/{}", self.base, path)
    }

    async fn get<T: DeserializeOwned>(&self, path: &str) -> ApiResult<T> {
        let url = self.url(path);
        debug!(%url, "upstream GET");

        let response = self.http.get(&url).send().await?;
        check_status(response.status(), &url)?;

        let body = response.bytes().await?;
        serde_json::from_slice(&body).map_err(|source| ApiError::Decode { url, source })
    }
}

fn check_status(status: StatusCode, url: &str) -> ApiResult<()> {
    if status == StatusCode::NOT_FOUND {
        return Err(ApiError::NotFound { url: url.to_owned() });
    }
    if !status.is_success() {
        return Err(ApiError::Status { url: url.to_owned(), status: status.as_u16() });
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn client_creation() {
        let client = ApiClient::new(DEFAULT_API_URL, Duration::from_secs(5));
        assert!(client.is_ok());
    }

    #[test]
    fn trailing_slash_is_trimmed() {
        let client = ApiClient::new("http://localhost:9/api/", Duration::from_secs(1)).unwrap();
        assert_eq!(client.base_url(), "http://localhost:9/api");
        assert_eq!(client.url("dates/3"), "http://localhost:9/api/dates/3");
    }

    #[test]
    fn status_mapping() {
        assert!(check_status(StatusCode::OK, "u").is_ok());
        assert!(check_status(StatusCode::NOT_FOUND, "u").unwrap_err().is_not_found());
        assert!(matches!(
            check_status(StatusCode::BAD_GATEWAY, "u"),
            Err(ApiError::Status { status: 502, .. })
        ));
    }

    #[tokio::test]
    async fn unreachable_upstream_is_a_request_error() {
        let client = ApiClient::new("http://127.0.0.1:9", Duration::from_millis(500)).unwrap();
        assert!(matches!(client.artists().await, Err(ApiError::Request(_))));
    }
}
