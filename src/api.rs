//! Species API client
//!
//! The [`SpeciesApi`] trait is the seam between the gallery controller and
//! the network; [`HttpSpeciesApi`] implements it with `reqwest`, which uses
//! the browser's `fetch` when compiled to WASM.

use reqwest::Url;
use thiserror::Error;

use crate::config::{ApiConfig, Collection};
use crate::models::{Species, SpeciesId};

/// Error raised while talking to the species API
#[derive(Debug, Error)]
#[non_exhaustive]
pub enum ApiError {
    /// The request could not be sent or the body could not be read
    #[error("Request failed: {0}")]
    Transport(String),
    /// The server answered with a non-success status
    #[error("HTTP status {status} from {url}")]
    Status { status: u16, url: String },
    /// The configured base URL cannot be used
    #[error("Invalid API URL '{url}': {message}")]
    InvalidUrl { url: String, message: String },
    /// The body was not the expected JSON
    #[error("Invalid JSON from {url}: {source}")]
    Decode {
        url: String,
        #[source]
        source: serde_json::Error,
    },
}

impl From<reqwest::Error> for ApiError {
    fn from(e: reqwest::Error) -> Self {
        ApiError::Transport(e.to_string())
    }
}

/// Source of species records.
#[allow(async_fn_in_trait)]
pub trait SpeciesApi {
    /// Fetch the whole collection, in server order.
    async fn list(&self) -> Result<Vec<Species>, ApiError>;

    /// Fetch a single record.
    async fn get(&self, id: &SpeciesId) -> Result<Species, ApiError>;
}

/// Builds endpoint URLs for a collection.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Endpoints {
    base_url: Url,
    collection: Collection,
}

impl Endpoints {
    pub fn new(base_url: &str, collection: Collection) -> Result<Self, ApiError> {
        let invalid = |message: String| ApiError::InvalidUrl { url: base_url.to_string(), message };
        let base_url = Url::parse(base_url.trim()).map_err(|e| invalid(e.to_string()))?;
        if base_url.cannot_be_a_base() {
            return Err(invalid("cannot carry a path".to_string()));
        }
        Ok(Self { base_url, collection })
    }

    /// `{base}/{collection}`
    pub fn list_url(&self) -> Url {
        self.with_segments(&[self.collection.path()])
    }

    /// `{base}/{collection}/{id}`, with the id percent-encoded as one segment
    pub fn item_url(&self, id: &SpeciesId) -> Url {
        self.with_segments(&[self.collection.path(), &id.to_string()])
    }

    fn with_segments(&self, segments: &[&str]) -> Url {
        let mut url = self.base_url.clone();
        // Checked in `new`
        if let Ok(mut path) = url.path_segments_mut() {
            path.pop_if_empty().extend(segments);
        }
        url
    }
}

/// `SpeciesApi` over HTTP.
#[derive(Debug, Clone)]
pub struct HttpSpeciesApi {
    client: reqwest::Client,
    endpoints: Endpoints,
}

impl HttpSpeciesApi {
    pub fn new(config: &ApiConfig) -> Result<Self, ApiError> {
        Ok(Self { client: build_client()?, endpoints: Endpoints::new(&config.base_url, config.collection)? })
    }

    pub fn endpoints(&self) -> &Endpoints {
        &self.endpoints
    }

    async fn get_json<T: serde::de::DeserializeOwned>(&self, url: Url) -> Result<T, ApiError> {
        tracing::debug!(url = %url, "GET");
        let response = self.client.get(url.clone()).send().await?;

        let status = response.status();
        let url = String::from(url);
        if !status.is_success() {
            return Err(ApiError::Status { status: status.as_u16(), url });
        }

        let body = response.text().await?;
        serde_json::from_str(&body).map_err(|source| ApiError::Decode { url, source })
    }
}

#[cfg(not(target_arch = "wasm32"))]
fn build_client() -> Result<reqwest::Client, ApiError> {
    let client = reqwest::Client::builder()
        .redirect(reqwest::redirect::Policy::limited(10))
        .user_agent(concat!("seagallery/", env!("CARGO_PKG_VERSION")))
        .build()?;
    Ok(client)
}

#[cfg(target_arch = "wasm32")]
fn build_client() -> Result<reqwest::Client, ApiError> {
    // The browser owns redirects and the user agent
    Ok(reqwest::Client::new())
}

impl SpeciesApi for HttpSpeciesApi {
    async fn list(&self) -> Result<Vec<Species>, ApiError> {
        self.get_json(self.endpoints.list_url()).await
    }

    async fn get(&self, id: &SpeciesId) -> Result<Species, ApiError> {
        self.get_json(self.endpoints.item_url(id)).await
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_list_url() {
        let endpoints = Endpoints::new("http://127.0.0.1:5000/", Collection::Species).unwrap();
        assert_eq!(endpoints.list_url().as_str(), "http://127.0.0.1:5000/species");
    }

    #[test]
    fn test_legacy_urls() {
        let endpoints = Endpoints::new("http://127.0.0.1:5000", Collection::Creatures).unwrap();
        assert_eq!(endpoints.list_url().as_str(), "http://127.0.0.1:5000/creatures");
        assert_eq!(endpoints.item_url(&SpeciesId::Number(7)).as_str(), "http://127.0.0.1:5000/creatures/7");
    }

    #[test]
    fn test_item_url_encodes_id() {
        let endpoints = Endpoints::new("https://reef.example.org/api", Collection::Species).unwrap();
        let id = SpeciesId::Text("sea star/1#a".to_string());
        assert_eq!(endpoints.item_url(&id).as_str(), "https://reef.example.org/api/species/sea%20star%2F1%23a");
    }

    #[test]
    fn test_base_url_with_trailing_path() {
        let endpoints = Endpoints::new(" https://reef.example.org/api/v2/ ", Collection::Species).unwrap();
        assert_eq!(endpoints.item_url(&SpeciesId::Number(3)).as_str(), "https://reef.example.org/api/v2/species/3");
    }

    #[test]
    fn test_invalid_base_url() {
        assert!(matches!(Endpoints::new("not a url", Collection::Species), Err(ApiError::InvalidUrl { .. })));
        assert!(matches!(Endpoints::new("mailto:reef@example.org", Collection::Species), Err(ApiError::InvalidUrl { .. })));
    }

    #[test]
    fn test_error_display() {
        let err = ApiError::Status { status: 404, url: "http://x/species/9".to_string() };
        assert_eq!(err.to_string(), "HTTP status 404 from http://x/species/9");
    }

    #[cfg(not(target_arch = "wasm32"))]
    #[tokio::test]
    async fn test_unreachable_server_is_transport_error() {
        let config = ApiConfig { base_url: "http://127.0.0.1:1".to_string(), ..Default::default() };
        let api = HttpSpeciesApi::new(&config).unwrap();
        let result = api.list().await;
        assert!(matches!(result, Err(ApiError::Transport(_))));
    }
}
