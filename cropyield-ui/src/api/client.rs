//! HTTP API Client
//!
//! `Backend` implementation over the browser's fetch API. The session
//! cookie is handled by the browser, so requests only need the right URL.

use async_trait::async_trait;
use gloo_net::http::Request;
use serde_json::Value;

use cropyield::api::{Backend, ClientError, ClientResult, Endpoint, Method};

/// Same origin as the page by default
pub const DEFAULT_API_BASE: &str = "";

const API_BASE_KEY: &str = "cropyield_api_url";

/// Get the API base URL from local storage or use default
pub fn get_api_base() -> String {
    let url = web_sys::window()
        .and_then(|window| window.local_storage().ok().flatten())
        .and_then(|storage| storage.get_item(API_BASE_KEY).ok().flatten())
        .unwrap_or_else(|| DEFAULT_API_BASE.to_string());
    normalize_base(&url)
}

fn normalize_base(url: &str) -> String {
    url.trim_end_matches('/').to_string()
}

/// Full URL of an endpoint under `base`
pub fn endpoint_url(base: &str, endpoint: Endpoint) -> String {
    format!("{}{}", base, endpoint.path())
}

#[derive(Debug, Clone)]
pub struct GlooBackend {
    base: String,
}

impl Default for GlooBackend {
    fn default() -> Self {
        Self::new(get_api_base())
    }
}

impl GlooBackend {
    pub fn new(base: impl Into<String>) -> Self {
        Self {
            base: normalize_base(&base.into()),
        }
    }

    pub fn url(&self, endpoint: Endpoint) -> String {
        endpoint_url(&self.base, endpoint)
    }

    /// Absolute location of a server path such as a download
    pub fn resolve(&self, path: &str) -> String {
        format!("{}{}", self.base, path)
    }
}

#[async_trait(?Send)]
impl Backend for GlooBackend {
    async fn send(&self, endpoint: Endpoint, body: Option<Value>) -> ClientResult<Value> {
        let url = self.url(endpoint);

        let builder = match endpoint.method() {
            Method::Get => Request::get(&url),
            Method::Post => Request::post(&url),
        };

        let response = match body {
            Some(body) => builder
                .json(&body)
                .map_err(|e| ClientError::Network(format!("Request build error: {}", e)))?
                .send()
                .await,
            None => builder.send().await,
        }
        .map_err(|e| ClientError::Network(e.to_string()))?;

        // Error statuses still carry the JSON envelope
        let text = response
            .text()
            .await
            .map_err(|e| ClientError::Network(e.to_string()))?;

        serde_json::from_str(&text).map_err(|e| {
            ClientError::Malformed(format!("{} returned non-JSON body: {}", endpoint, e))
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_endpoint_url_joins_base() {
        let backend = GlooBackend::new("http://localhost:5000/");
        assert_eq!(
            backend.url(Endpoint::TrainModels),
            "http://localhost:5000/train-models"
        );
    }

    #[test]
    fn test_resolve_download_path() {
        let backend = GlooBackend::new("https://crops.example.org");
        assert_eq!(
            backend.resolve("/download-predictions"),
            "https://crops.example.org/download-predictions"
        );
    }

    #[test]
    fn test_same_origin_base() {
        assert_eq!(endpoint_url(DEFAULT_API_BASE, Endpoint::GetDataset), "/get-dataset");
    }
}
