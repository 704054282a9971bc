//! Native HTTP backend
//!
//! `reqwest` client with a cookie store, so the session cookie set by
//! `/login` rides along on every later call.

use async_trait::async_trait;
use reqwest::Client;
use serde_json::Value;
use std::time::Duration;

use super::{Backend, ClientError, ClientResult, Endpoint, Method};

/// Configuration for the HTTP backend
#[derive(Debug, Clone)]
pub struct HttpBackendConfig {
    /// Base URL of the prediction service (e.g., "http://127.0.0.1:5000")
    pub base_url: String,
    /// Per-request timeout. `None` waits as long as the backend takes,
    /// which training needs.
    pub request_timeout: Option<Duration>,
}

impl Default for HttpBackendConfig {
    fn default() -> Self {
        Self {
            base_url: "http://127.0.0.1:5000".to_string(),
            request_timeout: None,
        }
    }
}

/// Backend talking to the prediction service over HTTP
pub struct HttpBackend {
    client: Client,
    config: HttpBackendConfig,
}

impl HttpBackend {
    pub fn new(config: HttpBackendConfig) -> ClientResult<Self> {
        let mut builder = Client::builder().cookie_store(true);
        if let Some(timeout) = config.request_timeout {
            builder = builder.timeout(timeout);
        }
        let client = builder
            .build()
            .map_err(|e| ClientError::Network(format!("Failed to create HTTP client: {}", e)))?;

        Ok(Self { client, config })
    }

    pub fn config(&self) -> &HttpBackendConfig {
        &self.config
    }

    pub fn url(&self, endpoint: Endpoint) -> String {
        format!(
            "{}{}",
            self.config.base_url.trim_end_matches('/'),
            endpoint.path()
        )
    }

    /// Fetch the file behind one of the download endpoints.
    ///
    /// A backend that has nothing to offer answers with a JSON envelope
    /// instead of a file; that is surfaced as a rejection.
    pub async fn download(&self, endpoint: Endpoint) -> ClientResult<Vec<u8>> {
        let response = self
            .client
            .get(self.url(endpoint))
            .send()
            .await
            .map_err(transport_error)?;

        let is_json = response
            .headers()
            .get(reqwest::header::CONTENT_TYPE)
            .and_then(|v| v.to_str().ok())
            .map(|v| v.starts_with("application/json"))
            .unwrap_or(false);

        if is_json {
            let value: Value = response.json().await.map_err(transport_error)?;
            let message = value
                .get("message")
                .and_then(Value::as_str)
                .map(str::to_string);
            return Err(ClientError::Rejected { message });
        }

        if !response.status().is_success() {
            return Err(ClientError::Network(format!(
                "download failed with status {}",
                response.status()
            )));
        }

        let bytes = response.bytes().await.map_err(transport_error)?;
        tracing::debug!(endpoint = %endpoint, bytes = bytes.len(), "Downloaded file");
        Ok(bytes.to_vec())
    }
}

#[async_trait(?Send)]
impl Backend for HttpBackend {
    async fn send(&self, endpoint: Endpoint, body: Option<Value>) -> ClientResult<Value> {
        let url = self.url(endpoint);
        let request = match endpoint.method() {
            Method::Get => self.client.get(&url),
            Method::Post => self.client.post(&url).json(&body.unwrap_or(Value::Null)),
        };

        let response = request.send().await.map_err(transport_error)?;
        let status = response.status();

        // Rejections arrive with 4xx/5xx statuses but still carry the envelope
        let text = response.text().await.map_err(transport_error)?;
        serde_json::from_str(&text).map_err(|e| {
            tracing::warn!(endpoint = %endpoint, status = status.as_u16(), "Response is not JSON");
            ClientError::Malformed(e.to_string())
        })
    }
}

fn transport_error(e: reqwest::Error) -> ClientError {
    if e.is_timeout() {
        ClientError::Network("request timed out".to_string())
    } else if e.is_connect() {
        ClientError::Network("backend unavailable".to_string())
    } else {
        ClientError::Network(e.to_string())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_config() {
        let config = HttpBackendConfig::default();
        assert_eq!(config.base_url, "http://127.0.0.1:5000");
        assert!(config.request_timeout.is_none());
    }

    #[test]
    fn test_url_joins_without_double_slash() {
        let backend = HttpBackend::new(HttpBackendConfig {
            base_url: "http://crops.local:8000/".to_string(),
            request_timeout: Some(Duration::from_secs(5)),
        })
        .unwrap();

        assert_eq!(
            backend.url(Endpoint::TrainModels),
            "http://crops.local:8000/train-models"
        );
    }

    #[tokio::test]
    async fn test_unreachable_backend_is_network_error() {
        let backend = HttpBackend::new(HttpBackendConfig {
            base_url: "http://127.0.0.1:1".to_string(),
            request_timeout: Some(Duration::from_secs(2)),
        })
        .unwrap();

        let err = backend.send(Endpoint::GetDataset, None).await.unwrap_err();
        assert!(matches!(err, ClientError::Network(_)));
    }
}
