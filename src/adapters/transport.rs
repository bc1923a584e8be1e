//! Transport port for the generation service and its reqwest implementation

use async_trait::async_trait;
use bytes::Bytes;
use reqwest::header::CONTENT_TYPE;
use reqwest::Client;
use std::time::Duration;
use tracing::debug;

use super::error::{RequestError, RequestResult};
use crate::config::ServiceSettings;

/// Raw answer of the generation service, before classification
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TransportResponse {
    pub status: u16,
    pub body: Bytes,
}

impl TransportResponse {
    pub fn new(status: u16, body: impl Into<Bytes>) -> Self {
        Self {
            status,
            body: body.into(),
        }
    }

    pub fn is_success(&self) -> bool {
        (200..300).contains(&self.status)
    }
}

/// Sends a JSON schema body to the generation endpoint
#[async_trait]
pub trait GenerationTransport: Send + Sync {
    /// POST `body` as `application/json` and return status plus raw body.
    /// Non-success statuses are returned as responses, not errors.
    async fn post(&self, body: Bytes) -> RequestResult<TransportResponse>;

    /// Where requests go, for logging
    fn endpoint(&self) -> &str;
}

/// HTTP transport backed by reqwest
pub struct HttpTransport {
    client: Client,
    endpoint: String,
    timeout_seconds: u64,
}

impl HttpTransport {
    pub fn new(settings: &ServiceSettings) -> RequestResult<Self> {
        let client = Client::builder()
            .timeout(Duration::from_secs(settings.timeout_seconds))
            .build()?;

        Ok(Self {
            client,
            endpoint: settings.endpoint.clone(),
            timeout_seconds: settings.timeout_seconds,
        })
    }

    fn classify(&self, err: reqwest::Error) -> RequestError {
        if err.is_timeout() {
            RequestError::Timeout(self.timeout_seconds)
        } else {
            err.into()
        }
    }
}

#[async_trait]
impl GenerationTransport for HttpTransport {
    async fn post(&self, body: Bytes) -> RequestResult<TransportResponse> {
        debug!(endpoint = %self.endpoint, bytes = body.len(), "Posting schema");

        let response = self
            .client
            .post(&self.endpoint)
            .header(CONTENT_TYPE, "application/json")
            .body(body)
            .send()
            .await
            .map_err(|e| self.classify(e))?;

        let status = response.status().as_u16();
        let body = response.bytes().await.map_err(|e| self.classify(e))?;

        Ok(TransportResponse { status, body })
    }

    fn endpoint(&self) -> &str {
        &self.endpoint
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_success_range() {
        assert!(TransportResponse::new(200, "a,b\n").is_success());
        assert!(TransportResponse::new(204, "").is_success());
        assert!(!TransportResponse::new(302, "").is_success());
        assert!(!TransportResponse::new(404, "").is_success());
    }

    #[test]
    fn test_http_transport_keeps_endpoint() {
        let settings = ServiceSettings {
            endpoint: "http://localhost:8080/generate".to_string(),
            timeout_seconds: 5,
        };
        let transport = HttpTransport::new(&settings).unwrap();
        assert_eq!(transport.endpoint(), "http://localhost:8080/generate");
    }
}
