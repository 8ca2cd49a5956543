//! Outbound JSON-over-HTTP transport
//!
//! Both upstreams (the Tally GraphQL API and the Ethereum JSON-RPC provider)
//! take a JSON body via `POST` to a fixed URL, so one seam covers both.

use std::time::Duration;

use async_trait::async_trait;
use reqwest::header::{HeaderMap, HeaderValue, CONTENT_TYPE};
use serde::de::DeserializeOwned;
use serde_json::Value;

use crate::services::{ServiceError, ServiceResult};

/// Raw upstream response; status and body are kept as returned
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct UpstreamResponse {
    pub status: u16,
    pub body: String,
}

impl UpstreamResponse {
    pub fn new(status: u16, body: impl Into<String>) -> Self {
        Self {
            status,
            body: body.into(),
        }
    }

    /// Check for a 2xx status
    #[inline]
    pub fn is_success(&self) -> bool {
        (200..300).contains(&self.status)
    }

    /// Check for 429 Too Many Requests
    #[inline]
    pub fn is_rate_limited(&self) -> bool {
        self.status == 429
    }

    /// Decode the body as JSON
    pub fn json<T: DeserializeOwned>(&self) -> Result<T, serde_json::Error> {
        serde_json::from_str(&self.body)
    }
}

/// A single JSON `POST` to a fixed endpoint.
///
/// Only network-level failures are errors; every HTTP status is returned as
/// an [`UpstreamResponse`].
#[async_trait]
pub trait JsonTransport: Send + Sync {
    async fn post(&self, body: &Value) -> ServiceResult<UpstreamResponse>;
}

/// `reqwest`-backed transport
#[derive(Debug, Clone)]
pub struct HttpTransport {
    client: reqwest::Client,
    url: String,
}

impl HttpTransport {
    /// Build a transport that sends `headers` on every request
    pub fn new(url: impl Into<String>, timeout: Duration, mut headers: HeaderMap) -> ServiceResult<Self> {
        headers.insert(CONTENT_TYPE, HeaderValue::from_static("application/json"));

        let client = reqwest::Client::builder()
            .timeout(timeout)
            .default_headers(headers)
            .build()
            .map_err(|e| ServiceError::Configuration(format!("Failed to build HTTP client: {e}")))?;

        Ok(Self {
            client,
            url: url.into(),
        })
    }

    /// Transport for the Tally API, authenticated with the `Api-Key` header
    pub fn tally(url: impl Into<String>, api_key: &str, timeout: Duration) -> ServiceResult<Self> {
        let mut headers = HeaderMap::new();
        let value = HeaderValue::from_str(api_key)
            .map_err(|_| ServiceError::Configuration("Tally API key is not a valid header value".to_string()))?;
        headers.insert("Api-Key", value);
        Self::new(url, timeout, headers)
    }

    /// Unauthenticated JSON-RPC transport
    pub fn json_rpc(url: impl Into<String>, timeout: Duration) -> ServiceResult<Self> {
        Self::new(url, timeout, HeaderMap::new())
    }

    pub fn url(&self) -> &str {
        &self.url
    }
}

#[async_trait]
impl JsonTransport for HttpTransport {
    async fn post(&self, body: &Value) -> ServiceResult<UpstreamResponse> {
        let response = self
            .client
            .post(&self.url)
            .json(body)
            .send()
            .await
            .map_err(|e| ServiceError::Transport(e.to_string()))?;

        let status = response.status().as_u16();
        let body = response
            .text()
            .await
            .map_err(|e| ServiceError::Transport(e.to_string()))?;

        Ok(UpstreamResponse { status, body })
    }
}
