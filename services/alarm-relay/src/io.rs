//! HTTP client abstraction for testability

use std::time::Duration;

use async_trait::async_trait;
use reqwest::header::CONTENT_TYPE;

/// HTTP response from a request
#[derive(Debug, Clone)]
pub struct HttpResponse {
    pub status: u16,
    pub body: String,
}

/// Abstraction over HTTP client for dependency injection
#[async_trait]
#[cfg_attr(test, mockall::automock)]
pub trait HttpClient: Send + Sync {
    /// Send a POST request with a JSON body
    async fn post_json(&self, url: &str, body: String) -> crate::Result<HttpResponse>;
}

/// Production HTTP client using reqwest
pub struct ReqwestHttpClient {
    client: reqwest::Client,
}

impl ReqwestHttpClient {
    /// Build a client whose requests give up after `timeout`
    pub fn new(timeout: Duration) -> crate::Result<Self> {
        let client = reqwest::Client::builder()
            .timeout(timeout)
            .build()
            .map_err(|e| crate::RelayError::Http(format!("Building HTTP client: {}", e)))?;
        Ok(Self { client })
    }
}

#[async_trait]
impl HttpClient for ReqwestHttpClient {
    async fn post_json(&self, url: &str, body: String) -> crate::Result<HttpResponse> {
        tracing::debug!("POST {} ({} bytes)", url, body.len());
        let response = self
            .client
            .post(url)
            .header(CONTENT_TYPE, "application/json")
            .body(body)
            .send()
            .await
            .map_err(|e| crate::RelayError::Http(format!("POST {} failed: {}", url, e)))?;

        let status = response.status().as_u16();
        let body = response
            .text()
            .await
            .map_err(|e| crate::RelayError::Http(format!("Reading response body: {}", e)))?;

        tracing::debug!("POST {} -> {} ({} bytes)", url, status, body.len());
        Ok(HttpResponse { status, body })
    }
}
