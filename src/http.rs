//! Outbound HTTP transport
//!
//! The fetcher and the sample app only ever issue GET requests. They talk to
//! an [`HttpTransport`] so tests can script responses without a network.

use std::time::Duration;

/// A GET request: URL, headers and query parameters
#[derive(Debug, Clone, Default, PartialEq)]
pub struct HttpRequest {
    pub url: String,
    pub headers: Vec<(String, String)>,
    pub query: Vec<(String, String)>,
}

impl HttpRequest {
    pub fn get(url: impl Into<String>) -> Self {
        Self {
            url: url.into(),
            ..Self::default()
        }
    }

    pub fn with_header(mut self, name: impl Into<String>, value: impl Into<String>) -> Self {
        self.headers.push((name.into(), value.into()));
        self
    }

    pub fn with_query(mut self, name: impl Into<String>, value: impl ToString) -> Self {
        self.query.push((name.into(), value.to_string()));
        self
    }
}

/// Status and raw body of a completed request
#[derive(Debug, Clone, PartialEq)]
pub struct HttpResponse {
    pub status: u16,
    pub body: String,
}

impl HttpResponse {
    pub fn is_ok(&self) -> bool {
        self.status == 200
    }
}

#[async_trait::async_trait]
pub trait HttpTransport: Send + Sync {
    /// Issue a GET. Non-2xx statuses are responses, not errors.
    async fn get(&self, request: &HttpRequest) -> Result<HttpResponse, TransportError>;
}

/// [`HttpTransport`] backed by a reqwest client
#[derive(Debug, Clone)]
pub struct ReqwestTransport {
    client: reqwest::Client,
}

impl ReqwestTransport {
    /// Client without a request timeout
    pub fn new() -> Self {
        Self {
            client: reqwest::Client::builder()
                .build()
                .expect("Failed to create HTTP client"),
        }
    }

    pub fn with_timeout(timeout: Duration) -> Self {
        Self {
            client: reqwest::Client::builder()
                .timeout(timeout)
                .build()
                .expect("Failed to create HTTP client"),
        }
    }
}

impl Default for ReqwestTransport {
    fn default() -> Self {
        Self::new()
    }
}

#[async_trait::async_trait]
impl HttpTransport for ReqwestTransport {
    async fn get(&self, request: &HttpRequest) -> Result<HttpResponse, TransportError> {
        let mut builder = self.client.get(&request.url);
        for (name, value) in &request.headers {
            builder = builder.header(name, value);
        }
        if !request.query.is_empty() {
            builder = builder.query(&request.query);
        }

        let response = builder
            .send()
            .await
            .map_err(|e| TransportError::from_reqwest(&request.url, e))?;
        let status = response.status().as_u16();
        let body = response
            .text()
            .await
            .map_err(|e| TransportError::from_reqwest(&request.url, e))?;

        tracing::debug!(url = %request.url, status, bytes = body.len(), "GET completed");

        Ok(HttpResponse { status, body })
    }
}

#[derive(Debug, thiserror::Error)]
pub enum TransportError {
    #[error("Request to {url} timed out")]
    Timeout { url: String },

    #[error("Connection to {url} failed: {message}")]
    Connect { url: String, message: String },

    #[error("Request to {url} failed: {message}")]
    Request { url: String, message: String },
}

impl TransportError {
    fn from_reqwest(url: &str, error: reqwest::Error) -> Self {
        let url = url.to_string();
        if error.is_timeout() {
            TransportError::Timeout { url }
        } else if error.is_connect() {
            TransportError::Connect {
                url,
                message: error.to_string(),
            }
        } else {
            TransportError::Request {
                url,
                message: error.to_string(),
            }
        }
    }
}
