//! Ordered fallback across endpoints
//!
//! Candidates are tried in order. The chain stops at the first HTTP 200,
//! moves on after any other status, and aborts outright when a request fails
//! below HTTP or a 200 body is not valid JSON.

use std::io::{self, Write};

use super::endpoints::{Endpoint, EndpointKind};
use crate::http::{HttpResponse, HttpTransport, TransportError};

/// How a fallback chain ended
#[derive(Debug)]
pub enum CascadeOutcome {
    /// An endpoint answered 200 with a JSON body
    Success {
        endpoint: EndpointKind,
        body: serde_json::Value,
    },
    /// Every endpoint answered with a non-200 status
    Exhausted { last: Option<HttpResponse> },
    /// A request failed outright; later endpoints were not tried
    Aborted {
        endpoint: EndpointKind,
        error: FetchError,
    },
}

impl CascadeOutcome {
    pub fn is_success(&self) -> bool {
        matches!(self, CascadeOutcome::Success { .. })
    }
}

#[derive(Debug, thiserror::Error)]
pub enum FetchError {
    #[error("{0}")]
    Transport(#[from] TransportError),

    #[error("Invalid JSON in response body: {0}")]
    Decode(#[from] serde_json::Error),
}

/// Runs a fallback chain over a transport, reporting each step to `out`
pub struct Cascade<'a> {
    transport: &'a dyn HttpTransport,
}

impl<'a> Cascade<'a> {
    pub fn new(transport: &'a dyn HttpTransport) -> Self {
        Self { transport }
    }

    pub async fn run<W: Write>(
        &self,
        candidates: &[Endpoint],
        out: &mut W,
    ) -> io::Result<CascadeOutcome> {
        let mut last = None;

        for endpoint in candidates {
            writeln!(out, "{}", endpoint.kind.announce(&endpoint.request.url))?;

            let response = match self.transport.get(&endpoint.request).await {
                Ok(response) => response,
                Err(e) => {
                    tracing::warn!(endpoint = ?endpoint.kind, error = %e, "request failed, aborting");
                    return Ok(CascadeOutcome::Aborted {
                        endpoint: endpoint.kind,
                        error: e.into(),
                    });
                }
            };

            if response.is_ok() {
                let body: serde_json::Value = match serde_json::from_str(&response.body) {
                    Ok(body) => body,
                    Err(e) => {
                        return Ok(CascadeOutcome::Aborted {
                            endpoint: endpoint.kind,
                            error: e.into(),
                        });
                    }
                };
                writeln!(out, "{}", endpoint.kind.success_line())?;
                // serde_json's pretty printer indents by two spaces
                let pretty = serde_json::to_string_pretty(&body).unwrap_or_default();
                writeln!(out, "{}", pretty)?;
                tracing::info!(endpoint = ?endpoint.kind, "traces fetched");
                return Ok(CascadeOutcome::Success {
                    endpoint: endpoint.kind,
                    body,
                });
            }

            writeln!(out, "{}", endpoint.kind.error_line(response.status))?;
            writeln!(out, "{}", response.body)?;
            tracing::debug!(endpoint = ?endpoint.kind, status = response.status, "falling through");
            last = Some(response);
        }

        Ok(CascadeOutcome::Exhausted { last })
    }
}
