use opentelemetry::trace::Status;
use rand::Rng;

use super::pacing::Pacer;
use super::SampleApp;
use crate::http::HttpRequest;

impl<R: Rng, P: Pacer> SampleApp<R, P> {
    /// GET `url` inside an `http_request` span
    ///
    /// Failures are recorded on the span and swallowed; the body is returned
    /// only when a response arrived.
    pub async fn make_request(&mut self, url: &str) -> Option<String> {
        let span = self.tracer.start_span("http_request");
        span.set_attribute("http.url", url.to_string());
        span.set_attribute("http.method", "GET");

        match self.transport.get(&HttpRequest::get(url)).await {
            Ok(response) => {
                span.set_attribute("http.status_code", i64::from(response.status));
                Some(response.body)
            }
            Err(e) => {
                tracing::warn!(url, error = %e, "Outbound request failed");
                span.record_exception(&e);
                span.set_status(Status::error(e.to_string()));
                None
            }
        }
    }
}
