//! Span layer for the sample app
//!
//! A thin wrapper over the OpenTelemetry SDK. Spans are opened with
//! [`Tracer::start_span`] and close when their [`SpanScope`] is dropped, so
//! nesting follows lexical scope. Finished spans go through a batch span
//! processor to an OTLP/HTTP exporter:
//!
//! ```bash
//! # Point the sample app at a collector
//! OTEL_EXPORTER_OTLP_ENDPOINT=http://localhost:4318/v1/traces
//! ```

mod tracer;

pub use tracer::{SpanScope, Tracer};

use opentelemetry_otlp::{SpanExporter, WithExportConfig};
use opentelemetry_sdk::trace::SdkTracerProvider;
use opentelemetry_sdk::Resource;
use std::time::Duration;
use thiserror::Error;

/// Upper bound on a single OTLP POST
pub const EXPORT_TIMEOUT: Duration = Duration::from_secs(5);

#[derive(Debug, Error)]
pub enum OtelError {
    #[error("Failed to build OTLP exporter for {endpoint}: {message}")]
    Exporter { endpoint: String, message: String },
}

/// Build a tracer for `service_name` exporting to an OTLP/HTTP `endpoint`
///
/// `endpoint` is the full traces URL. Export runs on the batch processor's
/// own thread, so a slow or silent collector never stalls span creation.
pub fn configure_otel(service_name: &str, endpoint: &str) -> Result<Tracer, OtelError> {
    tracing::info!(service = service_name, endpoint, "Configuring OTLP exporter");

    let exporter = SpanExporter::builder()
        .with_http()
        .with_endpoint(endpoint)
        .with_timeout(EXPORT_TIMEOUT)
        .build()
        .map_err(|e| OtelError::Exporter {
            endpoint: endpoint.to_string(),
            message: e.to_string(),
        })?;

    let provider = SdkTracerProvider::builder()
        .with_resource(service_resource(service_name))
        .with_batch_exporter(exporter)
        .build();

    Ok(Tracer::new(provider))
}

/// Resource identifying every span as coming from `service_name`
pub fn service_resource(service_name: &str) -> Resource {
    Resource::builder()
        .with_service_name(service_name.to_string())
        .build()
}

#[cfg(test)]
pub(crate) mod testing {
    use opentelemetry::{KeyValue, Value};
    use opentelemetry_sdk::trace::{InMemorySpanExporter, SdkTracerProvider, SpanData};

    use super::{service_resource, Tracer};

    /// Tracer that exports each span synchronously into memory
    pub(crate) fn in_memory_tracer(service_name: &str) -> (Tracer, InMemorySpanExporter) {
        let exporter = InMemorySpanExporter::default();
        let provider = SdkTracerProvider::builder()
            .with_resource(service_resource(service_name))
            .with_simple_exporter(exporter.clone())
            .build();
        (Tracer::new(provider), exporter)
    }

    pub(crate) fn finished(exporter: &InMemorySpanExporter) -> Vec<SpanData> {
        exporter.get_finished_spans().unwrap()
    }

    pub(crate) fn attr<'a>(span: &'a SpanData, key: &str) -> Option<&'a Value> {
        find_kv(&span.attributes, key)
    }

    pub(crate) fn attr_str(span: &SpanData, key: &str) -> Option<String> {
        attr(span, key).map(|v| v.as_str().into_owned())
    }

    pub(crate) fn find_kv<'a>(attributes: &'a [KeyValue], key: &str) -> Option<&'a Value> {
        attributes
            .iter()
            .find(|kv| kv.key.as_str() == key)
            .map(|kv| &kv.value)
    }

    pub(crate) fn as_f64(value: Option<&Value>) -> Option<f64> {
        match value {
            Some(Value::F64(v)) => Some(*v),
            _ => None,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::net::TcpListener;
    use std::sync::mpsc;
    use std::time::Instant;

    /// Collector that accepts connections and never answers
    fn silent_collector() -> String {
        let listener = TcpListener::bind("127.0.0.1:0").unwrap();
        let addr = listener.local_addr().unwrap();
        std::thread::spawn(move || {
            let mut held = Vec::new();
            for stream in listener.incoming().flatten() {
                held.push(stream);
            }
        });
        format!("http://{}/v1/traces", addr)
    }

    #[test]
    fn test_service_resource() {
        let resource = service_resource("sample-booking-app");
        let name = resource
            .get(&opentelemetry::Key::new("service.name"))
            .map(|v| v.as_str().into_owned());
        assert_eq!(name.as_deref(), Some("sample-booking-app"));
    }

    #[test]
    fn test_configure_otel_rejects_bad_endpoint() {
        let err = configure_otel("sample-booking-app", "not a url").unwrap_err();
        assert!(err.to_string().contains("not a url"));
    }

    #[test]
    fn test_silent_collector_does_not_block_spans() {
        let tracer = configure_otel("sample-booking-app", &silent_collector()).unwrap();

        // more than one batch worth, so the exporter is already stuck on a POST
        let started = Instant::now();
        for i in 0..1200i64 {
            let span = tracer.start_span("booking_request");
            span.set_attribute("request.id", format!("req-{}", i));
        }
        assert!(started.elapsed() < Duration::from_secs(2));

        let (done_tx, done_rx) = mpsc::channel();
        std::thread::spawn(move || {
            tracer.shutdown();
            let _ = done_tx.send(());
        });
        assert!(
            done_rx.recv_timeout(Duration::from_secs(30)).is_ok(),
            "shutdown did not return against a silent collector"
        );
    }
}
