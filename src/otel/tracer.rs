use opentelemetry::trace::{Status, TraceContextExt, Tracer as _, TracerProvider as _};
use opentelemetry::{Context, ContextGuard, Key, KeyValue, Value};
use opentelemetry_sdk::trace::{SdkTracer, SdkTracerProvider};
use std::error::Error;

/// Opens spans nested under the current context
///
/// A new span's parent is the innermost [`SpanScope`] still alive on this
/// thread. The sample app runs on a current-thread runtime, so the context
/// stays with the workload across awaits.
#[derive(Clone, Debug)]
pub struct Tracer {
    provider: SdkTracerProvider,
    tracer: SdkTracer,
}

impl Tracer {
    pub fn new(provider: SdkTracerProvider) -> Self {
        let tracer = provider.tracer(env!("CARGO_PKG_NAME"));
        Self { provider, tracer }
    }

    /// Open a span as a child of the current scope (or as a new root)
    pub fn start_span(&self, name: &'static str) -> SpanScope {
        let span = self.tracer.start(name);
        let cx = Context::current_with_span(span);
        let guard = cx.clone().attach();
        SpanScope { cx, _guard: guard }
    }

    /// Flush and stop the export pipeline
    pub fn shutdown(&self) {
        if let Err(e) = self.provider.shutdown() {
            tracing::warn!(error = %e, "Failed to shut down tracer");
        }
    }
}

/// An open span, current for as long as it lives
///
/// Dropping the scope ends the span and restores the previous context, so
/// early returns and unwinding still close it exactly once.
pub struct SpanScope {
    cx: Context,
    _guard: ContextGuard,
}

impl SpanScope {
    pub fn set_attribute(&self, key: impl Into<Key>, value: impl Into<Value>) {
        self.cx.span().set_attribute(KeyValue::new(key, value));
    }

    pub fn set_status(&self, status: Status) {
        self.cx.span().set_status(status);
    }

    /// Add an `exception` event carrying the error's message
    pub fn record_exception(&self, err: &dyn Error) {
        self.cx.span().record_error(err);
    }
}

impl Drop for SpanScope {
    fn drop(&mut self) {
        self.cx.span().end();
    }
}
