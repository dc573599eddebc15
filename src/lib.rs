//! Traceprobe: Datadog APM trace fetcher and synthetic trace generator
//!
//! Two small programs for checking that traces from the `sample-booking-app`
//! service make it end to end:
//!
//! - `fetch-traces` asks the Datadog API for the last 24 hours of traces,
//!   falling back across three endpoints until one answers 200.
//! - `sample-app` emits a fixed workload of nested spans (simulated bookings
//!   and a few outbound HTTP calls) to an OTLP/HTTP collector.
//!
//! # Example
//!
//! ```no_run
//! use traceprobe::config::GeneratorConfig;
//! use traceprobe::generator::{RealTime, SampleApp};
//! use traceprobe::http::ReqwestTransport;
//! use traceprobe::otel::configure_otel;
//! use std::sync::Arc;
//!
//! # async fn example() -> Result<(), Box<dyn std::error::Error>> {
//! let config = GeneratorConfig::from_env();
//! let tracer = configure_otel(&config.service_name, &config.otlp_endpoint)?;
//! let transport = Arc::new(ReqwestTransport::with_timeout(config.request_timeout));
//!
//! let mut app = SampleApp::new(config, tracer.clone(), transport, rand::thread_rng(), RealTime);
//! app.run(&mut std::io::stdout()).await?;
//! tracer.shutdown();
//! # Ok(())
//! # }
//! ```

pub mod config;
pub mod fetcher;
pub mod generator;
pub mod http;
pub mod logging;
pub mod otel;

// Re-export commonly used types
pub use config::{FetcherConfig, GeneratorConfig, Secret};
pub use fetcher::{CascadeOutcome, TraceFetcher};
pub use generator::SampleApp;
pub use otel::{configure_otel, OtelError, Tracer};
