//! Sample booking app that emits traces to an OTLP collector
//!
//! Run with: cargo run --bin sample-app
//!
//! Environment variables:
//! - OTEL_EXPORTER_OTLP_ENDPOINT: OTLP/HTTP traces endpoint
//!   (default: http://localhost:4318/v1/traces)
//! - RUST_LOG: Log level (default: traceprobe=info)

use std::sync::Arc;

use traceprobe::generator::{RealTime, SampleApp};
use traceprobe::http::ReqwestTransport;
use traceprobe::{configure_otel, GeneratorConfig};

fn main() -> Result<(), Box<dyn std::error::Error>> {
    traceprobe::logging::init();

    let config = GeneratorConfig::from_env();
    // OTLP export uses a blocking client: build and shut down outside the runtime
    let tracer = configure_otel(&config.service_name, &config.otlp_endpoint)?;
    let transport = Arc::new(ReqwestTransport::with_timeout(config.request_timeout));

    let mut app = SampleApp::new(
        config,
        tracer.clone(),
        transport,
        rand::thread_rng(),
        RealTime,
    );

    let runtime = tokio::runtime::Builder::new_current_thread()
        .enable_all()
        .build()?;
    let result = runtime.block_on(app.run(&mut std::io::stdout()));

    tracer.shutdown();
    result?;
    Ok(())
}
