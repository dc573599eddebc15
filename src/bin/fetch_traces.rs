//! Fetch recent APM traces from Datadog
//!
//! Run with: cargo run --bin fetch-traces
//!
//! Environment variables:
//! - DD_API_KEY: Datadog API key
//! - DD_APP_KEY: Datadog application key (optional)
//! - DD_SITE: Datadog site (default: datadoghq.com)
//! - RUST_LOG: Log level (default: traceprobe=info)

use traceprobe::fetcher::{TimeWindow, TraceFetcher};
use traceprobe::http::ReqwestTransport;
use traceprobe::FetcherConfig;

#[tokio::main(flavor = "current_thread")]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    traceprobe::logging::init();

    let config = FetcherConfig::from_env();
    tracing::debug!(site = %config.site, service = %config.service, "Fetcher configuration");

    // No request timeout here; an unresponsive host blocks the run
    let fetcher = TraceFetcher::new(config, ReqwestTransport::new());

    let mut stdout = std::io::stdout();
    let outcome = fetcher.run(TimeWindow::ending_now(), &mut stdout).await?;
    tracing::debug!(success = outcome.is_success(), "Fetch finished");

    Ok(())
}
