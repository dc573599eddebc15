//! Datadog APM trace fetcher
//!
//! Looks up the last 24 hours of traces for the sample booking service,
//! falling back across three API surfaces:
//!
//! 1. `GET /api/v2/apm/traces` (no filters)
//! 2. `GET /api/v2/apm/search/traces?start&end&service&limit=10`
//! 3. `GET /api/v1/events?start&end&sources=trace&tags=service:<name>`
//!
//! The first 200 response is printed as pretty JSON. Non-200 responses fall
//! through to the next endpoint; transport failures end the chain. The run
//! always finishes with remediation hints.

mod cascade;
mod endpoints;

pub use cascade::{Cascade, CascadeOutcome, FetchError};
pub use endpoints::{candidates, Endpoint, EndpointKind, TimeWindow};

use chrono::TimeZone;
use std::io::{self, Write};

use crate::config::FetcherConfig;
use crate::http::HttpTransport;

/// Printed after every run, whatever the outcome
pub const REMEDIATION: &str = "\
Note: If you're still getting errors, you may need to:
1. Ensure your API key has APM access permissions
2. Add an Application Key (DD_APP_KEY) to your environment
3. Verify that there are traces being sent to Datadog
4. Consider using the Datadog UI to view traces: https://app.datadoghq.com/apm/traces";

pub struct TraceFetcher<T> {
    config: FetcherConfig,
    transport: T,
}

impl<T: HttpTransport> TraceFetcher<T> {
    pub fn new(config: FetcherConfig, transport: T) -> Self {
        Self { config, transport }
    }

    pub fn transport(&self) -> &T {
        &self.transport
    }

    /// Run the fallback chain over `window` and write the report to `out`
    pub async fn run<W: Write>(&self, window: TimeWindow, out: &mut W) -> io::Result<CascadeOutcome> {
        writeln!(
            out,
            "Using API key: {}... and site: {}",
            self.config.api_key.prefix(5),
            self.config.site
        )?;
        writeln!(
            out,
            "Fetching traces from {} to {}",
            local_time(window.start),
            local_time(window.end)
        )?;

        let chain = candidates(&self.config, window);
        let outcome = Cascade::new(&self.transport).run(&chain, out).await?;

        if let CascadeOutcome::Aborted { error, .. } = &outcome {
            writeln!(out, "Exception occurred: {}", error)?;
        }

        writeln!(out)?;
        writeln!(out, "{}", REMEDIATION)?;

        Ok(outcome)
    }
}

fn local_time(unix_secs: i64) -> String {
    chrono::Local
        .timestamp_opt(unix_secs, 0)
        .single()
        .map(|t| t.format("%Y-%m-%d %H:%M:%S").to_string())
        .unwrap_or_else(|| unix_secs.to_string())
}
