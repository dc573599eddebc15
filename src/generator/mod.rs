//! Synthetic trace generator
//!
//! Drives a fake booking service: a fixed number of bookings, each a small
//! tree of nested spans with simulated latency, followed by a handful of
//! real outbound GETs. Ended spans are handed to the tracer's batch
//! processor, which exports them in the background while the workload keeps
//! its own pace.

mod booking;
mod outbound;
mod pacing;

pub use booking::{Booking, SERVICE_TYPES};
pub use pacing::{NoDelay, Pacer, RealTime};

use rand::Rng;
use std::io::{self, Write};
use std::sync::Arc;
use std::time::Duration;

use crate::config::GeneratorConfig;
use crate::http::HttpTransport;
use crate::otel::Tracer;

/// What a run produced
#[derive(Debug, Default)]
pub struct RunSummary {
    pub bookings: Vec<Booking>,
    pub requests_sent: usize,
    pub requests_failed: usize,
}

pub struct SampleApp<R, P> {
    config: GeneratorConfig,
    tracer: Tracer,
    transport: Arc<dyn HttpTransport>,
    rng: R,
    pacer: P,
}

impl<R: Rng, P: Pacer> SampleApp<R, P> {
    pub fn new(
        config: GeneratorConfig,
        tracer: Tracer,
        transport: Arc<dyn HttpTransport>,
        rng: R,
        pacer: P,
    ) -> Self {
        Self {
            config,
            tracer,
            transport,
            rng,
            pacer,
        }
    }

    pub fn pacer(&self) -> &P {
        &self.pacer
    }

    /// Run the booking workload, then the outbound calls
    pub async fn run<W: Write>(&mut self, out: &mut W) -> io::Result<RunSummary> {
        let mut summary = RunSummary::default();
        writeln!(out, "Sending traces to: {}", self.config.otlp_endpoint)?;

        for i in 0..self.config.bookings {
            let customer_id: u32 = self.rng.gen_range(1000..=9999);
            let service_type = SERVICE_TYPES[self.rng.gen_range(0..SERVICE_TYPES.len())];

            let booking = self.booking_request(customer_id, service_type).await;
            writeln!(out, "Created booking: {}", booking)?;
            tracing::debug!(iteration = i, booking_id = booking.booking_id, service_type, "booking done");
            summary.bookings.push(booking);

            self.pause_between(0.5, 2.0).await;
        }

        let urls = self.config.outbound_urls.clone();
        for url in &urls {
            summary.requests_sent += 1;
            if self.make_request(url).await.is_none() {
                summary.requests_failed += 1;
            }
            self.pause_between(0.5, 1.5).await;
        }

        writeln!(out, "Completed sending sample traces")?;

        tracing::info!(
            bookings = summary.bookings.len(),
            requests = summary.requests_sent,
            failed = summary.requests_failed,
            "Sample run finished"
        );
        Ok(summary)
    }

    async fn pause_between(&mut self, min_secs: f64, max_secs: f64) {
        let secs = self.rng.gen_range(min_secs..=max_secs);
        self.pacer.pause(Duration::from_secs_f64(secs)).await;
    }
}
