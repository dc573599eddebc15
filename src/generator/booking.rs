//! Simulated booking workload
//!
//! Span tree per booking:
//!
//! ```text
//! booking_request
//! └── create_booking
//!     ├── process_booking
//!     │   └── database_query
//!     └── notification_service
//! ```

use rand::Rng;
use std::fmt;
use std::time::Duration;

use super::pacing::Pacer;
use super::SampleApp;

pub const SERVICE_TYPES: [&str; 5] = ["hotel", "flight", "car", "package", "cruise"];

/// Result of one simulated booking
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Booking {
    pub booking_id: u32,
    pub status: String,
}

impl fmt::Display for Booking {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "{{'booking_id': {}, 'status': '{}'}}",
            self.booking_id, self.status
        )
    }
}

impl<R: Rng, P: Pacer> SampleApp<R, P> {
    /// Top-level span around one booking
    pub async fn booking_request(&mut self, customer_id: u32, service_type: &str) -> Booking {
        let span = self.tracer.start_span("booking_request");
        let request_id: u32 = self.rng.gen_range(100_000..=999_999);
        span.set_attribute("request.id", format!("req-{}", request_id));

        self.create_booking(customer_id, service_type).await
    }

    pub async fn create_booking(&mut self, customer_id: u32, service_type: &str) -> Booking {
        let span = self.tracer.start_span("create_booking");
        span.set_attribute("customer.id", i64::from(customer_id));
        span.set_attribute("service.type", service_type.to_string());

        let booking_id: u32 = self.rng.gen_range(10_000..=99_999);
        span.set_attribute("booking.id", i64::from(booking_id));

        let booking = self.process_booking(booking_id).await;

        {
            let notify = self.tracer.start_span("notification_service");
            notify.set_attribute("notification.type", "email");
            notify.set_attribute(
                "notification.recipient",
                format!("customer-{}@example.com", customer_id),
            );

            let api_time = self.rng.gen_range(0.2..=0.8);
            self.pacer.pause(Duration::from_secs_f64(api_time)).await;
            notify.set_attribute("api.response_time_ms", api_time * 1000.0);
        }

        booking
    }

    pub async fn process_booking(&mut self, booking_id: u32) -> Booking {
        let span = self.tracer.start_span("process_booking");
        span.set_attribute("booking.id", i64::from(booking_id));

        let processing_time = self.rng.gen_range(0.1..=0.5);
        self.pacer
            .pause(Duration::from_secs_f64(processing_time))
            .await;
        span.set_attribute("processing.time_ms", processing_time * 1000.0);

        {
            let db_span = self.tracer.start_span("database_query");
            db_span.set_attribute("db.system", "postgresql");
            db_span.set_attribute(
                "db.statement",
                format!("SELECT * FROM bookings WHERE id = {}", booking_id),
            );
            db_span.set_attribute("db.operation", "SELECT");
            db_span.set_attribute("booking.id", i64::from(booking_id));

            let query_time = self.rng.gen_range(0.05..=0.2);
            self.pacer.pause(Duration::from_secs_f64(query_time)).await;
            db_span.set_attribute("db.query_time_ms", query_time * 1000.0);
        }

        Booking {
            booking_id,
            status: "processed".to_string(),
        }
    }
}
