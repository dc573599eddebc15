//! Simulated latency

use std::time::Duration;

/// Waits between and inside simulated operations
#[async_trait::async_trait]
pub trait Pacer: Send + Sync {
    async fn pause(&self, duration: Duration);
}

/// Sleeps for real on the tokio timer
#[derive(Debug, Clone, Copy, Default)]
pub struct RealTime;

#[async_trait::async_trait]
impl Pacer for RealTime {
    async fn pause(&self, duration: Duration) {
        tokio::time::sleep(duration).await;
    }
}

/// Records requested pauses without waiting
#[derive(Debug, Default)]
pub struct NoDelay {
    pauses: parking_lot::Mutex<Vec<Duration>>,
}

impl NoDelay {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn pauses(&self) -> Vec<Duration> {
        self.pauses.lock().clone()
    }

    pub fn total(&self) -> Duration {
        self.pauses.lock().iter().sum()
    }
}

#[async_trait::async_trait]
impl Pacer for NoDelay {
    async fn pause(&self, duration: Duration) {
        self.pauses.lock().push(duration);
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[tokio::test]
    async fn test_real_time_sleeps() {
        let start = tokio::time::Instant::now();
        RealTime.pause(Duration::from_millis(20)).await;
        assert!(start.elapsed() >= Duration::from_millis(20));
    }

    #[test]
    fn test_no_delay_records() {
        let pacer = NoDelay::new();
        tokio_test::block_on(async {
            pacer.pause(Duration::from_millis(100)).await;
            pacer.pause(Duration::from_millis(50)).await;
        });
        assert_eq!(pacer.pauses().len(), 2);
        assert_eq!(pacer.total(), Duration::from_millis(150));
    }
}
