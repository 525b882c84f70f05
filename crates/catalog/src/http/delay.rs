//! Fixed pre-request delay.
//!
//! Every call waits the same amount of time before it is issued. The delay is
//! per call, not a shared budget: concurrent calls wait side by side and do
//! not throttle each other.

use std::time::Duration;
use tokio::time::sleep;

/// Fixed delay applied before each request
#[derive(Debug, Clone, Copy)]
pub struct RequestDelay {
    delay: Duration,
}

impl RequestDelay {
    /// Create a delay of `millis` milliseconds
    pub fn from_millis(millis: u64) -> Self {
        Self {
            delay: Duration::from_millis(millis),
        }
    }

    /// No delay at all
    pub fn none() -> Self {
        Self::from_millis(0)
    }

    pub fn duration(&self) -> Duration {
        self.delay
    }

    /// Wait out the delay
    pub async fn wait(&self) {
        if self.delay.is_zero() {
            return;
        }

        tracing::trace!(wait_ms = self.delay.as_millis(), "Request delay");
        sleep(self.delay).await;
    }
}
