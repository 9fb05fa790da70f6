//! Latency logging for upstream calls

use log::{debug, warn};
use std::time::{Duration, Instant};

/// Measures one operation and logs how long it took
#[derive(Debug)]
pub struct Timer {
    start_time: Instant,
    operation_name: String,
}

impl Timer {
    pub fn start(operation_name: impl Into<String>) -> Self {
        Self {
            start_time: Instant::now(),
            operation_name: operation_name.into(),
        }
    }

    /// Finish with a warning if the operation took longer than `threshold`
    pub fn finish_with_threshold(self, threshold: Duration) -> Duration {
        let total = self.start_time.elapsed();
        if total > threshold {
            warn!(
                "🐢 {} took {}ms (threshold: {}ms)",
                self.operation_name,
                total.as_millis(),
                threshold.as_millis()
            );
        } else {
            debug!("🕐 {} completed in {}ms", self.operation_name, total.as_millis());
        }
        total
    }
}
