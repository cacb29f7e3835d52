use std::sync::Arc;
use std::time::Duration;

use tokio::sync::Mutex;

use crate::utils::clock::Clock;

/// Spaces outbound requests so the provider quota holds (10 calls per
/// minute means at least 6 seconds between calls).
///
/// One limiter belongs to one client instance and serializes that
/// instance's calls through its internal mutex. It is not a coordinator
/// across client instances or processes; callers must not share a
/// competition fetch loop between clients expecting a combined quota.
pub struct RateLimiter {
    min_interval: Duration,
    clock: Arc<dyn Clock>,
    last_acquire: Mutex<Option<Duration>>,
}

impl RateLimiter {
    pub fn new(min_interval: Duration, clock: Arc<dyn Clock>) -> Self {
        Self {
            min_interval,
            clock,
            last_acquire: Mutex::new(None),
        }
    }

    /// Waits until `min_interval` has passed since the previous acquire
    /// completed. The first call never waits.
    pub async fn acquire(&self) {
        let mut last = self.last_acquire.lock().await;
        if let Some(previous) = *last {
            let since_last = self.clock.elapsed().saturating_sub(previous);
            if since_last < self.min_interval {
                self.clock.sleep(self.min_interval - since_last).await;
            }
        }
        *last = Some(self.clock.elapsed());
    }
}
