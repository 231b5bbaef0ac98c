use std::time::{Duration, Instant};

/// Default staleness threshold: a record not refreshed within this window
/// is evicted on the next read.
pub const DEFAULT_STALENESS: Duration = Duration::from_secs(30);

/// Staleness policy for the shared record slot.
///
/// A pure predicate over the slot's last-refresh time. Evaluated only at
/// read time (lazy eviction); there is no background sweep.
#[derive(Clone, Copy, Debug)]
pub struct FreshnessPolicy {
    threshold: Duration,
}

impl FreshnessPolicy {
    pub fn new(threshold: Duration) -> Self {
        Self { threshold }
    }

    pub fn threshold(&self) -> Duration {
        self.threshold
    }

    /// `true` iff the record has gone longer than the threshold without a
    /// refresh. A record refreshed exactly at the threshold is still fresh.
    pub fn is_stale(&self, last_refreshed: Instant, now: Instant) -> bool {
        now.saturating_duration_since(last_refreshed) > self.threshold
    }
}

impl Default for FreshnessPolicy {
    fn default() -> Self {
        Self {
            threshold: DEFAULT_STALENESS,
        }
    }
}
