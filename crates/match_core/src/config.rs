//! Matcher tuning knobs (grounded on `matcherService.oTimeout` and the
//! original's hard-coded 15-second sweep interval in `ExecuteOrders`).

use std::time::Duration;

/// Configuration for a running [`crate::matcher::MatcherCoordinator`].
#[derive(Debug, Clone)]
pub struct MatcherConfig {
    /// Seconds a resting order may sit unmatched before the sweeper
    /// times it out (`oTimeout` in the original).
    pub order_timeout_seconds: i64,
    /// How often the sweeper walks the book looking for timed-out
    /// orders (`time.After(15 * time.Second)` in the original).
    pub sweep_period: Duration,
    /// Bound on the inbound order channel.
    pub order_channel_capacity: usize,
}

impl Default for MatcherConfig {
    fn default() -> Self {
        Self {
            order_timeout_seconds: 15,
            sweep_period: Duration::from_secs(15),
            order_channel_capacity: 256,
        }
    }
}

impl MatcherConfig {
    pub fn with_order_timeout_seconds(mut self, seconds: i64) -> Self {
        self.order_timeout_seconds = seconds;
        self
    }

    pub fn with_sweep_period(mut self, period: Duration) -> Self {
        self.sweep_period = period;
        self
    }
}
