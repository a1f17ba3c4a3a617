//! Configuration for the bus coordinator and its pump tasks.

use std::time::Duration;

/// Configuration for the bus coordinator.
#[derive(Debug, Clone)]
pub struct BusConfig {
    /// How long a record may live in the log before it becomes eligible
    /// for reclamation, once every consumer has passed it.
    pub retention: Duration,
    /// How often the retention reaper runs.
    pub clean_period: Duration,
    /// Maximum records the ingress pump appends per cycle.
    pub bulk: usize,
    /// Capacity of each consumer's outbound channel.
    pub consumer_channel_capacity: usize,
    /// How often the ingress pump polls when no producers are registered.
    pub idle_poll_interval: Duration,
}

impl Default for BusConfig {
    fn default() -> Self {
        Self {
            retention: Duration::from_secs(30),
            clean_period: Duration::from_secs(10),
            bulk: 10,
            consumer_channel_capacity: 2,
            idle_poll_interval: Duration::from_millis(50),
        }
    }
}

impl BusConfig {
    /// Sets the retention window.
    pub fn with_retention(mut self, retention: Duration) -> Self {
        self.retention = retention;
        self
    }

    /// Sets the reaper's clean period.
    pub fn with_clean_period(mut self, period: Duration) -> Self {
        self.clean_period = period;
        self
    }
}
