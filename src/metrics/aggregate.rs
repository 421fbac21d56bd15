use std::time::Duration;

/// Running latency summary over successful requests.
///
/// `min_ms` starts at `u64::MAX` and `max_ms` at zero, so an empty aggregate
/// is recognisable by `count == 0`.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct AggregateStats {
    pub count: u64,
    pub sum_ms: u64,
    pub min_ms: u64,
    pub max_ms: u64,
}

impl Default for AggregateStats {
    fn default() -> Self {
        Self::new()
    }
}

impl AggregateStats {
    #[must_use]
    pub const fn new() -> Self {
        Self {
            count: 0,
            sum_ms: 0,
            min_ms: u64::MAX,
            max_ms: 0,
        }
    }

    pub fn record(&mut self, latency: Duration) {
        let latency_ms = u64::try_from(latency.as_millis()).unwrap_or(u64::MAX);
        self.record_ms(latency_ms);
    }

    pub fn record_ms(&mut self, latency_ms: u64) {
        self.count = self.count.saturating_add(1);
        self.sum_ms = self.sum_ms.saturating_add(latency_ms);
        self.min_ms = self.min_ms.min(latency_ms);
        self.max_ms = self.max_ms.max(latency_ms);
    }

    /// Integer mean in milliseconds; zero when nothing was recorded.
    #[must_use]
    pub fn average_ms(&self) -> u64 {
        self.sum_ms.checked_div(self.count).unwrap_or(0)
    }

    #[must_use]
    pub const fn min_latency_ms(&self) -> Option<u64> {
        if self.count == 0 {
            None
        } else {
            Some(self.min_ms)
        }
    }

    #[must_use]
    pub const fn is_empty(&self) -> bool {
        self.count == 0
    }
}
