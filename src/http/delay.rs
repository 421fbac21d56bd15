use std::time::Duration;

use rand::Rng;

use crate::domain::RequestConfig;

/// Pause applied after each request attempt.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct DelayPolicy {
    base_delay_ms: i64,
    skip_percent: i64,
}

impl DelayPolicy {
    #[must_use]
    pub const fn new(base_delay_ms: i64, skip_percent: i64) -> Self {
        Self {
            base_delay_ms,
            skip_percent,
        }
    }

    #[must_use]
    pub const fn from_config(config: &RequestConfig) -> Self {
        Self::new(config.delay_ms, config.skip_delay_percent)
    }

    /// Returns the pause to take before the next attempt, if any.
    ///
    /// A non-positive base delay never pauses and a non-positive skip percent
    /// always pauses. Otherwise a draw from `0..100` that exceeds the skip
    /// percent pauses, so 100 never does.
    pub fn next_pause<R>(&self, rng: &mut R) -> Option<Duration>
    where
        R: Rng + ?Sized,
    {
        let base_ms = u64::try_from(self.base_delay_ms).ok().filter(|ms| *ms > 0)?;
        let pause = Duration::from_millis(base_ms);
        if self.skip_percent <= 0 {
            return Some(pause);
        }
        let draw: i64 = rng.gen_range(0..100);
        if draw > self.skip_percent {
            Some(pause)
        } else {
            None
        }
    }
}
