use std::time::Duration;

use tokio::time::Instant;

/// Immutable description of the request every worker repeats.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RequestConfig {
    pub url: String,
    /// Kept as text so a malformed method surfaces as a per-request build
    /// failure instead of a startup error.
    pub method: String,
    pub token: String,
    pub delay_ms: i64,
    pub skip_delay_percent: i64,
    pub request_timeout: Option<Duration>,
    pub connect_timeout: Option<Duration>,
}

impl RequestConfig {
    #[must_use]
    pub fn authorization_value(&self) -> String {
        format!("Bearer {}", self.token)
    }
}

/// How a run is bounded. Chosen once before dispatch.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RunMode {
    FixedCount { total: u64 },
    TimedDuration { duration: Duration, workers: usize },
}

impl RunMode {
    /// Picks the mode from the CLI view of the run: a positive minute count
    /// selects a timed run, anything else a fixed request count.
    #[must_use]
    pub fn from_settings(total: u64, duration_minutes: i64, workers: usize) -> Self {
        match u64::try_from(duration_minutes) {
            Ok(minutes) if minutes > 0 => RunMode::TimedDuration {
                duration: Duration::from_secs(minutes.saturating_mul(60)),
                workers,
            },
            Ok(_) | Err(_) => RunMode::FixedCount { total },
        }
    }

    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            RunMode::FixedCount { .. } => "fixed-count",
            RunMode::TimedDuration { .. } => "timed-duration",
        }
    }
}

/// Start of the run; copied into every worker.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct RunClock {
    start: Instant,
}

impl RunClock {
    #[must_use]
    pub fn start() -> Self {
        Self {
            start: Instant::now(),
        }
    }

    #[must_use]
    pub const fn started_at(self) -> Instant {
        self.start
    }

    #[must_use]
    pub fn elapsed(self) -> Duration {
        self.start.elapsed()
    }

    #[must_use]
    pub fn has_reached(self, budget: Duration) -> bool {
        self.elapsed() >= budget
    }
}
