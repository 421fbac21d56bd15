use std::time::Duration;

use tokio::{sync::mpsc, task::JoinHandle};
use tracing::debug;

use crate::domain::RunMode;

use super::AggregateStats;

pub type LatencySender = mpsc::Sender<Duration>;

/// Upper bound for the latency buffer regardless of the run size.
const MAX_LATENCY_CHANNEL_CAPACITY: usize = 1_000_000;
/// Buffered latencies per worker for timed runs, where the total is unknown.
const TIMED_BUFFER_PER_WORKER: usize = 1_024;

/// Buffer size for the latency channel: the expected request count for fixed
/// runs, a per-worker allowance for timed runs.
#[must_use]
pub fn latency_channel_capacity(mode: RunMode) -> usize {
    let expected = match mode {
        RunMode::FixedCount { total } => usize::try_from(total).unwrap_or(usize::MAX),
        RunMode::TimedDuration { workers, .. } => workers.saturating_mul(TIMED_BUFFER_PER_WORKER),
    };
    expected.clamp(1, MAX_LATENCY_CHANNEL_CAPACITY)
}

/// Spawns the single consumer that folds latencies into [`AggregateStats`].
///
/// The task finishes once every sender has been dropped and the buffer is
/// drained; awaiting the handle yields the final aggregate.
#[must_use]
pub fn setup_latency_collector(mut latency_rx: mpsc::Receiver<Duration>) -> JoinHandle<AggregateStats> {
    tokio::spawn(async move {
        let mut stats = AggregateStats::new();
        while let Some(latency) = latency_rx.recv().await {
            stats.record(latency);
        }
        debug!("Latency channel closed after {} samples", stats.count);
        stats
    })
}
