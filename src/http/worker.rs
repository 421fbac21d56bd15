use std::sync::Arc;
use std::time::Duration;

use rand::{SeedableRng, rngs::StdRng};
use tokio::time::sleep;
use tracing::{debug, error, info, warn};

use crate::{domain::RunClock, error::RequestStage, metrics::LatencySender};

use super::{DelayPolicy, RequestExecutor, RequestOutcome};

/// What stops a worker.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum WorkerBound {
    /// Remaining attempts owned by this worker alone.
    Budget(u64),
    /// Stop once `clock` has run for `duration`; checked before each attempt.
    Deadline { clock: RunClock, duration: Duration },
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum WorkerState {
    Running,
    Stopped,
}

/// Per-worker tallies returned when the loop stops.
#[derive(Debug, Default, Clone, Copy, PartialEq, Eq)]
pub struct WorkerReport {
    pub attempted: u64,
    pub succeeded: u64,
    pub failed: u64,
    pub stopped_on_build_failure: bool,
}

/// Shared handles a worker needs; cloned once per worker.
#[derive(Clone)]
pub struct WorkerContext {
    pub executor: Arc<dyn RequestExecutor>,
    pub delay: DelayPolicy,
    pub latency_tx: LatencySender,
}

#[derive(Debug)]
pub struct Worker {
    id: usize,
    bound: WorkerBound,
}

impl Worker {
    #[must_use]
    pub const fn new(id: usize, bound: WorkerBound) -> Self {
        Self { id, bound }
    }

    #[must_use]
    pub const fn id(&self) -> usize {
        self.id
    }

    #[must_use]
    pub const fn bound(&self) -> WorkerBound {
        self.bound
    }

    fn state(&self) -> WorkerState {
        let exhausted = match self.bound {
            WorkerBound::Budget(remaining) => remaining == 0,
            WorkerBound::Deadline { clock, duration } => clock.has_reached(duration),
        };
        if exhausted {
            WorkerState::Stopped
        } else {
            WorkerState::Running
        }
    }

    fn consume_budget(&mut self) {
        if let WorkerBound::Budget(remaining) = &mut self.bound {
            *remaining = remaining.saturating_sub(1);
        }
    }

    /// Runs request/delay cycles until the bound is reached or a request
    /// cannot be built. Send and body failures are logged and skipped.
    pub async fn run(mut self, context: WorkerContext) -> WorkerReport {
        let mut rng = StdRng::from_entropy();
        let mut report = WorkerReport::default();
        debug!(worker_id = self.id, bound = ?self.bound, "Worker started");

        while self.state() == WorkerState::Running {
            report.attempted = report.attempted.saturating_add(1);
            match context.executor.execute(self.id).await {
                RequestOutcome::Success { latency, body } => {
                    report.succeeded = report.succeeded.saturating_add(1);
                    if context.latency_tx.send(latency).await.is_err() {
                        warn!(
                            "Latency collector closed; worker {} result not recorded",
                            self.id
                        );
                    }
                    info!(
                        "Worker {} response:\n{}",
                        self.id,
                        String::from_utf8_lossy(&body)
                    );
                }
                RequestOutcome::Failure(err) => {
                    report.failed = report.failed.saturating_add(1);
                    match err.stage() {
                        RequestStage::Build => {
                            error!("Error forming request in worker {}: {}", self.id, err);
                            report.stopped_on_build_failure = true;
                            break;
                        }
                        RequestStage::Send if err.is_timeout() => {
                            warn!("Request timed out in worker {}: {}", self.id, err);
                        }
                        RequestStage::Send => {
                            error!("Error from upstream in worker {}: {}", self.id, err);
                        }
                        RequestStage::ReadBody => {
                            error!("Error reading response in worker {}: {}", self.id, err);
                        }
                    }
                }
            }

            if let Some(pause) = context.delay.next_pause(&mut rng) {
                sleep(pause).await;
            }
            self.consume_budget();
        }

        debug!(
            worker_id = self.id,
            attempted = report.attempted,
            succeeded = report.succeeded,
            failed = report.failed,
            "Worker stopped"
        );
        report
    }
}
