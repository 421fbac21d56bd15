use std::sync::Arc;

use tracing::{error, info, warn};

use crate::{
    domain::{RunClock, RunMode},
    error::{AppError, AppResult, ValidationError},
    metrics::LatencySender,
};

use super::{DelayPolicy, RequestExecutor, Worker, WorkerBound, WorkerContext, WorkerReport};

/// Requests per worker the fixed-count split aims for.
const REQUESTS_PER_WORKER_TARGET: u64 = 3;
/// Most workers a single run may spawn, in either mode.
pub const MAX_WORKERS: u64 = 1_000_000;

/// Worker split for a fixed request count.
///
/// `workers = max(1, total / 3)` and `per_worker = total / workers`. Integer
/// division means up to `workers - 1` requests are never dispatched; see
/// [`FixedCountPlan::shortfall`].
///
/// Totals that would need more than [`MAX_WORKERS`] workers are rejected.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct FixedCountPlan {
    pub total: u64,
    pub workers: u64,
    pub per_worker: u64,
}

impl FixedCountPlan {
    /// # Errors
    ///
    /// Returns an error when `total` needs more than [`MAX_WORKERS`] workers.
    pub fn for_total(total: u64) -> Result<Self, ValidationError> {
        let workers = total
            .checked_div(REQUESTS_PER_WORKER_TARGET)
            .unwrap_or(0)
            .max(1);
        check_worker_count(workers)?;
        let per_worker = total.checked_div(workers).unwrap_or(0);
        Ok(Self {
            total,
            workers,
            per_worker,
        })
    }

    /// Requests that will actually be attempted.
    #[must_use]
    pub const fn dispatched(&self) -> u64 {
        self.workers.saturating_mul(self.per_worker)
    }

    /// Requests lost to the integer split.
    #[must_use]
    pub const fn shortfall(&self) -> u64 {
        self.total.saturating_sub(self.dispatched())
    }
}

/// Totals across all workers of a run.
#[derive(Debug, Default, Clone, Copy, PartialEq, Eq)]
pub struct DispatchReport {
    pub workers: usize,
    pub attempted: u64,
    pub succeeded: u64,
    pub failed: u64,
    pub workers_stopped_on_build_failure: usize,
}

impl DispatchReport {
    fn absorb(&mut self, report: WorkerReport) {
        self.attempted = self.attempted.saturating_add(report.attempted);
        self.succeeded = self.succeeded.saturating_add(report.succeeded);
        self.failed = self.failed.saturating_add(report.failed);
        if report.stopped_on_build_failure {
            self.workers_stopped_on_build_failure =
                self.workers_stopped_on_build_failure.saturating_add(1);
        }
    }
}

fn check_worker_count(workers: u64) -> Result<(), ValidationError> {
    if workers > MAX_WORKERS {
        return Err(ValidationError::TooManyWorkers {
            workers,
            max: MAX_WORKERS,
        });
    }
    Ok(())
}

/// Workers for `mode`, numbered from zero.
///
/// # Errors
///
/// Returns an error when the mode needs more than [`MAX_WORKERS`] workers.
pub fn plan_workers(mode: RunMode, clock: RunClock) -> Result<Vec<Worker>, ValidationError> {
    let (count, bound) = match mode {
        RunMode::FixedCount { total } => {
            let plan = FixedCountPlan::for_total(total)?;
            (plan.workers, WorkerBound::Budget(plan.per_worker))
        }
        RunMode::TimedDuration { duration, workers } => {
            let count = u64::try_from(workers).unwrap_or(u64::MAX);
            check_worker_count(count)?;
            (count, WorkerBound::Deadline { clock, duration })
        }
    };
    // Bounded by MAX_WORKERS above.
    let count = usize::try_from(count).unwrap_or(0);
    Ok((0..count).map(|id| Worker::new(id, bound)).collect())
}

/// Spawns every worker for `mode` and waits for all of them to stop.
///
/// `latency_tx` is dropped only after the last worker has been joined, so the
/// collector sees the channel close once every latency has been sent.
///
/// # Errors
///
/// Returns an error when the mode asks for more than [`MAX_WORKERS`] workers,
/// or when a worker task panicked. All other workers are still joined first.
pub async fn run_dispatch(
    mode: RunMode,
    clock: RunClock,
    executor: Arc<dyn RequestExecutor>,
    delay: DelayPolicy,
    latency_tx: LatencySender,
) -> AppResult<DispatchReport> {
    if let RunMode::FixedCount { total } = mode {
        let plan = FixedCountPlan::for_total(total)?;
        if plan.shortfall() > 0 {
            warn!(
                "{} requests split over {} workers as {} each; {} requests will not be sent",
                total,
                plan.workers,
                plan.per_worker,
                plan.shortfall()
            );
        }
    }

    let workers = plan_workers(mode, clock)?;
    info!(
        mode = mode.as_str(),
        workers = workers.len(),
        "Dispatching workers"
    );

    let context = WorkerContext {
        executor,
        delay,
        latency_tx,
    };
    let mut handles = Vec::with_capacity(workers.len());
    for worker in workers {
        handles.push(tokio::spawn(worker.run(context.clone())));
    }

    let mut report = DispatchReport {
        workers: handles.len(),
        ..DispatchReport::default()
    };
    let mut join_error = None;
    for handle in handles {
        match handle.await {
            Ok(worker_report) => report.absorb(worker_report),
            Err(err) => {
                error!("Worker task failed: {}", err);
                join_error.get_or_insert(err);
            }
        }
    }
    drop(context);

    match join_error {
        Some(err) => Err(AppError::from(err)),
        None => Ok(report),
    }
}
