use std::sync::Arc;
use std::time::Duration;

use tokio::sync::mpsc;
use tracing::{info, warn};

use crate::{
    args::RepeaterArgs,
    domain::{RequestConfig, RunClock, RunMode},
    error::AppResult,
    http::{DelayPolicy, DispatchReport, HttpExecutor, RequestExecutor, run_dispatch},
    metrics::{AggregateStats, latency_channel_capacity, setup_latency_collector},
};

use super::summary::print_summary;

/// Final state of a run, read only after every worker has stopped.
#[derive(Debug, Clone, Copy)]
pub struct RunOutcome {
    pub stats: AggregateStats,
    pub dispatch: DispatchReport,
    pub duration: Duration,
}

pub(crate) fn request_config(args: &RepeaterArgs) -> RequestConfig {
    RequestConfig {
        url: args.url.clone(),
        method: args.method.clone(),
        token: args.token.clone(),
        delay_ms: args.delay,
        skip_delay_percent: args.randomize_no_delay,
        request_timeout: args.request_timeout,
        connect_timeout: args.connect_timeout,
    }
}

pub(crate) fn run_mode(args: &RepeaterArgs) -> RunMode {
    RunMode::from_settings(
        args.requests,
        args.request_duration,
        args.num_threads.get(),
    )
}

/// Runs the configured load against the real endpoint and prints the summary.
pub(crate) async fn run_local(args: &RepeaterArgs) -> AppResult<()> {
    let clock = RunClock::start();
    let config = Arc::new(request_config(args));
    let mode = run_mode(args);

    if url::Url::parse(&config.url).is_err() {
        warn!(
            "URL '{}' does not parse; every request will fail to build",
            config.url
        );
    }
    if config.request_timeout.is_none() {
        info!("No request timeout set; a stalled upstream can hold a worker indefinitely");
    }

    let executor: Arc<dyn RequestExecutor> = Arc::new(HttpExecutor::new(Arc::clone(&config))?);
    let delay = DelayPolicy::from_config(&config);
    let outcome = execute_run(mode, clock, executor, delay).await?;
    print_summary(&outcome);
    Ok(())
}

/// Wires the latency channel, collector, and workers for one run.
///
/// The collector is awaited only after dispatch has joined every worker and
/// released the last sender, so the aggregate is complete when returned.
///
/// # Errors
///
/// Returns an error when a worker or the collector task panicked.
pub async fn execute_run(
    mode: RunMode,
    clock: RunClock,
    executor: Arc<dyn RequestExecutor>,
    delay: DelayPolicy,
) -> AppResult<RunOutcome> {
    let (latency_tx, latency_rx) = mpsc::channel(latency_channel_capacity(mode));
    let collector = setup_latency_collector(latency_rx);

    let dispatch = run_dispatch(mode, clock, executor, delay, latency_tx).await?;
    let stats = collector.await?;

    Ok(RunOutcome {
        stats,
        dispatch,
        duration: clock.elapsed(),
    })
}
