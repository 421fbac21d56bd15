//! Request execution, per-worker loops, and dispatch across workers.
mod client;
mod delay;
mod dispatch;
mod executor;
mod worker;


pub use client::build_client;
pub use delay::DelayPolicy;
pub use dispatch::{DispatchReport, FixedCountPlan, MAX_WORKERS, plan_workers, run_dispatch};
pub use executor::{HttpExecutor, RequestExecutor, RequestOutcome};
pub use worker::{Worker, WorkerBound, WorkerContext, WorkerReport};
