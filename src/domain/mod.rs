//! Run-wide values shared read-only by every worker.
mod run;

pub use run::{RequestConfig, RunClock, RunMode};
