mod runner;
mod summary;


pub(crate) use runner::run_local;
pub use runner::{RunOutcome, execute_run};
pub use summary::summary_lines;
