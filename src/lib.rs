//! Core library for the `repeater` CLI.
//!
//! `repeater` sends a bearer-authenticated HTTP request over and over, either
//! a fixed number of times split across workers or from a pool of workers for
//! a wall-clock budget, and prints a latency summary at the end. The modules
//! here hold the CLI types, config loading, the worker/dispatch engine, and
//! latency aggregation.
pub mod app;
pub mod args;
pub mod config;
pub mod domain;
mod entry;
pub mod error;
pub mod http;
mod logger;
pub mod metrics;

pub use entry::run;

#[cfg(test)]
mod test_support;
