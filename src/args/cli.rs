use std::time::Duration;

use clap::Parser;

use super::defaults::{
    DEFAULT_DELAY_MS, DEFAULT_METHOD, DEFAULT_NUM_THREADS, DEFAULT_REQUEST_DURATION_MINUTES,
    DEFAULT_REQUESTS, DEFAULT_SKIP_DELAY_PERCENT,
};
use super::parsers::{parse_duration_arg, parse_positive_usize};
use super::types::PositiveUsize;

#[derive(Debug, Parser, Clone)]
#[clap(
    version,
    about = "Repeat bearer-authenticated HTTP requests against an endpoint and summarize latency."
)]
pub struct RepeaterArgs {
    /// Number of requests to repeat
    #[arg(short = 'n', long = "requests", default_value = DEFAULT_REQUESTS)]
    pub requests: u64,

    /// URL to call
    #[arg(long, default_value = "")]
    pub url: String,

    /// HTTP method
    #[arg(long, default_value = DEFAULT_METHOD)]
    pub method: String,

    /// Bearer token for authorization
    #[arg(long, env = "REPEATER_TOKEN", hide_env_values = true, default_value = "")]
    pub token: String,

    /// Delay in milliseconds between each request of a worker
    #[arg(long, default_value = DEFAULT_DELAY_MS, allow_negative_numbers = true)]
    pub delay: i64,

    /// Percentage of requests made immediately without delay
    #[arg(
        long = "randomizeNoDelay",
        alias = "randomize-no-delay",
        default_value = DEFAULT_SKIP_DELAY_PERCENT,
        allow_negative_numbers = true
    )]
    pub randomize_no_delay: i64,

    /// Run requests for the given number of minutes
    #[arg(
        long = "requestDuration",
        alias = "request-duration",
        default_value = DEFAULT_REQUEST_DURATION_MINUTES,
        allow_negative_numbers = true
    )]
    pub request_duration: i64,

    /// Number of workers when running for a duration
    #[arg(
        long = "numThreads",
        alias = "num-threads",
        default_value = DEFAULT_NUM_THREADS,
        value_parser = parse_positive_usize
    )]
    pub num_threads: PositiveUsize,

    /// Per-request timeout (supports ms/s/m/h); unbounded when unset
    #[arg(long = "timeout", value_parser = parse_duration_arg)]
    pub request_timeout: Option<Duration>,

    /// Connect timeout (supports ms/s/m/h)
    #[arg(long = "connect-timeout", value_parser = parse_duration_arg)]
    pub connect_timeout: Option<Duration>,

    /// Path to a TOML or JSON config file
    #[arg(long)]
    pub config: Option<String>,

    /// Enable debug logging
    #[arg(long, short = 'v')]
    pub verbose: bool,

    /// Disable ANSI colors in log output
    #[arg(long = "no-color")]
    pub no_color: bool,
}
