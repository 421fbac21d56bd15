use std::time::Duration;

use serde::Deserialize;

use crate::args::parse_duration_arg;
use crate::error::ValidationError;

/// Run settings read from `repeater.toml` / `repeater.json`.
///
/// Keys accept both snake_case and the camelCase spelling of the CLI flags.
#[derive(Debug, Default, Deserialize)]
pub struct ConfigFile {
    pub url: Option<String>,
    pub method: Option<String>,
    pub token: Option<String>,
    #[serde(alias = "n")]
    pub requests: Option<u64>,
    pub delay: Option<i64>,
    #[serde(alias = "randomizeNoDelay")]
    pub randomize_no_delay: Option<i64>,
    #[serde(alias = "requestDuration")]
    pub request_duration: Option<i64>,
    #[serde(alias = "numThreads")]
    pub num_threads: Option<usize>,
    pub timeout: Option<DurationValue>,
    pub connect_timeout: Option<DurationValue>,
}

#[derive(Debug, Clone, Deserialize)]
#[serde(untagged)]
pub enum DurationValue {
    Millis(u64),
    Text(String),
}

impl DurationValue {
    pub(crate) fn to_duration(&self) -> Result<Duration, ValidationError> {
        match self {
            DurationValue::Millis(0) => Err(ValidationError::DurationZero),
            DurationValue::Millis(millis) => Ok(Duration::from_millis(*millis)),
            DurationValue::Text(text) => parse_duration_arg(text),
        }
    }
}
