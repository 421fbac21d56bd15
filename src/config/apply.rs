use clap::ArgMatches;
use clap::parser::ValueSource;

use crate::args::{PositiveUsize, RepeaterArgs};
use crate::error::{AppError, AppResult, ConfigError};

use super::types::ConfigFile;

/// Applies configuration values to CLI arguments. Values given on the command
/// line or through the environment win over the file.
///
/// # Errors
///
/// Returns an error when a config value is out of range.
pub fn apply_config(
    args: &mut RepeaterArgs,
    matches: &ArgMatches,
    config: &ConfigFile,
) -> AppResult<()> {
    if !is_explicit(matches, "url")
        && let Some(url) = config.url.as_ref()
    {
        args.url.clone_from(url);
    }

    if !is_explicit(matches, "method")
        && let Some(method) = config.method.as_ref()
    {
        args.method.clone_from(method);
    }

    if !is_explicit(matches, "token")
        && let Some(token) = config.token.as_ref()
    {
        args.token.clone_from(token);
    }

    if !is_explicit(matches, "requests")
        && let Some(requests) = config.requests
    {
        args.requests = requests;
    }

    if !is_explicit(matches, "delay")
        && let Some(delay) = config.delay
    {
        args.delay = delay;
    }

    if !is_explicit(matches, "randomize_no_delay")
        && let Some(percent) = config.randomize_no_delay
    {
        args.randomize_no_delay = percent;
    }

    if !is_explicit(matches, "request_duration")
        && let Some(minutes) = config.request_duration
    {
        args.request_duration = minutes;
    }

    if !is_explicit(matches, "num_threads")
        && let Some(threads) = config.num_threads
    {
        args.num_threads = PositiveUsize::try_from(threads).map_err(|err| {
            AppError::config(ConfigError::FieldMustBePositive {
                field: "num_threads".to_owned(),
                source: err,
            })
        })?;
    }

    if !is_explicit(matches, "request_timeout")
        && let Some(timeout) = config.timeout.as_ref()
    {
        args.request_timeout = Some(timeout.to_duration().map_err(|err| {
            AppError::config(ConfigError::InvalidDuration {
                field: "timeout",
                source: err,
            })
        })?);
    }

    if !is_explicit(matches, "connect_timeout")
        && let Some(timeout) = config.connect_timeout.as_ref()
    {
        args.connect_timeout = Some(timeout.to_duration().map_err(|err| {
            AppError::config(ConfigError::InvalidDuration {
                field: "connect_timeout",
                source: err,
            })
        })?);
    }

    Ok(())
}

fn is_explicit(matches: &ArgMatches, name: &str) -> bool {
    matches!(
        matches.value_source(name),
        Some(ValueSource::CommandLine | ValueSource::EnvVariable)
    )
}
