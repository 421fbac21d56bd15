use std::ffi::OsString;

use clap::{ArgMatches, CommandFactory, FromArgMatches};

use crate::app::run_local;
use crate::args::{MISSING_TOKEN_MESSAGE, RepeaterArgs, long_flag_names, normalize_legacy_flags};
use crate::config::{apply_config, load_config};
use crate::error::AppResult;

/// Parses arguments, applies any config file, and runs the load.
///
/// # Errors
///
/// Returns an error when arguments or the config file are invalid, or when
/// the runtime cannot be started.
pub fn run() -> AppResult<()> {
    let (mut args, matches) = parse_args(std::env::args_os())?;

    if let Some(config) = load_config(args.config.as_deref())? {
        apply_config(&mut args, &matches, &config)?;
    }

    if args.token.is_empty() {
        println!("{}", MISSING_TOKEN_MESSAGE);
        return Ok(());
    }

    crate::logger::init_logging(args.verbose, args.no_color);

    let runtime = tokio::runtime::Builder::new_multi_thread()
        .enable_all()
        .build()?;

    runtime.block_on(run_local(&args))
}

fn parse_args<I>(raw_args: I) -> AppResult<(RepeaterArgs, ArgMatches)>
where
    I: IntoIterator<Item = OsString>,
{
    let cmd = RepeaterArgs::command();
    let names = long_flag_names(&cmd);
    let raw_args = normalize_legacy_flags(raw_args, &names);

    let matches = cmd.get_matches_from(raw_args);
    let args = RepeaterArgs::from_arg_matches(&matches)?;

    Ok((args, matches))
}
