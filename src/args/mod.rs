//! CLI argument types and parsing helpers.
mod cli;
mod defaults;
pub(crate) mod parsers;
mod types;


pub use cli::RepeaterArgs;
pub use types::PositiveUsize;

pub(crate) use defaults::{DEFAULT_CONFIG_FILES, DEFAULT_USER_AGENT, MISSING_TOKEN_MESSAGE};
pub(crate) use parsers::{long_flag_names, normalize_legacy_flags, parse_duration_arg};
