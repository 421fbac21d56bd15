pub(crate) const DEFAULT_USER_AGENT: &str = concat!("repeater/", env!("CARGO_PKG_VERSION"));

/// Config files picked up from the working directory when `--config` is not given.
pub(crate) const DEFAULT_CONFIG_FILES: [&str; 2] = ["repeater.toml", "repeater.json"];

pub(crate) const MISSING_TOKEN_MESSAGE: &str =
    "Please provide a valid bearer token using the -token flag.";

pub(super) const DEFAULT_REQUESTS: &str = "1";
pub(super) const DEFAULT_METHOD: &str = "POST";
pub(super) const DEFAULT_DELAY_MS: &str = "100";
pub(super) const DEFAULT_SKIP_DELAY_PERCENT: &str = "-1";
pub(super) const DEFAULT_REQUEST_DURATION_MINUTES: &str = "-1";
pub(super) const DEFAULT_NUM_THREADS: &str = "20";
