use tracing_subscriber::{EnvFilter, FmtSubscriber};

const LOG_ENV: &str = "REPEATER_LOG";
const DEFAULT_DIRECTIVES: &str = "info";
// Debug for this crate only; reqwest/hyper internals stay at info.
const VERBOSE_DIRECTIVES: &str = "info,repeater=debug";

/// Filter directives from the environment, or the defaults for `verbose`.
/// `REPEATER_LOG` wins over `RUST_LOG`; blank values count as unset.
fn filter_directives(
    repeater_log: Option<String>,
    rust_log: Option<String>,
    verbose: bool,
) -> String {
    repeater_log
        .into_iter()
        .chain(rust_log)
        .find(|value| !value.trim().is_empty())
        .unwrap_or_else(|| {
            if verbose {
                VERBOSE_DIRECTIVES.to_owned()
            } else {
                DEFAULT_DIRECTIVES.to_owned()
            }
        })
}

/// Installs the global subscriber. Log lines go to stderr; stdout is
/// reserved for the run summary.
pub fn init_logging(verbose: bool, no_color: bool) {
    let directives = filter_directives(
        std::env::var(LOG_ENV).ok(),
        std::env::var("RUST_LOG").ok(),
        verbose,
    );
    let filter = EnvFilter::try_new(&directives).unwrap_or_else(|err| {
        eprintln!("Ignoring log filter '{}': {}", directives, err);
        EnvFilter::new(DEFAULT_DIRECTIVES)
    });

    let subscriber = FmtSubscriber::builder()
        .with_env_filter(filter)
        .with_ansi(!no_color)
        .with_writer(std::io::stderr)
        .finish();

    if let Err(err) = tracing::subscriber::set_global_default(subscriber) {
        eprintln!("Failed to set global default subscriber: {}", err);
    }
}
