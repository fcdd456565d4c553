//! Logging setup for the pathkit CLI.
//!
//! Library code logs through `tracing`; this module installs the subscriber.
//! `--verbose` shows per-file and per-edit debug events, `--quiet` only
//! errors. Otherwise `RUST_LOG` is honored, falling back to `info`.

use tracing_subscriber::{EnvFilter, fmt, layer::SubscriberExt, util::SubscriberInitExt};

const VERBOSE_FILTER: &str = "pathkit=debug,pathkit_cli=debug";
const QUIET_FILTER: &str = "pathkit=error,pathkit_cli=error";
const DEFAULT_FILTER: &str = "pathkit=info,pathkit_cli=info";

/// Build the filter for the given flags.
///
/// `verbose` wins over `quiet`; clap rejects the combination anyway.
pub fn filter_for(verbose: bool, quiet: bool) -> EnvFilter {
    if verbose {
        EnvFilter::new(VERBOSE_FILTER)
    } else if quiet {
        EnvFilter::new(QUIET_FILTER)
    } else {
        EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(DEFAULT_FILTER))
    }
}

/// Initialize the global tracing subscriber. Call once, before logging.
pub fn init_logger(verbose: bool, quiet: bool, no_color: bool) {
    init_logger_with_filter(filter_for(verbose, quiet), no_color);
}

/// Initialize with an explicit filter.
pub fn init_logger_with_filter(filter: EnvFilter, no_color: bool) {
    let fmt_layer = fmt::layer()
        .with_target(false)
        .with_level(true)
        .with_ansi(!no_color)
        .with_writer(std::io::stderr)
        .compact();

    // A subscriber may already be installed (tests); keep the first one.
    let _ = tracing_subscriber::registry()
        .with(filter)
        .with(fmt_layer)
        .try_init();
}
