//! Logging setup for the elmbundle CLI.
//!
//! Library crates emit `tracing` events; this installs the subscriber that
//! prints them to stderr.

use tracing_subscriber::{EnvFilter, fmt, layer::SubscriberExt, util::SubscriberInitExt};

const VERBOSE_FILTER: &str =
    "elmbundle=debug,elmbundle_bundler=debug,elmbundle_plugin_elm=debug,elmbundle_cli=debug";
const QUIET_FILTER: &str = "error";
const DEFAULT_FILTER: &str =
    "elmbundle=info,elmbundle_bundler=info,elmbundle_plugin_elm=info,elmbundle_cli=info";

/// Initialize the tracing subscriber.
///
/// Call once, before anything logs.
///
/// # Verbosity Levels
///
/// 1. `--verbose`: DEBUG for elmbundle crates
/// 2. `--quiet`: errors only
/// 3. `RUST_LOG`, if set
/// 4. INFO for elmbundle crates
pub fn init_logger(verbose: bool, quiet: bool, no_color: bool) {
    let fmt_layer = fmt::layer()
        .with_target(false)
        .with_level(true)
        .with_ansi(!no_color)
        .compact();

    tracing_subscriber::registry()
        .with(filter_for(verbose, quiet))
        .with(fmt_layer)
        .init();
}

fn filter_for(verbose: bool, quiet: bool) -> EnvFilter {
    if verbose {
        EnvFilter::new(VERBOSE_FILTER)
    } else if quiet {
        EnvFilter::new(QUIET_FILTER)
    } else {
        EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(DEFAULT_FILTER))
    }
}
