//! Conversion of CLI errors into miette reports.

use crate::error::CliError;
use miette::Report;

/// Convert a [`CliError`] into a report for `main` to return.
///
/// Errors from the library crates keep their own diagnostic codes and help.
pub fn cli_error_to_miette(err: CliError) -> Report {
    match err {
        CliError::Bundler(e) => Report::new(e),
        CliError::Plugin(e) => Report::new(e),
        CliError::Config(e) => miette::miette!("Configuration error: {}", e),
        CliError::Build(e) => miette::miette!("{}", e),
        _ => miette::miette!("{}", err),
    }
}
