//! Error handling for the elmbundle CLI.
//!
//! - `CliError` is what commands return; it converts from the domain errors
//!   below and from the library crates' errors via `#[from]`
//! - `ConfigError` covers loading and validating settings
//! - `BuildError` covers checks made before the bundler runs
//!
//! Messages carry a `Hint:` line when there is an obvious next step.

mod miette;

pub use self::miette::cli_error_to_miette;

use std::path::PathBuf;
use thiserror::Error;

/// Top-level CLI error type.
#[derive(Debug, Error)]
pub enum CliError {
    /// Configuration loading or validation failed
    #[error("Configuration error: {0}")]
    Config(#[from] ConfigError),

    /// A pre-build check failed
    #[error("Build error: {0}")]
    Build(#[from] BuildError),

    /// The bundling operation rejected
    #[error(transparent)]
    Bundler(#[from] elmbundle_bundler::Error),

    /// The Elm plugin could not be created
    #[error(transparent)]
    Plugin(#[from] elmbundle_plugin_elm::CompilerError),

    /// I/O errors from file system operations
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),
}

/// Configuration-specific errors.
#[derive(Debug, Error)]
pub enum ConfigError {
    /// Config file passed with `--config` does not exist
    #[error("Config file not found: {}\n\nHint: Create an elmbundle.config.json file or fix the --config path", .0.display())]
    NotFound(PathBuf),

    /// Mutually exclusive options were specified
    #[error("Conflicting options: {0}\n\nHint: These options cannot be used together")]
    ConflictingOptions(String),

    /// Missing required configuration field
    #[error("Missing required field: {field}\n\nHint: {hint}")]
    MissingField {
        /// Name of the missing field
        field: String,
        /// What to provide instead
        hint: String,
    },

    /// Invalid value for a configuration option
    #[error("Invalid value for '{field}': {value}\n\nHint: {hint}")]
    InvalidValue {
        /// Name of the field with invalid value
        field: String,
        /// The invalid value
        value: String,
        /// What a valid value looks like
        hint: String,
    },

    /// I/O error while reading config
    #[error("Failed to read config file: {0}")]
    Io(#[from] std::io::Error),
}

/// Errors detected before the bundler is called.
#[derive(Debug, Error)]
pub enum BuildError {
    /// Entry point file doesn't exist
    #[error("Entry point not found: {}\n\nHint: Check the 'entry' field in your config or the --entry argument", .0.display())]
    EntryNotFound(PathBuf),

    /// Entry point exists but is not a regular file
    #[error("Entry point is not a file: {}", .0.display())]
    EntryNotAFile(PathBuf),
}

/// Result type alias for CLI operations.
pub type Result<T> = std::result::Result<T, CliError>;
