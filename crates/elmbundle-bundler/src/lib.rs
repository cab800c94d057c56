//! # elmbundle-bundler
//!
//! One immutable [`BuildConfig`] in, one Rolldown build out.
//!
//! ```rust,no_run
//! use elmbundle_bundler::{BuildConfig, OutputTarget};
//!
//! # async fn example() -> elmbundle_bundler::Result<()> {
//! let report = BuildConfig::new(["./esbuild/index.js"])
//!     .bundle(true)
//!     .minify(true)
//!     .output(OutputTarget::File("index.js".into()))
//!     .build()
//!     .await?;
//! println!("wrote {} file(s)", report.files.len());
//! # Ok(())
//! # }
//! ```
//!
//! [`BuildConfig::build`] consumes the configuration, so a configuration is
//! submitted to the engine at most once.

pub mod build;
pub mod config;
pub mod diagnostics;
pub mod output;
pub mod plugins;

// Re-export core Rolldown types for library users
pub use rolldown::{BundleOutput, OutputFormat};
pub use rolldown_common::{ModuleType, Output, OutputAsset, OutputChunk};

// Re-export plugin types for plugin authors
pub use rolldown_plugin::{
    __inner::SharedPluginable, HookGenerateBundleArgs, HookLoadArgs, HookLoadOutput,
    HookLoadReturn, HookNoopReturn, HookUsage, Plugin, PluginContext,
};

pub use build::BuildReport;
pub use config::{BuildConfig, OutputTarget};
pub use output::WrittenFile;
pub use plugins::{IntoPlugin, plugin};

use std::path::PathBuf;

/// Error types for elmbundle-bundler operations.
#[derive(Debug, thiserror::Error)]
pub enum Error {
    /// Error from Rolldown bundler.
    #[error("Build failed: {}", format_bundler_error(.0))]
    Bundler(Vec<diagnostics::ExtractedDiagnostic>),

    /// Invalid configuration provided.
    #[error("Invalid configuration: {0}")]
    InvalidConfig(String),

    /// I/O error.
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    /// Invalid output path (e.g., directory traversal attempt).
    #[error("Invalid output path: {0}")]
    InvalidOutputPath(String),

    /// File write operation failed.
    #[error("Write failure: {0}")]
    WriteFailure(String),

    /// An output file would replace one of the entry points.
    #[error("Refusing to overwrite input file: {}", .0.display())]
    OverwritesInput(PathBuf),
}

/// Result type alias for elmbundle-bundler operations.
pub type Result<T> = std::result::Result<T, Error>;

impl Error {
    /// Create a bundler error from a Rolldown error.
    pub fn from_rolldown_batch(error: &dyn std::fmt::Debug) -> Self {
        Error::Bundler(diagnostics::extract_from_rolldown_error(error))
    }
}

fn format_bundler_error(diagnostics: &[diagnostics::ExtractedDiagnostic]) -> String {
    match diagnostics {
        [] => "Unknown bundler error".to_string(),
        [diag] => format!("{}: {}", diag.kind, diag.message),
        many => format!(
            "{} errors:\n{}",
            many.len(),
            many.iter()
                .map(|d| format!("  {}: {}", d.kind, d.message))
                .collect::<Vec<_>>()
                .join("\n")
        ),
    }
}

impl miette::Diagnostic for Error {
    fn code(&self) -> Option<Box<dyn std::fmt::Display + '_>> {
        Some(Box::new(match self {
            Error::Bundler(_) => "BUNDLER_ERROR",
            Error::InvalidConfig(_) => "INVALID_CONFIG",
            Error::Io(_) => "IO_ERROR",
            Error::InvalidOutputPath(_) => "INVALID_OUTPUT_PATH",
            Error::WriteFailure(_) => "WRITE_FAILURE",
            Error::OverwritesInput(_) => "OVERWRITES_INPUT",
        }))
    }

    fn severity(&self) -> Option<miette::Severity> {
        Some(miette::Severity::Error)
    }

    fn help(&self) -> Option<Box<dyn std::fmt::Display + '_>> {
        match self {
            Error::InvalidOutputPath(path) => Some(Box::new(format!(
                "The output path '{}' is invalid. Ensure it stays within the output directory.",
                path
            ))),
            Error::WriteFailure(_) => Some(Box::new(
                "Failed to write file. Check disk space and permissions.".to_string(),
            )),
            Error::OverwritesInput(_) => Some(Box::new(
                "Write the bundle to a different directory or file name than the entry point."
                    .to_string(),
            )),
            Error::Bundler(diagnostics) => match diagnostics.as_slice() {
                [diag] => diag
                    .help
                    .as_ref()
                    .map(|h| Box::new(h.clone()) as Box<dyn std::fmt::Display>),
                _ => None,
            },
            _ => None,
        }
    }
}
