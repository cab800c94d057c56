//! Error types for the Elm compiler integration

use miette::Diagnostic;
use std::path::PathBuf;
use thiserror::Error;

/// Errors that can occur while compiling an Elm module
#[derive(Error, Debug, Diagnostic)]
pub enum CompilerError {
    /// The `elm` binary could not be found
    #[error("Elm compiler not found: '{}'", .binary.display())]
    #[diagnostic(
        code(elmbundle::elm::not_found),
        help("Install Elm locally with: npm install --save-dev elm\nor set `pathToElm` to the compiler binary")
    )]
    ElmNotFound { binary: PathBuf },

    /// No `elm.json` was found above the module being compiled
    #[error("No elm.json found for {}", .module.display())]
    #[diagnostic(
        code(elmbundle::elm::project_not_found),
        help("Run `elm init` in your project root, or set `cwd` to the directory containing elm.json")
    )]
    ProjectNotFound { module: PathBuf },

    /// Failed to spawn the compiler process
    #[error("Failed to spawn Elm compiler process: {source}")]
    #[diagnostic(
        code(elmbundle::elm::spawn_failed),
        help("Check that the Elm compiler is installed and permissions are correct")
    )]
    SpawnFailed {
        #[source]
        source: std::io::Error,
    },

    /// `elm make` exited with a non-zero status
    #[error("Elm compilation of {} failed (exit code {exit_code})\n\n{stderr}", .module.display())]
    #[diagnostic(
        code(elmbundle::elm::compile_failed),
        help("Fix the Elm compiler errors above and rebuild")
    )]
    CompileFailed {
        module: PathBuf,
        exit_code: i32,
        stderr: String,
    },

    /// Compiled output was missing or not valid UTF-8
    #[error("Failed to read Elm compiler output {}: {source}", .path.display())]
    #[diagnostic(
        code(elmbundle::elm::output_unreadable),
        help("The Elm compiler reported success but produced no readable output")
    )]
    OutputUnreadable {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    /// Both `debug` and `optimize` were requested
    #[error("Elm options `debug` and `optimize` cannot be enabled together")]
    #[diagnostic(
        code(elmbundle::elm::conflicting_modes),
        help("The Elm compiler rejects --debug with --optimize. Disable one of them.")
    )]
    ConflictingModes,
}

impl CompilerError {
    pub fn elm_not_found(binary: impl Into<PathBuf>) -> Self {
        Self::ElmNotFound {
            binary: binary.into(),
        }
    }

    pub fn project_not_found(module: impl Into<PathBuf>) -> Self {
        Self::ProjectNotFound {
            module: module.into(),
        }
    }

    pub fn spawn_failed(source: std::io::Error) -> Self {
        Self::SpawnFailed { source }
    }

    pub fn compile_failed(module: impl Into<PathBuf>, exit_code: i32, stderr: String) -> Self {
        Self::CompileFailed {
            module: module.into(),
            exit_code,
            stderr,
        }
    }

    pub fn output_unreadable(path: impl Into<PathBuf>, source: std::io::Error) -> Self {
        Self::OutputUnreadable {
            path: path.into(),
            source,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use miette::Diagnostic;

    #[test]
    fn test_compile_failed_includes_compiler_output() {
        let err = CompilerError::compile_failed("src/Main.elm", 1, "TYPE MISMATCH".to_string());
        let msg = err.to_string();
        assert!(msg.contains("src/Main.elm"));
        assert!(msg.contains("exit code 1"));
        assert!(msg.ends_with("TYPE MISMATCH"));
    }

    #[test]
    fn test_not_found_suggests_install() {
        let err = CompilerError::elm_not_found("elm");
        let help = err.help().map(|h| h.to_string()).unwrap_or_default();
        assert!(help.contains("npm install --save-dev elm"));
        assert_eq!(
            err.code().map(|c| c.to_string()).as_deref(),
            Some("elmbundle::elm::not_found")
        );
    }
}
