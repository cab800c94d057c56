//! Elm plugin configuration types

use crate::error::CompilerError;
use serde::{Deserialize, Serialize};
use std::path::PathBuf;

/// Options passed to the Elm compiler for every module in a build
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ElmPluginOptions {
    /// Compile with the time-travelling debugger (`--debug`)
    #[serde(default)]
    pub debug: bool,

    /// Compile with `--optimize`
    ///
    /// Defaults to `true` when `NODE_ENV` is `production`.
    #[serde(default = "optimize_from_env")]
    pub optimize: bool,

    /// Explicit path to the `elm` binary
    ///
    /// If not specified, `node_modules/.bin/elm` in the project is tried
    /// before falling back to `elm` on `PATH`.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub path_to_elm: Option<PathBuf>,

    /// Directory containing `elm.json`
    ///
    /// If not specified, the nearest ancestor of each module that contains
    /// an `elm.json` is used.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub cwd: Option<PathBuf>,
}

fn optimize_from_env() -> bool {
    std::env::var("NODE_ENV").is_ok_and(|v| v == "production")
}

impl Default for ElmPluginOptions {
    fn default() -> Self {
        Self {
            debug: false,
            optimize: optimize_from_env(),
            path_to_elm: None,
            cwd: None,
        }
    }
}

impl ElmPluginOptions {
    /// Create options with default values
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_debug(mut self, enabled: bool) -> Self {
        self.debug = enabled;
        self
    }

    pub fn with_optimize(mut self, enabled: bool) -> Self {
        self.optimize = enabled;
        self
    }

    /// Set the compiler binary
    pub fn with_path_to_elm(mut self, path: impl Into<PathBuf>) -> Self {
        self.path_to_elm = Some(path.into());
        self
    }

    /// Set the Elm project directory
    pub fn with_cwd(mut self, cwd: impl Into<PathBuf>) -> Self {
        self.cwd = Some(cwd.into());
        self
    }

    /// Reject combinations the compiler refuses
    pub fn validate(&self) -> Result<(), CompilerError> {
        if self.debug && self.optimize {
            return Err(CompilerError::ConflictingModes);
        }
        Ok(())
    }

    /// `elm make` mode flags for these options
    pub(crate) fn mode_args(&self) -> Vec<&'static str> {
        let mut args = Vec::new();
        if self.optimize {
            args.push("--optimize");
        }
        if self.debug {
            args.push("--debug");
        }
        args
    }
}
