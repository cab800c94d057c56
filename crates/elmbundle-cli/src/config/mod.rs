//! Build settings with multi-source loading.
//!
//! Merges settings from CLI args, environment variables and a config file.
//! Priority: CLI > Environment > File > Defaults
//!
//! Only the knobs a user may change live here. `bundle`, `minify` and the
//! Elm compiler modes are fixed by the build command, and unknown keys are
//! rejected, so neither a config file nor the environment can switch them
//! off.

mod loading;
mod validation;

use clap::ValueEnum;
use elmbundle_bundler::OutputFormat;
use serde::Deserialize;
use std::path::PathBuf;

/// Default config file, looked up in the working directory.
pub const CONFIG_FILE_NAME: &str = "elmbundle.config.json";

/// Prefix of environment variables read as settings.
pub const ENV_PREFIX: &str = "ELMBUNDLE_";

/// Output format for the bundle.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Deserialize, ValueEnum)]
#[serde(rename_all = "lowercase")]
pub enum Format {
    /// ECMAScript module
    Esm,
    /// CommonJS
    Cjs,
    /// Immediately invoked function expression, for a plain script tag
    Iife,
}

impl From<Format> for OutputFormat {
    fn from(format: Format) -> Self {
        match format {
            Format::Esm => OutputFormat::Esm,
            Format::Cjs => OutputFormat::Cjs,
            Format::Iife => OutputFormat::Iife,
        }
    }
}

/// elmbundle settings - loaded from elmbundle.config.json, env and CLI args.
#[derive(Debug, Clone, PartialEq)]
pub struct ElmBundleConfig {
    /// Entry points to bundle
    pub entry: Vec<String>,

    /// Output directory; mutually exclusive with `outfile`
    pub outdir: Option<PathBuf>,

    /// Output file; used when neither output key is set
    pub outfile: Option<PathBuf>,

    /// Output format
    pub format: Format,

    /// Path to the elm binary
    pub path_to_elm: Option<PathBuf>,

    /// Working directory for entries and output
    pub cwd: Option<PathBuf>,

    /// Allow the output to replace an entry file
    pub allow_overwrite: bool,
}

pub fn default_entry() -> Vec<String> {
    vec!["./esbuild/index.js".to_string()]
}

pub fn default_outfile() -> PathBuf {
    PathBuf::from("index.js")
}

pub fn default_format() -> Format {
    Format::Iife
}

impl Default for ElmBundleConfig {
    fn default() -> Self {
        Self {
            entry: default_entry(),
            outdir: None,
            outfile: None,
            format: default_format(),
            path_to_elm: None,
            cwd: None,
            allow_overwrite: false,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_defaults_match_production_script() {
        let config = ElmBundleConfig::default();
        assert_eq!(config.entry, ["./esbuild/index.js"]);
        assert_eq!(config.format, Format::Iife);
        assert!(config.outdir.is_none());
        assert!(config.outfile.is_none());
        assert!(!config.allow_overwrite);
    }

    #[test]
    fn test_format_conversion() {
        assert!(matches!(OutputFormat::from(Format::Esm), OutputFormat::Esm));
        assert!(matches!(OutputFormat::from(Format::Cjs), OutputFormat::Cjs));
        assert!(matches!(OutputFormat::from(Format::Iife), OutputFormat::Iife));
    }
}
