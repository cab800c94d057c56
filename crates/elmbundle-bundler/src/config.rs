//! Build configuration types.
//!
//! A [`BuildConfig`] is assembled with builder methods and then consumed by
//! [`BuildConfig::build`]. Nothing mutates it once the build has started.

use crate::OutputFormat;
use crate::plugins::IntoPlugin;
use rolldown_plugin::__inner::SharedPluginable;
use std::path::{Path, PathBuf};

/// Where the build output is written
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum OutputTarget {
    /// Write every output file into this directory
    Dir(PathBuf),
    /// Write the single output chunk to this file
    File(PathBuf),
}

impl OutputTarget {
    pub fn path(&self) -> &Path {
        match self {
            Self::Dir(path) | Self::File(path) => path,
        }
    }
}

impl Default for OutputTarget {
    fn default() -> Self {
        Self::Dir(PathBuf::from("dist"))
    }
}

/// Immutable description of one build
pub struct BuildConfig {
    entries: Vec<String>,
    bundle: bool,
    minify: bool,
    output: OutputTarget,
    plugins: Vec<SharedPluginable>,
    format: OutputFormat,
    cwd: Option<PathBuf>,
    allow_overwrite: bool,
}

impl BuildConfig {
    /// Create a configuration for the given entry points
    ///
    /// Entry order is preserved. Relative entries resolve against
    /// [`cwd`](Self::cwd), or the process working directory if unset.
    pub fn new<I, S>(entries: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        Self {
            entries: entries.into_iter().map(Into::into).collect(),
            bundle: true,
            minify: false,
            output: OutputTarget::default(),
            plugins: Vec::new(),
            format: OutputFormat::Iife,
            cwd: None,
            allow_overwrite: false,
        }
    }

    /// Enable or disable bundling of dependencies
    pub fn bundle(mut self, enabled: bool) -> Self {
        self.bundle = enabled;
        self
    }

    /// Enable or disable minification
    pub fn minify(mut self, enabled: bool) -> Self {
        self.minify = enabled;
        self
    }

    /// Set the output target
    pub fn output(mut self, target: OutputTarget) -> Self {
        self.output = target;
        self
    }

    /// Set the output directory
    pub fn outdir(self, dir: impl Into<PathBuf>) -> Self {
        self.output(OutputTarget::Dir(dir.into()))
    }

    /// Set the output file
    pub fn outfile(self, file: impl Into<PathBuf>) -> Self {
        self.output(OutputTarget::File(file.into()))
    }

    /// Append a plugin; plugins run in the order they were added
    pub fn plugin(mut self, plugin: impl IntoPlugin) -> Self {
        self.plugins.push(plugin.into_plugin());
        self
    }

    /// Set the output format
    pub fn format(mut self, format: OutputFormat) -> Self {
        self.format = format;
        self
    }

    /// Set the working directory used to resolve entries and output paths
    pub fn cwd(mut self, cwd: impl Into<PathBuf>) -> Self {
        self.cwd = Some(cwd.into());
        self
    }

    /// Allow an output file to replace one of the entry files
    pub fn allow_overwrite(mut self, allowed: bool) -> Self {
        self.allow_overwrite = allowed;
        self
    }

    pub fn entries(&self) -> &[String] {
        &self.entries
    }

    pub fn bundle_enabled(&self) -> bool {
        self.bundle
    }

    pub fn minify_enabled(&self) -> bool {
        self.minify
    }

    pub fn output_target(&self) -> &OutputTarget {
        &self.output
    }

    pub fn plugin_count(&self) -> usize {
        self.plugins.len()
    }

    pub fn output_format(&self) -> OutputFormat {
        self.format
    }

    pub fn working_dir(&self) -> Option<&Path> {
        self.cwd.as_deref()
    }

    pub fn overwrite_allowed(&self) -> bool {
        self.allow_overwrite
    }

    pub(crate) fn into_parts(self) -> BuildParts {
        BuildParts {
            entries: self.entries,
            bundle: self.bundle,
            minify: self.minify,
            output: self.output,
            plugins: self.plugins,
            format: self.format,
            cwd: self.cwd,
            allow_overwrite: self.allow_overwrite,
        }
    }
}

impl std::fmt::Debug for BuildConfig {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("BuildConfig")
            .field("entries", &self.entries)
            .field("bundle", &self.bundle)
            .field("minify", &self.minify)
            .field("output", &self.output)
            .field("plugins", &self.plugins.len())
            .field("format", &self.format)
            .field("cwd", &self.cwd)
            .field("allow_overwrite", &self.allow_overwrite)
            .finish()
    }
}

/// Owned fields of a [`BuildConfig`] for the build pipeline
pub(crate) struct BuildParts {
    pub entries: Vec<String>,
    pub bundle: bool,
    pub minify: bool,
    pub output: OutputTarget,
    pub plugins: Vec<SharedPluginable>,
    pub format: OutputFormat,
    pub cwd: Option<PathBuf>,
    pub allow_overwrite: bool,
}
