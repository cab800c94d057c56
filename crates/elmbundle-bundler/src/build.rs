//! Running a [`BuildConfig`] through Rolldown.

use std::path::{Path, PathBuf};
use std::sync::Arc;
use std::time::{Duration, Instant};

use path_clean::PathClean;
use rolldown::{BundlerBuilder as RolldownBundlerBuilder, BundlerOptions, InputItem, Platform};
use rolldown_plugin::__inner::SharedPluginable;
use tracing::{debug, info, warn};

use crate::config::{BuildConfig, BuildParts, OutputTarget};
use crate::output::{WrittenFile, writer};
use crate::plugins::ExternalizeDependenciesPlugin;
use crate::{Error, Result};

/// Outcome of a successful build
#[derive(Debug, Clone)]
pub struct BuildReport {
    /// Files written, in output order
    pub files: Vec<WrittenFile>,
    /// Number of warnings the bundler reported
    pub warnings: usize,
    pub duration: Duration,
}

impl BuildReport {
    pub fn total_size(&self) -> usize {
        self.files.iter().map(|f| f.size).sum()
    }
}

/// Resolve a path against a working directory and clean it.
pub(crate) fn resolve_path(path: &Path, cwd: &Path) -> PathBuf {
    if path.is_absolute() {
        path.clean()
    } else {
        cwd.join(path).clean()
    }
}

impl BuildConfig {
    /// Bundle, minify and write the configured entries.
    ///
    /// # Build Process
    ///
    /// 1. Resolve entries and output against the working directory
    /// 2. Translate the configuration into Rolldown options
    /// 3. Call the bundler exactly once
    /// 4. Write the output, replacing any previous build
    ///
    /// # Errors
    ///
    /// Returns [`Error::Bundler`] for anything the engine or a plugin
    /// rejects, and writer errors for output problems. There are no retries.
    pub async fn build(self) -> Result<BuildReport> {
        let start = Instant::now();
        let parts = self.into_parts();

        if parts.entries.is_empty() {
            return Err(Error::InvalidConfig(
                "At least one entry point is required".to_string(),
            ));
        }

        let cwd = match &parts.cwd {
            Some(cwd) if cwd.is_absolute() => cwd.clean(),
            Some(cwd) => std::env::current_dir()?.join(cwd).clean(),
            None => std::env::current_dir()?,
        };

        let entries: Vec<PathBuf> = parts
            .entries
            .iter()
            .map(|entry| resolve_path(Path::new(entry), &cwd))
            .collect();

        info!(
            "Building {} entr{} (bundle: {}, minify: {})",
            entries.len(),
            if entries.len() == 1 { "y" } else { "ies" },
            parts.bundle,
            parts.minify
        );

        let BuildParts {
            bundle,
            minify,
            output,
            plugins,
            format,
            allow_overwrite,
            ..
        } = parts;

        let options = rolldown_options(&entries, &cwd, format, minify);
        let plugins = assemble_plugins(plugins, bundle);
        debug!("Rolldown plugins: {}", plugins.len());

        let mut bundler = RolldownBundlerBuilder::default()
            .with_options(options)
            .with_plugins(plugins)
            .build()
            .map_err(|e| Error::from_rolldown_batch(&e))?;

        let bundle_output = bundler
            .generate()
            .await
            .map_err(|e| Error::from_rolldown_batch(&e))?;

        for warning in &bundle_output.warnings {
            warn!("{:?}", warning);
        }

        let protected: &[PathBuf] = if allow_overwrite { &[] } else { &entries };
        let files = match &output {
            OutputTarget::Dir(dir) => {
                writer::write_bundle_to(&bundle_output, &resolve_path(dir, &cwd), protected)?
            }
            OutputTarget::File(file) => writer::write_bundle_to_file(
                &bundle_output,
                &resolve_path(file, &cwd),
                protected,
            )?,
        };

        let report = BuildReport {
            files,
            warnings: bundle_output.warnings.len(),
            duration: start.elapsed(),
        };
        info!(
            "Wrote {} file(s), {} bytes in {:?}",
            report.files.len(),
            report.total_size(),
            report.duration
        );

        Ok(report)
    }
}

fn rolldown_options(
    entries: &[PathBuf],
    cwd: &Path,
    format: rolldown::OutputFormat,
    minify: bool,
) -> BundlerOptions {
    let mut options = BundlerOptions {
        format: Some(format),
        ..Default::default()
    };

    options.input = Some(
        entries
            .iter()
            .map(|entry| InputItem {
                name: None,
                import: entry.to_string_lossy().into_owned(),
            })
            .collect(),
    );
    options.cwd = Some(cwd.to_path_buf());
    options.platform = Some(Platform::Browser);

    if minify {
        options.minify = Some(rolldown::RawMinifyOptions::from(true));
    }

    options
}

/// User plugins keep their order; the externalize plugin runs last so
/// plugins that resolve bare specifiers themselves still see them first.
fn assemble_plugins(mut plugins: Vec<SharedPluginable>, bundle: bool) -> Vec<SharedPluginable> {
    if !bundle {
        plugins.push(Arc::new(ExternalizeDependenciesPlugin::new()));
    }
    plugins
}
