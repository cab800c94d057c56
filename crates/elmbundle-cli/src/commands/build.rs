//! The build command.
//!
//! One process run is one build: settings are loaded, the bundler is called
//! exactly once, and its outcome decides the exit status. `bundle` and
//! `minify` are always on and Elm is always compiled with `--optimize`.

use std::path::{Path, PathBuf};

use elmbundle_bundler::{BuildConfig, BuildReport};
use elmbundle_plugin_elm::{ElmPlugin, ElmPluginOptions};
use tracing::{debug, info};

use crate::cli::Cli;
use crate::config::ElmBundleConfig;
use crate::error::{BuildError, Result};
use crate::ui;

/// Execute the build.
///
/// # Build Process
///
/// 1. Load and validate settings
/// 2. Check that every entry point exists
/// 3. Build the configuration with the Elm plugin
/// 4. Run it once and print a summary
///
/// # Errors
///
/// Returns an error for invalid settings, missing entries, or any failure
/// of the bundling operation. Nothing is retried.
pub async fn execute(args: Cli) -> Result<BuildReport> {
    let config = ElmBundleConfig::load(&args)?;
    config.validate()?;

    let cwd = resolve_cwd(config.cwd.as_deref())?;
    debug!("Working directory: {}", cwd.display());

    for entry in &config.entry {
        validate_entry(&resolve_path(Path::new(entry), &cwd))?;
    }

    let build = build_config(&config, &cwd)?;
    info!("Building {}", config.entry.join(", "));

    let report = build.build().await?;

    if !args.quiet {
        print_summary(&report, &cwd);
    }

    Ok(report)
}

/// Build configuration for the given settings.
///
/// `bundle` and `minify` are pinned to `true`; the Elm plugin is the only
/// plugin.
pub fn build_config(config: &ElmBundleConfig, cwd: &Path) -> Result<BuildConfig> {
    let plugin = ElmPlugin::with_options(elm_plugin_options(config, cwd))?;

    Ok(BuildConfig::new(config.entry.iter().cloned())
        .bundle(true)
        .minify(true)
        .output(config.output_target()?)
        .format(config.format.into())
        .cwd(cwd)
        .allow_overwrite(config.allow_overwrite)
        .plugin(elmbundle_bundler::plugin(plugin)))
}

/// Elm plugin options for a production build.
///
/// `debug` is always off and `optimize` always on, whatever `NODE_ENV` says.
/// A `pathToElm` containing a directory part is resolved against `cwd`; a
/// bare program name is left for `PATH` lookup.
pub fn elm_plugin_options(config: &ElmBundleConfig, cwd: &Path) -> ElmPluginOptions {
    let options = ElmPluginOptions::new()
        .with_debug(false)
        .with_optimize(true);

    match &config.path_to_elm {
        Some(path) if path.components().count() > 1 || path.is_absolute() => {
            options.with_path_to_elm(resolve_path(path, cwd))
        }
        Some(program) => options.with_path_to_elm(program.clone()),
        None => options,
    }
}

/// Resolve a path relative to a working directory.
pub fn resolve_path(path: &Path, cwd: &Path) -> PathBuf {
    if path.is_absolute() {
        path.to_path_buf()
    } else {
        cwd.join(path)
    }
}

/// Validate that an entry point file exists.
///
/// # Errors
///
/// Returns `BuildError::EntryNotFound` if the file doesn't exist.
pub fn validate_entry(entry: &Path) -> Result<()> {
    if !entry.exists() {
        return Err(BuildError::EntryNotFound(entry.to_path_buf()).into());
    }

    if !entry.is_file() {
        return Err(BuildError::EntryNotAFile(entry.to_path_buf()).into());
    }

    Ok(())
}

fn resolve_cwd(cwd: Option<&Path>) -> Result<PathBuf> {
    let current = std::env::current_dir()?;
    Ok(match cwd {
        Some(dir) => resolve_path(dir, &current),
        None => current,
    })
}

fn print_summary(report: &BuildReport, cwd: &Path) {
    let rows: Vec<(String, u64)> = report
        .files
        .iter()
        .map(|file| {
            let name = file
                .path
                .strip_prefix(cwd)
                .unwrap_or(&file.path)
                .display()
                .to_string();
            (name, file.size as u64)
        })
        .collect();

    ui::print_build_summary(&rows, report.duration);
    if report.warnings > 0 {
        ui::warning(&format!(
            "The bundler reported {} warning{}",
            report.warnings,
            if report.warnings == 1 { "" } else { "s" }
        ));
    }
    ui::success(&format!(
        "Built {} file{} in {}",
        rows.len(),
        if rows.len() == 1 { "" } else { "s" },
        ui::format_duration(report.duration)
    ));
}

#[cfg(test)]
mod tests {
    use super::*;
    use elmbundle_bundler::OutputTarget;
    use serial_test::serial;
    use std::fs;
    use tempfile::TempDir;

    #[test]
    fn test_resolve_path_absolute() {
        let cwd = Path::new("/project");
        let abs = Path::new("/abs/entry.js");
        assert_eq!(resolve_path(abs, cwd), abs);
    }

    #[test]
    fn test_resolve_path_relative() {
        let cwd = Path::new("/project");
        assert_eq!(
            resolve_path(Path::new("esbuild/index.js"), cwd),
            Path::new("/project/esbuild/index.js")
        );
    }

    #[test]
    fn test_validate_entry() {
        let temp = TempDir::new().unwrap();
        let entry = temp.path().join("index.js");
        fs::write(&entry, "console.log(1);").unwrap();

        assert!(validate_entry(&entry).is_ok());
        assert!(matches!(
            validate_entry(&temp.path().join("missing.js")),
            Err(crate::CliError::Build(BuildError::EntryNotFound(_)))
        ));
        assert!(matches!(
            validate_entry(temp.path()),
            Err(crate::CliError::Build(BuildError::EntryNotAFile(_)))
        ));
    }

    #[test]
    #[serial]
    fn test_elm_options_pinned_regardless_of_environment() {
        // SAFETY: serialised with the other env tests
        unsafe {
            std::env::set_var("NODE_ENV", "development");
            std::env::set_var("ELMBUNDLE_DEBUG", "true");
        }

        let options = elm_plugin_options(&ElmBundleConfig::default(), Path::new("/project"));

        unsafe {
            std::env::remove_var("NODE_ENV");
            std::env::remove_var("ELMBUNDLE_DEBUG");
        }

        assert!(!options.debug);
        assert!(options.optimize);
        assert!(options.path_to_elm.is_none());
        assert!(options.validate().is_ok());
    }

    #[test]
    #[serial]
    fn test_pinned_flags_cannot_be_set_from_environment() {
        let temp = TempDir::new().unwrap();
        // SAFETY: serialised with the other env tests
        unsafe { std::env::set_var("ELMBUNDLE_MINIFY", "false") };
        let result = ElmBundleConfig::load(&Cli {
            cwd: Some(temp.path().to_path_buf()),
            ..Default::default()
        });
        unsafe { std::env::remove_var("ELMBUNDLE_MINIFY") };

        assert!(result.is_err());
    }

    #[test]
    fn test_path_to_elm_resolution() {
        let cwd = Path::new("/project");

        let relative = ElmBundleConfig {
            path_to_elm: Some(PathBuf::from("node_modules/.bin/elm")),
            ..Default::default()
        };
        assert_eq!(
            elm_plugin_options(&relative, cwd).path_to_elm,
            Some(PathBuf::from("/project/node_modules/.bin/elm"))
        );

        let bare = ElmBundleConfig {
            path_to_elm: Some(PathBuf::from("elm")),
            ..Default::default()
        };
        assert_eq!(
            elm_plugin_options(&bare, cwd).path_to_elm,
            Some(PathBuf::from("elm"))
        );
    }

    #[test]
    fn test_build_config_pins_bundle_and_minify() {
        let config = ElmBundleConfig::default();
        let build = build_config(&config, Path::new("/project")).unwrap();

        assert!(build.bundle_enabled());
        assert!(build.minify_enabled());
        assert_eq!(build.entries(), ["./esbuild/index.js"]);
        assert_eq!(
            build.output_target(),
            &OutputTarget::File(PathBuf::from("index.js"))
        );
        assert_eq!(build.plugin_count(), 1);
        assert_eq!(build.working_dir(), Some(Path::new("/project")));
        assert!(!build.overwrite_allowed());
    }

    #[test]
    fn test_build_config_rejects_conflicting_output() {
        let config = ElmBundleConfig {
            outdir: Some(PathBuf::from("dist")),
            outfile: Some(PathBuf::from("index.js")),
            ..Default::default()
        };
        assert!(build_config(&config, Path::new("/project")).is_err());
    }
}
