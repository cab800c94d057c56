//! File writing for bundle output.
//!
//! All files of a build are written in two phases: each file goes to a
//! temporary sibling first, and only once every write succeeded are the
//! temporaries renamed into place. On failure the temporaries are removed,
//! so a failed build leaves the previous output untouched.
//!
//! Existing output is always replaced; re-running a build needs no cleanup.
//! Output paths are cleaned and must stay inside the target directory.

use std::ffi::OsString;
use std::fs;
use std::path::{Path, PathBuf};

use path_clean::PathClean;
use rolldown::BundleOutput;
use rolldown_common::Output;
use tracing::{debug, warn};

use super::WrittenFile;
use crate::{Error, Result};

/// Writes every chunk and asset of a bundle into `dir`.
///
/// # Arguments
///
/// * `output` - The bundle output to write
/// * `dir` - Target directory, created if missing
/// * `protected` - Absolute paths that must not be overwritten (entry files)
///
/// # Examples
///
/// ```no_run
/// use elmbundle_bundler::output::writer::write_bundle_to;
/// use std::path::Path;
/// # use rolldown::BundleOutput;
///
/// # fn example(output: &BundleOutput) -> elmbundle_bundler::Result<()> {
/// let written = write_bundle_to(output, Path::new("dist"), &[])?;
/// # Ok(())
/// # }
/// ```
pub fn write_bundle_to(
    output: &BundleOutput,
    dir: &Path,
    protected: &[PathBuf],
) -> Result<Vec<WrittenFile>> {
    let dir = normalize_path(dir)?;

    let mut operations = Vec::new();
    for item in &output.assets {
        let (filename, content) = output_contents(item);
        let target_path = validate_output_path(&dir, filename)?;
        operations.push((target_path, content));
    }

    write_operations(&dir, &operations, protected)
}

/// Writes the single chunk of a bundle to `file`.
///
/// Assets emitted alongside the chunk are written next to the file. A build
/// that produced more than one chunk cannot be written to a single file.
pub fn write_bundle_to_file(
    output: &BundleOutput,
    file: &Path,
    protected: &[PathBuf],
) -> Result<Vec<WrittenFile>> {
    let file = normalize_path(file)?;
    let dir = match file.parent() {
        Some(parent) if file.file_name().is_some() => parent.to_path_buf(),
        _ => {
            return Err(Error::InvalidOutputPath(format!(
                "'{}' is not a file path",
                file.display()
            )));
        }
    };

    let chunk_count = output
        .assets
        .iter()
        .filter(|item| matches!(item, Output::Chunk(_)))
        .count();
    if chunk_count != 1 {
        return Err(Error::InvalidConfig(format!(
            "Output file '{}' needs exactly one output chunk, but the build produced {}. Use an output directory instead.",
            file.display(),
            chunk_count
        )));
    }

    let mut operations = Vec::new();
    for item in &output.assets {
        match item {
            Output::Chunk(chunk) => operations.push((file.clone(), chunk.code.as_bytes())),
            Output::Asset(asset) => {
                let target_path = validate_output_path(&dir, asset.filename.as_str())?;
                operations.push((target_path, asset.source.as_bytes()));
            }
        }
    }

    write_operations(&dir, &operations, protected)
}

fn output_contents(item: &Output) -> (&str, &[u8]) {
    match item {
        Output::Chunk(chunk) => (chunk.filename.as_str(), chunk.code.as_bytes()),
        Output::Asset(asset) => (asset.filename.as_str(), asset.source.as_bytes()),
    }
}

fn write_operations(
    dir: &Path,
    operations: &[(PathBuf, &[u8])],
    protected: &[PathBuf],
) -> Result<Vec<WrittenFile>> {
    for (target_path, _) in operations {
        if protected.iter().any(|p| p == target_path) {
            return Err(Error::OverwritesInput(target_path.clone()));
        }
    }

    fs::create_dir_all(dir).map_err(|e| {
        Error::WriteFailure(format!(
            "Failed to create output directory '{}': {}",
            dir.display(),
            e
        ))
    })?;

    write_files_atomic(operations)?;

    Ok(operations
        .iter()
        .map(|(path, content)| WrittenFile {
            path: path.clone(),
            size: content.len(),
        })
        .collect())
}

/// Cleans a path and makes it absolute against the process working directory.
fn normalize_path(dir: &Path) -> Result<PathBuf> {
    let cleaned = dir.clean();

    let absolute = if cleaned.is_absolute() {
        cleaned
    } else {
        std::env::current_dir()
            .map_err(|e| {
                Error::InvalidOutputPath(format!("Failed to get current directory: {}", e))
            })?
            .join(&cleaned)
            .clean()
    };

    Ok(absolute)
}

/// Joins `filename` onto `base_dir`, rejecting anything that escapes it.
fn validate_output_path(base_dir: &Path, filename: &str) -> Result<PathBuf> {
    if filename.contains('\0') {
        return Err(Error::InvalidOutputPath(
            "Filename contains null byte".to_string(),
        ));
    }

    let full_path = base_dir.join(Path::new(filename).clean()).clean();

    if !full_path.starts_with(base_dir) || full_path == base_dir {
        return Err(Error::InvalidOutputPath(format!(
            "Path '{}' escapes output directory '{}' (resolved to '{}')",
            filename,
            base_dir.display(),
            full_path.display()
        )));
    }

    Ok(full_path)
}

/// `index.js` -> `index.js.tmp`, keeping temporaries of `a.js` and `a.css` apart.
fn temp_path_for(target: &Path) -> PathBuf {
    let mut name = target
        .file_name()
        .map(OsString::from)
        .unwrap_or_default();
    name.push(".tmp");
    target.with_file_name(name)
}

fn write_files_atomic(operations: &[(PathBuf, &[u8])]) -> Result<()> {
    let mut temp_files = Vec::new();

    // Phase 1: write temporaries
    for (target_path, content) in operations {
        if let Some(parent) = target_path.parent() {
            fs::create_dir_all(parent).map_err(|e| {
                cleanup_temp_files(&temp_files);
                Error::WriteFailure(format!(
                    "Failed to create directory '{}': {}",
                    parent.display(),
                    e
                ))
            })?;
        }

        let temp_path = temp_path_for(target_path);
        fs::write(&temp_path, content).map_err(|e| {
            cleanup_temp_files(&temp_files);
            Error::WriteFailure(format!(
                "Failed to write temporary file '{}': {}",
                temp_path.display(),
                e
            ))
        })?;

        temp_files.push((temp_path, target_path.clone()));
    }

    // Phase 2: rename into place
    for (temp_path, target_path) in &temp_files {
        fs::rename(temp_path, target_path).map_err(|e| {
            cleanup_temp_files(&temp_files);
            Error::WriteFailure(format!(
                "Failed to rename '{}' to '{}': {}",
                temp_path.display(),
                target_path.display(),
                e
            ))
        })?;
        debug!("wrote {}", target_path.display());
    }

    Ok(())
}

fn cleanup_temp_files(temp_files: &[(PathBuf, PathBuf)]) {
    for (temp_path, _) in temp_files {
        if temp_path.exists() {
            if let Err(e) = fs::remove_file(temp_path) {
                warn!(
                    "Failed to clean up temporary file '{}': {}",
                    temp_path.display(),
                    e
                );
            }
        }
    }
}
