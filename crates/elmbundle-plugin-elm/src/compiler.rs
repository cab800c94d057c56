//! `elm make` integration for compiling Elm modules to JavaScript

use crate::error::CompilerError;
use crate::options::ElmPluginOptions;
use std::path::{Path, PathBuf};
use std::process::Stdio;
use tokio::process::Command;
use tracing::debug;

/// Name of the Elm project manifest
const ELM_JSON: &str = "elm.json";

/// Elm compiler runner
///
/// Resolves the project and compiler binary for a module, runs
/// `elm make` with the configured mode flags, and returns the compiled
/// script. The output goes to a temporary directory that is removed
/// once the script has been read.
#[derive(Debug, Clone)]
pub struct ElmCompiler {
    options: ElmPluginOptions,
}

impl ElmCompiler {
    pub fn new(options: ElmPluginOptions) -> Self {
        Self { options }
    }

    pub fn options(&self) -> &ElmPluginOptions {
        &self.options
    }

    /// Directory holding the `elm.json` that owns `module`
    pub fn project_root(&self, module: &Path) -> Result<PathBuf, CompilerError> {
        if let Some(cwd) = &self.options.cwd {
            return Ok(cwd.clone());
        }

        module
            .ancestors()
            .skip(1)
            .find(|dir| dir.join(ELM_JSON).is_file())
            .map(Path::to_path_buf)
            .ok_or_else(|| CompilerError::project_not_found(module))
    }

    /// Compiler binary to run for a project
    ///
    /// Priority: explicit `path_to_elm` > project-local `node_modules/.bin/elm` > `elm`
    pub fn resolve_binary(&self, project_root: &Path) -> PathBuf {
        if let Some(path) = &self.options.path_to_elm {
            return path.clone();
        }

        let local = project_root.join("node_modules").join(".bin").join("elm");
        if local.is_file() {
            return local;
        }

        PathBuf::from("elm")
    }

    /// Compile a single Elm module to a JavaScript string
    ///
    /// # Arguments
    ///
    /// * `module` - Absolute path to the `.elm` file
    pub async fn compile(&self, module: &Path) -> Result<String, CompilerError> {
        let project_root = self.project_root(module)?;
        let binary = self.resolve_binary(&project_root);

        let out_dir = tempfile::tempdir().map_err(CompilerError::spawn_failed)?;
        let out_file = out_dir.path().join("elm.js");

        let mut cmd = Command::new(&binary);
        cmd.arg("make")
            .arg(module)
            .arg(format!("--output={}", out_file.display()))
            .args(self.options.mode_args());

        cmd.stdin(Stdio::null())
            .stdout(Stdio::piped())
            .stderr(Stdio::piped());
        cmd.current_dir(&project_root);

        debug!(
            "[elmbundle-elm] Running {} make {} in {}",
            binary.display(),
            module.display(),
            project_root.display()
        );

        let child = cmd.spawn().map_err(|e| match e.kind() {
            std::io::ErrorKind::NotFound => CompilerError::elm_not_found(&binary),
            _ => CompilerError::spawn_failed(e),
        })?;

        let output = child
            .wait_with_output()
            .await
            .map_err(CompilerError::spawn_failed)?;

        if !output.status.success() {
            // elm reports compile errors on stderr; some wrappers use stdout
            let mut stderr = String::from_utf8_lossy(&output.stderr).trim().to_string();
            if stderr.is_empty() {
                stderr = String::from_utf8_lossy(&output.stdout).trim().to_string();
            }
            let exit_code = output.status.code().unwrap_or(-1);
            return Err(CompilerError::compile_failed(module, exit_code, stderr));
        }

        let compiled = tokio::fs::read_to_string(&out_file)
            .await
            .map_err(|e| CompilerError::output_unreadable(&out_file, e))?;

        debug!(
            "[elmbundle-elm] Compiled {} ({} bytes)",
            module.display(),
            compiled.len()
        );

        Ok(compiled)
    }
}

/// Wrap a compiled Elm script as an ES module
///
/// The compiler emits a script that assigns `Elm` onto its `this`. It is
/// run against a local scope object and the result re-exported.
pub fn wrap_as_esm(compiled: &str) -> String {
    format!(
        "const scope = {{}};\n(function () {{\n{compiled}\n}}).call(scope);\nexport const Elm = scope.Elm;\nexport default scope.Elm;\n"
    )
}
