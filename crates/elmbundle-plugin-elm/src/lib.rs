//! Rolldown plugin for Elm modules
//!
//! Compiles `.elm` files imported from JavaScript by running the Elm
//! compiler, and hands the result to the bundler as an ES module.
//!
//! ```text
//! import { Elm } from './src/Main.elm' → load() hook → elm make → ES module → Rolldown
//! ```
//!
//! The `load` hook is used because `.elm` sources are not JavaScript;
//! they have to be replaced before Rolldown's parser sees them.
//!
//! ## Example Usage
//!
//! ```rust,no_run
//! use elmbundle_plugin_elm::{ElmPlugin, ElmPluginOptions};
//! use std::sync::Arc;
//!
//! # fn example() -> Result<(), Box<dyn std::error::Error>> {
//! let options = ElmPluginOptions::new().with_debug(false).with_optimize(true);
//! let plugin = Arc::new(ElmPlugin::with_options(options)?);
//! // Add to your Rolldown bundler configuration
//! # Ok(())
//! # }
//! ```

mod compiler;
mod error;
mod options;

pub use compiler::{ElmCompiler, wrap_as_esm};
pub use error::CompilerError;
pub use options::ElmPluginOptions;

use rolldown_common::ModuleType;
use rolldown_plugin::{HookLoadArgs, HookLoadOutput, HookLoadReturn, Plugin, PluginContext};
use std::borrow::Cow;
use std::path::Path;
use std::sync::Arc;
use tracing::debug;

/// Rolldown plugin that compiles Elm modules with `elm make`
///
/// Compilations are serialised per plugin instance: the compiler keeps
/// per-project build state in `elm-stuff` and concurrent runs on the same
/// project can corrupt it.
#[derive(Debug, Clone)]
pub struct ElmPlugin {
    compiler: ElmCompiler,
    compile_lock: Arc<tokio::sync::Mutex<()>>,
}

impl ElmPlugin {
    /// Create a plugin with default options
    ///
    /// `optimize` follows `NODE_ENV`, `debug` is off.
    pub fn new() -> Self {
        Self::from_valid(ElmPluginOptions::default())
    }

    /// Create a plugin with explicit options
    ///
    /// Fails with [`CompilerError::ConflictingModes`] if both `debug` and
    /// `optimize` are set.
    pub fn with_options(options: ElmPluginOptions) -> Result<Self, CompilerError> {
        options.validate()?;
        Ok(Self::from_valid(options))
    }

    fn from_valid(options: ElmPluginOptions) -> Self {
        Self {
            compiler: ElmCompiler::new(options),
            compile_lock: Arc::new(tokio::sync::Mutex::new(())),
        }
    }

    pub fn options(&self) -> &ElmPluginOptions {
        self.compiler.options()
    }
}

impl Default for ElmPlugin {
    fn default() -> Self {
        Self::new()
    }
}

impl Plugin for ElmPlugin {
    fn name(&self) -> Cow<'static, str> {
        "elmbundle-elm".into()
    }

    fn register_hook_usage(&self) -> rolldown_plugin::HookUsage {
        rolldown_plugin::HookUsage::Load
    }

    fn load(
        &self,
        _ctx: &PluginContext,
        args: &HookLoadArgs<'_>,
    ) -> impl std::future::Future<Output = HookLoadReturn> + Send {
        let id = args.id.to_string();
        let compiler = self.compiler.clone();
        let lock = Arc::clone(&self.compile_lock);

        async move {
            if !id.ends_with(".elm") {
                return Ok(None);
            }

            debug!("[elmbundle-elm] Load hook called for: {}", id);

            let compiled = {
                let _guard = lock.lock().await;
                compiler.compile(Path::new(&id)).await?
            };

            Ok(Some(HookLoadOutput {
                code: wrap_as_esm(&compiled).into(),
                module_type: Some(ModuleType::Js),
                ..Default::default()
            }))
        }
    }
}
