//! Leaves package imports out of the bundle when bundling is disabled.

use rolldown_common::ResolvedExternal;
use rolldown_plugin::{
    HookResolveIdArgs, HookResolveIdOutput, HookResolveIdReturn, Plugin, PluginContext,
};
use std::borrow::Cow;
use tracing::trace;

/// Marks bare specifiers (`elm-pep`, `@scope/pkg`) as external
///
/// Relative and absolute imports still resolve normally, so local source
/// files are compiled into the output while dependencies are not.
#[derive(Debug, Clone, Default)]
pub struct ExternalizeDependenciesPlugin;

impl ExternalizeDependenciesPlugin {
    pub fn new() -> Self {
        Self
    }
}

/// Whether an import specifier names a package rather than a file
pub fn is_bare_specifier(specifier: &str) -> bool {
    if specifier.is_empty()
        || specifier.starts_with('.')
        || specifier.starts_with('/')
        || specifier.starts_with('\\')
        || specifier.starts_with('\0')
    {
        return false;
    }

    // Windows drive prefix, e.g. `C:\src\index.js`
    let bytes = specifier.as_bytes();
    if bytes.len() >= 2 && bytes[0].is_ascii_alphabetic() && bytes[1] == b':' {
        return false;
    }

    true
}

impl Plugin for ExternalizeDependenciesPlugin {
    fn name(&self) -> Cow<'static, str> {
        "elmbundle-externalize".into()
    }

    fn register_hook_usage(&self) -> rolldown_plugin::HookUsage {
        rolldown_plugin::HookUsage::ResolveId
    }

    fn resolve_id(
        &self,
        _ctx: &PluginContext,
        args: &HookResolveIdArgs,
    ) -> impl std::future::Future<Output = HookResolveIdReturn> + Send {
        let specifier = args.specifier.to_string();
        let is_entry = args.importer.is_none();

        async move {
            if is_entry || !is_bare_specifier(&specifier) {
                return Ok(None);
            }

            trace!("externalizing {}", specifier);
            Ok(Some(HookResolveIdOutput {
                id: specifier.into(),
                external: Some(ResolvedExternal::Bool(true)),
                ..Default::default()
            }))
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_bare_specifiers() {
        assert!(is_bare_specifier("elm-pep"));
        assert!(is_bare_specifier("@scope/pkg"));
        assert!(is_bare_specifier("lodash/debounce"));
    }

    #[test]
    fn test_file_specifiers() {
        assert!(!is_bare_specifier("./src/Main.elm"));
        assert!(!is_bare_specifier("../shared.js"));
        assert!(!is_bare_specifier("/abs/index.js"));
        assert!(!is_bare_specifier("C:\\work\\index.js"));
        assert!(!is_bare_specifier("\0virtual"));
        assert!(!is_bare_specifier(""));
    }
}
