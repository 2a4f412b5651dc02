//! Rolldown plugin that inlines WebAssembly binaries
//!
//! Intercepts imports of `.wasm` files and serves their contents as a binary
//! module, so the bundled plugin ships its wasm payload inside the single
//! output file instead of loading it from disk at runtime.
//!
//! ## How it works
//!
//! The `resolve_id` hook claims any specifier ending in `.wasm`, resolves it
//! against the importing module's directory, and tags the resolved path with
//! a private module-id prefix so no other plugin touches it. The `load` hook
//! recognizes that prefix, reads the file, and hands the bytes to Rolldown
//! base64-encoded with `ModuleType::Base64`, which Rolldown turns into a
//! `Uint8Array`-backed buffer export.
//!
//! ## Example Usage
//!
//! ```rust,no_run
//! use satchel_plugin_wasm::WasmPlugin;
//! use std::sync::Arc;
//!
//! let plugin = Arc::new(WasmPlugin::new());
//! ```

use anyhow::Context;
use base64::Engine;
use base64::engine::general_purpose::STANDARD as BASE64;
use path_clean::PathClean;
use rolldown_common::{ModuleType, ResolvedExternal};
use rolldown_plugin::{
    HookLoadArgs, HookLoadOutput, HookLoadReturn, HookResolveIdArgs, HookResolveIdOutput,
    HookResolveIdReturn, Plugin, PluginContext,
};
use std::borrow::Cow;
use std::path::{Path, PathBuf};

/// Module-id prefix marking a wasm binary claimed by this plugin.
///
/// The leading NUL byte follows the rollup convention for virtual module ids
/// and keeps other resolvers and loaders away from them.
const WASM_MODULE_PREFIX: &str = "\0wasm-binary:";

/// Plugin that serves `.wasm` imports as embedded binary modules
#[derive(Debug, Clone, Default)]
pub struct WasmPlugin;

impl WasmPlugin {
    pub fn new() -> Self {
        Self
    }
}

impl Plugin for WasmPlugin {
    fn name(&self) -> Cow<'static, str> {
        "satchel-wasm".into()
    }

    fn register_hook_usage(&self) -> rolldown_plugin::HookUsage {
        use rolldown_plugin::HookUsage;
        HookUsage::ResolveId | HookUsage::Load
    }

    /// Resolve ID hook - claims `.wasm` specifiers
    ///
    /// Specifiers without an importer (an entry, or a synthetic module with
    /// no directory context) are declined so Rolldown's default resolution
    /// can report them.
    fn resolve_id(
        &self,
        _ctx: &PluginContext,
        args: &HookResolveIdArgs,
    ) -> impl std::future::Future<Output = HookResolveIdReturn> + Send {
        let specifier = args.specifier.to_string();
        let importer = args.importer.map(|i| i.to_string());

        async move {
            if !specifier.ends_with(".wasm") {
                return Ok(None);
            }

            let Some(resolved) = resolve_wasm_path(&specifier, importer.as_deref()) else {
                return Ok(None);
            };

            Ok(Some(HookResolveIdOutput {
                id: format!("{}{}", WASM_MODULE_PREFIX, resolved.display()).into(),
                external: Some(ResolvedExternal::Bool(false)),
                ..Default::default()
            }))
        }
    }

    /// Load hook - reads the claimed wasm file and embeds its bytes
    fn load(
        &self,
        _ctx: &PluginContext,
        args: &HookLoadArgs<'_>,
    ) -> impl std::future::Future<Output = HookLoadReturn> + Send {
        let id = args.id.to_string();

        async move {
            let Some(path) = id.strip_prefix(WASM_MODULE_PREFIX) else {
                return Ok(None);
            };

            Ok(Some(load_wasm_module(path).await?))
        }
    }
}

/// Read a wasm file and wrap its bytes as a base64 binary module.
async fn load_wasm_module(path: &str) -> anyhow::Result<HookLoadOutput> {
    let bytes = tokio::fs::read(path)
        .await
        .with_context(|| format!("Failed to read wasm file: {}", path))?;

    Ok(HookLoadOutput {
        code: BASE64.encode(&bytes).into(),
        module_type: Some(ModuleType::Base64),
        ..Default::default()
    })
}

/// Resolve a `.wasm` specifier against the importing module's directory.
///
/// Absolute specifiers pass through cleaned. Relative ones need an importer
/// with a parent directory; without one there is no resolution base and the
/// specifier is declined.
fn resolve_wasm_path(specifier: &str, importer: Option<&str>) -> Option<PathBuf> {
    let specifier_path = Path::new(specifier);
    if specifier_path.is_absolute() {
        return Some(specifier_path.clean());
    }

    let importer = importer?;
    let base = Path::new(importer).parent()?;
    if base.as_os_str().is_empty() {
        return None;
    }

    let joined = base.join(specifier_path).clean();
    // Only absolute ids go into the namespace; anything else defers
    joined.is_absolute().then_some(joined)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn plugin_name() {
        let plugin = WasmPlugin::new();
        assert_eq!(plugin.name(), "satchel-wasm");
    }

    #[test]
    fn resolves_relative_to_importer() {
        let resolved = resolve_wasm_path("./tokenizer.wasm", Some("/proj/src/main.ts")).unwrap();
        assert_eq!(resolved, Path::new("/proj/src/tokenizer.wasm"));
    }

    #[test]
    fn resolves_parent_traversal() {
        let resolved = resolve_wasm_path("../assets/t.wasm", Some("/proj/src/main.ts")).unwrap();
        assert_eq!(resolved, Path::new("/proj/assets/t.wasm"));
    }

    #[test]
    fn absolute_specifiers_pass_through() {
        let resolved = resolve_wasm_path("/proj/assets/t.wasm", None).unwrap();
        assert_eq!(resolved, Path::new("/proj/assets/t.wasm"));
    }

    #[test]
    fn relative_without_importer_is_declined() {
        assert!(resolve_wasm_path("./t.wasm", None).is_none());
        assert!(resolve_wasm_path("t.wasm", Some("main.ts")).is_none());
    }

    #[tokio::test]
    async fn load_embeds_file_bytes_as_base64() {
        let dir = tempfile::tempdir().unwrap();
        let wasm_path = dir.path().join("mod.wasm");
        let payload: &[u8] = &[0x00, 0x61, 0x73, 0x6d, 0x01, 0x00, 0x00, 0x00];
        std::fs::write(&wasm_path, payload).unwrap();

        let output = load_wasm_module(wasm_path.to_str().unwrap()).await.unwrap();
        assert_eq!(output.code.as_str(), BASE64.encode(payload));
        assert!(matches!(output.module_type, Some(ModuleType::Base64)));
    }

    #[tokio::test]
    async fn missing_file_is_an_error() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("absent.wasm");
        let err = load_wasm_module(path.to_str().unwrap()).await.unwrap_err();
        assert!(err.to_string().contains("absent.wasm"));
    }
}
