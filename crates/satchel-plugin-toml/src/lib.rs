//! Rolldown plugin that imports TOML files as JSON modules
//!
//! Intercepts `.toml` file loading, parses the document, and hands Rolldown
//! the equivalent JSON with `ModuleType::Json`, so `import manifest from
//! "./manifest.toml"` yields a plain object at runtime.
//!
//! ## Example Usage
//!
//! ```rust,no_run
//! use satchel_plugin_toml::TomlPlugin;
//! use std::sync::Arc;
//!
//! let plugin = Arc::new(TomlPlugin::new());
//! ```

use anyhow::Context;
use rolldown_common::ModuleType;
use rolldown_plugin::{HookLoadArgs, HookLoadOutput, HookLoadReturn, Plugin, PluginContext};
use std::borrow::Cow;

/// Plugin that serves `.toml` imports as JSON modules
#[derive(Debug, Clone, Default)]
pub struct TomlPlugin;

impl TomlPlugin {
    pub fn new() -> Self {
        Self
    }
}

impl Plugin for TomlPlugin {
    fn name(&self) -> Cow<'static, str> {
        "satchel-toml".into()
    }

    fn register_hook_usage(&self) -> rolldown_plugin::HookUsage {
        use rolldown_plugin::HookUsage;
        HookUsage::Load
    }

    /// Load hook - intercepts `.toml` files and converts them to JSON
    fn load(
        &self,
        _ctx: &PluginContext,
        args: &HookLoadArgs<'_>,
    ) -> impl std::future::Future<Output = HookLoadReturn> + Send {
        let id = args.id.to_string();

        async move {
            if !id.ends_with(".toml") {
                return Ok(None);
            }

            let source = tokio::fs::read_to_string(&id)
                .await
                .with_context(|| format!("Failed to read TOML file: {}", id))?;

            let json = toml_to_json(&source)
                .with_context(|| format!("Failed to parse TOML file: {}", id))?;

            Ok(Some(HookLoadOutput {
                code: json.into(),
                module_type: Some(ModuleType::Json),
                ..Default::default()
            }))
        }
    }
}

/// Convert a TOML document to its JSON representation.
fn toml_to_json(source: &str) -> anyhow::Result<String> {
    let value: toml::Value = toml::from_str(source)?;
    Ok(serde_json::to_string(&value)?)
}
