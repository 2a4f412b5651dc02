//! One-shot build command.

use std::path::Path;
use std::sync::Arc;
use std::time::Instant;

use satchel_bundler::{write_bundle, BuildOptions};
use satchel_plugin_toml::TomlPlugin;
use satchel_plugin_wasm::WasmPlugin;

use crate::error::Result;
use crate::profile::{BuildProfile, BANNER};
use crate::ui;

/// Execute a single build and write the bundle.
pub async fn build_execute(profile: BuildProfile) -> Result<()> {
    let cwd = std::env::current_dir()?;
    run_build(&profile, &cwd).await
}

/// Run one build of `profile` inside `cwd`.
///
/// Shared by the one-shot command and every watch-mode rebuild.
pub(crate) async fn run_build(profile: &BuildProfile, cwd: &Path) -> Result<()> {
    let start = Instant::now();
    tracing::debug!(
        mode = profile.label(),
        entry = profile.entry,
        "starting build"
    );

    let mut options = BuildOptions::new(profile.entry, profile.output_name)
        .external(profile.externals())
        .banner(BANNER)
        .plugin(Arc::new(WasmPlugin::new()))
        .plugin(Arc::new(TomlPlugin::new()))
        .cwd(cwd);
    if profile.sourcemap_inline {
        options = options.sourcemap_inline();
    }

    let banner = options.banner.clone();
    let output = options.build().await?;
    write_bundle(&output, cwd, banner.as_deref())?;

    ui::success(&format!(
        "Built {} ({} mode) in {}ms",
        profile.output_name,
        profile.label(),
        start.elapsed().as_millis()
    ));
    Ok(())
}
