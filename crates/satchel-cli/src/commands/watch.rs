//! Watch command: initial build, then rebuild on every file change.
//!
//! The initial build failing is fatal. After that the loop logs rebuild
//! failures and keeps watching, so a transient syntax error never kills the
//! session; the process runs until externally terminated.

use crate::commands::build::run_build;
use crate::error::Result;
use crate::profile::BuildProfile;
use crate::ui;
use crate::watcher::FileWatcher;

/// Debounce window for file change events.
const DEBOUNCE_MS: u64 = 150;

/// Execute the watch loop.
pub async fn watch_execute(profile: BuildProfile) -> Result<()> {
    let cwd = std::env::current_dir()?;

    run_build(&profile, &cwd).await?;

    let output_names = vec![profile.output_name.to_string()];
    let (_watcher, mut rx) = FileWatcher::new(cwd.clone(), output_names, DEBOUNCE_MS)?;
    ui::info(&format!("Watching {} for changes", cwd.display()));

    while let Some(change) = rx.recv().await {
        tracing::debug!(path = %change.path().display(), "file changed");

        match run_build(&profile, &cwd).await {
            Ok(()) => {}
            Err(e) => {
                // Keep watching: the next change gets a fresh build
                ui::error(&format!("Rebuild failed: {}", e));
            }
        }
    }

    Ok(())
}
