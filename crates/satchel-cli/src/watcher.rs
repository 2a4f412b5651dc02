//! File system watcher with debouncing for watch mode.
//!
//! Watches the project directory and filters changes to relevant source
//! files, ignoring node_modules, hidden paths, and the bundler's own output
//! files so a rebuild never retriggers itself.

use crate::error::{CliError, Result};
use notify::{Event, RecommendedWatcher, RecursiveMode, Watcher};
use std::path::{Path, PathBuf};
use std::time::{Duration, Instant};
use tokio::sync::mpsc;

/// File change event type.
#[derive(Debug, Clone)]
pub enum FileChange {
    Modified(PathBuf),
    Created(PathBuf),
    Removed(PathBuf),
}

impl FileChange {
    /// Get the path affected by this change.
    pub fn path(&self) -> &Path {
        match self {
            FileChange::Modified(p) | FileChange::Created(p) | FileChange::Removed(p) => p,
        }
    }
}

/// File watcher with debouncing and filtering.
///
/// Watches a directory recursively and sends change events through a
/// channel. Debouncing collapses rapid successive events on the same file
/// into one rebuild.
pub struct FileWatcher {
    _watcher: RecommendedWatcher,
    root: PathBuf,
}

impl FileWatcher {
    /// Create a watcher over `root`, ignoring `output_names` file names.
    ///
    /// Returns the watcher paired with the receiver for change events.
    pub fn new(
        root: PathBuf,
        output_names: Vec<String>,
        debounce_ms: u64,
    ) -> Result<(Self, mpsc::Receiver<FileChange>)> {
        if !root.exists() {
            return Err(CliError::FileNotFound(root));
        }

        let (tx, rx) = mpsc::channel(100);

        let debounce_duration = Duration::from_millis(debounce_ms);
        let mut last_event: Option<(PathBuf, Instant)> = None;
        let root_clone = root.clone();

        let mut watcher = notify::recommended_watcher(move |res: notify::Result<Event>| {
            if let Ok(event) = res {
                for path in &event.paths {
                    if Self::should_ignore(path, &root_clone, &output_names) {
                        continue;
                    }

                    let now = Instant::now();
                    if let Some((last_path, last_time)) = &last_event {
                        if last_path == path && now.duration_since(*last_time) < debounce_duration
                        {
                            continue;
                        }
                    }
                    last_event = Some((path.clone(), now));

                    let change = match event.kind {
                        notify::EventKind::Create(_) => FileChange::Created(path.clone()),
                        notify::EventKind::Modify(_) => FileChange::Modified(path.clone()),
                        notify::EventKind::Remove(_) => FileChange::Removed(path.clone()),
                        _ => continue,
                    };

                    let _ = tx.blocking_send(change);
                }
            }
        })
        .map_err(CliError::Watch)?;

        watcher
            .watch(&root, RecursiveMode::Recursive)
            .map_err(CliError::Watch)?;

        Ok((
            Self {
                _watcher: watcher,
                root,
            },
            rx,
        ))
    }

    /// Check if a path should be ignored.
    ///
    /// Paths outside the root, inside node_modules, under a hidden
    /// directory, or matching an output file name are ignored.
    fn should_ignore(path: &Path, root: &Path, output_names: &[String]) -> bool {
        if !path.starts_with(root) {
            return true;
        }

        let rel_path = match path.strip_prefix(root) {
            Ok(p) => p,
            Err(_) => return true,
        };

        for component in rel_path.components() {
            if let Some(name) = component.as_os_str().to_str() {
                if name == "node_modules" {
                    return true;
                }
                if name.starts_with('.') && name != "." && name != ".." {
                    return true;
                }
            }
        }

        if let Some(name) = rel_path.file_name().and_then(|n| n.to_str()) {
            if output_names.iter().any(|o| o == name) {
                return true;
            }
            if name.ends_with(".tmp") {
                return true;
            }
        }

        false
    }

    /// Get the root directory being watched.
    pub fn root(&self) -> &Path {
        &self.root
    }
}
