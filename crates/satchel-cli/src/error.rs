//! Error handling for the Satchel CLI.
//!
//! One flat error enum with `thiserror`, converted to miette reports at the
//! `main` boundary so build failures print with codes and hints before the
//! process exits with status 1.

use miette::Report;
use thiserror::Error;

/// Top-level CLI error type.
#[derive(Debug, Error)]
pub enum CliError {
    /// Errors from the bundler library (build, validation, write)
    #[error("{0}")]
    Bundler(#[from] satchel_bundler::Error),

    /// File watching errors
    #[error("File watcher error: {0}")]
    Watch(#[from] notify::Error),

    /// I/O errors from file system operations
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    /// File or directory not found
    #[error("File not found: {}", .0.display())]
    FileNotFound(std::path::PathBuf),
}

/// Result type alias using `CliError` as the default error type.
pub type Result<T, E = CliError> = std::result::Result<T, E>;

/// Convert a CliError to a miette Report.
pub fn cli_error_to_miette(err: CliError) -> Report {
    match err {
        // Bundler errors implement Diagnostic with codes and hints
        CliError::Bundler(e) => Report::new(e),
        other => miette::miette!("{}", other),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn bundler_errors_keep_their_diagnostic_code() {
        let err = CliError::Bundler(satchel_bundler::Error::InvalidConfig(
            "entry point is required".into(),
        ));
        let report = cli_error_to_miette(err);
        assert!(format!("{:?}", report).contains("entry point is required"));
    }

    #[test]
    fn file_not_found_formats_the_path() {
        let err = CliError::FileNotFound("src/main.ts".into());
        assert!(err.to_string().contains("src/main.ts"));
    }
}
