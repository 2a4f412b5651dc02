//! # satchel-bundler
//!
//! Rolldown-based bundling core for Satchel, a build tool that packages an
//! editor plugin's source into a single distributable CommonJS file.
//!
//! The crate owns the build options record, the rolldown invocation, the
//! banner-aware output writer, and the Node builtin externals table. The CLI
//! crate assembles options from its build profile and calls [`build`] once
//! per invocation (or once per change event in watch mode).
//!
//! ## Quick start
//!
//! ```no_run
//! use satchel_bundler::BuildOptions;
//!
//! # #[tokio::main]
//! # async fn main() -> Result<(), Box<dyn std::error::Error>> {
//! let output = BuildOptions::new("src/main.ts", "main.js")
//!     .external(satchel_bundler::node_builtins())
//!     .external(["obsidian", "electron"])
//!     .sourcemap_inline()
//!     .build()
//!     .await?;
//!
//! satchel_bundler::write_bundle(&output, std::path::Path::new("."), None)?;
//! # Ok(()) }
//! ```

pub mod builtins;
pub mod diagnostics;
pub mod executor;
pub mod options;
pub mod writer;

pub use builtins::node_builtins;
pub use executor::build;
pub use options::BuildOptions;
pub use writer::write_bundle;

// Re-export core Rolldown types for library users
pub use rolldown::{
    BundleOutput, Bundler, BundlerBuilder, BundlerOptions, InputItem, IsExternal, OutputFormat,
    Platform, SourceMapType,
};

// Re-export common types (ModuleType is needed by plugin authors)
pub use rolldown_common::{ModuleType, Output, OutputAsset, OutputChunk, ResolvedExternal};

// Re-export plugin types so plugin crates share one rolldown surface
pub use rolldown_plugin::{
    __inner::SharedPluginable, HookLoadArgs, HookLoadOutput, HookLoadReturn, HookResolveIdArgs,
    HookResolveIdOutput, HookResolveIdReturn, HookUsage, Plugin, PluginContext,
};

use diagnostics::BuildDiagnostic;

/// Error types for satchel-bundler operations.
#[derive(Debug, thiserror::Error)]
pub enum Error {
    /// Error reported by the rolldown bundler (parse, resolution, plugin).
    #[error("bundler error: {}", format_bundler_error(.0))]
    Bundler(Vec<BuildDiagnostic>),

    /// Invalid build options.
    #[error("invalid configuration: {0}")]
    InvalidConfig(String),

    /// I/O error.
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    /// Output path escapes the output directory or is otherwise unusable.
    #[error("invalid output path: {0}")]
    InvalidOutputPath(String),

    /// Writing the bundle to disk failed.
    #[error("write failure: {0}")]
    WriteFailure(String),
}

/// Result type alias for satchel-bundler operations.
pub type Result<T> = std::result::Result<T, Error>;

impl Error {
    /// Build a bundler error from a rolldown error value.
    pub fn from_rolldown(error: &dyn std::fmt::Debug) -> Self {
        Error::Bundler(diagnostics::extract_from_rolldown(error))
    }
}

fn format_bundler_error(diagnostics: &[BuildDiagnostic]) -> String {
    match diagnostics {
        [] => "unknown bundler error".to_string(),
        [single] => format!("{}: {}", single.kind, single.message),
        many => format!(
            "{} errors: {}",
            many.len(),
            many.iter()
                .map(|d| format!("{}: {}", d.kind, d.message))
                .collect::<Vec<_>>()
                .join("; ")
        ),
    }
}

impl miette::Diagnostic for Error {
    fn code(&self) -> Option<Box<dyn std::fmt::Display + '_>> {
        Some(Box::new(match self {
            Error::Bundler(_) => "BUNDLER_ERROR",
            Error::InvalidConfig(_) => "INVALID_CONFIG",
            Error::Io(_) => "IO_ERROR",
            Error::InvalidOutputPath(_) => "INVALID_OUTPUT_PATH",
            Error::WriteFailure(_) => "WRITE_FAILURE",
        }))
    }

    fn severity(&self) -> Option<miette::Severity> {
        Some(miette::Severity::Error)
    }

    fn help(&self) -> Option<Box<dyn std::fmt::Display + '_>> {
        match self {
            Error::InvalidConfig(msg) => Some(Box::new(format!(
                "Check the build configuration.\nError: {}",
                msg
            ))),
            Error::InvalidOutputPath(path) => Some(Box::new(format!(
                "The output path '{}' must stay within the project directory.",
                path
            ))),
            Error::WriteFailure(msg) => Some(Box::new(format!(
                "Failed to write the bundle. Check disk space and permissions.\nError: {}",
                msg
            ))),
            Error::Bundler(diagnostics) => diagnostics
                .first()
                .and_then(|d| d.help.as_ref())
                .map(|h| Box::new(h.clone()) as Box<dyn std::fmt::Display>),
            _ => None,
        }
    }
}
