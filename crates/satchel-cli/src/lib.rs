//! Satchel CLI - bundle an editor plugin into a single distributable file.
//!
//! This crate provides the `satchel` binary: it selects a build profile from
//! positional mode tokens, assembles bundler options, and runs one build or a
//! watch loop.
//!
//! # Architecture
//!
//! - [`cli`] - Argument parsing with clap
//! - [`profile`] - Declarative build profile table and fixed build constants
//! - [`commands`] - One-shot build and watch loop
//! - [`watcher`] - Debounced file watching for dev mode
//! - [`error`] - CLI error types and miette conversion
//! - [`logger`] - Structured logging with tracing
//! - [`ui`] - Colored status messages

pub mod cli;
pub mod commands;
pub mod error;
pub mod logger;
pub mod profile;
pub mod ui;
pub mod watcher;

pub use error::{CliError, Result};
pub use profile::BuildProfile;
