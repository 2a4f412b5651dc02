//! CLI command implementations.

pub mod build;
pub mod watch;

pub use build::build_execute;
pub use watch::watch_execute;
