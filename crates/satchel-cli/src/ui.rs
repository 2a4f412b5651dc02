//! Status message functions for terminal output.

use std::sync::atomic::{AtomicBool, Ordering};

use owo_colors::OwoColorize;

static COLOR_ENABLED: AtomicBool = AtomicBool::new(true);

/// Check if color output should be enabled.
///
/// Respects the NO_COLOR and FORCE_COLOR environment variables.
pub fn should_use_color() -> bool {
    if std::env::var("NO_COLOR").is_ok() {
        return false;
    }
    if std::env::var("FORCE_COLOR").is_ok() {
        return true;
    }
    true
}

/// Initialize color support from the `--no-color` flag and the environment.
pub fn init_colors(no_color: bool) {
    COLOR_ENABLED.store(!no_color && should_use_color(), Ordering::Relaxed);
}

fn colors_enabled() -> bool {
    COLOR_ENABLED.load(Ordering::Relaxed)
}

enum Status {
    Success,
    Info,
    Warning,
    Error,
}

fn format_status(status: &Status, message: &str, colored: bool) -> String {
    if !colored {
        let glyph = match status {
            Status::Success => "✓",
            Status::Info => "ℹ",
            Status::Warning => "⚠",
            Status::Error => "✗",
        };
        return format!("{} {}", glyph, message);
    }
    match status {
        Status::Success => format!("{} {}", "✓".green().bold(), message),
        Status::Info => format!("{} {}", "ℹ".blue().bold(), message),
        Status::Warning => format!("{} {}", "⚠".yellow().bold(), message.yellow()),
        Status::Error => format!("{} {}", "✗".red().bold(), message.red()),
    }
}

/// Print a success message to stderr.
pub fn success(message: &str) {
    eprintln!("{}", format_status(&Status::Success, message, colors_enabled()));
}

/// Print an info message to stderr.
pub fn info(message: &str) {
    eprintln!("{}", format_status(&Status::Info, message, colors_enabled()));
}

/// Print a warning message to stderr.
pub fn warning(message: &str) {
    eprintln!("{}", format_status(&Status::Warning, message, colors_enabled()));
}

/// Print an error message to stderr.
pub fn error(message: &str) {
    eprintln!("{}", format_status(&Status::Error, message, colors_enabled()));
}
