//! Logging infrastructure for the Satchel CLI.
//!
//! Structured logging via the `tracing` ecosystem: `--verbose` for debug,
//! `--quiet` for errors only, `RUST_LOG` for custom filters, compact colored
//! output otherwise.

use tracing_subscriber::{fmt, layer::SubscriberExt, util::SubscriberInitExt, EnvFilter};

/// Initialize the tracing subscriber with the specified options.
///
/// Call once at the start of the program, before any logging occurs.
///
/// The filter is chosen in this order: `--verbose` (debug for satchel
/// crates), `--quiet` (errors only), `RUST_LOG`, then info for satchel
/// crates.
pub fn init_logger(verbose: bool, quiet: bool, no_color: bool) {
    let filter = if verbose {
        EnvFilter::new("satchel=debug,satchel_bundler=debug,satchel_cli=debug,satchel_plugin_wasm=debug,satchel_plugin_toml=debug")
    } else if quiet {
        EnvFilter::new("satchel=error,satchel_cli=error")
    } else {
        EnvFilter::try_from_default_env()
            .unwrap_or_else(|_| EnvFilter::new("satchel=info,satchel_bundler=info,satchel_cli=info"))
    };

    let fmt_layer = fmt::layer()
        .with_target(false)
        .with_level(true)
        .with_ansi(!no_color)
        .compact();

    tracing_subscriber::registry()
        .with(filter)
        .with(fmt_layer)
        .init();
}
