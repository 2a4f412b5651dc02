//! Command-line interface definition for the Satchel bundler.
//!
//! The surface is deliberately tiny: up to two positional mode tokens plus
//! the usual logging flags. `satchel` with no tokens runs a dev build with
//! watch mode; `production` and `test` adjust the profile.

use clap::Parser;

/// Satchel - bundle an editor plugin into a single distributable file
#[derive(Parser, Debug)]
#[command(
    name = "satchel",
    version,
    about = "Bundle an editor plugin into a single distributable file",
    long_about = "Satchel bundles a TypeScript plugin source tree into one CommonJS file.\n\
                  With no arguments it runs a dev build with inline source maps and\n\
                  rebuilds on file changes. Pass 'production' for a one-shot optimized\n\
                  build, 'test' to bundle the test entry point, or both."
)]
pub struct Cli {
    /// Build mode tokens: 'production' (first position) and/or 'test'
    #[arg(value_name = "MODE", num_args = 0..=2)]
    pub modes: Vec<String>,

    /// Enable verbose logging (debug level)
    #[arg(short, long, global = true)]
    pub verbose: bool,

    /// Suppress all output except errors
    #[arg(short, long, global = true, conflicts_with = "verbose")]
    pub quiet: bool,

    /// Disable colored output
    #[arg(long, global = true)]
    pub no_color: bool,
}
