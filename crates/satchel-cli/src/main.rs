//! Satchel CLI - single-file plugin bundler.
//!
//! Entry point: parses the mode tokens, initializes logging, selects the
//! build profile, and dispatches to a one-shot build or the watch loop.

use clap::Parser;
use miette::Result;
use satchel_cli::{cli, commands, error, logger, profile, ui};

#[tokio::main]
async fn main() -> Result<()> {
    let args = cli::Cli::parse();

    logger::init_logger(args.verbose, args.quiet, args.no_color);
    ui::init_colors(args.no_color);

    let profile = profile::BuildProfile::from_tokens(&args.modes);

    let result = if profile.watch {
        commands::watch_execute(profile).await
    } else {
        commands::build_execute(profile).await
    };

    result.map_err(error::cli_error_to_miette)
}
