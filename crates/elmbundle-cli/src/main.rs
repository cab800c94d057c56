//! elmbundle - bundle and minify an Elm web app.
//!
//! Parses arguments, sets up logging and colours, then runs the single build.

use clap::Parser;
use elmbundle_cli::{cli, commands, error, logger, ui};
use miette::Result;

#[tokio::main]
async fn main() -> Result<()> {
    let args = cli::Cli::parse();

    logger::init_logger(args.verbose, args.quiet, args.no_color);
    ui::init_colors(args.no_color);

    // Any failure is reported by miette and exits with status 1
    commands::build::execute(args)
        .await
        .map(|_| ())
        .map_err(error::cli_error_to_miette)
}
