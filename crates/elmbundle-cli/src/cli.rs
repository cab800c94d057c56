//! Command-line interface definition.
//!
//! There is one command, so there are no subcommands: running `elmbundle`
//! performs the build. Every flag is optional and overrides the matching
//! key from `elmbundle.config.json` or the environment.

use clap::Parser;
use std::path::PathBuf;

use crate::config::Format;

/// elmbundle - bundle and minify an Elm web app
#[derive(Parser, Debug, Default)]
#[command(
    name = "elmbundle",
    version,
    about = "Bundle and minify an Elm web app",
    long_about = "Bundles a JavaScript entry point together with the Elm modules it imports.\n\
                  Elm code is compiled with --optimize, dependencies are inlined and the\n\
                  result is minified into a single production file."
)]
pub struct Cli {
    /// Entry point(s), relative to the working directory
    ///
    /// Can be repeated. Defaults to ./esbuild/index.js.
    #[arg(short, long, value_name = "FILE")]
    pub entry: Vec<String>,

    /// Write every output file into this directory
    #[arg(long, value_name = "DIR", conflicts_with = "outfile")]
    pub outdir: Option<PathBuf>,

    /// Write the bundle to this file (default: index.js)
    #[arg(long, value_name = "FILE")]
    pub outfile: Option<PathBuf>,

    /// Output format
    #[arg(long, value_enum)]
    pub format: Option<Format>,

    /// Path to the elm binary
    ///
    /// Defaults to node_modules/.bin/elm in the project, then elm on PATH.
    #[arg(long, value_name = "PATH")]
    pub path_to_elm: Option<PathBuf>,

    /// Working directory for entries, output and config lookup
    #[arg(long, value_name = "DIR")]
    pub cwd: Option<PathBuf>,

    /// Config file (default: elmbundle.config.json in the working directory)
    #[arg(short, long, value_name = "FILE")]
    pub config: Option<PathBuf>,

    /// Allow the output to replace an entry file
    #[arg(long)]
    pub allow_overwrite: bool,

    /// Enable verbose logging (debug level)
    #[arg(short, long)]
    pub verbose: bool,

    /// Suppress all output except errors
    #[arg(short, long, conflicts_with = "verbose")]
    pub quiet: bool,

    /// Disable colored output
    #[arg(long)]
    pub no_color: bool,
}
