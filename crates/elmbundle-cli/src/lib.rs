//! # elmbundle-cli
//!
//! Command-line front end for a one-shot production build of an Elm web app:
//! bundle the JavaScript entry, compile the Elm modules it imports with
//! `--optimize`, minify, and write the result.
//!
//! The library half exists so the build command can be driven from tests.

pub mod cli;
pub mod commands;
pub mod config;
pub mod error;
pub mod logger;
pub mod ui;

pub use error::{CliError, Result};
