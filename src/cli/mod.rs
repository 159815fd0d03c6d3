//! Command-line interface for playlist-sweeper.
//!
//! A single batch run: resolve settings, log in, reconcile, print a summary.

mod commands;

pub use commands::{Cli, cmd_run, run_command};
