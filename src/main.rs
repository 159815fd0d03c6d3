//! Playlist Sweeper - keeps Spotify playlists tidy.
//!
//! Each run snapshots the user's playlists to a local cache, removes tracks
//! listed in "disliked" playlists, and removes tracks from queue playlists
//! once they have been promoted to their destination playlist.

pub mod auth;
pub mod cache;
pub mod cli;
pub mod config;
pub mod error;
pub mod model;
pub mod reconcile;
pub mod spotify;
#[cfg(test)]
pub mod test_utils;

use clap::Parser;
use tracing_subscriber::{EnvFilter, fmt, prelude::*};

fn main() -> anyhow::Result<()> {
    let args = cli::Cli::parse();

    // Initialize logging
    let directive = if args.verbose {
        "playlist_sweeper=debug"
    } else {
        "playlist_sweeper=info"
    };
    tracing_subscriber::registry()
        .with(fmt::layer().with_target(true))
        .with(EnvFilter::from_default_env().add_directive(directive.parse()?))
        .init();

    cli::run_command(&args)
}
