//! CLI argument definitions and the batch run handler.
//!
//! Every argument falls back to an environment variable, and from there to
//! the config file.

use clap::Parser;
use std::path::PathBuf;
use tokio::runtime::Runtime;
use tracing::info;

use crate::auth;
use crate::cache::TrackCache;
use crate::config::{self, Overrides, Settings};
use crate::reconcile::{Reconciler, RunSummary};
use crate::spotify::{SpotifyAuth, SpotifyClient};

/// Playlist Sweeper - removes disliked and promoted tracks from your playlists
#[derive(Parser, Debug)]
#[command(author, version, about, long_about = None)]
pub struct Cli {
    /// Config file (default: OS config directory)
    #[arg(long)]
    pub config: Option<PathBuf>,
    /// Spotify user whose playlists are swept
    #[arg(long, env = "USER_NAME")]
    pub username: Option<String>,
    /// Spotify application client ID
    #[arg(long, env = "SPOTIFY_ID")]
    pub client_id: Option<String>,
    /// Spotify application client secret
    #[arg(long, env = "SPOTIFY_SECRET", hide_env_values = true)]
    pub client_secret: Option<String>,
    /// Redirect URL registered for the application
    #[arg(long, env = "REDIRECT_URL")]
    pub redirect_url: Option<String>,
    /// Snapshot cache directory
    #[arg(long, env = "CACHE_DIR")]
    pub cache_dir: Option<PathBuf>,
    /// Token file name inside the cache directory
    #[arg(long, env = "TOKEN_FILE")]
    pub token_file: Option<String>,
    /// Prefix of disliked-track playlists (ex: "disliked_")
    #[arg(long, env = "DISLIKED_PREFIX", allow_hyphen_values = true)]
    pub disliked_prefix: Option<String>,
    /// Suffix of queue playlists (ex: " Queue")
    #[arg(long, env = "QUEUE_SUFFIX", allow_hyphen_values = true)]
    pub queue_suffix: Option<String>,
    /// Authorization code returned by Spotify after authorizing
    #[arg(long, env = "RESPONSE_CODE", hide_env_values = true)]
    pub response_code: Option<String>,
    /// Enable debug logging
    #[arg(short, long)]
    pub verbose: bool,
}

impl Cli {
    /// Values that take precedence over the config file
    pub fn overrides(&self) -> Overrides {
        Overrides {
            username: self.username.clone(),
            client_id: self.client_id.clone(),
            client_secret: self.client_secret.clone(),
            redirect_url: self.redirect_url.clone(),
            cache_dir: self.cache_dir.clone(),
            token_file: self.token_file.clone(),
            disliked_prefix: self.disliked_prefix.clone(),
            queue_suffix: self.queue_suffix.clone(),
            response_code: self.response_code.clone(),
        }
    }
}

/// Run a single reconciliation batch.
pub fn run_command(cli: &Cli) -> anyhow::Result<()> {
    let file_config = match &cli.config {
        Some(path) => config::load_from(path)?,
        None => config::load(),
    };
    let settings = Settings::resolve(file_config, cli.overrides())?;

    let rt = Runtime::new()?;
    let summary = cmd_run(&rt, settings)?;
    print_summary(&summary);
    Ok(())
}

/// Log in, then run every reconciliation step
pub fn cmd_run(rt: &Runtime, settings: Settings) -> anyhow::Result<RunSummary> {
    rt.block_on(async move {
        let cache = TrackCache::new(&settings.cache_dir);
        info!(cache_dir = %cache.dir().display(), "Using snapshot cache");

        let accounts = SpotifyAuth::new(
            &settings.client_id,
            &settings.client_secret,
            &settings.redirect_url,
        );
        let token = auth::login(
            &accounts,
            &cache,
            &settings.token_file,
            settings.response_code.as_deref(),
        )
        .await?;

        let client = SpotifyClient::new(token.access_token)?;
        let reconciler = Reconciler::new(client, cache, settings.rules);
        Ok::<_, anyhow::Error>(reconciler.run().await?)
    })
}

fn print_summary(summary: &RunSummary) {
    println!("Done processing!");
    println!("  Playlists:         {}", summary.playlists);
    println!(
        "  Snapshots updated: {} ({} unchanged)",
        summary.sync.refreshed, summary.sync.unchanged
    );
    println!("  Disliked tracks:   {}", summary.disliked_tracks);
    println!(
        "  Removed:           {} disliked, {} promoted",
        summary.disliked.tracks_removed, summary.queue.tracks_removed
    );

    let failed = summary.disliked.removals_failed + summary.queue.removals_failed;
    let skipped = summary.disliked.playlists_skipped + summary.queue.playlists_skipped;
    if failed > 0 || skipped > 0 {
        println!(
            "  Problems:          {} failed removals, {} skipped playlists (see log)",
            failed, skipped
        );
    }
}
