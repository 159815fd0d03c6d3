//! Track snapshot disk cache.
//!
//! Stores each playlist's tracks as pretty-printed JSON under the cache
//! directory, alongside the token file.

use std::fs;
use std::io;
use std::path::{Path, PathBuf};

use tracing::debug;

use super::{SnapshotStore, TokenStore};
use crate::error::{Error, Result, ResultExt};
use crate::model::{Token, Track};

/// Characters replaced in playlist names before they become filenames.
const UNSAFE_CHARS: [char; 3] = ['/', '\\', '.'];

/// Replace path-unsafe characters in a playlist name with `-`.
pub fn normalize_name(playlist_name: &str) -> String {
    playlist_name.replace(UNSAFE_CHARS, "-")
}

/// Snapshot and token cache backed by a local directory.
pub struct TrackCache {
    cache_dir: PathBuf,
}

impl TrackCache {
    /// Create a new cache in the specified directory.
    ///
    /// Relative paths are resolved against the current working directory.
    pub fn new(cache_dir: impl Into<PathBuf>) -> Self {
        let mut cache_dir = cache_dir.into();
        if cache_dir.is_relative()
            && let Ok(cwd) = std::env::current_dir()
        {
            cache_dir = cwd.join(cache_dir);
        }
        // Ensure cache directory exists; a failure surfaces on first write
        let _ = fs::create_dir_all(&cache_dir);
        Self { cache_dir }
    }

    /// Directory the cache lives in.
    pub fn dir(&self) -> &Path {
        &self.cache_dir
    }

    /// Full path of the snapshot file for a playlist.
    pub fn snapshot_path(&self, playlist_name: &str) -> PathBuf {
        self.cache_dir
            .join(format!("{}.json", normalize_name(playlist_name)))
    }

    fn token_path(&self, file_name: &str) -> PathBuf {
        self.cache_dir.join(file_name)
    }
}

/// Default cache directory: `<user cache dir>/playlist-sweeper`.
pub(crate) fn default_cache_dir() -> PathBuf {
    dirs::cache_dir()
        .unwrap_or_else(|| PathBuf::from(".cache"))
        .join("playlist-sweeper")
}

impl SnapshotStore for TrackCache {
    fn load_snapshot(&self, playlist_name: &str) -> Result<Vec<Track>> {
        let path = self.snapshot_path(playlist_name);
        debug!(playlist = %playlist_name, file = %path.display(), "Loading cached snapshot");

        let bytes = match fs::read(&path) {
            Ok(bytes) => bytes,
            Err(e) if e.kind() == io::ErrorKind::NotFound => return Ok(Vec::new()),
            Err(e) => {
                return Err(Error::Io(e).context(format!("reading snapshot {}", path.display())));
            }
        };

        let tracks: Vec<Track> = serde_json::from_slice(&bytes)
            .with_context(format!("parsing snapshot {}", path.display()))?;

        debug!(playlist = %playlist_name, tracks = tracks.len(), "Loaded cached tracks");
        Ok(tracks)
    }

    fn save_snapshot(&self, playlist_name: &str, tracks: &[Track]) -> Result<()> {
        let path = self.snapshot_path(playlist_name);
        debug!(
            playlist = %playlist_name,
            file = %path.display(),
            tracks = tracks.len(),
            "Saving snapshot"
        );

        let json = serde_json::to_vec_pretty(tracks)?;
        fs::write(&path, json).with_context(format!("writing snapshot {}", path.display()))
    }
}

impl TokenStore for TrackCache {
    fn load_token(&self, file_name: &str) -> Result<Token> {
        let path = self.token_path(file_name);
        debug!(file = %path.display(), "Loading auth token");

        let bytes = fs::read(&path)?;
        Ok(serde_json::from_slice(&bytes)?)
    }

    fn save_token(&self, token: &Token, file_name: &str) -> Result<()> {
        let path = self.token_path(file_name);
        debug!(file = %path.display(), "Saving auth token");

        let json = serde_json::to_vec_pretty(token)?;
        fs::write(&path, json).with_context(format!("writing token {}", path.display()))
    }
}
