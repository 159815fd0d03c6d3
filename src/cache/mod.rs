//! Local cache of playlist track snapshots and the saved OAuth token.
//!
//! Snapshots are the only persisted reconciliation state: one JSON file per
//! playlist, keyed by the playlist's name, overwritten wholesale on every
//! refresh and never deleted here.
//!
//! # Filename normalization
//!
//! Playlist names may contain characters that are unsafe in paths. `/`, `\`
//! and `.` are replaced with `-` before the `.json` extension is appended, so
//! `"a/b"`, `"a\b"` and `"a.b"` all share the file `a-b.json`. Such playlists
//! overwrite each other's snapshot.
//!
//! The directory is accessed without locking; only one run may use a cache
//! directory at a time.

mod store;

pub use store::{TrackCache, normalize_name};
pub(crate) use store::default_cache_dir;

use crate::error::Result;
use crate::model::{Token, Track};

/// Storage contract the reconciliation steps depend on.
pub trait SnapshotStore {
    /// Load the cached snapshot for a playlist.
    ///
    /// A missing snapshot is not an error and yields an empty list. Any other
    /// I/O failure or malformed JSON is returned as an error.
    fn load_snapshot(&self, playlist_name: &str) -> Result<Vec<Track>>;

    /// Replace the cached snapshot for a playlist.
    fn save_snapshot(&self, playlist_name: &str, tracks: &[Track]) -> Result<()>;
}

/// Persistence for the OAuth token file.
pub trait TokenStore {
    fn load_token(&self, file_name: &str) -> Result<Token>;
    fn save_token(&self, token: &Token, file_name: &str) -> Result<()>;
}
