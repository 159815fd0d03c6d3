//! Test utilities and fixtures for playlist-sweeper tests.
//!
//! Factories for playlists, tracks and tokens, plus a snapshot cache seeded
//! in a temporary directory.
//!
//! # Example
//!
//! ```ignore
//! use crate::test_utils::{playlist, seeded_cache, track};
//!
//! #[tokio::test]
//! async fn test_something() {
//!     let (cache, _dir) = seeded_cache(&[("Mix", vec![track("T1")])]);
//!     let mix = playlist("pl1", "Mix", "user", 1);
//!     // ... test logic
//! }
//! ```

use chrono::DateTime;
use tempfile::TempDir;

use crate::cache::{SnapshotStore, TrackCache};
use crate::model::{Album, Artist, Playlist, Token, Track};

/// Creates a playlist with the given declared track count.
pub fn playlist(id: &str, name: &str, owner: &str, track_count: usize) -> Playlist {
    Playlist {
        id: id.to_string(),
        name: name.to_string(),
        owner_id: owner.to_string(),
        track_count,
    }
}

/// Creates a track whose name, artist and album are derived from its ID.
///
/// `track("T1")` is "Track T1" by "Artist T1" on "Album T1".
pub fn track(id: &str) -> Track {
    Track {
        artists: vec![Artist {
            name: format!("Artist {}", id),
        }],
        ..track_without_artists(id)
    }
}

/// Like [`track`], but with an empty artist list.
pub fn track_without_artists(id: &str) -> Track {
    Track {
        id: Some(id.to_string()),
        name: format!("Track {}", id),
        artists: Vec::new(),
        album: Album {
            name: format!("Album {}", id),
        },
    }
}

/// A token expiring at 2022-02-12T20:16:35Z.
pub fn test_token() -> Token {
    Token {
        access_token: "test1".to_string(),
        refresh_token: "test2".to_string(),
        token_type: "Bearer".to_string(),
        expiry: DateTime::from_timestamp(1_644_696_995, 0).expect("valid timestamp"),
    }
}

/// Creates a cache in a temporary directory holding the given snapshots.
///
/// Keep the TempDir alive for the duration of your test.
pub fn seeded_cache(snapshots: &[(&str, Vec<Track>)]) -> (TrackCache, TempDir) {
    let dir = tempfile::tempdir().expect("Failed to create temp directory");
    let cache = TrackCache::new(dir.path());

    for (name, tracks) in snapshots {
        cache
            .save_snapshot(name, tracks)
            .expect("Failed to seed snapshot");
    }

    (cache, dir)
}
