//! Core data models for playlist reconciliation.
//!
//! Defines the entities the sweeps operate on: [`Playlist`], [`Track`],
//! [`Artist`], [`Album`] and the persisted OAuth [`Token`].
//!
//! These are OUR types. Remote API responses are converted into them by the
//! adapter in [`crate::spotify`], and track snapshots are stored on disk as a
//! JSON array of [`Track`].

use std::collections::HashSet;

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// A playlist as listed by the remote service.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Playlist {
    /// Remote playlist ID (opaque)
    pub id: String,
    /// Display name, also the cache key for its snapshot
    pub name: String,
    /// Owner's user ID
    pub owner_id: String,
    /// Declared total number of tracks
    pub track_count: usize,
}

/// An artist credited on a track.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Artist {
    pub name: String,
}

/// The album a track belongs to.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Album {
    pub name: String,
}

/// A track inside a playlist.
///
/// Only `id` carries identity. The remaining fields are kept for log output.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Track {
    /// Remote track ID; `None` for local or unavailable tracks
    #[serde(default)]
    pub id: Option<String>,
    #[serde(default)]
    pub name: String,
    #[serde(default)]
    pub artists: Vec<Artist>,
    #[serde(default)]
    pub album: Album,
}

impl Track {
    /// The identifier used for set membership.
    ///
    /// A missing ID renders as the empty string, so all ID-less tracks
    /// match each other.
    pub fn id_key(&self) -> &str {
        self.id.as_deref().unwrap_or("")
    }

    /// Name of the first credited artist, or an empty string.
    pub fn first_artist(&self) -> &str {
        self.artists.first().map(|a| a.name.as_str()).unwrap_or("")
    }
}

/// Set of track identifiers for quick membership lookups.
pub type TrackIdSet = HashSet<String>;

/// Build a [`TrackIdSet`] from a sequence of tracks. Duplicates collapse.
pub fn track_id_set<'a>(tracks: impl IntoIterator<Item = &'a Track>) -> TrackIdSet {
    tracks
        .into_iter()
        .map(|track| track.id_key().to_string())
        .collect()
}

/// OAuth token persisted between runs.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Token {
    pub access_token: String,
    #[serde(default)]
    pub refresh_token: String,
    pub token_type: String,
    /// When the access token stops being accepted
    pub expiry: DateTime<Utc>,
}

impl Token {
    /// Whether the access token has expired as of `now`.
    pub fn is_expired_at(&self, now: DateTime<Utc>) -> bool {
        self.expiry <= now
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::test_utils::{track, track_without_artists};

    #[test]
    fn test_id_key_renders_missing_id_as_empty() {
        let local = Track {
            id: None,
            name: "Local file".to_string(),
            ..Default::default()
        };
        assert_eq!(local.id_key(), "");
        assert_eq!(track("T1").id_key(), "T1");
    }

    #[test]
    fn test_first_artist_handles_empty_list() {
        assert_eq!(track_without_artists("T1").first_artist(), "");
        assert_eq!(track("T1").first_artist(), "Artist T1");
    }

    #[test]
    fn test_track_id_set_collapses_duplicates() {
        let tracks = vec![track("T1"), track("T2"), track("T1"), Track::default()];
        let set = track_id_set(&tracks);

        assert_eq!(set.len(), 3);
        assert!(set.contains("T1"));
        assert!(set.contains("T2"));
        assert!(set.contains(""));
    }

    #[test]
    fn test_token_expiry() {
        let expiry = DateTime::from_timestamp(1_644_696_995, 0).unwrap();
        let token = Token {
            access_token: "test1".to_string(),
            refresh_token: "test2".to_string(),
            token_type: "Bearer".to_string(),
            expiry,
        };

        assert!(token.is_expired_at(expiry));
        assert!(!token.is_expired_at(DateTime::from_timestamp(1_644_696_000, 0).unwrap()));
    }

    #[test]
    fn test_track_json_field_layout() {
        let json = serde_json::to_value(track("T1")).unwrap();
        assert_eq!(json["id"], "T1");
        assert_eq!(json["name"], "Track T1");
        assert_eq!(json["artists"][0]["name"], "Artist T1");
        assert_eq!(json["album"]["name"], "Album T1");
    }
}
