//! Adapter layer: Convert Spotify DTOs to domain models
//!
//! This is the ONLY place where DTO types are converted to domain types.

use chrono::{DateTime, Duration, Utc};

use super::dto;
use crate::model::{Album, Artist, Playlist, Token, Track};

/// Convert a listed playlist to a [`Playlist`]
pub fn to_playlist(playlist: dto::SimplePlaylist) -> Playlist {
    Playlist {
        id: playlist.id,
        name: playlist.name,
        owner_id: playlist.owner.id,
        track_count: playlist.tracks.total as usize,
    }
}

/// Convert a playlist entry to a [`Track`]
///
/// Entries without a track still become a (blank) track so the snapshot
/// length keeps matching the playlist's declared total.
pub fn to_track(item: dto::PlaylistItem) -> Track {
    let is_local = item.is_local;
    let Some(track) = item.track else {
        return Track::default();
    };

    Track {
        id: track.id.filter(|id| !is_local && !id.is_empty()),
        name: track.name,
        artists: track
            .artists
            .into_iter()
            .map(|artist| Artist { name: artist.name })
            .collect(),
        album: Album {
            name: track.album.map(|album| album.name).unwrap_or_default(),
        },
    }
}

/// Convert a token endpoint response to a [`Token`] expiring relative to `now`
pub fn to_token(response: dto::TokenResponse, now: DateTime<Utc>) -> Token {
    Token {
        access_token: response.access_token,
        refresh_token: response.refresh_token.unwrap_or_default(),
        token_type: response.token_type,
        expiry: now + Duration::seconds(response.expires_in),
    }
}

/// Spotify URI for a track ID
pub fn track_uri(track_id: &str) -> String {
    format!("spotify:track:{}", track_id)
}
