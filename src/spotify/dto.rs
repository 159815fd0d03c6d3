//! Spotify Web API Data Transfer Objects
//!
//! These types match what the Web API returns for the few endpoints we call.
//! DO NOT use these types outside the spotify module - convert to domain types.
//!
//! API Reference: https://developer.spotify.com/documentation/web-api

use serde::{Deserialize, Serialize};

/// One page of a paged listing
#[derive(Debug, Clone, Deserialize)]
pub struct Paging<T> {
    #[serde(default = "Vec::new")]
    pub items: Vec<T>,
    /// URL of the next page, absent on the last one
    pub next: Option<String>,
    #[serde(default)]
    pub total: u32,
}

/// Playlist as listed by `/users/{id}/playlists`
#[derive(Debug, Clone, Deserialize)]
pub struct SimplePlaylist {
    pub id: String,
    pub name: String,
    pub owner: PublicUser,
    pub tracks: TracksRef,
}

#[derive(Debug, Clone, Deserialize)]
pub struct PublicUser {
    pub id: String,
}

/// Reference to a playlist's tracks with the declared total
#[derive(Debug, Clone, Deserialize)]
pub struct TracksRef {
    #[serde(default)]
    pub total: u32,
}

/// Entry of `/playlists/{id}/tracks`
#[derive(Debug, Clone, Deserialize)]
pub struct PlaylistItem {
    /// Null when the track is no longer available
    pub track: Option<FullTrack>,
    /// Local files carry a track object but no usable ID
    #[serde(default)]
    pub is_local: bool,
}

#[derive(Debug, Clone, Deserialize)]
pub struct FullTrack {
    /// Null for local files
    pub id: Option<String>,
    #[serde(default)]
    pub name: String,
    #[serde(default)]
    pub artists: Vec<SimpleArtist>,
    pub album: Option<SimpleAlbum>,
}

#[derive(Debug, Clone, Deserialize)]
pub struct SimpleArtist {
    #[serde(default)]
    pub name: String,
}

#[derive(Debug, Clone, Deserialize)]
pub struct SimpleAlbum {
    #[serde(default)]
    pub name: String,
}

/// Body of `DELETE /playlists/{id}/tracks`
#[derive(Debug, Clone, Serialize)]
pub struct RemoveTracksRequest {
    pub tracks: Vec<TrackUri>,
}

#[derive(Debug, Clone, Serialize)]
pub struct TrackUri {
    pub uri: String,
}

/// Response of the accounts service token endpoint
#[derive(Debug, Clone, Deserialize)]
pub struct TokenResponse {
    pub access_token: String,
    pub token_type: String,
    /// Lifetime in seconds
    pub expires_in: i64,
    pub refresh_token: Option<String>,
}

/// Regular error object returned by the Web API
#[derive(Debug, Clone, Deserialize)]
pub struct ApiErrorBody {
    pub error: ApiErrorDetail,
}

#[derive(Debug, Clone, Deserialize)]
pub struct ApiErrorDetail {
    pub status: u16,
    pub message: String,
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde::de::DeserializeOwned;

    /// Parse a page for any item type, with no bound beyond deserialization
    fn parse_page<T: DeserializeOwned>(json: &str) -> Paging<T> {
        serde_json::from_str(json).unwrap()
    }

    #[test]
    fn test_paging_without_items() {
        let page: Paging<PlaylistItem> = parse_page(r#"{ "next": null, "total": 0 }"#);

        assert!(page.items.is_empty());
        assert_eq!(page.next, None);
    }

    #[test]
    fn test_paging_with_next_link() {
        let page: Paging<SimplePlaylist> = parse_page(
            r#"{
                "items": [
                    { "id": "pl1", "name": "Mix", "owner": { "id": "user" }, "tracks": { "total": 3 } }
                ],
                "next": "https://api.spotify.com/v1/users/user/playlists?offset=50&limit=50",
                "total": 51
            }"#,
        );

        assert_eq!(page.items.len(), 1);
        assert_eq!(page.items[0].tracks.total, 3);
        assert!(page.next.is_some());
        assert_eq!(page.total, 51);
    }
}
