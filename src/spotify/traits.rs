//! Trait definitions for the remote service.
//!
//! These traits enable dependency injection and mocking for tests.
//! Production code uses [`SpotifyClient`] and [`SpotifyAuth`]; tests
//! substitute the in-memory fakes from [`mocks`].
//!
//! [`SpotifyClient`]: super::SpotifyClient
//! [`SpotifyAuth`]: super::SpotifyAuth

use async_trait::async_trait;

use super::RemoteError;
use crate::model::{Playlist, Token, Track};

/// Playlist listing and mutation.
///
/// Listings return complete collections; paging happens behind the trait.
#[async_trait]
pub trait PlaylistService: Send + Sync {
    /// All playlists of a user.
    async fn list_playlists(&self, user: &str) -> Result<Vec<Playlist>, RemoteError>;

    /// All tracks of a playlist, in playlist order.
    async fn list_tracks(&self, playlist_id: &str) -> Result<Vec<Track>, RemoteError>;

    /// Remove the given tracks from a playlist.
    async fn remove_tracks(&self, playlist_id: &str, track_ids: &[String])
    -> Result<(), RemoteError>;
}

/// Authorization-code exchange.
#[async_trait]
pub trait TokenExchange: Send + Sync {
    /// URL the user visits to authorize this application.
    fn authorize_url(&self, state: &str) -> String;

    /// Exchange the code the service redirected back with for a token.
    async fn exchange_code(&self, code: &str) -> Result<Token, RemoteError>;
}

// Implement traits for real clients

#[async_trait]
impl PlaylistService for super::SpotifyClient {
    async fn list_playlists(&self, user: &str) -> Result<Vec<Playlist>, RemoteError> {
        self.list_playlists(user).await
    }

    async fn list_tracks(&self, playlist_id: &str) -> Result<Vec<Track>, RemoteError> {
        self.list_tracks(playlist_id).await
    }

    async fn remove_tracks(
        &self,
        playlist_id: &str,
        track_ids: &[String],
    ) -> Result<(), RemoteError> {
        self.remove_tracks(playlist_id, track_ids).await
    }
}

#[async_trait]
impl TokenExchange for super::SpotifyAuth {
    fn authorize_url(&self, state: &str) -> String {
        self.authorize_url(state)
    }

    async fn exchange_code(&self, code: &str) -> Result<Token, RemoteError> {
        self.exchange_code(code).await
    }
}
