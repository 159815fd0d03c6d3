//! Spotify Web API HTTP client
//!
//! A thin adapter over the three calls a sweep run needs: list a user's
//! playlists, list a playlist's tracks and remove tracks from a playlist.
//! See: https://developer.spotify.com/documentation/web-api
//!
//! Listings follow the `next` URL of each page until it is absent; see
//! [`super::pagination`]. Rate-limited (429) requests are retried after the
//! `Retry-After` delay a few times before failing.

use std::marker::PhantomData;
use std::time::Duration;

use async_trait::async_trait;
use serde::de::DeserializeOwned;
use tracing::{debug, info, warn};

use super::pagination::{PageCursor, fetch_all};
use super::{RemoteError, adapter, dto};
use crate::model::{Playlist, Track};

/// Page size for playlist listings (API maximum)
const PLAYLIST_PAGE_SIZE: u32 = 50;

/// Page size for track listings (API maximum)
const TRACK_PAGE_SIZE: u32 = 100;

/// Retries of a rate-limited request before giving up
const MAX_RATE_LIMIT_RETRIES: u32 = 3;

/// Wait used when a 429 response has no usable `Retry-After` header
const DEFAULT_RETRY_AFTER: Duration = Duration::from_secs(1);

/// Upper bound on a single rate-limit wait
const MAX_RETRY_AFTER: Duration = Duration::from_secs(30);

/// Spotify Web API client
pub struct SpotifyClient {
    http_client: reqwest::Client,
    base_url: String,
    access_token: String,
}

impl SpotifyClient {
    /// Create a new client authorized with the given access token
    pub fn new(access_token: impl Into<String>) -> Result<Self, RemoteError> {
        Self::with_base_url(access_token, "https://api.spotify.com/v1")
    }

    /// Create a client against a custom base URL
    pub fn with_base_url(
        access_token: impl Into<String>,
        base_url: impl Into<String>,
    ) -> Result<Self, RemoteError> {
        let http_client = reqwest::Client::builder()
            .gzip(true)
            .user_agent(concat!(
                env!("CARGO_PKG_NAME"),
                "/",
                env!("CARGO_PKG_VERSION")
            ))
            .build()
            .map_err(|e| RemoteError::Network(e.to_string()))?;

        Ok(Self {
            http_client,
            base_url: base_url.into(),
            access_token: access_token.into(),
        })
    }

    /// List every playlist of a user
    pub async fn list_playlists(&self, user: &str) -> Result<Vec<Playlist>, RemoteError> {
        info!(user = %user, "Getting list of playlists");
        let mut cursor = self.cursor::<dto::SimplePlaylist>(self.playlists_url(user));
        let playlists: Vec<Playlist> = fetch_all(&mut cursor)
            .await?
            .into_iter()
            .map(adapter::to_playlist)
            .collect();

        info!(user = %user, playlists = playlists.len(), "Retrieved playlists");
        Ok(playlists)
    }

    /// List every track of a playlist, in playlist order
    pub async fn list_tracks(&self, playlist_id: &str) -> Result<Vec<Track>, RemoteError> {
        let mut cursor = self.cursor::<dto::PlaylistItem>(self.tracks_url(playlist_id));
        let tracks: Vec<Track> = fetch_all(&mut cursor)
            .await?
            .into_iter()
            .map(adapter::to_track)
            .collect();

        debug!(playlist_id = %playlist_id, tracks = tracks.len(), "Retrieved tracks");
        Ok(tracks)
    }

    /// Remove all occurrences of the given tracks from a playlist
    pub async fn remove_tracks(
        &self,
        playlist_id: &str,
        track_ids: &[String],
    ) -> Result<(), RemoteError> {
        debug!(playlist_id = %playlist_id, tracks = ?track_ids, "Removing tracks");

        let body = dto::RemoveTracksRequest {
            tracks: track_ids
                .iter()
                .map(|id| dto::TrackUri {
                    uri: adapter::track_uri(id),
                })
                .collect(),
        };

        let url = self.tracks_base_url(playlist_id);
        self.send(|| self.http_client.delete(&url).json(&body))
            .await
            .map(|_| ())
    }

    fn cursor<T>(&self, first_url: String) -> HttpCursor<'_, T> {
        HttpCursor {
            client: self,
            next: Some(first_url),
            _item: PhantomData,
        }
    }

    fn playlists_url(&self, user: &str) -> String {
        format!(
            "{}/users/{}/playlists?limit={}",
            self.base_url,
            urlencoding::encode(user),
            PLAYLIST_PAGE_SIZE
        )
    }

    fn tracks_base_url(&self, playlist_id: &str) -> String {
        format!(
            "{}/playlists/{}/tracks",
            self.base_url,
            urlencoding::encode(playlist_id)
        )
    }

    fn tracks_url(&self, playlist_id: &str) -> String {
        format!(
            "{}?limit={}",
            self.tracks_base_url(playlist_id),
            TRACK_PAGE_SIZE
        )
    }

    /// Send an authorized request, waiting out rate limiting.
    ///
    /// A 429 response is retried after its `Retry-After` delay, up to
    /// [`MAX_RATE_LIMIT_RETRIES`] times; after that it becomes
    /// [`RemoteError::RateLimited`].
    async fn send<F>(&self, build: F) -> Result<reqwest::Response, RemoteError>
    where
        F: Fn() -> reqwest::RequestBuilder + Send + Sync,
    {
        let mut retries = 0;
        loop {
            let response = build()
                .bearer_auth(&self.access_token)
                .send()
                .await
                .map_err(|e| RemoteError::Network(e.to_string()))?;

            if response.status() != reqwest::StatusCode::TOO_MANY_REQUESTS
                || retries == MAX_RATE_LIMIT_RETRIES
            {
                return check_status(response).await;
            }

            retries += 1;
            let wait = retry_after(&response);
            warn!(
                wait_secs = wait.as_secs(),
                attempt = retries,
                "Rate limited by Spotify, retrying"
            );
            tokio::time::sleep(wait).await;
        }
    }

    /// GET a URL and parse the JSON body
    async fn get_json<T: DeserializeOwned>(&self, url: &str) -> Result<T, RemoteError> {
        self.send(|| self.http_client.get(url))
            .await?
            .json::<T>()
            .await
            .map_err(|e| RemoteError::Parse(e.to_string()))
    }
}

/// How long a 429 response asks us to wait
fn retry_after(response: &reqwest::Response) -> Duration {
    response
        .headers()
        .get(reqwest::header::RETRY_AFTER)
        .and_then(|v| v.to_str().ok())
        .and_then(|v| v.trim().parse::<u64>().ok())
        .map(Duration::from_secs)
        .unwrap_or(DEFAULT_RETRY_AFTER)
        .min(MAX_RETRY_AFTER)
}

/// Map non-success responses to errors
async fn check_status(response: reqwest::Response) -> Result<reqwest::Response, RemoteError> {
    let status = response.status();

    if status == reqwest::StatusCode::TOO_MANY_REQUESTS {
        return Err(RemoteError::RateLimited);
    }

    if !status.is_success() {
        if let Ok(body) = response.json::<dto::ApiErrorBody>().await {
            return Err(RemoteError::Api(format!(
                "HTTP {}: {}",
                body.error.status, body.error.message
            )));
        }
        return Err(RemoteError::Api(format!(
            "HTTP {}: {}",
            status,
            status.canonical_reason().unwrap_or("Unknown")
        )));
    }

    Ok(response)
}

/// Cursor following the `next` links of a paged endpoint
struct HttpCursor<'a, T> {
    client: &'a SpotifyClient,
    next: Option<String>,
    _item: PhantomData<fn() -> T>,
}

#[async_trait]
impl<T> PageCursor for HttpCursor<'_, T>
where
    T: DeserializeOwned + Send,
{
    type Item = T;

    async fn next_page(&mut self) -> Result<Vec<T>, RemoteError> {
        let Some(url) = self.next.take() else {
            return Err(RemoteError::NoMorePages);
        };

        let page: dto::Paging<T> = self.client.get_json(&url).await?;
        debug!(total = page.total, page_items = page.items.len(), "Fetched page");
        self.next = page.next;
        Ok(page.items)
    }
}
