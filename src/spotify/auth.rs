//! Spotify accounts service: authorization URL and code-for-token exchange.
//!
//! Only the authorization-code grant is implemented. Tokens are not
//! refreshed; an expired token has to be replaced by authorizing again.

use chrono::Utc;
use tracing::info;

use super::{RemoteError, adapter, dto};
use crate::model::Token;

/// Scopes requested during authorization
pub const SCOPES: [&str; 6] = [
    "user-library-read",
    "user-library-modify",
    "user-read-recently-played",
    "playlist-read-private",
    "playlist-modify-private",
    "playlist-modify-public",
];

/// Client credentials for the accounts service
pub struct SpotifyAuth {
    client_id: String,
    client_secret: String,
    redirect_url: String,
    accounts_url: String,
    http_client: reqwest::Client,
}

impl SpotifyAuth {
    pub fn new(
        client_id: impl Into<String>,
        client_secret: impl Into<String>,
        redirect_url: impl Into<String>,
    ) -> Self {
        Self {
            client_id: client_id.into(),
            client_secret: client_secret.into(),
            redirect_url: redirect_url.into(),
            accounts_url: "https://accounts.spotify.com".to_string(),
            http_client: reqwest::Client::new(),
        }
    }

    /// URL the user opens to grant access; the service redirects back with a code
    pub fn authorize_url(&self, state: &str) -> String {
        format!(
            "{}/authorize?client_id={}&response_type=code&redirect_uri={}&state={}&scope={}",
            self.accounts_url,
            urlencoding::encode(&self.client_id),
            urlencoding::encode(&self.redirect_url),
            urlencoding::encode(state),
            urlencoding::encode(&SCOPES.join(" "))
        )
    }

    /// Exchange an authorization code for a token
    pub async fn exchange_code(&self, code: &str) -> Result<Token, RemoteError> {
        info!("Exchanging response code for a token");

        let form = [
            ("grant_type", "authorization_code"),
            ("code", code),
            ("redirect_uri", self.redirect_url.as_str()),
        ];

        let response = self
            .http_client
            .post(format!("{}/api/token", self.accounts_url))
            .basic_auth(&self.client_id, Some(&self.client_secret))
            .form(&form)
            .send()
            .await
            .map_err(|e| RemoteError::Network(e.to_string()))?;

        let status = response.status();
        if !status.is_success() {
            let body = response.text().await.unwrap_or_default();
            return Err(RemoteError::TokenExchange(format!(
                "HTTP {}: {}",
                status,
                body.chars().take(200).collect::<String>()
            )));
        }

        let token = response
            .json::<dto::TokenResponse>()
            .await
            .map_err(|e| RemoteError::Parse(e.to_string()))?;

        Ok(adapter::to_token(token, Utc::now()))
    }
}
