//! Login flow.
//!
//! A run needs an access token. The token saved by a previous run is used
//! when it can be loaded. Otherwise the user has to authorize the
//! application in a browser and pass the code the service redirects back
//! with (`RESPONSE_CODE`) on the next run, which is exchanged for a token and
//! saved.

use chrono::Utc;
use tracing::{error, info, warn};

use crate::cache::TokenStore;
use crate::error::{Error, Result};
use crate::model::Token;
use crate::spotify::TokenExchange;

/// `state` parameter sent with the authorization request
pub const AUTH_STATE: &str = "playlist-sweeper";

/// Obtain a token, exchanging `response_code` if no saved token is usable.
pub async fn login<E, T>(
    exchange: &E,
    store: &T,
    token_file: &str,
    response_code: Option<&str>,
) -> Result<Token>
where
    E: TokenExchange + ?Sized,
    T: TokenStore + ?Sized,
{
    let token = match store.load_token(token_file) {
        Ok(token) => {
            info!("Logging in using saved token");
            token
        }
        Err(e) => {
            info!(error = %e, "No saved token available");
            let Some(code) = response_code.filter(|c| !c.is_empty()) else {
                info!(
                    "Response code not found. Please use the below URL to authorize this \
                     application, then set the RESPONSE_CODE env variable to the code \
                     Spotify responds with and run this application again"
                );
                info!("{}", exchange.authorize_url(AUTH_STATE));
                return Err(Error::auth("response code not found"));
            };

            info!("Attempting to get token using RESPONSE_CODE");
            exchange.exchange_code(code).await.map_err(|e| {
                error!(error = %e, "Unable to get token");
                Error::from(e)
            })?
        }
    };

    if token.is_expired_at(Utc::now()) {
        warn!(
            expiry = %token.expiry,
            "Saved token has expired; remove the token file and authorize again"
        );
    }

    info!(file = %token_file, "Updating saved token");
    if let Err(e) = store.save_token(&token, token_file) {
        error!(file = %token_file, error = %e, "Unable to save token to file");
        return Err(e);
    }

    Ok(token)
}
