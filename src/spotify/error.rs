//! Errors from the remote playlist service.

/// Errors that can occur talking to the remote service.
///
/// The reconciliation core only distinguishes success from failure; the
/// variants exist for log output and for the pagination driver, which
/// treats [`RemoteError::NoMorePages`] as the end of a listing.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum RemoteError {
    #[error("No more pages")]
    NoMorePages,

    #[error("Network error: {0}")]
    Network(String),

    #[error("API request failed: {0}")]
    Api(String),

    #[error("Failed to parse response: {0}")]
    Parse(String),

    #[error("Rate limited - try again later")]
    RateLimited,

    #[error("Token exchange failed: {0}")]
    TokenExchange(String),
}
