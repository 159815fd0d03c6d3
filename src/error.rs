//! Application-wide error types.
//!
//! Library modules use specific error types via `thiserror` (for example
//! [`RemoteError`](crate::spotify::RemoteError) for the remote service and
//! [`ConfigError`](crate::config::ConfigError) for settings resolution),
//! while CLI/main uses `anyhow` for convenient error propagation. Settings
//! are resolved in the CLI, so `ConfigError` goes straight to `anyhow`.
//!
//! # Example
//!
//! ```ignore
//! use playlist_sweeper::error::{Error, Result, ResultExt};
//!
//! fn read_snapshot(path: &Path) -> Result<Vec<Track>> {
//!     let bytes = std::fs::read(path).with_context("reading snapshot")?;
//!     Ok(serde_json::from_slice(&bytes)?)
//! }
//! ```

/// Application-wide result type.
pub type Result<T> = std::result::Result<T, Error>;

/// Top-level application error.
#[derive(Debug, thiserror::Error)]
pub enum Error {
    /// File I/O error (other than a missing snapshot, which is not an error)
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    /// Malformed snapshot or token file
    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),

    /// Remote playlist service failure
    #[error("Remote service error: {0}")]
    Remote(#[from] crate::spotify::RemoteError),

    /// Login could not produce a usable token
    #[error("Authentication error: {0}")]
    Auth(String),

    /// Generic error with context
    #[error("{context}: {source}")]
    WithContext {
        context: String,
        #[source]
        source: Box<Error>,
    },
}

impl Error {
    /// Create an authentication error.
    pub fn auth(message: impl Into<String>) -> Self {
        Self::Auth(message.into())
    }

    /// Add context to an error.
    pub fn context(self, ctx: impl Into<String>) -> Self {
        Self::WithContext {
            context: ctx.into(),
            source: Box::new(self),
        }
    }
}

/// Extension trait for adding context to Results.
pub trait ResultExt<T> {
    /// Add context to an error result.
    fn with_context(self, ctx: impl Into<String>) -> Result<T>;
}

impl<T> ResultExt<T> for Result<T> {
    fn with_context(self, ctx: impl Into<String>) -> Result<T> {
        self.map_err(|e| e.context(ctx))
    }
}

impl<T> ResultExt<T> for std::result::Result<T, std::io::Error> {
    fn with_context(self, ctx: impl Into<String>) -> Result<T> {
        self.map_err(|e| Error::Io(e).context(ctx))
    }
}

impl<T> ResultExt<T> for std::result::Result<T, serde_json::Error> {
    fn with_context(self, ctx: impl Into<String>) -> Result<T> {
        self.map_err(|e| Error::Json(e).context(ctx))
    }
}

impl<T> ResultExt<T> for std::result::Result<T, crate::spotify::RemoteError> {
    fn with_context(self, ctx: impl Into<String>) -> Result<T> {
        self.map_err(|e| Error::Remote(e).context(ctx))
    }
}
