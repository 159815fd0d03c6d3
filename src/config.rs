//! Configuration system using TOML files.
//!
//! Config is stored in the OS-standard config directory:
//! - Windows: %APPDATA%\playlist-sweeper\config.toml
//! - macOS: ~/Library/Application Support/playlist-sweeper/config.toml
//! - Linux: ~/.config/playlist-sweeper/config.toml
//!
//! Every value can also be given on the command line or through its
//! environment variable (`USER_NAME`, `DISLIKED_PREFIX`, ...), which take
//! precedence over the file. The merged result is an explicit [`Settings`]
//! value; nothing reads the environment after startup.

use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};

use crate::reconcile::SweepRules;

/// Application configuration file
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct Config {
    /// Spotify application credentials
    pub credentials: Credentials,

    /// Account whose playlists are swept
    pub account: AccountConfig,

    /// Playlist naming conventions
    pub rules: RulesConfig,

    /// Cache and token locations
    pub paths: PathsConfig,
}

/// Spotify application credentials
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct Credentials {
    pub client_id: Option<String>,
    pub client_secret: Option<String>,
    /// Redirect URL registered for the application
    pub redirect_url: Option<String>,
}

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct AccountConfig {
    pub username: Option<String>,
}

/// Naming conventions. Both are required; there is no safe default.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct RulesConfig {
    /// Prefix of disliked-track playlists (ex: "disliked_")
    pub disliked_prefix: Option<String>,
    /// Suffix of queue playlists (ex: " Queue")
    pub queue_suffix: Option<String>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct PathsConfig {
    /// Snapshot cache directory (default: user cache dir)
    pub cache_dir: Option<PathBuf>,
    /// Token file name inside the cache directory
    pub token_file: String,
}

impl Default for PathsConfig {
    fn default() -> Self {
        Self {
            cache_dir: None,
            token_file: "token.json".to_string(),
        }
    }
}

/// Values given on the command line or through the environment
#[derive(Debug, Clone, Default)]
pub struct Overrides {
    pub username: Option<String>,
    pub client_id: Option<String>,
    pub client_secret: Option<String>,
    pub redirect_url: Option<String>,
    pub cache_dir: Option<PathBuf>,
    pub token_file: Option<String>,
    pub disliked_prefix: Option<String>,
    pub queue_suffix: Option<String>,
    pub response_code: Option<String>,
}

/// Fully resolved settings for one run
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Settings {
    pub client_id: String,
    pub client_secret: String,
    pub redirect_url: String,
    pub cache_dir: PathBuf,
    pub token_file: String,
    /// Authorization code from a previous authorize step, if any
    pub response_code: Option<String>,
    pub rules: SweepRules,
}

impl Settings {
    /// Merge the config file with overrides. Overrides win.
    ///
    /// Fails on the first required value that is missing or empty.
    pub fn resolve(config: Config, overrides: Overrides) -> Result<Self, ConfigError> {
        let username = required(overrides.username, config.account.username, "USER_NAME")?;
        let disliked_prefix = required(
            overrides.disliked_prefix,
            config.rules.disliked_prefix,
            "DISLIKED_PREFIX",
        )?;
        let queue_suffix = required(
            overrides.queue_suffix,
            config.rules.queue_suffix,
            "QUEUE_SUFFIX",
        )?;
        let client_id = required(
            overrides.client_id,
            config.credentials.client_id,
            "SPOTIFY_ID",
        )?;
        let client_secret = required(
            overrides.client_secret,
            config.credentials.client_secret,
            "SPOTIFY_SECRET",
        )?;
        let redirect_url = required(
            overrides.redirect_url,
            config.credentials.redirect_url,
            "REDIRECT_URL",
        )?;

        let cache_dir = overrides
            .cache_dir
            .or(config.paths.cache_dir)
            .unwrap_or_else(crate::cache::default_cache_dir);
        let token_file = overrides
            .token_file
            .filter(|f| !f.is_empty())
            .unwrap_or(config.paths.token_file);

        tracing::debug!(
            username = %username,
            disliked_prefix = %disliked_prefix,
            queue_suffix = %queue_suffix,
            cache_dir = %cache_dir.display(),
            token_file = %token_file,
            "Resolved settings"
        );

        Ok(Self {
            client_id,
            client_secret,
            redirect_url,
            cache_dir,
            token_file,
            response_code: overrides.response_code.filter(|c| !c.is_empty()),
            rules: SweepRules::new(username, disliked_prefix, queue_suffix),
        })
    }
}

/// Pick the override, else the file value; reject missing and empty values.
fn required(
    over: Option<String>,
    file: Option<String>,
    key: &'static str,
) -> Result<String, ConfigError> {
    over.filter(|v| !v.is_empty())
        .or(file.filter(|v| !v.is_empty()))
        .ok_or(ConfigError::Missing(key))
}

// ============================================================================
// Config File Operations
// ============================================================================

/// Get the config directory path
pub fn config_dir() -> Option<PathBuf> {
    dirs::config_dir().map(|d| d.join("playlist-sweeper"))
}

/// Get the full path to the config file
pub fn config_path() -> Option<PathBuf> {
    config_dir().map(|d| d.join("config.toml"))
}

/// Load configuration from the default location
///
/// Returns default config if file doesn't exist or can't be parsed.
/// Logs warnings but doesn't fail - missing values are reported when the
/// settings are resolved.
pub fn load() -> Config {
    let Some(path) = config_path() else {
        tracing::warn!("Could not determine config directory, using defaults");
        return Config::default();
    };

    if !path.exists() {
        tracing::info!("No config file found at {:?}, using defaults", path);
        return Config::default();
    }

    match load_from(&path) {
        Ok(config) => config,
        Err(e) => {
            tracing::error!("{}", e);
            tracing::warn!("Using default configuration");
            Config::default()
        }
    }
}

/// Load configuration from an explicit path. Errors are returned.
pub fn load_from(path: &Path) -> Result<Config, ConfigError> {
    let contents = std::fs::read_to_string(path)
        .map_err(|e| ConfigError::Read(path.to_path_buf(), e))?;
    let config =
        toml::from_str(&contents).map_err(|e| ConfigError::Parse(path.to_path_buf(), e))?;
    tracing::info!("Loaded config from {:?}", path);
    Ok(config)
}

// ============================================================================
// Error Types
// ============================================================================

/// Configuration errors
#[derive(Debug, thiserror::Error)]
pub enum ConfigError {
    #[error("{0} must be set (flag, env variable or config file)")]
    Missing(&'static str),

    #[error("Failed to read config file {0}: {1}")]
    Read(PathBuf, std::io::Error),

    #[error("Failed to parse config file {0}: {1}")]
    Parse(PathBuf, toml::de::Error),
}

// ============================================================================
// Tests
// ============================================================================
