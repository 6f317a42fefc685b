//! Configuration management for the master playlist maintainer.
//!
//! This module handles loading and accessing configuration values from
//! environment variables and `.env` files. Spotify API endpoints and OAuth
//! parameters are exposed as individual getters; the parameters driving a
//! sync run travel in an explicit [`SyncConfig`] object so that the pipeline
//! stages never read process-wide environment state themselves.
//!
//! The configuration system follows a hierarchical approach:
//! 1. Environment variables (highest priority)
//! 2. `.env` file in the local data directory
//! 3. Application defaults (where applicable)

use dotenv;
use std::{env, path::PathBuf, time::Duration};

use crate::utils;

/// Loads environment variables from a `.env` file in the local data directory.
///
/// Creates the necessary directory structure if it doesn't exist and loads
/// environment variables from a `.env` file located in the platform-specific
/// local data directory under `stashcli/.env`. This allows users to store
/// configuration securely without hardcoding sensitive values.
///
/// # Directory Structure
///
/// The function looks for the `.env` file in:
/// - Linux: `~/.local/share/stashcli/.env`
/// - macOS: `~/Library/Application Support/stashcli/.env`
/// - Windows: `%LOCALAPPDATA%/stashcli/.env`
///
/// # Returns
///
/// Returns `Ok(())` if the environment file is successfully loaded, or an error
/// string if directory creation or file loading fails.
///
/// # Errors
///
/// This function will return an error if:
/// - The parent directory cannot be created
/// - The `.env` file cannot be read or parsed
pub async fn load_env() -> Result<(), String> {
    let mut path = dirs::data_local_dir().unwrap_or_else(|| PathBuf::from("."));
    path.push("stashcli/.env");
    if let Some(parent) = path.parent() {
        async_fs::create_dir_all(parent)
            .await
            .map_err(|e| e.to_string())?;
    }

    dotenv::from_path(path).map_err(|e| e.to_string())?;
    Ok(())
}

/// Returns the server address for the local OAuth callback and sync server.
///
/// Retrieves the `SERVER_ADDRESS` environment variable which specifies
/// the address and port where the local HTTP server should bind, both for
/// OAuth callbacks during the authentication flow and for the `serve` mode
/// sync trigger.
///
/// # Panics
///
/// Panics if the `SERVER_ADDRESS` environment variable is not set.
pub fn server_addr() -> String {
    env::var("SERVER_ADDRESS").expect("SERVER_ADDRESS must be set")
}

/// Returns the Spotify API client ID for authentication.
///
/// Retrieves the `SPOTIFY_API_AUTH_CLIENT_ID` environment variable which
/// contains the client ID obtained when registering the application with
/// Spotify's developer platform.
///
/// # Panics
///
/// Panics if the `SPOTIFY_API_AUTH_CLIENT_ID` environment variable is not set.
pub fn spotify_client_id() -> String {
    env::var("SPOTIFY_API_AUTH_CLIENT_ID").expect("SPOTIFY_API_AUTH_CLIENT_ID must be set")
}

/// Returns the Spotify OAuth redirect URI.
///
/// Retrieves the `SPOTIFY_API_REDIRECT_URI` environment variable which specifies
/// the callback URL that Spotify should redirect to after user authorization.
/// This must match the redirect URI registered in the Spotify application settings.
///
/// # Panics
///
/// Panics if the `SPOTIFY_API_REDIRECT_URI` environment variable is not set.
pub fn spotify_redirect_uri() -> String {
    env::var("SPOTIFY_API_REDIRECT_URI").expect("SPOTIFY_API_REDIRECT_URI must be set")
}

/// Returns the Spotify API scope permissions.
///
/// Retrieves the `SPOTIFY_API_AUTH_SCOPE` environment variable which defines
/// the scope of permissions requested during OAuth authentication. Maintaining
/// the master playlist needs playlist read and write access plus library read
/// access for liked songs, e.g.
/// `playlist-read-private playlist-modify-private playlist-modify-public user-library-read`.
///
/// # Panics
///
/// Panics if the `SPOTIFY_API_AUTH_SCOPE` environment variable is not set.
pub fn spotify_scope() -> String {
    env::var("SPOTIFY_API_AUTH_SCOPE").expect("SPOTIFY_API_AUTH_SCOPE must be set")
}

/// Returns the Spotify OAuth authorization URL.
///
/// Retrieves the `SPOTIFY_API_AUTH_URL` environment variable which contains
/// the base URL for Spotify's OAuth authorization endpoint. This is where
/// users are redirected to grant permissions to the application.
///
/// # Panics
///
/// Panics if the `SPOTIFY_API_AUTH_URL` environment variable is not set.
pub fn spotify_apiauth_url() -> String {
    env::var("SPOTIFY_API_AUTH_URL").expect("SPOTIFY_API_AUTH_URL must be set")
}

/// Returns the Spotify Web API base URL.
///
/// Retrieves the `SPOTIFY_API_URL` environment variable which contains the
/// base URL for Spotify's Web API endpoints. This is used for all API
/// operations after authentication.
///
/// # Panics
///
/// Panics if the `SPOTIFY_API_URL` environment variable is not set.
pub fn spotify_apiurl() -> String {
    env::var("SPOTIFY_API_URL").expect("SPOTIFY_API_URL must be set")
}

/// Returns the Spotify OAuth token exchange URL.
///
/// Retrieves the `SPOTIFY_API_TOKEN_URL` environment variable which contains
/// the URL for exchanging authorization codes for access tokens during the
/// OAuth flow, and for refreshing expired tokens afterwards.
///
/// # Panics
///
/// Panics if the `SPOTIFY_API_TOKEN_URL` environment variable is not set.
pub fn spotify_apitoken_url() -> String {
    env::var("SPOTIFY_API_TOKEN_URL").expect("SPOTIFY_API_TOKEN_URL must be set")
}

/// Parameters of a sync run, resolved once and passed explicitly into every
/// pipeline stage.
#[derive(Debug, Clone)]
pub struct SyncConfig {
    /// The playlist being maintained. Never scanned as a track source.
    pub master_playlist_id: String,
    /// Whether the liked-songs library contributes to the desired set.
    pub include_liked: bool,
    /// Whether to remove within-playlist duplicates from the master playlist
    /// before computing the set difference.
    pub prune_duplicates: bool,
    /// Additional playlist ids that are never scanned as track sources.
    pub excluded_playlists: Vec<String>,
    /// Delay between consecutive page fetches and between mutation batches.
    pub page_delay: Duration,
    /// Default source playlist for the `merge` command.
    pub merge_source: Option<String>,
    /// Default target playlist for the `merge` command.
    pub merge_target: Option<String>,
}

impl SyncConfig {
    /// Builds a [`SyncConfig`] from the environment.
    ///
    /// `SPOTIFY_MASTER_PLAYLIST_ID` is required; everything else falls back
    /// to a default. `SPOTIFY_INCLUDE_LIKED_SONGS` defaults to `true`,
    /// `SPOTIFY_PRUNE_DUPLICATES` to `false`, `SPOTIFY_RATE_LIMIT_MS` to
    /// 200 milliseconds, and `SPOTIFY_EXCLUDED_PLAYLIST_IDS` to an empty
    /// comma-separated list.
    ///
    /// # Errors
    ///
    /// Returns an error string when the master playlist id is missing or
    /// when a numeric value fails to parse.
    pub fn from_env() -> Result<Self, String> {
        let master_playlist_id = env::var("SPOTIFY_MASTER_PLAYLIST_ID")
            .map_err(|_| "SPOTIFY_MASTER_PLAYLIST_ID must be set".to_string())?;

        let include_liked = match env::var("SPOTIFY_INCLUDE_LIKED_SONGS") {
            Ok(raw) => parse_bool(&raw)
                .ok_or_else(|| format!("SPOTIFY_INCLUDE_LIKED_SONGS: invalid value '{}'", raw))?,
            Err(_) => true,
        };

        let prune_duplicates = match env::var("SPOTIFY_PRUNE_DUPLICATES") {
            Ok(raw) => parse_bool(&raw)
                .ok_or_else(|| format!("SPOTIFY_PRUNE_DUPLICATES: invalid value '{}'", raw))?,
            Err(_) => false,
        };

        let page_delay_ms = match env::var("SPOTIFY_RATE_LIMIT_MS") {
            Ok(raw) => raw
                .parse::<u64>()
                .map_err(|_| format!("SPOTIFY_RATE_LIMIT_MS: invalid value '{}'", raw))?,
            Err(_) => 200,
        };

        let excluded_playlists = env::var("SPOTIFY_EXCLUDED_PLAYLIST_IDS")
            .map(|raw| utils::parse_id_list(&raw))
            .unwrap_or_default();

        Ok(SyncConfig {
            master_playlist_id,
            include_liked,
            prune_duplicates,
            excluded_playlists,
            page_delay: Duration::from_millis(page_delay_ms),
            merge_source: env::var("SPOTIFY_MERGE_SOURCE_PLAYLIST_ID").ok(),
            merge_target: env::var("SPOTIFY_MERGE_TARGET_PLAYLIST_ID").ok(),
        })
    }
}

fn parse_bool(raw: &str) -> Option<bool> {
    match raw.trim().to_lowercase().as_str() {
        "true" | "1" | "yes" => Some(true),
        "false" | "0" | "no" => Some(false),
        _ => None,
    }
}
