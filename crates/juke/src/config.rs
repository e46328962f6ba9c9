// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

use std::path::{Path, PathBuf};

use serde::{Deserialize, Serialize};

/// Configuration for the juke server.
#[derive(Debug, Clone, clap::Parser)]
pub struct Config {
    /// Host to bind on.
    #[arg(long, default_value = "0.0.0.0", env = "JUKE_HOST")]
    pub host: String,

    /// Port to listen on.
    #[arg(long, default_value_t = 3000, env = "JUKE_PORT")]
    pub port: u16,

    /// Public origin host used to build the OAuth redirect URI. This is
    /// what guests (and the provider redirect) reach the server on, so on
    /// a LAN it is usually the machine's LAN address, not localhost.
    #[arg(long, default_value = "127.0.0.1", env = "JUKE_ORIGIN")]
    pub origin: String,

    /// Protocol prefix for the public origin.
    #[arg(long, default_value = "http://", env = "JUKE_PROTOCOL")]
    pub protocol: String,

    /// Spotify application client ID.
    #[arg(long, env = "SPOTIFY_CLIENT_ID")]
    pub client_id: Option<String>,

    /// Spotify application client secret.
    #[arg(long, env = "SPOTIFY_CLIENT_SECRET")]
    pub client_secret: Option<String>,

    /// Path to a JSON options file (see `PartyOptions`).
    #[arg(long, env = "JUKE_CONFIG")]
    pub config: Option<PathBuf>,
}

/// User options loaded from the JSON options file. Every field has a
/// default, so a partial (or absent) file is fine.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct PartyOptions {
    /// Route serving the embedded player page.
    pub player_route: String,
    /// Error codes to keep off the WebSocket (when something else handles
    /// them).
    pub suppress_errors: Vec<String>,
    pub api: ApiOptions,
    pub spotify: SpotifyOptions,
}

impl Default for PartyOptions {
    fn default() -> Self {
        Self {
            player_route: "/player".to_owned(),
            suppress_errors: Vec::new(),
            api: ApiOptions::default(),
            spotify: SpotifyOptions::default(),
        }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct ApiOptions {
    /// Market for search and playback lookups.
    pub market: String,
    /// Max results per kind in a search response.
    pub search_query_limit: u32,
    /// Poll the provider once centrally and fan out over the socket,
    /// instead of every client polling on its own.
    pub centralised_polling: bool,
    /// Poll interval in milliseconds.
    pub centralised_polling_timer_ms: u64,
    /// Whether guests can add to the queue.
    pub can_add: bool,
    /// Whether guests can control playback.
    pub can_control: bool,
}

impl Default for ApiOptions {
    fn default() -> Self {
        Self {
            market: "GB".to_owned(),
            search_query_limit: 10,
            centralised_polling: true,
            centralised_polling_timer_ms: 5000,
            can_add: true,
            can_control: true,
        }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct SpotifyOptions {
    /// Sub-route the auth endpoints mount under. Must start with `/`.
    pub route_prefix: String,
    /// Route the provider redirects back to for the code exchange. Must
    /// start with `/`.
    pub route_token: String,
    /// Where to send the browser once authenticated.
    pub authenticated_redirect: String,
    /// Token file path; a leading `~` expands to the home directory.
    pub access_token_json_location: String,
    /// Extra OAuth scopes, merged with the required three.
    pub scope: Vec<String>,
    /// Client credentials may also live in the options file; they win over
    /// the environment when both are set.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub client_id: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub client_secret: Option<String>,
}

impl Default for SpotifyOptions {
    fn default() -> Self {
        Self {
            route_prefix: "/spotify".to_owned(),
            route_token: "/token".to_owned(),
            authenticated_redirect: "/player".to_owned(),
            access_token_json_location: "~/.juke/spotify_auth.json".to_owned(),
            scope: Vec::new(),
            client_id: None,
            client_secret: None,
        }
    }
}

impl PartyOptions {
    pub fn polling_interval(&self) -> std::time::Duration {
        std::time::Duration::from_millis(self.api.centralised_polling_timer_ms)
    }
}

/// Load options from `path`; `None` (or a missing key) falls back to
/// defaults.
pub fn load_options(path: Option<&Path>) -> anyhow::Result<PartyOptions> {
    let Some(path) = path else {
        return Ok(PartyOptions::default());
    };
    let contents = std::fs::read_to_string(path)
        .map_err(|e| anyhow::anyhow!("failed to read options file {}: {e}", path.display()))?;
    let options: PartyOptions = serde_json::from_str(&contents)
        .map_err(|e| anyhow::anyhow!("invalid options file {}: {e}", path.display()))?;
    Ok(options)
}

/// Resolve client credentials: the options file wins over the CLI/env.
pub fn resolve_credentials(
    config: &Config,
    options: &PartyOptions,
) -> anyhow::Result<(String, String)> {
    let client_id = options
        .spotify
        .client_id
        .clone()
        .or_else(|| config.client_id.clone())
        .ok_or_else(|| anyhow::anyhow!("no client_id configured (SPOTIFY_CLIENT_ID)"))?;
    let client_secret = options
        .spotify
        .client_secret
        .clone()
        .or_else(|| config.client_secret.clone())
        .ok_or_else(|| anyhow::anyhow!("no client_secret configured (SPOTIFY_CLIENT_SECRET)"))?;
    Ok((client_id, client_secret))
}

#[cfg(test)]
#[path = "config_tests.rs"]
mod tests;
