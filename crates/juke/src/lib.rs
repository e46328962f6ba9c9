// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

//! Juke: a party-mode web front end for a Spotify account.
//!
//! One host authenticates via OAuth; guests get a small REST + WebSocket
//! API (and an embedded player page) for searching, queueing, and playback
//! control, with now-playing state pushed from a centralized poll loop.

pub mod config;
pub mod error;
pub mod events;
pub mod memo;
pub mod poller;
pub mod retry;
pub mod spotify;
pub mod state;
pub mod transport;

use std::sync::Arc;

use tokio::net::TcpListener;
use tokio_util::sync::CancellationToken;

use crate::config::Config;
use crate::events::EventHub;
use crate::spotify::client::SpotifyClient;
use crate::spotify::exchange::TokenExchange;
use crate::spotify::session::TokenSession;
use crate::spotify::store::TokenStore;
use crate::state::{epoch_ms, AppState};

/// Run the server until shutdown.
pub async fn run(config: Config) -> anyhow::Result<()> {
    let options = config::load_options(config.config.as_deref())?;
    let (client_id, client_secret) = config::resolve_credentials(&config, &options)?;

    let shutdown = CancellationToken::new();
    let hub = EventHub::new();
    let exchange = TokenExchange::new(client_id, client_secret);
    let store = TokenStore::new(&options.spotify.access_token_json_location);

    let state = Arc::new(AppState::new(config, options, exchange, store, hub, shutdown.clone()));

    // Restore a previous session before accepting traffic, so a restart
    // does not force the host back through the browser flow.
    if let Some(client) = initialise_previous_auth(&state).await {
        state.install_sdk(client).await;
        state.hub.system("authenticated");
        tracing::info!("restored previous session");
    } else {
        tracing::info!(
            "no previous session, authenticate at {}{}:{}{}/start",
            state.config.protocol,
            state.config.origin,
            state.config.port,
            state.options.spotify.route_prefix,
        );
    }

    poller::spawn_info_poller(Arc::clone(&state));

    let addr = format!("{}:{}", state.config.host, state.config.port);
    let router = transport::build_router(Arc::clone(&state));
    let listener = TcpListener::bind(&addr).await?;
    tracing::info!("juke listening on {addr}");
    state.hub.system("start");

    axum::serve(listener, router).with_graceful_shutdown(shutdown.cancelled_owned()).await?;

    Ok(())
}

/// Try to rebuild a session from the persisted token file.
///
/// The stored access token is stale more often than not, so a refresh runs
/// immediately. The provider occasionally answers `invalid_request` when
/// the endpoint is hit in quick succession; the stored token is kept as-is
/// in that case and the next lazy refresh sorts it out. Any other
/// body-level error means the stored credentials are dead.
pub async fn initialise_previous_auth(state: &AppState) -> Option<Arc<SpotifyClient>> {
    let previous = state.store.load()?;
    let refresh_token = previous.refresh_token.clone()?;

    let response = match state.exchange.refresh(&refresh_token).await {
        Ok(r) => r,
        Err(e) => {
            tracing::warn!(err = %e, "refresh of stored credentials failed");
            return None;
        }
    };

    let token = match response.error.as_deref() {
        Some("invalid_request") => previous,
        Some(error) => {
            tracing::warn!(error, "stored credentials rejected, re-authentication required");
            return None;
        }
        None => {
            let mut fresh = response.token;
            fresh.retain_refresh_token(&previous);
            fresh.ensure_expires(epoch_ms());
            if let Err(e) = state.store.save(&fresh) {
                tracing::warn!(err = %e, "failed to persist refreshed token");
            }
            fresh
        }
    };

    let session = Arc::new(TokenSession::new(
        token,
        state.exchange.clone(),
        state.store.clone(),
    ));
    Some(Arc::new(SpotifyClient::new(session, state.hub.clone())))
}
