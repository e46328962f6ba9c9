// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

use std::sync::atomic::AtomicUsize;
use std::sync::Arc;

use tokio::sync::RwLock;
use tokio_util::sync::CancellationToken;

use crate::config::{Config, PartyOptions};
use crate::events::EventHub;
use crate::memo::Memo;
use crate::spotify::client::SpotifyClient;
use crate::spotify::exchange::TokenExchange;
use crate::spotify::store::TokenStore;

/// Shared server state.
///
/// `sdk` is the one mutable slot every route observes: `None` until the
/// OAuth flow (or a restored session) installs a client, cleared again by
/// `/api/reauthenticate`.
pub struct AppState {
    pub config: Config,
    pub options: PartyOptions,
    pub sdk: RwLock<Option<Arc<SpotifyClient>>>,
    pub hub: EventHub,
    pub memo: Memo,
    pub exchange: TokenExchange,
    pub store: TokenStore,
    /// Connected `/ws` clients; the poller skips provider calls when this
    /// is zero and a snapshot is already cached.
    pub ws_clients: AtomicUsize,
    pub shutdown: CancellationToken,
}

impl AppState {
    pub fn new(
        config: Config,
        options: PartyOptions,
        exchange: TokenExchange,
        store: TokenStore,
        hub: EventHub,
        shutdown: CancellationToken,
    ) -> Self {
        Self {
            config,
            options,
            sdk: RwLock::new(None),
            hub,
            memo: Memo::new(),
            exchange,
            store,
            ws_clients: AtomicUsize::new(0),
            shutdown,
        }
    }

    /// The current provider client, if authenticated.
    pub async fn sdk(&self) -> Option<Arc<SpotifyClient>> {
        self.sdk.read().await.clone()
    }

    pub async fn install_sdk(&self, client: Arc<SpotifyClient>) {
        *self.sdk.write().await = Some(client);
    }

    /// Drop the current session, zeroing its token so a retained handle
    /// cannot keep authorizing calls.
    pub async fn clear_sdk(&self) {
        let taken = self.sdk.write().await.take();
        if let Some(client) = taken {
            client.session().invalidate().await;
        }
    }

    /// The OAuth redirect URI:
    /// `{protocol}{origin}:{port}{route_prefix}{route_token}`.
    pub fn redirect_uri(&self) -> String {
        format!(
            "{}{}:{}{}{}",
            self.config.protocol,
            self.config.origin,
            self.config.port,
            self.options.spotify.route_prefix,
            self.options.spotify.route_token,
        )
    }
}

/// Return current epoch millis.
pub fn epoch_ms() -> u64 {
    std::time::SystemTime::now()
        .duration_since(std::time::UNIX_EPOCH)
        .unwrap_or_default()
        .as_millis() as u64
}
