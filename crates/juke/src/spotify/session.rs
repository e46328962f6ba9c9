// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

//! Access token lifecycle: lazy refresh behind a single accessor so every
//! API call site stays ignorant of token staleness.

use tokio::sync::Mutex;

use crate::spotify::exchange::TokenExchange;
use crate::spotify::store::TokenStore;
use crate::spotify::token::AccessToken;
use crate::state::epoch_ms;

/// Holds the one current access token for the process and owns its only
/// mutation path after construction.
///
/// The async mutex is held across the refresh await, which makes the
/// refresh single-flight: concurrent callers that observe an expired token
/// queue on the lock and find the fresh token already in place. The token
/// endpoint is tightly rate limited, so duplicate refreshes are not an
/// acceptable race to lose.
pub struct TokenSession {
    token: Mutex<AccessToken>,
    exchange: TokenExchange,
    store: TokenStore,
}

impl TokenSession {
    /// Wrap a token, computing its absolute expiry now if the loaded data
    /// did not carry one.
    pub fn new(mut token: AccessToken, exchange: TokenExchange, store: TokenStore) -> Self {
        token.ensure_expires(epoch_ms());
        Self { token: Mutex::new(token), exchange, store }
    }

    /// The held token, without a freshness check. Introspection only — API
    /// calls go through [`TokenSession::get_or_refresh`].
    pub async fn current(&self) -> AccessToken {
        self.token.lock().await.clone()
    }

    /// Return a currently-valid token, refreshing first if the held one
    /// has expired. The refreshed token is persisted before being handed
    /// out.
    pub async fn get_or_refresh(&self) -> anyhow::Result<AccessToken> {
        let mut held = self.token.lock().await;
        if !held.is_expired(epoch_ms()) {
            return Ok(held.clone());
        }

        let refresh_token = held
            .refresh_token
            .clone()
            .ok_or_else(|| anyhow::anyhow!("token expired and no refresh token held"))?;

        let response = self.exchange.refresh(&refresh_token).await?;
        let mut fresh = response.into_token()?;
        fresh.retain_refresh_token(&held);
        fresh.ensure_expires(epoch_ms());

        if let Err(e) = self.store.save(&fresh) {
            tracing::warn!(err = %e, "failed to persist refreshed token");
        }
        tracing::debug!("access token refreshed");

        *held = fresh;
        Ok(held.clone())
    }

    /// Replace the held token with the zeroed token, forcing the next
    /// caller through re-authentication.
    pub async fn invalidate(&self) {
        *self.token.lock().await = AccessToken::zeroed();
    }
}
