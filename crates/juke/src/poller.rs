// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

//! Centralized now-playing poller.
//!
//! One server-side poll fans out to every connected client over the
//! socket, instead of each client hitting the provider on its own — the
//! whole point is staying clear of the rate limit with a room full of
//! phones.

use std::sync::atomic::Ordering;
use std::sync::Arc;

use crate::spotify::interact;
use crate::state::AppState;

/// Spawn the poll loop. A failed iteration emits through the client's
/// classification path and reschedules; the loop only exits on shutdown.
pub fn spawn_info_poller(state: Arc<AppState>) {
    if !state.options.api.centralised_polling {
        return;
    }

    let interval_duration = state.options.polling_interval();
    tokio::spawn(async move {
        let mut interval = tokio::time::interval(interval_duration);
        interval.set_missed_tick_behavior(tokio::time::MissedTickBehavior::Skip);

        loop {
            tokio::select! {
                _ = state.shutdown.cancelled() => break,
                _ = interval.tick() => {}
            }

            let Some(client) = state.sdk().await else {
                continue;
            };

            // No clients and a warm cache: skip the API call. One call is
            // still spent when the cache is cold so late joiners get a
            // snapshot immediately.
            let has_cache = state.hub.cached_info().await.is_some();
            if state.ws_clients.load(Ordering::Relaxed) == 0 && has_cache {
                continue;
            }

            match interact::info(&client, &state.memo, &state.options.api.market).await {
                Ok(payload) => state.hub.info(payload).await,
                Err(e) => {
                    // Categorized events were already emitted by the
                    // client wrapper; the loop itself just reschedules.
                    tracing::debug!(err = %e, "info poll failed");
                }
            }
        }
    });
}
