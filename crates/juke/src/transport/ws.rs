// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

//! Downstream WebSocket: fans hub events out to connected party clients.

use std::sync::atomic::Ordering;
use std::sync::Arc;

use axum::extract::ws::{Message, WebSocket};
use axum::extract::{State, WebSocketUpgrade};
use axum::response::IntoResponse;
use futures_util::{SinkExt, StreamExt};

use crate::events::AppEvent;
use crate::state::AppState;

/// `GET /ws` — WebSocket upgrade for party clients.
pub async fn ws_handler(
    State(state): State<Arc<AppState>>,
    ws: WebSocketUpgrade,
) -> impl IntoResponse {
    ws.on_upgrade(move |socket| handle_ws(state, socket))
}

/// Should this event stay off the wire? Suppressed error codes are
/// expected to be handled elsewhere (configured by the operator).
fn suppressed(state: &AppState, event: &AppEvent) -> bool {
    match event {
        AppEvent::Error { code, .. } => {
            state.options.suppress_errors.iter().any(|s| s == code)
        }
        _ => false,
    }
}

/// Per-connection event loop.
async fn handle_ws(state: Arc<AppState>, socket: WebSocket) {
    state.ws_clients.fetch_add(1, Ordering::Relaxed);
    tracing::debug!("ws client connected");

    let mut rx = state.hub.subscribe();
    let (mut ws_tx, mut ws_rx) = socket.split();

    // New clients get the cached snapshot immediately instead of waiting
    // for the next poll tick.
    if let Some(payload) = state.hub.cached_info().await {
        if let Ok(json) = serde_json::to_string(&AppEvent::Info { payload }) {
            if ws_tx.send(Message::Text(json.into())).await.is_err() {
                state.ws_clients.fetch_sub(1, Ordering::Relaxed);
                return;
            }
        }
    }

    loop {
        tokio::select! {
            _ = state.shutdown.cancelled() => break,

            event = rx.recv() => {
                let event = match event {
                    Ok(e) => e,
                    Err(tokio::sync::broadcast::error::RecvError::Lagged(n)) => {
                        tracing::debug!(lagged = n, "ws client lagged, skipping");
                        continue;
                    }
                    Err(tokio::sync::broadcast::error::RecvError::Closed) => break,
                };
                if suppressed(&state, &event) {
                    continue;
                }
                if let Ok(json) = serde_json::to_string(&event) {
                    if ws_tx.send(Message::Text(json.into())).await.is_err() {
                        break;
                    }
                }
            }

            msg = ws_rx.next() => {
                match msg {
                    // The socket is push-only; client text is ignored.
                    Some(Ok(Message::Close(_))) | None => break,
                    Some(Err(_)) => break,
                    _ => {}
                }
            }
        }
    }

    state.ws_clients.fetch_sub(1, Ordering::Relaxed);
    tracing::debug!("ws client disconnected");
}

#[cfg(test)]
#[path = "ws_tests.rs"]
mod tests;
