// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

//! Shared event hub: typed broadcast events plus the cached now-playing
//! snapshot used to backfill newly connected clients.
//!
//! Route handlers, the token lifecycle, and the poller all emit through the
//! hub; the WebSocket transport is the only subscriber that leaves the
//! process. Sends never fail — a hub with no subscribers just drops events.

use std::sync::Arc;

use serde::{Deserialize, Serialize};
use serde_json::Value;
use tokio::sync::{broadcast, RwLock};

use crate::error::Failure;

/// Toast flavor understood by the player frontend.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum MessageKind {
    Info,
    Error,
    Track,
}

/// Wire-format events pushed to connected clients.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(tag = "type", rename_all = "snake_case")]
pub enum AppEvent {
    /// A human-readable toast message.
    Message { kind: MessageKind, text: String },
    /// A categorized failure (code is the `api/...` identifier).
    Error {
        code: String,
        message: String,
        #[serde(skip_serializing_if = "Option::is_none")]
        detail: Option<Value>,
    },
    /// A lifecycle marker: `start`, `authenticated`, `add`, `play`, ...
    System { event: String },
    /// The latest now-playing snapshot from the poller.
    Info { payload: Value },
}

/// Event hub — fans out [`AppEvent`]s to downstream clients via broadcast.
#[derive(Clone)]
pub struct EventHub {
    event_tx: broadcast::Sender<AppEvent>,
    cached_info: Arc<RwLock<Option<Value>>>,
}

impl EventHub {
    pub fn new() -> Self {
        let (event_tx, _) = broadcast::channel(256);
        Self { event_tx, cached_info: Arc::new(RwLock::new(None)) }
    }

    /// Subscribe to all events.
    pub fn subscribe(&self) -> broadcast::Receiver<AppEvent> {
        self.event_tx.subscribe()
    }

    pub fn emit(&self, event: AppEvent) {
        let _ = self.event_tx.send(event);
    }

    pub fn message(&self, text: impl Into<String>, kind: MessageKind) {
        self.emit(AppEvent::Message { kind, text: text.into() });
    }

    /// Broadcast a classified failure under its category code.
    pub fn error(&self, failure: &Failure) {
        self.emit(AppEvent::Error {
            code: failure.category.as_str().to_owned(),
            message: failure.message.clone(),
            detail: failure.detail.clone(),
        });
    }

    pub fn system(&self, event: &str) {
        self.emit(AppEvent::System { event: event.to_owned() });
    }

    /// Cache and broadcast a now-playing snapshot.
    pub async fn info(&self, payload: Value) {
        *self.cached_info.write().await = Some(payload.clone());
        self.emit(AppEvent::Info { payload });
    }

    /// The last snapshot pushed through [`EventHub::info`], if any.
    pub async fn cached_info(&self) -> Option<Value> {
        self.cached_info.read().await.clone()
    }
}

impl Default for EventHub {
    fn default() -> Self {
        Self::new()
    }
}
