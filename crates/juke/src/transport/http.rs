// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

//! HTTP handlers for the party API.
//!
//! Every handler that talks to the provider goes through `require_sdk`:
//! no installed session means the caller never logged in (or the session
//! was invalidated) and gets the `api/unauthenticated` envelope.

use std::sync::Arc;
use std::sync::OnceLock;

use axum::extract::{Path, Query, State};
use axum::response::{IntoResponse, Response};
use axum::Json;
use regex::Regex;
use serde::Deserialize;
use serde_json::json;

use crate::error::{ErrorCategory, Failure};
use crate::events::MessageKind;
use crate::spotify::client::SpotifyClient;
use crate::spotify::interact;
use crate::state::AppState;

async fn require_sdk(state: &AppState) -> Result<Arc<SpotifyClient>, Box<Response>> {
    match state.sdk().await {
        Some(client) => Ok(client),
        None => Err(Box::new(
            Failure::new(ErrorCategory::Unauthenticated, "not authenticated with provider")
                .to_http_response()
                .into_response(),
        )),
    }
}

/// Map an operation error back to its categorized envelope; anything that
/// is not a classified [`Failure`] is an internal error.
fn api_error(err: &anyhow::Error) -> Response {
    match err.downcast_ref::<Failure>() {
        Some(failure) => failure.to_http_response().into_response(),
        None => {
            tracing::error!(err = %err, "api error");
            Failure::new(ErrorCategory::General, "internal error")
                .to_http_response()
                .into_response()
        }
    }
}

/// `GET /api/artist/{id}` — an artist's top tracks.
pub async fn artist(State(state): State<Arc<AppState>>, Path(id): Path<String>) -> Response {
    let client = match require_sdk(&state).await {
        Ok(c) => c,
        Err(resp) => return *resp,
    };
    match interact::artist_top_tracks(&client, &state.memo, &id, &state.options.api.market).await
    {
        Ok(value) => Json(value).into_response(),
        Err(e) => api_error(&e),
    }
}

/// `GET /api/album/{id}` — an album's track listing.
pub async fn album(State(state): State<Arc<AppState>>, Path(id): Path<String>) -> Response {
    let client = match require_sdk(&state).await {
        Ok(c) => c,
        Err(resp) => return *resp,
    };
    match interact::album(&client, &state.memo, &id).await {
        Ok(value) => Json(value).into_response(),
        Err(e) => api_error(&e),
    }
}

#[derive(Debug, Deserialize)]
pub struct SearchQuery {
    #[serde(default)]
    pub q: String,
}

/// Matches a pasted share link (`open.spotify.com/track/...` and friends).
fn shared_url(q: &str) -> Option<(String, String)> {
    static RE: OnceLock<Option<Regex>> = OnceLock::new();
    let re = RE
        .get_or_init(|| {
            Regex::new(
                r"https?://(?:embed\.|open\.)spotify\.com/(?:(track|album|artist)/|\?uri=spotify:(track|album|artist):)([\w-]{22})",
            )
            .ok()
        })
        .as_ref()?;

    let caps = re.captures(q)?;
    let kind = caps.get(1).or_else(|| caps.get(2))?.as_str().to_owned();
    let id = caps.get(3)?.as_str().to_owned();
    Some((kind, id))
}

/// `GET /api/search?q=` — free-text search, with a special case for
/// guests pasting a share link straight into the search box.
pub async fn search(
    State(state): State<Arc<AppState>>,
    Query(query): Query<SearchQuery>,
) -> Response {
    let client = match require_sdk(&state).await {
        Ok(c) => c,
        Err(resp) => return *resp,
    };

    if let Some((kind, id)) = shared_url(&query.q) {
        let result = match kind.as_str() {
            "track" => interact::track(&client, &state.memo, &id).await,
            "artist" => {
                interact::artist_top_tracks(&client, &state.memo, &id, &state.options.api.market)
                    .await
            }
            _ => interact::album(&client, &state.memo, &id).await,
        };
        return match result {
            Ok(value) => Json(value).into_response(),
            Err(e) => api_error(&e),
        };
    }

    match interact::search(
        &client,
        &state.memo,
        &query.q,
        &state.options.api.market,
        state.options.api.search_query_limit,
    )
    .await
    {
        Ok(value) => Json(value).into_response(),
        Err(e) => api_error(&e),
    }
}

#[derive(Debug, Deserialize)]
pub struct AddQuery {
    pub uri: String,
    #[serde(default)]
    pub name: Option<String>,
}

/// `GET /api/add?uri=&name=` — queue a track, refusing duplicates.
pub async fn add(State(state): State<Arc<AppState>>, Query(query): Query<AddQuery>) -> Response {
    let client = match require_sdk(&state).await {
        Ok(c) => c,
        Err(resp) => return *resp,
    };

    if !state.options.api.can_add {
        state.hub.message("Not allowed", MessageKind::Error);
        return Json(json!({ "success": false })).into_response();
    }

    match interact::queue_add(&client, &query.uri).await {
        Ok(true) => {
            let name = query.name.as_deref().unwrap_or("a track");
            state.hub.message(format!("Added <em>{name}</em>"), MessageKind::Track);
            state.hub.system("add");
            Json(json!({ "success": true })).into_response()
        }
        Ok(false) => {
            state.hub.message("Song already in queue", MessageKind::Error);
            Json(json!({ "success": false })).into_response()
        }
        Err(e) => api_error(&e),
    }
}

/// `GET /api/info` — the now-playing snapshot.
pub async fn info(State(state): State<Arc<AppState>>) -> Response {
    let client = match require_sdk(&state).await {
        Ok(c) => c,
        Err(resp) => return *resp,
    };
    match interact::info(&client, &state.memo, &state.options.api.market).await {
        Ok(value) => Json(value).into_response(),
        Err(e) => api_error(&e),
    }
}

/// `GET /api/queue` — current queue contents.
pub async fn queue(State(state): State<Arc<AppState>>) -> Response {
    let client = match require_sdk(&state).await {
        Ok(c) => c,
        Err(resp) => return *resp,
    };
    match interact::queue(&client).await {
        Ok(value) => Json(value).into_response(),
        Err(e) => api_error(&e),
    }
}

async fn transport_command(
    state: &AppState,
    run: impl std::future::Future<Output = anyhow::Result<serde_json::Value>>,
    toast: &str,
    event: &str,
) -> Response {
    if !state.options.api.can_control {
        state.hub.message("Not allowed", MessageKind::Error);
        return Json(json!({ "success": false })).into_response();
    }
    match run.await {
        Ok(value) => {
            state.hub.message(toast, MessageKind::Info);
            state.hub.system(event);
            Json(value).into_response()
        }
        Err(e) => api_error(&e),
    }
}

/// `GET /api/skipForward`
pub async fn skip_forward(State(state): State<Arc<AppState>>) -> Response {
    let client = match require_sdk(&state).await {
        Ok(c) => c,
        Err(resp) => return *resp,
    };
    transport_command(&state, interact::forward(&client), "Skipped forward", "skippedForward")
        .await
}

/// `GET /api/skipBackward`
pub async fn skip_backward(State(state): State<Arc<AppState>>) -> Response {
    let client = match require_sdk(&state).await {
        Ok(c) => c,
        Err(resp) => return *resp,
    };
    transport_command(&state, interact::back(&client), "Skipped back", "skippedBackward").await
}

/// `GET /api/play`
pub async fn play(State(state): State<Arc<AppState>>) -> Response {
    let client = match require_sdk(&state).await {
        Ok(c) => c,
        Err(resp) => return *resp,
    };
    transport_command(&state, interact::play(&client), "Pressed play", "play").await
}

/// `GET /api/pause`
pub async fn pause(State(state): State<Arc<AppState>>) -> Response {
    let client = match require_sdk(&state).await {
        Ok(c) => c,
        Err(resp) => return *resp,
    };
    transport_command(&state, interact::pause(&client), "Pressed pause", "pause").await
}

/// `GET /api/health` — liveness plus whether a session is installed.
pub async fn health(State(state): State<Arc<AppState>>) -> Response {
    let authenticated = state.sdk().await.is_some();
    Json(json!({ "success": true, "authenticated": authenticated })).into_response()
}

/// `GET /api/reauthenticate` — drop the session and force a fresh login.
pub async fn reauthenticate(State(state): State<Arc<AppState>>) -> Response {
    state.clear_sdk().await;
    tracing::info!("session cleared, re-authentication required");
    Json(json!({ "success": true })).into_response()
}
