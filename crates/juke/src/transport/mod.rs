// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

//! HTTP + WebSocket transport for the party server.

pub mod auth_http;
pub mod http;
pub mod ws;

use std::sync::Arc;

use axum::extract::State;
use axum::response::{Html, Redirect};
use axum::routing::get;
use axum::Router;
use tower_http::cors::CorsLayer;

use crate::state::AppState;

/// Embedded player page.
const PLAYER_HTML: &str = include_str!("../web/player.html");

/// Build the axum `Router` with all routes. The auth routes mount under
/// the configured prefix, with the token callback at the configured path.
pub fn build_router(state: Arc<AppState>) -> Router {
    let spotify = Router::new()
        .route("/start", get(auth_http::start))
        .route(&state.options.spotify.route_token, get(auth_http::token_callback));

    let mut router = Router::new()
        .nest(&state.options.spotify.route_prefix, spotify)
        // Catalogue lookups
        .route("/api/artist/{id}", get(http::artist))
        .route("/api/album/{id}", get(http::album))
        .route("/api/search", get(http::search))
        // Queue
        .route("/api/add", get(http::add))
        .route("/api/queue", get(http::queue))
        // Playback
        .route("/api/info", get(http::info))
        .route("/api/skipForward", get(http::skip_forward))
        .route("/api/skipBackward", get(http::skip_backward))
        .route("/api/play", get(http::play))
        .route("/api/pause", get(http::pause))
        // Session
        .route("/api/health", get(http::health))
        .route("/api/reauthenticate", get(http::reauthenticate))
        // Socket + player page
        .route("/ws", get(ws::ws_handler))
        .route(&state.options.player_route, get(player_page));

    if state.options.player_route != "/" {
        router = router.route("/", get(root));
    }

    router.layer(CorsLayer::permissive()).with_state(state)
}

async fn player_page() -> Html<&'static str> {
    Html(PLAYER_HTML)
}

/// `GET /` — send visitors to the player.
async fn root(State(state): State<Arc<AppState>>) -> Redirect {
    Redirect::to(&state.options.player_route)
}
