// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

//! OAuth route controller: `/start` kicks off the authorize redirect, the
//! token callback exchanges the returned code and installs the session.

use std::sync::Arc;

use axum::extract::{Query, State};
use axum::response::{IntoResponse, Redirect, Response};
use serde::Deserialize;
use serde_json::json;

use crate::error::{ErrorCategory, Failure};
use crate::retry::{catch_and_retry, RetryPolicy};
use crate::spotify;
use crate::spotify::client::SpotifyClient;
use crate::spotify::session::TokenSession;
use crate::state::{epoch_ms, AppState};

fn authenticated_redirect(state: &AppState) -> String {
    format!("{}?authenticated=true", state.options.spotify.authenticated_redirect)
}

/// `GET {prefix}/start` — begin authorization, or skip straight to the
/// player when a session is already installed.
pub async fn start(State(state): State<Arc<AppState>>) -> Response {
    if state.sdk().await.is_some() {
        return Redirect::to(&authenticated_redirect(&state)).into_response();
    }

    let scope = spotify::merge_scopes(&state.options.spotify.scope);
    let url = spotify::build_authorize_url(
        state.exchange.client_id(),
        &scope,
        &state.redirect_uri(),
    );
    Redirect::to(&url).into_response()
}

/// Query parameters the provider redirects back with.
#[derive(Debug, Deserialize)]
pub struct TokenCallbackQuery {
    #[serde(default)]
    pub code: Option<String>,
    #[serde(default)]
    pub error: Option<String>,
}

/// `GET {prefix}{route_token}` — the provider's redirect target.
///
/// The code exchange runs through the retry helper: transient failures are
/// most likely right after the redirect, and the code is single-use, so
/// giving up early forces the guest through the whole flow again.
pub async fn token_callback(
    State(state): State<Arc<AppState>>,
    Query(query): Query<TokenCallbackQuery>,
) -> Response {
    if state.sdk().await.is_some() {
        return Redirect::to(&authenticated_redirect(&state)).into_response();
    }

    if let Some(error) = query.error {
        let failure = Failure::with_detail(
            ErrorCategory::SpotifyUnauthenticated,
            "authorization was refused",
            json!({ "error": error }),
        );
        state.hub.error(&failure);
        return failure.to_http_response().into_response();
    }

    let Some(code) = query.code else {
        let failure =
            Failure::new(ErrorCategory::SpotifyUnauthenticated, "missing authorization code");
        state.hub.error(&failure);
        return failure.to_http_response().into_response();
    };

    let redirect_uri = state.redirect_uri();
    let exchange = &state.exchange;
    let code_ref = code.as_str();
    let redirect_ref = redirect_uri.as_str();
    let response = catch_and_retry(&RetryPolicy::default(), move || async move {
        exchange.exchange_code(code_ref, redirect_ref).await
    })
    .await;

    let response = match response {
        Ok(r) => r,
        Err(e) => {
            tracing::warn!(err = %e, "code exchange failed");
            let failure = Failure::new(ErrorCategory::General, "token exchange failed");
            state.hub.error(&failure);
            return failure.to_http_response().into_response();
        }
    };

    let mut token = match response.into_token() {
        Ok(t) => t,
        Err(e) => {
            let failure = Failure::with_detail(
                ErrorCategory::SpotifyUnauthenticated,
                "provider rejected the authorization code",
                json!({ "error": e.to_string() }),
            );
            state.hub.error(&failure);
            return failure.to_http_response().into_response();
        }
    };

    token.ensure_expires(epoch_ms());
    if let Err(e) = state.store.save(&token) {
        tracing::warn!(err = %e, "failed to persist token");
    }

    let session = Arc::new(TokenSession::new(
        token,
        state.exchange.clone(),
        state.store.clone(),
    ));
    let client = Arc::new(SpotifyClient::new(session, state.hub.clone()));
    state.install_sdk(client).await;
    state.hub.system("authenticated");
    tracing::info!("authenticated with provider");

    Redirect::to(&authenticated_redirect(&state)).into_response()
}
