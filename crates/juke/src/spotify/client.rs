// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

//! Resilient wrapper around the provider Web API.
//!
//! Every outbound call passes through the same response validator: the
//! status is classified into a category, the matching event is broadcast,
//! and the call fails with the classified [`Failure`]. Bodies are read as
//! text first and only parsed as JSON when the content type says so, which
//! keeps 204-style empty responses and non-JSON error pages from blowing
//! up deserialization.

use std::sync::Arc;
use std::time::Duration;

use reqwest::Method;
use serde_json::{json, Value};

use crate::error::{ErrorCategory, Failure};
use crate::events::EventHub;
use crate::spotify::session::TokenSession;
use crate::spotify::API_URL;

/// Provider API client bound to a token session.
pub struct SpotifyClient {
    http: reqwest::Client,
    session: Arc<TokenSession>,
    hub: EventHub,
    api_url: String,
}

impl SpotifyClient {
    pub fn new(session: Arc<TokenSession>, hub: EventHub) -> Self {
        Self::with_api_url(session, hub, API_URL.to_owned())
    }

    /// Bind to a non-default API base (tests point this at a stub).
    pub fn with_api_url(session: Arc<TokenSession>, hub: EventHub, api_url: String) -> Self {
        crate::spotify::ensure_crypto_provider();
        Self {
            http: reqwest::Client::builder()
                .timeout(Duration::from_secs(10))
                .build()
                .unwrap_or_default(),
            session,
            hub,
            api_url,
        }
    }

    pub fn session(&self) -> &Arc<TokenSession> {
        &self.session
    }

    /// One validated round trip. Non-2xx responses emit their categorized
    /// event and fail the call; 2xx bodies deserialize per the
    /// content-type gate.
    async fn request(
        &self,
        method: Method,
        path: &str,
        query: &[(&str, &str)],
    ) -> anyhow::Result<Option<Value>> {
        let token = self.session.get_or_refresh().await?;
        let url = format!("{}{}", self.api_url, path);

        let mut req = self.http.request(method, &url).bearer_auth(&token.access_token);
        if !query.is_empty() {
            req = req.query(query);
        }
        let resp = req.send().await?;

        let status = resp.status().as_u16();
        let retry_after = resp
            .headers()
            .get("retry-after")
            .and_then(|v| v.to_str().ok())
            .map(str::to_owned);
        let content_type = resp
            .headers()
            .get("content-type")
            .and_then(|v| v.to_str().ok())
            .map(str::to_owned);
        let text = resp.text().await.unwrap_or_default();

        if let Some(failure) = classify(status, retry_after.as_deref(), &text) {
            self.hub.error(&failure);
            return Err(failure.into());
        }

        deserialize_body(content_type.as_deref(), &text)
    }

    async fn get(&self, path: &str, query: &[(&str, &str)]) -> anyhow::Result<Option<Value>> {
        self.request(Method::GET, path, query).await
    }

    // -- Typed endpoints ------------------------------------------------------

    pub async fn currently_playing(&self, market: &str) -> anyhow::Result<Option<Value>> {
        self.get(
            "/me/player/currently-playing",
            &[("market", market), ("additional_types", "episode")],
        )
        .await
    }

    pub async fn queue(&self) -> anyhow::Result<Option<Value>> {
        self.get("/me/player/queue", &[]).await
    }

    pub async fn queue_add(&self, uri: &str) -> anyhow::Result<Option<Value>> {
        self.request(Method::POST, "/me/player/queue", &[("uri", uri)]).await
    }

    pub async fn play(&self) -> anyhow::Result<Option<Value>> {
        self.request(Method::PUT, "/me/player/play", &[]).await
    }

    pub async fn pause(&self) -> anyhow::Result<Option<Value>> {
        self.request(Method::PUT, "/me/player/pause", &[]).await
    }

    pub async fn next(&self) -> anyhow::Result<Option<Value>> {
        self.request(Method::POST, "/me/player/next", &[]).await
    }

    pub async fn previous(&self) -> anyhow::Result<Option<Value>> {
        self.request(Method::POST, "/me/player/previous", &[]).await
    }

    pub async fn search(
        &self,
        q: &str,
        market: &str,
        limit: u32,
    ) -> anyhow::Result<Option<Value>> {
        let limit = limit.to_string();
        self.get(
            "/search",
            &[
                ("q", q),
                ("type", "track,artist,album"),
                ("market", market),
                ("limit", limit.as_str()),
            ],
        )
        .await
    }

    pub async fn artist(&self, id: &str) -> anyhow::Result<Option<Value>> {
        self.get(&format!("/artists/{id}"), &[]).await
    }

    pub async fn artist_top_tracks(
        &self,
        id: &str,
        market: &str,
    ) -> anyhow::Result<Option<Value>> {
        self.get(&format!("/artists/{id}/top-tracks"), &[("market", market)]).await
    }

    pub async fn album(&self, id: &str) -> anyhow::Result<Option<Value>> {
        self.get(&format!("/albums/{id}"), &[]).await
    }

    pub async fn track(&self, id: &str) -> anyhow::Result<Option<Value>> {
        self.get(&format!("/tracks/{id}"), &[]).await
    }

    pub async fn playlist(&self, id: &str) -> anyhow::Result<Option<Value>> {
        self.get(&format!("/playlists/{id}"), &[]).await
    }

    pub async fn show(&self, id: &str) -> anyhow::Result<Option<Value>> {
        self.get(&format!("/shows/{id}"), &[]).await
    }
}

/// Classify a response status into a categorized failure.
///
/// Checked in ladder order: 401, 403, 429, then any other non-2xx. 2xx
/// passes through as `None`.
pub(crate) fn classify(status: u16, retry_after: Option<&str>, body: &str) -> Option<Failure> {
    match status {
        401 => Some(Failure::new(
            ErrorCategory::SpotifyReauthenticate,
            "Bad or expired token - re-authentication required",
        )),
        403 => {
            let message = serde_json::from_str::<Value>(body).ok().and_then(|parsed| {
                parsed
                    .get("error")
                    .and_then(|e| e.get("message"))
                    .and_then(|m| m.as_str())
                    .map(str::to_owned)
            });
            if message.as_deref() == Some("Restricted device") {
                Some(Failure::new(
                    ErrorCategory::SpotifyRestricted,
                    "Restricted device - the active player cannot accept this command",
                ))
            } else {
                Some(Failure::with_detail(
                    ErrorCategory::SpotifyUnauthenticated,
                    "Bad OAuth request - re-authenticating will not help",
                    json!({ "body": body }),
                ))
            }
        }
        429 => {
            let secs = retry_after.and_then(|v| v.trim().parse::<u64>().ok()).unwrap_or(0);
            let display = retry_after_display(secs);
            Some(Failure::with_detail(
                ErrorCategory::SpotifyRateLimit,
                format!("Rate limit - retry in {display}"),
                json!({ "retry_after_secs": secs, "retry_after_display": display }),
            ))
        }
        s if (200..300).contains(&s) => None,
        s => Some(Failure::with_detail(
            ErrorCategory::SpotifyError,
            format!("Unrecognised response code: {s}"),
            json!({ "status": s, "body": body }),
        )),
    }
}

/// Render retry-after seconds as minutes rounded to one decimal place:
/// `round(secs / 60 * 10) / 10`, suffixed `m` (30 -> "0.5m", 120 -> "2m").
pub(crate) fn retry_after_display(secs: u64) -> String {
    let minutes = (secs as f64 / 60.0 * 10.0).round() / 10.0;
    format!("{minutes}m")
}

/// Deserialize a response body. JSON is only attempted when the body is
/// non-empty and the content type says `application/json`; anything else
/// yields `None`.
pub(crate) fn deserialize_body(
    content_type: Option<&str>,
    text: &str,
) -> anyhow::Result<Option<Value>> {
    let is_json = content_type.is_some_and(|ct| ct.contains("application/json"));
    if text.is_empty() || !is_json {
        return Ok(None);
    }
    Ok(Some(serde_json::from_str(text)?))
}

#[cfg(test)]
#[path = "client_tests.rs"]
mod tests;
