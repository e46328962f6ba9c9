// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

use super::*;
use std::sync::Arc;
use tokio_util::sync::CancellationToken;

use crate::config::{Config, PartyOptions};
use crate::error::{ErrorCategory, Failure};
use crate::events::{EventHub, MessageKind};
use crate::spotify::exchange::TokenExchange;
use crate::spotify::store::TokenStore;

fn state_with_suppressed(suppressed: &[&str]) -> Arc<AppState> {
    let config = Config {
        host: "127.0.0.1".into(),
        port: 3000,
        origin: "127.0.0.1".into(),
        protocol: "http://".into(),
        client_id: Some("client-123".into()),
        client_secret: Some("secret".into()),
        config: None,
    };
    let mut options = PartyOptions::default();
    options.suppress_errors = suppressed.iter().map(|s| (*s).to_owned()).collect();
    Arc::new(AppState::new(
        config,
        options,
        TokenExchange::new("client-123".into(), "secret".into()),
        TokenStore::new("/tmp/juke-ws-tests.json"),
        EventHub::new(),
        CancellationToken::new(),
    ))
}

#[test]
fn suppressed_errors_stay_off_the_wire() -> anyhow::Result<()> {
    let state = state_with_suppressed(&["api/spotify_rate_limit"]);

    let rate_limit = AppEvent::Error {
        code: "api/spotify_rate_limit".into(),
        message: "rate limit".into(),
        detail: None,
    };
    let reauth = AppEvent::Error {
        code: "api/spotify_reauthenticate".into(),
        message: "re-auth".into(),
        detail: None,
    };

    assert!(suppressed(&state, &rate_limit));
    assert!(!suppressed(&state, &reauth));
    Ok(())
}

#[test]
fn non_error_events_are_never_suppressed() -> anyhow::Result<()> {
    // Even a pathological config listing non-error identifiers must not
    // filter messages or system events.
    let state = state_with_suppressed(&["api/spotify_rate_limit", "authenticated"]);

    let message = AppEvent::Message { kind: MessageKind::Info, text: "hi".into() };
    let system = AppEvent::System { event: "authenticated".into() };

    assert!(!suppressed(&state, &message));
    assert!(!suppressed(&state, &system));
    Ok(())
}

#[test]
fn wire_format_is_tagged_snake_case() -> anyhow::Result<()> {
    let failure = Failure::new(ErrorCategory::SpotifyRateLimit, "rate limit");
    let hub = EventHub::new();
    let mut rx = hub.subscribe();
    hub.error(&failure);

    let event = rx.try_recv()?;
    let wire = serde_json::to_value(&event)?;
    assert_eq!(wire["type"], "error");
    assert_eq!(wire["code"], "api/spotify_rate_limit");

    hub.system("authenticated");
    let wire = serde_json::to_value(&rx.try_recv()?)?;
    assert_eq!(wire["type"], "system");
    assert_eq!(wire["event"], "authenticated");

    hub.message("Added <em>x</em>", MessageKind::Track);
    let wire = serde_json::to_value(&rx.try_recv()?)?;
    assert_eq!(wire["type"], "message");
    assert_eq!(wire["kind"], "track");
    Ok(())
}
