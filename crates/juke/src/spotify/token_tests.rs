// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

use super::*;

fn token_without_expiry() -> AccessToken {
    AccessToken {
        access_token: "abc".into(),
        refresh_token: Some("r1".into()),
        token_type: "Bearer".into(),
        expires_in: 3600,
        expires: None,
        scope: "user-read-playback-state".into(),
    }
}

#[test]
fn expires_is_computed_exactly_once() -> anyhow::Result<()> {
    let mut token = token_without_expiry();

    token.ensure_expires(1_000_000);
    assert_eq!(token.expires, Some(1_000_000 + 3600 * 1000));

    // A later call with a different clock must not recompute.
    token.ensure_expires(9_000_000);
    assert_eq!(token.expires, Some(1_000_000 + 3600 * 1000));
    Ok(())
}

#[test]
fn expiry_check() -> anyhow::Result<()> {
    let mut token = token_without_expiry();
    assert!(token.is_expired(0), "missing expiry counts as expired");

    token.ensure_expires(1_000);
    assert!(!token.is_expired(1_001));
    assert!(token.is_expired(1_000 + 3600 * 1000));
    assert!(token.is_expired(u64::MAX));
    Ok(())
}

#[test]
fn refresh_token_is_retained_when_omitted() -> anyhow::Result<()> {
    let previous = token_without_expiry();
    let mut fresh = AccessToken { refresh_token: None, ..token_without_expiry() };

    fresh.retain_refresh_token(&previous);
    assert_eq!(fresh.refresh_token.as_deref(), Some("r1"));
    Ok(())
}

#[test]
fn refresh_token_is_not_overwritten_when_present() -> anyhow::Result<()> {
    let previous = token_without_expiry();
    let mut fresh = AccessToken { refresh_token: Some("r2".into()), ..token_without_expiry() };

    fresh.retain_refresh_token(&previous);
    assert_eq!(fresh.refresh_token.as_deref(), Some("r2"));
    Ok(())
}

#[test]
fn response_with_body_error_is_rejected() -> anyhow::Result<()> {
    let response: TokenResponse =
        serde_json::from_str(r#"{"error":"invalid_grant","error_description":"revoked"}"#)?;
    assert_eq!(response.error.as_deref(), Some("invalid_grant"));

    let err = match response.into_token() {
        Ok(_) => anyhow::bail!("expected rejection"),
        Err(e) => e,
    };
    assert!(err.to_string().contains("invalid_grant"));
    Ok(())
}

#[test]
fn response_without_error_yields_token() -> anyhow::Result<()> {
    let response: TokenResponse = serde_json::from_str(
        r#"{"access_token":"abc","token_type":"Bearer","expires_in":3600,"scope":"s"}"#,
    )?;
    let token = response.into_token()?;
    assert_eq!(token.access_token, "abc");
    assert_eq!(token.expires_in, 3600);
    assert!(token.refresh_token.is_none());
    Ok(())
}

#[test]
fn persisted_fields_round_trip() -> anyhow::Result<()> {
    let mut token = token_without_expiry();
    token.ensure_expires(42);

    let json = serde_json::to_string(&token)?;
    let back: AccessToken = serde_json::from_str(&json)?;
    assert_eq!(back, token);
    Ok(())
}
