// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

use super::*;

#[test]
fn required_scopes_always_present() -> anyhow::Result<()> {
    let merged = merge_scopes(&[]);
    assert_eq!(
        merged,
        "user-read-currently-playing user-read-playback-state user-modify-playback-state"
    );
    Ok(())
}

#[test]
fn extra_scopes_are_appended_and_deduplicated() -> anyhow::Result<()> {
    let extra = vec![
        "playlist-read-private".to_owned(),
        // Already in the required set — must not repeat.
        "user-read-playback-state".to_owned(),
        "playlist-read-private".to_owned(),
    ];
    let merged = merge_scopes(&extra);
    assert_eq!(
        merged,
        "user-read-currently-playing user-read-playback-state \
         user-modify-playback-state playlist-read-private"
    );
    Ok(())
}

#[test]
fn authorize_url_includes_params() -> anyhow::Result<()> {
    let url = build_authorize_url(
        "client-123",
        "user-read-currently-playing user-read-playback-state",
        "http://127.0.0.1:3000/spotify/token",
    );
    assert!(url.starts_with("https://accounts.spotify.com/authorize?response_type=code&"));
    assert!(url.contains("client_id=client-123"));
    assert!(url.contains("scope=user-read-currently-playing+user-read-playback-state"));
    assert!(url.contains("redirect_uri=http%3A%2F%2F127.0.0.1%3A3000%2Fspotify%2Ftoken"));
    Ok(())
}

#[test]
fn urlencoded_escapes_reserved_bytes() -> anyhow::Result<()> {
    assert_eq!(urlencoded("a b"), "a+b");
    assert_eq!(urlencoded("a:b/c"), "a%3Ab%2Fc");
    assert_eq!(urlencoded("safe-._~"), "safe-._~");
    Ok(())
}
