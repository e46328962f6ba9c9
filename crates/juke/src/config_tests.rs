// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

use super::*;

fn test_config() -> Config {
    Config {
        host: "127.0.0.1".into(),
        port: 3000,
        origin: "127.0.0.1".into(),
        protocol: "http://".into(),
        client_id: Some("env-id".into()),
        client_secret: Some("env-secret".into()),
        config: None,
    }
}

#[test]
fn missing_file_yields_defaults() -> anyhow::Result<()> {
    let options = load_options(None)?;
    assert_eq!(options.player_route, "/player");
    assert_eq!(options.spotify.route_prefix, "/spotify");
    assert_eq!(options.spotify.route_token, "/token");
    assert!(options.api.centralised_polling);
    Ok(())
}

#[test]
fn partial_file_overlays_defaults() -> anyhow::Result<()> {
    let dir = tempfile::tempdir()?;
    let path = dir.path().join("juke.config.json");
    std::fs::write(
        &path,
        r#"{
            "player_route": "/display",
            "api": { "can_add": false },
            "spotify": { "scope": ["playlist-read-private"] }
        }"#,
    )?;

    let options = load_options(Some(&path))?;
    assert_eq!(options.player_route, "/display");
    assert!(!options.api.can_add);
    // Untouched fields keep their defaults.
    assert!(options.api.can_control);
    assert_eq!(options.spotify.route_prefix, "/spotify");
    assert_eq!(options.spotify.scope, vec!["playlist-read-private".to_owned()]);
    Ok(())
}

#[test]
fn invalid_file_is_an_error_not_a_fallback() -> anyhow::Result<()> {
    let dir = tempfile::tempdir()?;
    let path = dir.path().join("juke.config.json");
    std::fs::write(&path, "{ nope")?;
    assert!(load_options(Some(&path)).is_err());
    Ok(())
}

#[test]
fn credentials_from_environment_config() -> anyhow::Result<()> {
    let (id, secret) = resolve_credentials(&test_config(), &PartyOptions::default())?;
    assert_eq!(id, "env-id");
    assert_eq!(secret, "env-secret");
    Ok(())
}

#[test]
fn options_file_credentials_win() -> anyhow::Result<()> {
    let mut options = PartyOptions::default();
    options.spotify.client_id = Some("file-id".into());
    options.spotify.client_secret = Some("file-secret".into());

    let (id, secret) = resolve_credentials(&test_config(), &options)?;
    assert_eq!(id, "file-id");
    assert_eq!(secret, "file-secret");
    Ok(())
}

#[test]
fn missing_credentials_error() -> anyhow::Result<()> {
    let mut config = test_config();
    config.client_id = None;
    config.client_secret = None;
    assert!(resolve_credentials(&config, &PartyOptions::default()).is_err());
    Ok(())
}
