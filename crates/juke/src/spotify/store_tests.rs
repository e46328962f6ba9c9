// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

use super::*;

fn sample_token() -> AccessToken {
    AccessToken {
        access_token: "abc".into(),
        refresh_token: Some("r1".into()),
        token_type: "Bearer".into(),
        expires_in: 3600,
        expires: Some(1_700_000_000_000),
        scope: "user-read-playback-state".into(),
    }
}

#[test]
fn load_missing_file_is_none() -> anyhow::Result<()> {
    let dir = tempfile::tempdir()?;
    let store = TokenStore::new(&dir.path().join("missing.json").to_string_lossy());
    assert!(store.load().is_none());
    Ok(())
}

#[test]
fn load_corrupt_file_is_none() -> anyhow::Result<()> {
    let dir = tempfile::tempdir()?;
    let path = dir.path().join("auth.json");
    std::fs::write(&path, "{ not json")?;
    let store = TokenStore::new(&path.to_string_lossy());
    assert!(store.load().is_none());
    Ok(())
}

#[test]
fn save_then_load_round_trips() -> anyhow::Result<()> {
    let dir = tempfile::tempdir()?;
    let path = dir.path().join("auth.json");
    let store = TokenStore::new(&path.to_string_lossy());

    let token = sample_token();
    store.save(&token)?;

    let loaded = store.load().ok_or_else(|| anyhow::anyhow!("no token"))?;
    assert_eq!(loaded, token);
    Ok(())
}

#[test]
fn first_save_creates_directories_and_template() -> anyhow::Result<()> {
    let dir = tempfile::tempdir()?;
    let path = dir.path().join("nested/deeper/auth.json");
    let store = TokenStore::new(&path.to_string_lossy());

    store.save(&sample_token())?;

    assert!(path.exists());
    let template = path.with_file_name("juke.config.json");
    assert!(template.exists(), "template config should be seeded on first run");

    // The template must be valid options JSON.
    let contents = std::fs::read_to_string(&template)?;
    let _: crate::config::PartyOptions = serde_json::from_str(&contents)?;
    Ok(())
}

#[test]
fn template_is_not_overwritten() -> anyhow::Result<()> {
    let dir = tempfile::tempdir()?;
    let path = dir.path().join("auth.json");
    let template = dir.path().join("juke.config.json");
    std::fs::write(&template, "{\"player_route\":\"/custom\"}")?;

    let store = TokenStore::new(&path.to_string_lossy());
    store.save(&sample_token())?;

    let contents = std::fs::read_to_string(&template)?;
    assert!(contents.contains("/custom"));
    Ok(())
}

#[test]
fn save_overwrites_previous_token() -> anyhow::Result<()> {
    let dir = tempfile::tempdir()?;
    let path = dir.path().join("auth.json");
    let store = TokenStore::new(&path.to_string_lossy());

    store.save(&sample_token())?;
    let mut updated = sample_token();
    updated.access_token = "def".into();
    store.save(&updated)?;

    let loaded = store.load().ok_or_else(|| anyhow::anyhow!("no token"))?;
    assert_eq!(loaded.access_token, "def");
    Ok(())
}

#[test]
fn expand_home_leaves_absolute_paths_alone() -> anyhow::Result<()> {
    assert_eq!(expand_home("/tmp/auth.json"), PathBuf::from("/tmp/auth.json"));
    assert_eq!(expand_home("relative/auth.json"), PathBuf::from("relative/auth.json"));
    Ok(())
}

#[test]
fn expand_home_resolves_tilde() -> anyhow::Result<()> {
    // HOME is set in every environment we run tests in; skip if not.
    let Ok(home) = std::env::var("HOME") else {
        return Ok(());
    };
    assert_eq!(expand_home("~/x.json"), PathBuf::from(&home).join("x.json"));
    assert_eq!(expand_home("~"), PathBuf::from(&home));
    Ok(())
}
