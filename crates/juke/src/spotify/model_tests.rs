// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

use super::*;

fn sample_track_json() -> &'static str {
    r#"{
        "id": "t1",
        "name": "Song",
        "uri": "spotify:track:t1",
        "track_number": 4,
        "duration_ms": 200000,
        "artists": [{"name": "Lead"}, {"name": "Feature"}],
        "album": {
            "name": "Record",
            "images": [
                {"url": "big.jpg", "width": 640, "height": 640},
                {"url": "mid.jpg", "width": 300, "height": 300},
                {"url": "small.jpg", "width": 64, "height": 64}
            ]
        }
    }"#
}

#[test]
fn track_trim_flattens_provider_shape() -> anyhow::Result<()> {
    let track: Track = serde_json::from_str(sample_track_json())?;
    let trim = trim_track(&track);

    assert_eq!(trim.id, "t1");
    assert_eq!(trim.title, "Song");
    assert_eq!(trim.album, "Record");
    assert_eq!(trim.artist, "Lead");
    assert_eq!(trim.artists, vec!["Lead".to_owned(), "Feature".to_owned()]);
    assert_eq!(trim.number, 4);
    assert_eq!(trim.normalised.subtitle, "Lead");
    Ok(())
}

#[test]
fn image_pair_picks_first_and_last() -> anyhow::Result<()> {
    let track: Track = serde_json::from_str(sample_track_json())?;
    let trim = trim_track(&track);

    let full = trim.image.full.ok_or_else(|| anyhow::anyhow!("no full image"))?;
    let low = trim.image.low.ok_or_else(|| anyhow::anyhow!("no low image"))?;
    assert_eq!(full.url, "big.jpg");
    assert_eq!(low.url, "small.jpg");
    Ok(())
}

#[test]
fn track_without_album_trims_cleanly() -> anyhow::Result<()> {
    let track: Track =
        serde_json::from_str(r#"{"id":"t2","name":"Loose","uri":"spotify:track:t2"}"#)?;
    let trim = trim_track(&track);
    assert_eq!(trim.album, "");
    assert!(trim.image.full.is_none());
    assert!(trim.artists.is_empty());
    Ok(())
}

#[test]
fn album_track_gets_album_attached() -> anyhow::Result<()> {
    let album: Album = serde_json::from_str(
        r#"{
            "id": "a1",
            "name": "Record",
            "uri": "spotify:album:a1",
            "images": [{"url": "cover.jpg"}],
            "release_date": "2020-01-01",
            "total_tracks": 2,
            "artists": [{"name": "Lead"}],
            "tracks": {"items": [
                {"id": "t1", "name": "One", "uri": "spotify:track:t1", "track_number": 1,
                 "artists": [{"name": "Lead"}]}
            ], "total": 2}
        }"#,
    )?;
    let tracks = album.tracks.clone().ok_or_else(|| anyhow::anyhow!("no tracks"))?;
    let trim = trim_album_track(&tracks.items[0], &album);

    assert_eq!(trim.album, "Record");
    let full = trim.image.full.ok_or_else(|| anyhow::anyhow!("no image"))?;
    assert_eq!(full.url, "cover.jpg");
    Ok(())
}

#[test]
fn playlist_trim_uses_owner_as_subtitle() -> anyhow::Result<()> {
    let playlist: Playlist = serde_json::from_str(
        r#"{
            "id": "p1",
            "name": "Party",
            "uri": "spotify:playlist:p1",
            "images": [{"url": "p.jpg"}],
            "owner": {"display_name": "Host"},
            "tracks": {"items": [], "total": 42}
        }"#,
    )?;
    let trim = trim_playlist(&playlist);
    assert_eq!(trim.owner, "Host");
    assert_eq!(trim.total, 42);
    assert_eq!(trim.normalised.subtitle, "Host");
    Ok(())
}

#[test]
fn episode_trim_uses_show_name() -> anyhow::Result<()> {
    let episode: Episode = serde_json::from_str(
        r#"{
            "id": "e1",
            "name": "Pilot",
            "uri": "spotify:episode:e1",
            "release_date": "2021-06-01",
            "show": {"name": "The Show", "publisher": "Someone"}
        }"#,
    )?;
    let trim = trim_episode(&episode);
    assert_eq!(trim.show, "The Show");
    assert_eq!(trim.release, "2021-06-01");
    Ok(())
}

#[test]
fn uri_parsing() -> anyhow::Result<()> {
    assert_eq!(parse_uri("spotify:album:abc123"), Some(("album", "abc123")));
    assert_eq!(parse_uri("spotify:playlist:p1"), Some(("playlist", "p1")));
    assert_eq!(parse_uri("spotify:album:"), None);
    assert_eq!(parse_uri("http://open.spotify.com/album/abc"), None);
    assert_eq!(parse_uri("spotify:album:abc:extra"), None);
    Ok(())
}
