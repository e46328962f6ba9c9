// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

//! Feature operations over the provider client: now-playing info, queue,
//! playback transport, search, and catalogue lookups, reshaped into the
//! trim projections and memoized where the data rarely changes.

use serde::Deserialize;
use serde_json::{json, Value};

use crate::memo::{Memo, DEFAULT_TTL};
use crate::spotify::client::SpotifyClient;
use crate::spotify::model::{
    self, Album, Artist, Episode, Page, Playlist, Show, Track,
};

fn required(value: Option<Value>) -> anyhow::Result<Value> {
    value.ok_or_else(|| anyhow::anyhow!("empty response from provider"))
}

#[derive(Debug, Default, Deserialize)]
struct PlayContext {
    #[serde(default)]
    uri: String,
}

#[derive(Debug, Deserialize)]
struct PlaybackState {
    #[serde(default)]
    is_playing: bool,
    #[serde(default)]
    progress_ms: u64,
    #[serde(default)]
    currently_playing_type: String,
    #[serde(default)]
    context: Option<PlayContext>,
    #[serde(default)]
    item: Option<Value>,
}

#[derive(Debug, Deserialize)]
struct QueueResponse {
    #[serde(default)]
    currently_playing: Option<Value>,
    #[serde(default)]
    queue: Vec<Value>,
}

#[derive(Debug, Default, Deserialize)]
struct SearchResponse {
    #[serde(default)]
    albums: Page<Album>,
    #[serde(default)]
    artists: Page<Artist>,
    #[serde(default)]
    tracks: Page<Track>,
}

/// Trim a queue/now-playing item, dispatching on the provider `type` tag.
fn trim_item(item: &Value) -> anyhow::Result<Value> {
    let kind = item.get("type").and_then(|t| t.as_str()).unwrap_or("track");
    if kind == "episode" {
        let episode: Episode = serde_json::from_value(item.clone())?;
        Ok(serde_json::to_value(model::trim_episode(&episode))?)
    } else {
        let track: Track = serde_json::from_value(item.clone())?;
        Ok(serde_json::to_value(model::trim_track(&track))?)
    }
}

/// Now-playing snapshot: trimmed item, resolved context, and player
/// progress. `{"noTrack": true}` when nothing is playing.
pub async fn info(client: &SpotifyClient, memo: &Memo, market: &str) -> anyhow::Result<Value> {
    let Some(playing) = client.currently_playing(market).await? else {
        return Ok(json!({ "noTrack": true }));
    };

    let state: PlaybackState = serde_json::from_value(playing)?;
    let Some(item) = state.item else {
        return Ok(json!({ "noTrack": true }));
    };

    let duration_ms = item.get("duration_ms").and_then(|d| d.as_u64()).unwrap_or(0);
    let track = if state.currently_playing_type == "episode" {
        let episode: Episode = serde_json::from_value(item)?;
        serde_json::to_value(model::trim_episode(&episode))?
    } else {
        let parsed: Track = serde_json::from_value(item)?;
        serde_json::to_value(model::trim_track(&parsed))?
    };

    // Context lookups can fail independently of the playing track (private
    // playlists, local files); degrade to an empty context.
    let context = match &state.context {
        Some(ctx) if !ctx.uri.is_empty() => {
            context(client, memo, &ctx.uri).await.unwrap_or_else(|e| {
                tracing::debug!(err = %e, "context lookup failed");
                json!({})
            })
        }
        _ => json!({}),
    };

    Ok(json!({
        "isPlaying": state.is_playing,
        "track": track,
        "context": context,
        "player": {
            "current": state.progress_ms,
            "duration": duration_ms,
        },
    }))
}

/// Resolve the playback context (playlist/artist/album/show) behind a
/// `spotify:{type}:{id}` URI into its trim, tagged with the type.
pub async fn context(client: &SpotifyClient, memo: &Memo, uri: &str) -> anyhow::Result<Value> {
    let Some((kind, id)) = model::parse_uri(uri) else {
        return Ok(json!({}));
    };
    let kind = kind.to_owned();
    let id = id.to_owned();

    memo.use_cached(uri, DEFAULT_TTL, move || async move {
        let mut trimmed = match kind.as_str() {
            "playlist" => {
                let playlist: Playlist =
                    serde_json::from_value(required(client.playlist(&id).await?)?)?;
                serde_json::to_value(model::trim_playlist(&playlist))?
            }
            "artist" => {
                let artist: Artist =
                    serde_json::from_value(required(client.artist(&id).await?)?)?;
                serde_json::to_value(model::trim_artist(&artist))?
            }
            "album" => {
                let album: Album =
                    serde_json::from_value(required(client.album(&id).await?)?)?;
                serde_json::to_value(model::trim_album(&album))?
            }
            "show" => {
                let show: Show = serde_json::from_value(required(client.show(&id).await?)?)?;
                serde_json::to_value(model::trim_show(&show))?
            }
            _ => return Ok(json!({})),
        };
        if let Some(obj) = trimmed.as_object_mut() {
            obj.insert("type".to_owned(), json!(kind));
        }
        Ok(trimmed)
    })
    .await
}

/// An artist's top tracks.
pub async fn artist_top_tracks(
    client: &SpotifyClient,
    memo: &Memo,
    id: &str,
    market: &str,
) -> anyhow::Result<Value> {
    let key = Memo::key(&["artist", "tracks", id]);
    let results = memo
        .use_cached(&key, DEFAULT_TTL, move || async move {
            required(client.artist_top_tracks(id, market).await?)
        })
        .await?;

    #[derive(Deserialize)]
    struct TopTracks {
        #[serde(default)]
        tracks: Vec<Track>,
    }
    let top: TopTracks = serde_json::from_value(results)?;
    let tracks: Vec<Value> = top
        .tracks
        .iter()
        .map(|t| serde_json::to_value(model::trim_track(t)))
        .collect::<Result<_, _>>()?;
    Ok(json!({ "tracks": tracks }))
}

/// An album's track listing, each track carrying the album it came from.
pub async fn album(client: &SpotifyClient, memo: &Memo, id: &str) -> anyhow::Result<Value> {
    let key = Memo::key(&["album", id]);
    let raw = memo
        .use_cached(&key, DEFAULT_TTL, move || async move { required(client.album(id).await?) })
        .await?;

    let album: Album = serde_json::from_value(raw)?;
    let items = album.tracks.as_ref().map(|page| page.items.as_slice()).unwrap_or_default();
    let tracks: Vec<Value> = items
        .iter()
        .map(|t| serde_json::to_value(model::trim_album_track(t, &album)))
        .collect::<Result<_, _>>()?;
    Ok(json!({ "tracks": tracks }))
}

/// A single track, shaped like a one-item result list.
pub async fn track(client: &SpotifyClient, memo: &Memo, id: &str) -> anyhow::Result<Value> {
    let key = Memo::key(&["track", id]);
    let raw = memo
        .use_cached(&key, DEFAULT_TTL, move || async move { required(client.track(id).await?) })
        .await?;

    let parsed: Track = serde_json::from_value(raw)?;
    Ok(json!({ "tracks": [serde_json::to_value(model::trim_track(&parsed))?] }))
}

/// Free-text search across tracks, artists, and albums.
pub async fn search(
    client: &SpotifyClient,
    memo: &Memo,
    q: &str,
    market: &str,
    limit: u32,
) -> anyhow::Result<Value> {
    let key = Memo::key(&["search", q]);
    let raw = memo
        .use_cached(&key, DEFAULT_TTL, move || async move {
            required(client.search(q, market, limit).await?)
        })
        .await?;

    let results: SearchResponse = serde_json::from_value(raw)?;
    let albums: Vec<Value> = results
        .albums
        .items
        .iter()
        .map(|a| serde_json::to_value(model::trim_album(a)))
        .collect::<Result<_, _>>()?;
    let artists: Vec<Value> = results
        .artists
        .items
        .iter()
        .map(|a| serde_json::to_value(model::trim_artist(a)))
        .collect::<Result<_, _>>()?;
    let tracks: Vec<Value> = results
        .tracks
        .items
        .iter()
        .map(|t| serde_json::to_value(model::trim_track(t)))
        .collect::<Result<_, _>>()?;

    Ok(json!({ "albums": albums, "artists": artists, "tracks": tracks }))
}

/// The user's queue: currently playing item first, then pending items.
pub async fn queue(client: &SpotifyClient) -> anyhow::Result<Value> {
    let Some(raw) = client.queue().await? else {
        return Ok(json!({ "noQueue": true }));
    };

    let parsed: QueueResponse = serde_json::from_value(raw)?;
    let mut items = Vec::new();
    for item in parsed.currently_playing.iter().chain(parsed.queue.iter()) {
        if item.is_null() {
            continue;
        }
        items.push(trim_item(item)?);
    }
    Ok(json!({ "items": items }))
}

/// Add a track to the queue unless it is already queued.
pub async fn queue_add(client: &SpotifyClient, uri: &str) -> anyhow::Result<bool> {
    if let Some(raw) = client.queue().await? {
        let parsed: QueueResponse = serde_json::from_value(raw)?;
        let already_queued = parsed
            .queue
            .iter()
            .any(|item| item.get("uri").and_then(|u| u.as_str()) == Some(uri));
        if already_queued {
            return Ok(false);
        }
    }

    client.queue_add(uri).await?;
    Ok(true)
}

pub async fn play(client: &SpotifyClient) -> anyhow::Result<Value> {
    client.play().await?;
    Ok(json!({ "success": true }))
}

pub async fn pause(client: &SpotifyClient) -> anyhow::Result<Value> {
    client.pause().await?;
    Ok(json!({ "success": true }))
}

pub async fn forward(client: &SpotifyClient) -> anyhow::Result<Value> {
    client.next().await?;
    Ok(json!({ "success": true }))
}

pub async fn back(client: &SpotifyClient) -> anyhow::Result<Value> {
    client.previous().await?;
    Ok(json!({ "success": true }))
}
