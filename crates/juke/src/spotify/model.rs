// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

//! Provider JSON shapes and the flatter "trim" projections served to the
//! party frontend.
//!
//! Provider structs deserialize only the fields the projections need;
//! everything else is ignored. Every trim carries a `normalised` block so
//! the frontend can render mixed item lists with one component.

use serde::{Deserialize, Serialize};

// -- Provider shapes ----------------------------------------------------------

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Image {
    pub url: String,
    #[serde(default)]
    pub width: Option<u32>,
    #[serde(default)]
    pub height: Option<u32>,
}

#[derive(Debug, Clone, Deserialize)]
pub struct ArtistRef {
    #[serde(default)]
    pub name: String,
}

#[derive(Debug, Clone, Deserialize)]
pub struct AlbumRef {
    #[serde(default)]
    pub name: String,
    #[serde(default)]
    pub images: Vec<Image>,
}

#[derive(Debug, Clone, Default, Deserialize)]
pub struct Track {
    #[serde(default)]
    pub id: String,
    #[serde(default)]
    pub name: String,
    #[serde(default)]
    pub uri: String,
    #[serde(default)]
    pub track_number: u32,
    #[serde(default)]
    pub duration_ms: u64,
    #[serde(default)]
    pub artists: Vec<ArtistRef>,
    #[serde(default)]
    pub album: Option<AlbumRef>,
}

#[derive(Debug, Clone, Default, Deserialize)]
pub struct Artist {
    #[serde(default)]
    pub id: String,
    #[serde(default)]
    pub name: String,
    #[serde(default)]
    pub uri: String,
    #[serde(default)]
    pub images: Vec<Image>,
}

#[derive(Debug, Clone, Deserialize)]
pub struct Page<T> {
    #[serde(default)]
    pub items: Vec<T>,
    #[serde(default)]
    pub total: u32,
}

impl<T> Default for Page<T> {
    fn default() -> Self {
        Self { items: Vec::new(), total: 0 }
    }
}

#[derive(Debug, Clone, Default, Deserialize)]
pub struct Album {
    #[serde(default)]
    pub id: String,
    #[serde(default)]
    pub name: String,
    #[serde(default)]
    pub uri: String,
    #[serde(default)]
    pub images: Vec<Image>,
    #[serde(default)]
    pub release_date: String,
    #[serde(default)]
    pub total_tracks: u32,
    #[serde(default)]
    pub artists: Vec<ArtistRef>,
    /// Present on full album objects, absent on simplified ones.
    #[serde(default)]
    pub tracks: Option<Page<Track>>,
}

#[derive(Debug, Clone, Default, Deserialize)]
pub struct Owner {
    #[serde(default)]
    pub display_name: String,
}

#[derive(Debug, Clone, Deserialize)]
pub struct Playlist {
    #[serde(default)]
    pub id: String,
    #[serde(default)]
    pub name: String,
    #[serde(default)]
    pub uri: String,
    #[serde(default)]
    pub images: Vec<Image>,
    #[serde(default)]
    pub owner: Owner,
    #[serde(default)]
    pub tracks: Page<serde_json::Value>,
}

#[derive(Debug, Clone, Default, Deserialize)]
pub struct ShowRef {
    #[serde(default)]
    pub name: String,
    #[serde(default)]
    pub publisher: String,
}

#[derive(Debug, Clone, Deserialize)]
pub struct Episode {
    #[serde(default)]
    pub id: String,
    #[serde(default)]
    pub name: String,
    #[serde(default)]
    pub uri: String,
    #[serde(default)]
    pub images: Vec<Image>,
    #[serde(default)]
    pub release_date: String,
    #[serde(default)]
    pub duration_ms: u64,
    #[serde(default)]
    pub show: Option<ShowRef>,
}

#[derive(Debug, Clone, Deserialize)]
pub struct Show {
    #[serde(default)]
    pub id: String,
    #[serde(default)]
    pub name: String,
    #[serde(default)]
    pub uri: String,
    #[serde(default)]
    pub images: Vec<Image>,
    #[serde(default)]
    pub publisher: String,
}

// -- Projections --------------------------------------------------------------

/// Full-size and thumbnail image picks: the provider orders images largest
/// first, so full is the head and low is the tail.
#[derive(Debug, Clone, Default, Serialize)]
pub struct ImagePair {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub full: Option<Image>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub low: Option<Image>,
}

impl ImagePair {
    pub fn pick(images: &[Image]) -> Self {
        Self { full: images.first().cloned(), low: images.last().cloned() }
    }
}

/// Common projection rendered by generic item lists.
#[derive(Debug, Clone, Serialize)]
pub struct Normalised {
    pub id: String,
    pub title: String,
    pub subtitle: String,
    pub uri: String,
    pub image: ImagePair,
}

#[derive(Debug, Clone, Serialize)]
pub struct TrackTrim {
    pub id: String,
    pub normalised: Normalised,
    pub title: String,
    pub album: String,
    pub artist: String,
    pub artists: Vec<String>,
    pub number: u32,
    pub uri: String,
    pub image: ImagePair,
}

#[derive(Debug, Clone, Serialize)]
pub struct PlaylistTrim {
    pub id: String,
    pub normalised: Normalised,
    pub title: String,
    pub owner: String,
    pub total: u32,
    pub uri: String,
    pub image: ImagePair,
}

#[derive(Debug, Clone, Serialize)]
pub struct ArtistTrim {
    pub id: String,
    pub normalised: Normalised,
    pub title: String,
    pub uri: String,
    pub image: ImagePair,
}

#[derive(Debug, Clone, Serialize)]
pub struct AlbumTrim {
    pub id: String,
    pub normalised: Normalised,
    pub title: String,
    pub release: String,
    pub total: u32,
    pub uri: String,
    pub image: ImagePair,
}

#[derive(Debug, Clone, Serialize)]
pub struct EpisodeTrim {
    pub id: String,
    pub normalised: Normalised,
    pub title: String,
    pub show: String,
    pub release: String,
    pub uri: String,
    pub image: ImagePair,
}

#[derive(Debug, Clone, Serialize)]
pub struct ShowTrim {
    pub id: String,
    pub normalised: Normalised,
    pub title: String,
    pub uri: String,
    pub image: ImagePair,
}

fn first_artist(artists: &[ArtistRef]) -> String {
    artists.first().map(|a| a.name.clone()).unwrap_or_default()
}

pub fn trim_track(track: &Track) -> TrackTrim {
    let album_images = track.album.as_ref().map(|a| a.images.as_slice()).unwrap_or_default();
    let image = ImagePair::pick(album_images);
    let artist = first_artist(&track.artists);
    TrackTrim {
        id: track.id.clone(),
        normalised: Normalised {
            id: track.id.clone(),
            title: track.name.clone(),
            subtitle: artist.clone(),
            uri: track.uri.clone(),
            image: image.clone(),
        },
        title: track.name.clone(),
        album: track.album.as_ref().map(|a| a.name.clone()).unwrap_or_default(),
        artist,
        artists: track.artists.iter().map(|a| a.name.clone()).collect(),
        number: track.track_number,
        uri: track.uri.clone(),
        image,
    }
}

/// Trim a simplified album track, attaching the album it came from (album
/// track listings omit the album object on each item).
pub fn trim_album_track(track: &Track, album: &Album) -> TrackTrim {
    let attached = Track {
        album: Some(AlbumRef { name: album.name.clone(), images: album.images.clone() }),
        ..track.clone()
    };
    trim_track(&attached)
}

pub fn trim_playlist(playlist: &Playlist) -> PlaylistTrim {
    let image = ImagePair::pick(&playlist.images);
    PlaylistTrim {
        id: playlist.id.clone(),
        normalised: Normalised {
            id: playlist.id.clone(),
            title: playlist.name.clone(),
            subtitle: playlist.owner.display_name.clone(),
            uri: playlist.uri.clone(),
            image: image.clone(),
        },
        title: playlist.name.clone(),
        owner: playlist.owner.display_name.clone(),
        total: playlist.tracks.total,
        uri: playlist.uri.clone(),
        image,
    }
}

pub fn trim_artist(artist: &Artist) -> ArtistTrim {
    let image = ImagePair::pick(&artist.images);
    ArtistTrim {
        id: artist.id.clone(),
        normalised: Normalised {
            id: artist.id.clone(),
            title: artist.name.clone(),
            subtitle: String::new(),
            uri: artist.uri.clone(),
            image: image.clone(),
        },
        title: artist.name.clone(),
        uri: artist.uri.clone(),
        image,
    }
}

pub fn trim_album(album: &Album) -> AlbumTrim {
    let image = ImagePair::pick(&album.images);
    AlbumTrim {
        id: album.id.clone(),
        normalised: Normalised {
            id: album.id.clone(),
            title: album.name.clone(),
            subtitle: first_artist(&album.artists),
            uri: album.uri.clone(),
            image: image.clone(),
        },
        title: album.name.clone(),
        release: album.release_date.clone(),
        total: album.total_tracks,
        uri: album.uri.clone(),
        image,
    }
}

pub fn trim_episode(episode: &Episode) -> EpisodeTrim {
    let image = ImagePair::pick(&episode.images);
    let show = episode.show.as_ref().map(|s| s.name.clone()).unwrap_or_default();
    EpisodeTrim {
        id: episode.id.clone(),
        normalised: Normalised {
            id: episode.id.clone(),
            title: episode.name.clone(),
            subtitle: show.clone(),
            uri: episode.uri.clone(),
            image: image.clone(),
        },
        title: episode.name.clone(),
        show,
        release: episode.release_date.clone(),
        uri: episode.uri.clone(),
        image,
    }
}

pub fn trim_show(show: &Show) -> ShowTrim {
    let image = ImagePair::pick(&show.images);
    ShowTrim {
        id: show.id.clone(),
        normalised: Normalised {
            id: show.id.clone(),
            title: show.name.clone(),
            subtitle: show.publisher.clone(),
            uri: show.uri.clone(),
            image: image.clone(),
        },
        title: show.name.clone(),
        uri: show.uri.clone(),
        image,
    }
}

/// Split a `spotify:{type}:{id}` URI into its type and id.
pub fn parse_uri(uri: &str) -> Option<(&str, &str)> {
    let mut parts = uri.split(':');
    if parts.next()? != "spotify" {
        return None;
    }
    let kind = parts.next()?;
    let id = parts.next()?;
    if parts.next().is_some() || kind.is_empty() || id.is_empty() {
        return None;
    }
    Some((kind, id))
}

#[cfg(test)]
#[path = "model_tests.rs"]
mod tests;
