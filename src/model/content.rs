//! Backend payloads and the rows/detail data the view renders from them.

use std::collections::HashSet;

use serde::{Deserialize, Serialize};

use super::types::ViewMode;
use crate::view::format_duration;

pub const DEFAULT_TITLE: &str = "No Title";
pub const DEFAULT_OWNER: &str = "Unknown";
pub const DEFAULT_COVER_IMAGE: &str = "/static/default_playlist_cover.png";

#[derive(Clone, Debug, Default, Deserialize)]
pub struct Total {
    #[serde(default)]
    pub total: Option<u64>,
}

#[derive(Clone, Debug, Default, Deserialize)]
pub struct Owner {
    #[serde(default)]
    pub display_name: Option<String>,
}

/// A playlist as returned by `/refresh-playlists` and `/get-playlist-details`.
///
/// Everything but the id is optional on the wire.
#[derive(Clone, Debug, Deserialize)]
pub struct Playlist {
    pub id: String,
    #[serde(default)]
    pub name: Option<String>,
    #[serde(default)]
    pub tracks: Option<Total>,
    #[serde(default)]
    pub owner: Option<Owner>,
    #[serde(default)]
    pub public: Option<bool>,
    #[serde(default)]
    pub cover_image_url: Option<String>,
    #[serde(default)]
    pub followers: Option<Total>,
}

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Visibility {
    Public,
    Private,
}

impl Visibility {
    pub fn label(self) -> &'static str {
        match self {
            Self::Public => "Public",
            Self::Private => "Private",
        }
    }
}

impl Playlist {
    pub fn title(&self) -> &str {
        self.name
            .as_deref()
            .filter(|n| !n.is_empty())
            .unwrap_or(DEFAULT_TITLE)
    }

    pub fn owner_name(&self) -> &str {
        self.owner
            .as_ref()
            .and_then(|o| o.display_name.as_deref())
            .filter(|n| !n.is_empty())
            .unwrap_or(DEFAULT_OWNER)
    }

    pub fn track_total(&self) -> u64 {
        self.tracks.as_ref().and_then(|t| t.total).unwrap_or(0)
    }

    pub fn follower_total(&self) -> u64 {
        self.followers.as_ref().and_then(|f| f.total).unwrap_or(0)
    }

    /// `public: null` (collaborative playlists) counts as private.
    pub fn visibility(&self) -> Visibility {
        if self.public.unwrap_or(false) {
            Visibility::Public
        } else {
            Visibility::Private
        }
    }

    pub fn cover_image(&self) -> &str {
        self.cover_image_url
            .as_deref()
            .filter(|u| !u.is_empty())
            .unwrap_or(DEFAULT_COVER_IMAGE)
    }
}

#[derive(Clone, Debug, Default, Deserialize)]
pub struct NamedRef {
    #[serde(default)]
    pub name: Option<String>,
}

#[derive(Clone, Debug, Default, Deserialize)]
pub struct Song {
    #[serde(default)]
    pub name: Option<String>,
    #[serde(default)]
    pub artists: Vec<NamedRef>,
    #[serde(default)]
    pub album: Option<NamedRef>,
    #[serde(default)]
    pub duration_ms: Option<u64>,
}

/// One item of `/get-playlist-songs`. `track` is null for removed tracks.
#[derive(Clone, Debug, Default, Deserialize)]
pub struct PlaylistEntry {
    #[serde(default)]
    pub track: Option<Song>,
}

/// Body of `/unfollow-playlists`
#[derive(Clone, Debug, Serialize)]
pub struct UnfollowRequest<'a> {
    #[serde(rename = "playlistIds")]
    pub playlist_ids: &'a [String],
}

#[derive(Clone, Debug, Deserialize, PartialEq, Eq)]
pub struct UnfollowFailure {
    pub playlist_id: String,
    #[serde(default)]
    pub error: Option<String>,
}

#[derive(Clone, Debug, Deserialize)]
pub struct UnfollowResponse {
    pub success: bool,
    #[serde(default)]
    pub errors: Vec<UnfollowFailure>,
    #[serde(default)]
    pub message: Option<String>,
}

#[derive(Clone, Debug, Default, Deserialize)]
pub struct CreatePlaylistResponse {
    #[serde(default)]
    pub redirect: bool,
    #[serde(default)]
    pub redirect_url: Option<String>,
    #[serde(default)]
    pub error: Option<String>,
}

/// Fields submitted to `/create-playlist`
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct NewPlaylist {
    pub title: String,
    pub description: String,
    pub songs: String,
    pub private: bool,
}

/// A rendered row of the playlist list
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct PlaylistRow {
    pub id: String,
    pub title: String,
    pub tracks: String,
    pub owner: String,
    pub visibility: Visibility,
}

impl From<&Playlist> for PlaylistRow {
    fn from(playlist: &Playlist) -> Self {
        Self {
            id: playlist.id.clone(),
            title: playlist.title().to_string(),
            tracks: format!("{} tracks", playlist.track_total()),
            owner: playlist.owner_name().to_string(),
            visibility: playlist.visibility(),
        }
    }
}

#[derive(Clone, Debug, PartialEq, Eq)]
pub struct SongRow {
    pub title: String,
    pub artists: String,
    pub album: String,
    pub duration: String,
}

impl From<&Song> for SongRow {
    fn from(song: &Song) -> Self {
        let artists = song
            .artists
            .iter()
            .filter_map(|a| a.name.as_deref())
            .collect::<Vec<_>>()
            .join(", ");

        Self {
            title: song.name.clone().unwrap_or_default(),
            artists,
            album: song
                .album
                .as_ref()
                .and_then(|a| a.name.clone())
                .unwrap_or_default(),
            duration: format_duration(song.duration_ms.unwrap_or(0)),
        }
    }
}

/// Everything the detail screen shows, with defaults already applied
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct PlaylistDetailView {
    pub id: String,
    pub title: String,
    pub creator: String,
    pub playlist_type: String,
    pub tracks: String,
    pub followers: String,
    pub cover_image: String,
    pub songs: Vec<SongRow>,
}

impl PlaylistDetailView {
    pub fn build(detail: &Playlist, entries: &[PlaylistEntry]) -> Self {
        Self {
            id: detail.id.clone(),
            title: detail.title().to_string(),
            creator: format!("Created by: {}", detail.owner_name()),
            playlist_type: format!("Playlist Type: {}", detail.visibility().label()),
            tracks: format!("Tracks: {}", detail.track_total()),
            followers: format!("Followers: {}", detail.follower_total()),
            cover_image: detail.cover_image().to_string(),
            songs: entries
                .iter()
                .filter_map(|e| e.track.as_ref())
                .map(SongRow::from)
                .collect(),
        }
    }
}

/// State for the main content area
#[derive(Clone, Debug, Default)]
pub struct ContentState {
    pub mode: ViewMode,
    pub playlists: Vec<PlaylistRow>,
    pub cursor: usize,
    pub selected: HashSet<String>,
    pub select_all: bool,
    pub detail: Option<PlaylistDetailView>,
    pub song_cursor: usize,
    pub is_loading: bool,
}

impl ContentState {
    pub fn is_selected(&self, id: &str) -> bool {
        self.selected.contains(id)
    }

    /// Selected ids in the order the rows are displayed
    pub fn selected_ids(&self) -> Vec<String> {
        self.playlists
            .iter()
            .filter(|row| self.selected.contains(&row.id))
            .map(|row| row.id.clone())
            .collect()
    }

    /// Refresh, delete, new and select-all only exist on the list screen.
    pub fn list_controls_visible(&self) -> bool {
        self.mode == ViewMode::List
    }

    pub fn cursor_row(&self) -> Option<&PlaylistRow> {
        self.playlists.get(self.cursor)
    }
}
