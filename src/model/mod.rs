//! Model module - Application state and data types
//!
//! - `types`: view mode, notices, modals and UI state
//! - `content`: backend payloads plus the rows and detail data derived from them
//! - `backend_client`: the `PlaylistBackend` trait and its HTTP implementation
//! - `app_model`: main application model with state management methods

mod types;
mod content;
mod backend_client;
mod app_model;

pub use types::{
    CreateForm, FormField, Notice, NoticeLevel, PendingDeletion, UiState, ViewMode,
    NOTICE_TTL, PROGRESS_MESSAGE,
};

pub use content::{
    ContentState, CreatePlaylistResponse, NamedRef, NewPlaylist, Owner, Playlist, PlaylistDetailView,
    PlaylistEntry, PlaylistRow, Song, SongRow, Total, UnfollowFailure, UnfollowResponse,
    Visibility, DEFAULT_COVER_IMAGE, DEFAULT_OWNER, DEFAULT_TITLE,
};

pub use backend_client::{HttpBackend, PlaylistBackend};

pub use app_model::AppModel;
