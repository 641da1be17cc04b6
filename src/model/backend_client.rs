//! OwlTune backend client: the `PlaylistBackend` seam and its HTTP implementation

use std::sync::Arc;
use std::time::Duration;

use async_trait::async_trait;
use reqwest::cookie::Jar;
use reqwest::multipart::Form;
use reqwest::{Client, Response, Url};
use serde::de::DeserializeOwned;

use crate::error::{BackendError, Result};
use super::content::{
    CreatePlaylistResponse, NewPlaylist, Playlist, PlaylistEntry, UnfollowRequest,
    UnfollowResponse,
};

/// Everything the controller needs from the backend.
#[async_trait]
pub trait PlaylistBackend: Send + Sync {
    /// `GET /refresh-playlists`
    async fn fetch_playlists(&self) -> Result<Vec<Playlist>>;

    /// `GET /get-playlist-details?playlist_id=`
    async fn fetch_playlist_details(&self, playlist_id: &str) -> Result<Playlist>;

    /// `GET /get-playlist-songs?playlist_id=`
    async fn fetch_playlist_songs(&self, playlist_id: &str) -> Result<Vec<PlaylistEntry>>;

    /// `POST /unfollow-playlists`, one batch for all ids.
    ///
    /// A 4xx that still carries an `{success, errors}` body is returned as `Ok`
    /// so the caller can tell partial failure from transport failure.
    async fn unfollow_playlists(&self, playlist_ids: &[String]) -> Result<UnfollowResponse>;

    /// `POST /create-playlist` as multipart form data
    async fn create_playlist(&self, playlist: &NewPlaylist) -> Result<CreatePlaylistResponse>;
}

/// reqwest-backed client. Carries the Flask session cookie across requests.
#[derive(Clone)]
pub struct HttpBackend {
    http: Client,
    base_url: Url,
}

impl HttpBackend {
    pub fn new(base_url: &str, session_cookie: Option<&str>, timeout: Duration) -> Result<Self> {
        let trimmed = base_url.trim().trim_end_matches('/');
        if trimmed.is_empty() {
            return Err(BackendError::InvalidUrl("URL cannot be empty".into()));
        }
        if !trimmed.starts_with("http://") && !trimmed.starts_with("https://") {
            return Err(BackendError::InvalidUrl(
                "URL must start with http:// or https://".into(),
            ));
        }
        let base_url = Url::parse(&format!("{trimmed}/"))
            .map_err(|e| BackendError::InvalidUrl(e.to_string()))?;

        let jar = Arc::new(Jar::default());
        if let Some(cookie) = session_cookie.filter(|c| !c.is_empty()) {
            jar.add_cookie_str(&format!("session={cookie}; Path=/"), &base_url);
            tracing::debug!("Session cookie installed");
        }

        let http = Client::builder()
            .cookie_provider(jar)
            .timeout(timeout)
            .connect_timeout(Duration::from_secs(10))
            .user_agent(format!("owltune/{}", env!("CARGO_PKG_VERSION")))
            .build()?;

        Ok(Self { http, base_url })
    }

    pub fn base_url(&self) -> &str {
        self.base_url.as_str().trim_end_matches('/')
    }

    fn endpoint(&self, path: &str) -> Result<Url> {
        self.base_url
            .join(path)
            .map_err(|e| BackendError::InvalidUrl(e.to_string()))
    }

    async fn read_json<T: DeserializeOwned>(response: Response) -> Result<T> {
        let status = response.status();
        let body = response.text().await?;

        if !status.is_success() {
            return Err(BackendError::from_response_body(status, &body));
        }

        serde_json::from_str(&body).map_err(|e| BackendError::Parse(e.to_string()))
    }
}

#[async_trait]
impl PlaylistBackend for HttpBackend {
    async fn fetch_playlists(&self) -> Result<Vec<Playlist>> {
        let url = self.endpoint("refresh-playlists")?;
        tracing::debug!(operation = "refresh-playlists", "API request started");

        let response = self.http.get(url).send().await?;
        let playlists: Vec<Playlist> = Self::read_json(response).await?;

        tracing::info!(count = playlists.len(), "Playlists fetched");
        Ok(playlists)
    }

    async fn fetch_playlist_details(&self, playlist_id: &str) -> Result<Playlist> {
        let url = self.endpoint("get-playlist-details")?;
        tracing::debug!(operation = "get-playlist-details", playlist_id, "API request started");

        let response = self
            .http
            .get(url)
            .query(&[("playlist_id", playlist_id)])
            .send()
            .await?;
        Self::read_json(response).await
    }

    async fn fetch_playlist_songs(&self, playlist_id: &str) -> Result<Vec<PlaylistEntry>> {
        let url = self.endpoint("get-playlist-songs")?;
        tracing::debug!(operation = "get-playlist-songs", playlist_id, "API request started");

        let response = self
            .http
            .get(url)
            .query(&[("playlist_id", playlist_id)])
            .send()
            .await?;
        Self::read_json(response).await
    }

    async fn unfollow_playlists(&self, playlist_ids: &[String]) -> Result<UnfollowResponse> {
        let url = self.endpoint("unfollow-playlists")?;
        tracing::debug!(
            operation = "unfollow-playlists",
            count = playlist_ids.len(),
            "API request started"
        );

        let response = self
            .http
            .post(url)
            .json(&UnfollowRequest { playlist_ids })
            .send()
            .await?;

        let status = response.status();
        let body = response.text().await?;

        if status.is_success() {
            return serde_json::from_str(&body).map_err(|e| BackendError::Parse(e.to_string()));
        }

        // Partial failures come back as 400 with the per-id errors attached
        match serde_json::from_str::<UnfollowResponse>(&body) {
            Ok(parsed) if status.is_client_error() && !parsed.errors.is_empty() => Ok(parsed),
            _ => Err(BackendError::from_response_body(status, &body)),
        }
    }

    async fn create_playlist(&self, playlist: &NewPlaylist) -> Result<CreatePlaylistResponse> {
        let url = self.endpoint("create-playlist")?;
        tracing::debug!(operation = "create-playlist", title = %playlist.title, "API request started");

        let mut form = Form::new()
            .text("title", playlist.title.clone())
            .text("description", playlist.description.clone())
            .text("songs", playlist.songs.clone());
        if playlist.private {
            form = form.text("private", "on");
        }

        let response = self.http.post(url).multipart(form).send().await?;
        Self::read_json(response).await
    }
}
