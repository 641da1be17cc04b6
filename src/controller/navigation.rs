//! Navigation: loading the list, opening a playlist, going back

use crate::log_api_result;
use crate::model::PlaylistDetailView;
use super::AppController;

impl AppController {
    /// Fetch the playlist collection and replace the list. On failure the
    /// current list stays as it is.
    pub async fn load_playlists(&self) {
        let Some(backend) = self.backend().await else {
            return;
        };
        self.model.lock().await.set_content_loading(true).await;

        let result = backend.fetch_playlists().await;
        log_api_result!("refresh-playlists", result);

        match result {
            Ok(playlists) => {
                let model = self.model.lock().await;
                model.set_playlists(&playlists).await;
            }
            Err(e) => self.report_failure("Error fetching playlists", &e).await,
        }
    }

    /// Open a playlist: details first, then songs. The songs request is only
    /// made once the details request succeeded. Any failure leaves the list
    /// screen in place.
    pub async fn select_playlist(&self, playlist_id: &str) {
        tracing::debug!(playlist_id, "Playlist selected");
        let Some(backend) = self.backend().await else {
            return;
        };
        self.model.lock().await.set_content_loading(true).await;

        let detail = match backend.fetch_playlist_details(playlist_id).await {
            Ok(detail) => detail,
            Err(e) => {
                tracing::error!(playlist_id, error = %e, "Failed to fetch playlist details");
                self.report_failure("Error fetching playlist details", &e).await;
                return;
            }
        };

        let songs = match backend.fetch_playlist_songs(playlist_id).await {
            Ok(songs) => songs,
            Err(e) => {
                tracing::error!(playlist_id, error = %e, "Failed to fetch playlist songs");
                self.report_failure("Error fetching playlist songs", &e).await;
                return;
            }
        };

        tracing::info!(playlist_id, songs = songs.len(), "Playlist detail loaded");
        let view = PlaylistDetailView::build(&detail, &songs);
        let model = self.model.lock().await;
        model.show_playlist_detail(view).await;
    }

    pub async fn navigate_back(&self) {
        let model = self.model.lock().await;
        if model.navigate_back().await {
            tracing::debug!("Back to playlists");
        }
    }
}
