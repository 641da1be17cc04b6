//! "New playlist" form and submission

use crate::model::{NoticeLevel, ViewMode};
use super::AppController;

pub const CREATED_MESSAGE: &str = "Playlist created successfully";

impl AppController {
    pub async fn open_create_form(&self) {
        let model = self.model.lock().await;
        if model.view_mode().await == ViewMode::List {
            model.open_create_form().await;
        }
    }

    pub async fn close_create_form(&self) {
        let model = self.model.lock().await;
        if !model.close_create_form().await {
            tracing::debug!("Create form left open (submission in flight)");
        }
    }

    /// Submit the form. The form stays locked (no second submission, progress
    /// line shown) until the request finishes. On success the redirect is
    /// followed; on failure the form is unlocked with its contents intact.
    pub async fn submit_create_form(&self) {
        let Some(backend) = self.backend().await else {
            return;
        };

        let payload = self.model.lock().await.begin_submission().await;
        let Some(payload) = payload else {
            tracing::debug!("Create form not submittable");
            return;
        };

        tracing::info!(title = %payload.title, private = payload.private, "Creating playlist");
        let result = backend.create_playlist(&payload).await;

        let failure = match result {
            Ok(response) if response.redirect => {
                self.follow_redirect(response.redirect_url.as_deref()).await;
                return;
            }
            Ok(response) => response.error.unwrap_or_else(|| "Unknown error".to_string()),
            Err(e) => Self::format_error(&e),
        };

        let model = self.model.lock().await;
        if model.fail_submission().await {
            model
                .push_notice(NoticeLevel::Error, format!("Error creating playlist: {}", failure))
                .await;
        }
    }

    /// The backend only ever redirects to its playlists page, which here is
    /// the list screen with fresh data.
    async fn follow_redirect(&self, redirect_url: Option<&str>) {
        tracing::info!(redirect_url = ?redirect_url, "Playlist created, following redirect");
        {
            let model = self.model.lock().await;
            model.complete_submission().await;
            model.navigate_back().await;
            model.push_notice(NoticeLevel::Success, CREATED_MESSAGE).await;
        }
        self.load_playlists().await;
    }
}
