//! Controller module - Application logic and event handling
//!
//! All state changes go through `AppController`. It is organized into
//! submodules by responsibility:
//!
//! - `input`: Key event handling
//! - `navigation`: Loading the list, opening a playlist, going back
//! - `deletion`: Row selection and batched unfollow
//! - `creation`: The "new playlist" form and its submission

mod input;
mod navigation;
mod deletion;
mod creation;

use std::sync::Arc;
use tokio::sync::Mutex;

use crate::error::BackendError;
use crate::model::{AppModel, NoticeLevel, PlaylistBackend};

pub use deletion::{DeletionOutcome, NO_SELECTION_MESSAGE};

#[derive(Clone)]
pub struct AppController {
    pub(crate) model: Arc<Mutex<AppModel>>,
    initialized: Arc<Mutex<bool>>,
}

impl AppController {
    pub fn new(model: Arc<Mutex<AppModel>>) -> Self {
        Self {
            model,
            initialized: Arc::new(Mutex::new(false)),
        }
    }

    pub fn model(&self) -> Arc<Mutex<AppModel>> {
        self.model.clone()
    }

    /// One-time startup: loads the playlist list. Later calls do nothing and
    /// return `false`.
    pub async fn initialize(&self) -> bool {
        let mut initialized = self.initialized.lock().await;
        if *initialized {
            tracing::debug!("Controller already initialized");
            return false;
        }
        *initialized = true;
        drop(initialized);

        tracing::info!("Controller initialized");
        self.load_playlists().await;
        true
    }

    pub(crate) async fn backend(&self) -> Option<Arc<dyn PlaylistBackend>> {
        let backend = self.model.lock().await.get_backend().await;
        if backend.is_none() {
            tracing::warn!("No backend configured");
        }
        backend
    }

    /// Stop the loading indicator and queue an error notice.
    pub(crate) async fn report_failure(&self, context: &str, error: &BackendError) {
        let model = self.model.lock().await;
        model.set_content_loading(false).await;
        model
            .push_notice(NoticeLevel::Error, format!("{}: {}", context, Self::format_error(error)))
            .await;
    }

    pub(crate) fn format_error(error: &BackendError) -> String {
        match error.status() {
            Some(401) => format!(
                "{}. Log in through the web app and set OWLTUNE_SESSION.",
                error.to_string().trim_end_matches('.')
            ),
            _ => error.to_string(),
        }
    }
}
