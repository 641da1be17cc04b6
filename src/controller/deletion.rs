//! Selection and batched deletion (unfollow) of playlists

use crate::model::{NoticeLevel, UnfollowFailure, UnfollowResponse};
use super::AppController;

pub const NO_SELECTION_MESSAGE: &str = "No playlists selected for deletion.";

/// What the backend reported for one batched unfollow
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum DeletionOutcome {
    Complete { deleted: usize },
    Partial { deleted: usize, failed: Vec<UnfollowFailure> },
    Failed { requested: usize, reason: String },
}

impl DeletionOutcome {
    pub fn from_response(requested: usize, response: &UnfollowResponse) -> Self {
        if response.success && response.errors.is_empty() {
            return Self::Complete { deleted: requested };
        }

        let failed_count = response.errors.len().min(requested);
        if failed_count == 0 || failed_count == requested {
            let reason = response
                .errors
                .iter()
                .find_map(|f| f.error.clone())
                .or_else(|| response.message.clone())
                .unwrap_or_else(|| "unknown error".to_string());
            return Self::Failed { requested, reason };
        }

        Self::Partial {
            deleted: requested - failed_count,
            failed: response.errors.clone(),
        }
    }

    pub fn notice(&self) -> (NoticeLevel, String) {
        match self {
            Self::Complete { deleted } => (
                NoticeLevel::Success,
                format!("Deleted {} playlist(s).", deleted),
            ),
            Self::Partial { deleted, failed } => {
                let ids = failed
                    .iter()
                    .map(|f| f.playlist_id.as_str())
                    .collect::<Vec<_>>()
                    .join(", ");
                (
                    NoticeLevel::Warning,
                    format!(
                        "Deleted {} of {} playlist(s); {} failed: {}",
                        deleted,
                        deleted + failed.len(),
                        failed.len(),
                        ids
                    ),
                )
            }
            Self::Failed { requested, reason } => (
                NoticeLevel::Error,
                format!("Failed to delete {} playlist(s): {}", requested, reason),
            ),
        }
    }
}

impl AppController {
    /// Ask for confirmation of deleting the checked rows, or tell the user
    /// nothing is checked. Never touches the network.
    pub async fn request_delete_selected(&self) {
        let model = self.model.lock().await;
        let playlist_ids = model.get_selected_playlist_ids().await;

        if playlist_ids.is_empty() {
            model.push_notice(NoticeLevel::Warning, NO_SELECTION_MESSAGE).await;
            return;
        }

        tracing::debug!(count = playlist_ids.len(), "Asking for delete confirmation");
        model.open_delete_confirmation(playlist_ids).await;
    }

    /// Answer the open confirmation. Only `true` sends the unfollow request.
    pub async fn resolve_delete_confirmation(&self, confirmed: bool) {
        let pending = self.model.lock().await.take_pending_deletion().await;
        let Some(pending) = pending else {
            return;
        };

        if !confirmed {
            tracing::info!(count = pending.playlist_ids.len(), "Deletion cancelled");
            return;
        }

        self.delete_playlists(pending.playlist_ids).await;
    }

    async fn delete_playlists(&self, playlist_ids: Vec<String>) {
        let Some(backend) = self.backend().await else {
            return;
        };

        match backend.unfollow_playlists(&playlist_ids).await {
            Ok(response) => {
                let outcome = DeletionOutcome::from_response(playlist_ids.len(), &response);
                tracing::info!(?outcome, "Unfollow finished");
                let (level, message) = outcome.notice();
                self.model.lock().await.push_notice(level, message).await;

                // The backend is the source of truth, whatever happened
                self.load_playlists().await;
            }
            Err(e) => self.report_failure("Error deleting playlists", &e).await,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn failure(id: &str) -> UnfollowFailure {
        UnfollowFailure {
            playlist_id: id.to_string(),
            error: Some("403 Client Error".to_string()),
        }
    }

    #[test]
    fn success_is_complete() {
        let response = UnfollowResponse {
            success: true,
            errors: vec![],
            message: None,
        };
        assert_eq!(
            DeletionOutcome::from_response(3, &response),
            DeletionOutcome::Complete { deleted: 3 }
        );
    }

    #[test]
    fn subset_failure_is_partial() {
        let response = UnfollowResponse {
            success: false,
            errors: vec![failure("b")],
            message: None,
        };
        let outcome = DeletionOutcome::from_response(3, &response);
        assert_eq!(
            outcome,
            DeletionOutcome::Partial {
                deleted: 2,
                failed: vec![failure("b")]
            }
        );
        let (level, message) = outcome.notice();
        assert_eq!(level, NoticeLevel::Warning);
        assert_eq!(message, "Deleted 2 of 3 playlist(s); 1 failed: b");
    }

    #[test]
    fn every_id_failing_is_total_failure() {
        let response = UnfollowResponse {
            success: false,
            errors: vec![failure("a"), failure("b")],
            message: None,
        };
        let outcome = DeletionOutcome::from_response(2, &response);
        assert!(matches!(outcome, DeletionOutcome::Failed { requested: 2, .. }));
        assert_eq!(outcome.notice().0, NoticeLevel::Error);
    }

    #[test]
    fn unsuccessful_without_errors_uses_message() {
        let response = UnfollowResponse {
            success: false,
            errors: vec![],
            message: Some("No playlists provided".into()),
        };
        assert_eq!(
            DeletionOutcome::from_response(1, &response),
            DeletionOutcome::Failed {
                requested: 1,
                reason: "No playlists provided".into()
            }
        );
    }
}
