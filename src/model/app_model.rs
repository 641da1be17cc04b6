//! Main application model with state management

use std::sync::Arc;
use tokio::sync::Mutex;

use super::backend_client::PlaylistBackend;
use super::content::{ContentState, NewPlaylist, Playlist, PlaylistDetailView, PlaylistRow};
use super::types::{
    CreateForm, Notice, NoticeLevel, PendingDeletion, UiState, ViewMode, PROGRESS_MESSAGE,
};

/// Main application model containing all state.
///
/// Every screen change goes through these methods; the view only reads snapshots.
pub struct AppModel {
    pub backend: Option<Arc<dyn PlaylistBackend>>,
    pub ui_state: Arc<Mutex<UiState>>,
    pub content_state: Arc<Mutex<ContentState>>,
    pub should_quit: Arc<Mutex<bool>>,
}

impl AppModel {
    pub fn new() -> Self {
        Self {
            backend: None,
            ui_state: Arc::new(Mutex::new(UiState::default())),
            content_state: Arc::new(Mutex::new(ContentState::default())),
            should_quit: Arc::new(Mutex::new(false)),
        }
    }

    pub fn set_backend(&mut self, backend: Arc<dyn PlaylistBackend>) {
        self.backend = Some(backend);
    }

    pub async fn get_backend(&self) -> Option<Arc<dyn PlaylistBackend>> {
        self.backend.clone()
    }

    pub async fn set_backend_url(&self, url: String) {
        self.ui_state.lock().await.backend_url = url;
    }

    pub async fn should_quit(&self) -> bool {
        *self.should_quit.lock().await
    }

    pub async fn set_should_quit(&self, quit: bool) {
        *self.should_quit.lock().await = quit;
    }

    pub async fn get_ui_state(&self) -> UiState {
        self.ui_state.lock().await.clone()
    }

    pub async fn get_content_state(&self) -> ContentState {
        self.content_state.lock().await.clone()
    }

    // ========================================================================
    // Notices
    // ========================================================================

    pub async fn push_notice(&self, level: NoticeLevel, message: impl Into<String>) {
        let notice = Notice::new(level, message);
        match level {
            NoticeLevel::Error => tracing::error!(message = %notice.message, "Notice"),
            NoticeLevel::Warning => tracing::warn!(message = %notice.message, "Notice"),
            NoticeLevel::Info | NoticeLevel::Success => {
                tracing::info!(message = %notice.message, "Notice")
            }
        }
        self.ui_state.lock().await.notices.push_back(notice);
    }

    pub async fn dismiss_notice(&self) {
        self.ui_state.lock().await.notices.pop_front();
    }

    /// Drop the front notice once it has been visible long enough.
    pub async fn auto_clear_old_notices(&self) {
        let mut state = self.ui_state.lock().await;
        if state.notices.front().is_some_and(Notice::is_expired) {
            state.notices.pop_front();
            // The next one gets its full time on screen
            if let Some(next) = state.notices.front_mut() {
                next.created_at = std::time::Instant::now();
            }
        }
    }

    // ========================================================================
    // Help popup
    // ========================================================================

    pub async fn show_help_popup(&self) {
        self.ui_state.lock().await.show_help_popup = true;
    }

    pub async fn hide_help_popup(&self) {
        self.ui_state.lock().await.show_help_popup = false;
    }

    pub async fn is_help_popup_open(&self) -> bool {
        self.ui_state.lock().await.show_help_popup
    }

    // ========================================================================
    // Playlist list
    // ========================================================================

    /// Replace the whole list. Selection and select-all are reset.
    pub async fn set_playlists(&self, playlists: &[Playlist]) {
        let mut state = self.content_state.lock().await;
        state.playlists = playlists.iter().map(PlaylistRow::from).collect();
        state.cursor = 0;
        state.selected.clear();
        state.select_all = false;
        state.is_loading = false;
        drop(state);

        self.ui_state.lock().await.last_refreshed = Some(chrono::Local::now());
    }

    pub async fn set_content_loading(&self, loading: bool) {
        self.content_state.lock().await.is_loading = loading;
    }

    pub async fn view_mode(&self) -> ViewMode {
        self.content_state.lock().await.mode
    }

    pub async fn move_selection_up(&self) {
        let mut state = self.content_state.lock().await;
        match state.mode {
            ViewMode::List => state.cursor = state.cursor.saturating_sub(1),
            ViewMode::Detail => state.song_cursor = state.song_cursor.saturating_sub(1),
        }
    }

    pub async fn move_selection_down(&self) {
        let mut state = self.content_state.lock().await;
        match state.mode {
            ViewMode::List => {
                if state.cursor < state.playlists.len().saturating_sub(1) {
                    state.cursor += 1;
                }
            }
            ViewMode::Detail => {
                let song_count = state.detail.as_ref().map_or(0, |d| d.songs.len());
                if state.song_cursor < song_count.saturating_sub(1) {
                    state.song_cursor += 1;
                }
            }
        }
    }

    pub async fn get_cursor_playlist_id(&self) -> Option<String> {
        let state = self.content_state.lock().await;
        state.cursor_row().map(|row| row.id.clone())
    }

    /// Flip the checkbox of the row under the cursor.
    pub async fn toggle_cursor_selection(&self) {
        let mut state = self.content_state.lock().await;
        let Some(id) = state.cursor_row().map(|row| row.id.clone()) else {
            return;
        };
        if state.selected.remove(&id) {
            // Header checkbox no longer describes every row
            state.select_all = false;
        } else {
            state.selected.insert(id);
        }
    }

    /// Set every visible row's checkbox to `checked`.
    pub async fn set_select_all(&self, checked: bool) {
        let mut state = self.content_state.lock().await;
        state.select_all = checked;
        if checked {
            let ids: Vec<String> = state.playlists.iter().map(|row| row.id.clone()).collect();
            state.selected.extend(ids);
        } else {
            state.selected.clear();
        }
    }

    /// Flip the select-all checkbox and apply it to the visible rows.
    pub async fn toggle_select_all(&self) -> bool {
        let checked = !self.content_state.lock().await.select_all;
        self.set_select_all(checked).await;
        checked
    }

    pub async fn get_selected_playlist_ids(&self) -> Vec<String> {
        self.content_state.lock().await.selected_ids()
    }

    // ========================================================================
    // Detail view
    // ========================================================================

    /// Switch to the detail screen. Previous song rows are replaced wholesale.
    pub async fn show_playlist_detail(&self, detail: PlaylistDetailView) {
        let mut state = self.content_state.lock().await;
        state.detail = Some(detail);
        state.song_cursor = 0;
        state.mode = ViewMode::Detail;
        state.is_loading = false;
    }

    /// Back to the list screen; list controls come back with it.
    pub async fn navigate_back(&self) -> bool {
        let mut state = self.content_state.lock().await;
        if state.mode == ViewMode::Detail {
            state.mode = ViewMode::List;
            true
        } else {
            false
        }
    }

    // ========================================================================
    // Delete confirmation
    // ========================================================================

    pub async fn open_delete_confirmation(&self, playlist_ids: Vec<String>) {
        self.ui_state.lock().await.pending_deletion = Some(PendingDeletion { playlist_ids });
    }

    pub async fn take_pending_deletion(&self) -> Option<PendingDeletion> {
        self.ui_state.lock().await.pending_deletion.take()
    }

    pub async fn is_confirmation_open(&self) -> bool {
        self.ui_state.lock().await.pending_deletion.is_some()
    }

    // ========================================================================
    // Create playlist form
    // ========================================================================

    pub async fn open_create_form(&self) {
        let mut state = self.ui_state.lock().await;
        if state.create_form.is_none() {
            state.create_form = Some(CreateForm::default());
        }
    }

    /// Closing is refused while a submission is in flight.
    pub async fn close_create_form(&self) -> bool {
        let mut state = self.ui_state.lock().await;
        match &state.create_form {
            Some(form) if form.submitting => false,
            Some(_) => {
                state.create_form = None;
                true
            }
            None => false,
        }
    }

    pub async fn is_create_form_open(&self) -> bool {
        self.ui_state.lock().await.create_form.is_some()
    }

    pub async fn get_create_form(&self) -> Option<CreateForm> {
        self.ui_state.lock().await.create_form.clone()
    }

    /// Apply an edit to the open form unless it is locked by a submission.
    pub async fn edit_create_form(&self, edit: impl FnOnce(&mut CreateForm)) {
        let mut state = self.ui_state.lock().await;
        if let Some(form) = state.create_form.as_mut() {
            if !form.submitting {
                edit(form);
            }
        }
    }

    /// Lock the form and show the progress line. Returns the payload to send,
    /// or `None` when saving is not allowed right now.
    pub async fn begin_submission(&self) -> Option<NewPlaylist> {
        let mut state = self.ui_state.lock().await;
        let form = state.create_form.as_mut()?;
        if !form.can_submit() {
            return None;
        }
        form.submitting = true;
        form.progress_message = Some(PROGRESS_MESSAGE.to_string());
        Some(form.to_payload())
    }

    /// Unlock the form after a failed submission. Returns `false` when there
    /// was nothing in flight, so the reset happens once per submission.
    pub async fn fail_submission(&self) -> bool {
        let mut state = self.ui_state.lock().await;
        match state.create_form.as_mut() {
            Some(form) if form.submitting => {
                form.submitting = false;
                form.progress_message = None;
                true
            }
            _ => false,
        }
    }

    pub async fn complete_submission(&self) {
        self.ui_state.lock().await.create_form = None;
    }
}

impl Default for AppModel {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn playlists(ids: &[&str]) -> Vec<Playlist> {
        ids.iter()
            .map(|id| serde_json::from_value(serde_json::json!({"id": id, "name": id})).unwrap())
            .collect()
    }

    #[tokio::test]
    async fn rerender_clears_selection() {
        let model = AppModel::new();
        model.set_playlists(&playlists(&["a", "b", "c"])).await;
        model.move_selection_down().await;
        model.toggle_cursor_selection().await;
        model.set_select_all(true).await;
        assert_eq!(model.get_selected_playlist_ids().await, vec!["a", "b", "c"]);

        model.set_playlists(&playlists(&["a", "b", "c"])).await;
        let content = model.get_content_state().await;
        assert!(content.selected.is_empty());
        assert!(!content.select_all);
        assert_eq!(content.cursor, 0);
    }

    #[tokio::test]
    async fn toggle_cursor_selection_flips() {
        let model = AppModel::new();
        model.set_playlists(&playlists(&["a", "b"])).await;
        model.move_selection_down().await;
        model.toggle_cursor_selection().await;
        assert_eq!(model.get_selected_playlist_ids().await, vec!["b"]);
        model.toggle_cursor_selection().await;
        assert!(model.get_selected_playlist_ids().await.is_empty());
    }

    #[tokio::test]
    async fn select_all_only_touches_visible_rows() {
        let model = AppModel::new();
        model.set_playlists(&playlists(&["a", "b"])).await;
        assert!(model.toggle_select_all().await);
        assert_eq!(model.get_selected_playlist_ids().await, vec!["a", "b"]);

        let content = model.get_content_state().await;
        assert_eq!(content.selected.len(), 2);

        assert!(!model.toggle_select_all().await);
        assert!(model.get_selected_playlist_ids().await.is_empty());
    }

    #[tokio::test]
    async fn unchecking_a_row_clears_select_all() {
        let model = AppModel::new();
        model.set_playlists(&playlists(&["a", "b"])).await;
        model.set_select_all(true).await;

        model.toggle_cursor_selection().await;

        let content = model.get_content_state().await;
        assert!(!content.select_all);
        assert_eq!(content.selected_ids(), vec!["b"]);

        // Checking it again does not bring the header back on its own
        model.toggle_cursor_selection().await;
        assert!(!model.get_content_state().await.select_all);
        assert_eq!(model.get_selected_playlist_ids().await, vec!["a", "b"]);
    }

    #[tokio::test]
    async fn cursor_is_clamped() {
        let model = AppModel::new();
        model.set_playlists(&playlists(&["a", "b"])).await;
        for _ in 0..5 {
            model.move_selection_down().await;
        }
        assert_eq!(model.get_cursor_playlist_id().await.as_deref(), Some("b"));
        for _ in 0..5 {
            model.move_selection_up().await;
        }
        assert_eq!(model.get_cursor_playlist_id().await.as_deref(), Some("a"));
    }

    #[tokio::test]
    async fn back_restores_list_controls() {
        let model = AppModel::new();
        let detail = PlaylistDetailView::build(&playlists(&["a"])[0], &[]);
        model.show_playlist_detail(detail).await;
        assert!(!model.get_content_state().await.list_controls_visible());

        assert!(model.navigate_back().await);
        let content = model.get_content_state().await;
        assert_eq!(content.mode, ViewMode::List);
        assert!(content.list_controls_visible());
        assert!(!model.navigate_back().await);
    }

    #[tokio::test]
    async fn submission_reset_happens_once() {
        let model = AppModel::new();
        model.open_create_form().await;
        model
            .edit_create_form(|f| {
                f.title = "Mix".into();
                f.songs = "A - B".into();
            })
            .await;

        assert!(model.begin_submission().await.is_some());
        assert!(model.begin_submission().await.is_none());
        assert!(!model.close_create_form().await);

        assert!(model.fail_submission().await);
        assert!(!model.fail_submission().await);

        let form = model.get_create_form().await.unwrap();
        assert!(!form.submitting);
        assert!(form.progress_message.is_none());
        assert_eq!(form.title, "Mix");
    }

    #[tokio::test]
    async fn expired_notice_is_dropped() {
        let model = AppModel::new();
        model.push_notice(NoticeLevel::Info, "first").await;
        model.push_notice(NoticeLevel::Info, "second").await;
        {
            let mut state = model.ui_state.lock().await;
            let old = std::time::Instant::now() - crate::model::NOTICE_TTL * 2;
            state.notices.front_mut().unwrap().created_at = old;
        }
        model.auto_clear_old_notices().await;
        let ui = model.get_ui_state().await;
        assert_eq!(ui.current_notice().unwrap().message, "second");
    }
}
