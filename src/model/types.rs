//! Core type definitions for the application

use std::collections::VecDeque;
use std::time::{Duration, Instant};

use chrono::{DateTime, Local};

use super::content::NewPlaylist;

/// How long a notice stays on screen unless dismissed
pub const NOTICE_TTL: Duration = Duration::from_secs(5);

pub const PROGRESS_MESSAGE: &str = "Creating playlist, please wait...";

/// Which screen is visible. Exactly one at a time.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Default)]
pub enum ViewMode {
    #[default]
    List,
    Detail,
}

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum NoticeLevel {
    Info,
    Success,
    Warning,
    Error,
}

/// A queued user-facing message
#[derive(Clone, Debug)]
pub struct Notice {
    pub level: NoticeLevel,
    pub message: String,
    pub created_at: Instant,
}

impl Notice {
    pub fn new(level: NoticeLevel, message: impl Into<String>) -> Self {
        Self {
            level,
            message: message.into(),
            created_at: Instant::now(),
        }
    }

    pub fn is_expired(&self) -> bool {
        self.created_at.elapsed() > NOTICE_TTL
    }
}

/// Deletion waiting for a yes/no answer
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct PendingDeletion {
    pub playlist_ids: Vec<String>,
}

impl PendingDeletion {
    pub fn prompt(&self) -> String {
        format!(
            "{} playlist(s) selected for deletion. Do you confirm?",
            self.playlist_ids.len()
        )
    }
}

/// Focusable controls of the creation form, in tab order
#[derive(Clone, Copy, Debug, PartialEq, Eq, Default)]
pub enum FormField {
    #[default]
    Title,
    Description,
    Songs,
    Private,
    Save,
}

impl FormField {
    pub fn next(self) -> Self {
        match self {
            Self::Title => Self::Description,
            Self::Description => Self::Songs,
            Self::Songs => Self::Private,
            Self::Private => Self::Save,
            Self::Save => Self::Title,
        }
    }

    pub fn prev(self) -> Self {
        match self {
            Self::Title => Self::Save,
            Self::Description => Self::Title,
            Self::Songs => Self::Description,
            Self::Private => Self::Songs,
            Self::Save => Self::Private,
        }
    }

    pub fn is_text(self) -> bool {
        matches!(self, Self::Title | Self::Description | Self::Songs)
    }
}

/// State of the "new playlist" modal
#[derive(Clone, Debug, Default)]
pub struct CreateForm {
    pub title: String,
    pub description: String,
    pub songs: String,
    pub private: bool,
    pub focused: FormField,
    pub submitting: bool,
    pub progress_message: Option<String>,
}

impl CreateForm {
    /// Save is enabled only with a title and at least one song line.
    pub fn has_required_fields(&self) -> bool {
        !self.title.trim().is_empty() && !self.songs.trim().is_empty()
    }

    pub fn can_submit(&self) -> bool {
        self.has_required_fields() && !self.submitting
    }

    pub fn focused_text_mut(&mut self) -> Option<&mut String> {
        match self.focused {
            FormField::Title => Some(&mut self.title),
            FormField::Description => Some(&mut self.description),
            FormField::Songs => Some(&mut self.songs),
            FormField::Private | FormField::Save => None,
        }
    }

    pub fn to_payload(&self) -> NewPlaylist {
        NewPlaylist {
            title: self.title.trim().to_string(),
            description: self.description.trim().to_string(),
            songs: self.songs.clone(),
            private: self.private,
        }
    }
}

/// UI state for the application
#[derive(Clone, Debug, Default)]
pub struct UiState {
    pub notices: VecDeque<Notice>,
    pub pending_deletion: Option<PendingDeletion>,
    pub create_form: Option<CreateForm>,
    pub show_help_popup: bool,
    pub last_refreshed: Option<DateTime<Local>>,
    pub backend_url: String,
}

impl UiState {
    pub fn current_notice(&self) -> Option<&Notice> {
        self.notices.front()
    }

    pub fn has_modal(&self) -> bool {
        self.pending_deletion.is_some() || self.create_form.is_some() || self.show_help_popup
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn form_field_cycle_round_trips() {
        let mut field = FormField::Title;
        for _ in 0..5 {
            field = field.next();
        }
        assert_eq!(field, FormField::Title);
        assert_eq!(FormField::Title.prev(), FormField::Save);
    }

    #[test]
    fn save_requires_title_and_songs() {
        let mut form = CreateForm::default();
        assert!(!form.can_submit());

        form.title = "  Road trip ".into();
        assert!(!form.can_submit());

        form.songs = "\n  \n".into();
        assert!(!form.can_submit());

        form.songs = "Daft Punk - One More Time".into();
        assert!(form.can_submit());

        form.submitting = true;
        assert!(!form.can_submit());
    }

    #[test]
    fn payload_trims_title() {
        let form = CreateForm {
            title: " Mix ".into(),
            songs: "A - B".into(),
            private: true,
            ..Default::default()
        };
        let payload = form.to_payload();
        assert_eq!(payload.title, "Mix");
        assert!(payload.private);
    }

    #[test]
    fn deletion_prompt_counts_ids() {
        let pending = PendingDeletion {
            playlist_ids: vec!["a".into(), "b".into()],
        };
        assert_eq!(
            pending.prompt(),
            "2 playlist(s) selected for deletion. Do you confirm?"
        );
    }
}
