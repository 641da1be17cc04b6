//! View module - UI rendering
//!
//! This module handles all UI rendering for the application using ratatui.
//! It is organized into submodules by component type:
//!
//! - `utils`: Shared utility functions (formatting, scrollable lists)
//! - `layout`: Header and key hint bar
//! - `content`: Playlist list and playlist detail screens
//! - `overlays`: Notices and modals (delete confirmation, create form, help)

mod utils;
mod layout;
mod content;
mod overlays;

pub use utils::format_duration;

use ratatui::{
    layout::{Constraint, Direction, Layout},
    Frame,
};

use crate::model::{ContentState, UiState};

pub struct AppView;

impl AppView {
    pub fn render(frame: &mut Frame, ui_state: &UiState, content_state: &ContentState) {
        let chunks = Layout::default()
            .direction(Direction::Vertical)
            .constraints([
                Constraint::Length(3), // Header
                Constraint::Min(0),    // List or detail screen
                Constraint::Length(3), // Key hints
            ])
            .split(frame.area());

        layout::render_top_bar(frame, chunks[0], ui_state, content_state);
        content::render_main_content(frame, chunks[1], content_state);
        layout::render_controls_bar(frame, chunks[2], content_state);

        if let Some(form) = &ui_state.create_form {
            overlays::render_create_form(frame, form);
        }

        if let Some(pending) = &ui_state.pending_deletion {
            overlays::render_delete_confirmation(frame, pending);
        }

        if ui_state.show_help_popup {
            overlays::render_help_popup(frame);
        }

        // Notices stay on top of modals so failures during submission are visible
        if let Some(notice) = ui_state.current_notice() {
            overlays::render_notice(frame, notice, ui_state.notices.len());
        }
    }
}
