//! Key event handling

use anyhow::Result;
use crossterm::event::{KeyCode, KeyEvent, KeyEventKind, KeyModifiers};

use crate::model::{FormField, ViewMode};
use super::AppController;

impl AppController {
    pub async fn handle_key_event(&self, key: KeyEvent) -> Result<()> {
        if key.kind != KeyEventKind::Press {
            return Ok(());
        }

        let model = self.model.lock().await;

        // Ctrl+Q quits from anywhere, including text fields
        if key.code == KeyCode::Char('q') && key.modifiers.contains(KeyModifiers::CONTROL) {
            model.set_should_quit(true).await;
            return Ok(());
        }

        // Handle help popup
        if model.is_help_popup_open().await {
            if matches!(key.code, KeyCode::Esc | KeyCode::Char('h') | KeyCode::Char('H')) {
                model.hide_help_popup().await;
            }
            return Ok(());
        }

        // Delete confirmation blocks everything else until answered
        if model.is_confirmation_open().await {
            drop(model);
            match key.code {
                KeyCode::Char('y') | KeyCode::Char('Y') | KeyCode::Enter => {
                    let controller = self.clone();
                    tokio::spawn(async move {
                        controller.resolve_delete_confirmation(true).await;
                    });
                }
                KeyCode::Char('n') | KeyCode::Char('N') | KeyCode::Esc => {
                    self.resolve_delete_confirmation(false).await;
                }
                _ => {}
            }
            return Ok(());
        }

        // Create playlist form
        if model.is_create_form_open().await {
            drop(model);
            self.handle_form_key(key).await;
            return Ok(());
        }

        // Screen specific keys
        let mode = model.view_mode().await;
        match mode {
            ViewMode::List => match key.code {
                KeyCode::Enter => {
                    let cursor_playlist = model.get_cursor_playlist_id().await;
                    drop(model);
                    if let Some(playlist_id) = cursor_playlist {
                        let controller = self.clone();
                        tokio::spawn(async move {
                            controller.select_playlist(&playlist_id).await;
                        });
                    }
                    return Ok(());
                }
                KeyCode::Char(' ') => {
                    model.toggle_cursor_selection().await;
                    return Ok(());
                }
                KeyCode::Char('a') | KeyCode::Char('A') => {
                    model.toggle_select_all().await;
                    return Ok(());
                }
                KeyCode::Char('r') | KeyCode::Char('R') => {
                    drop(model);
                    let controller = self.clone();
                    tokio::spawn(async move {
                        controller.load_playlists().await;
                    });
                    return Ok(());
                }
                KeyCode::Char('d') | KeyCode::Char('D') | KeyCode::Delete => {
                    drop(model);
                    self.request_delete_selected().await;
                    return Ok(());
                }
                KeyCode::Char('n') | KeyCode::Char('N') => {
                    drop(model);
                    self.open_create_form().await;
                    return Ok(());
                }
                _ => {}
            },
            ViewMode::Detail => {
                if matches!(key.code, KeyCode::Esc | KeyCode::Backspace) {
                    drop(model);
                    self.navigate_back().await;
                    return Ok(());
                }
            }
        }

        // Global keybindings
        match key.code {
            KeyCode::Char('q') | KeyCode::Char('Q') => {
                model.set_should_quit(true).await;
            }
            KeyCode::Up => {
                model.move_selection_up().await;
            }
            KeyCode::Down => {
                model.move_selection_down().await;
            }
            KeyCode::Char('x') | KeyCode::Char('X') => {
                model.dismiss_notice().await;
            }
            KeyCode::Char('h') | KeyCode::Char('H') => {
                model.show_help_popup().await;
            }
            _ => {}
        }
        Ok(())
    }

    async fn handle_form_key(&self, key: KeyEvent) {
        if key.code == KeyCode::Char('s') && key.modifiers.contains(KeyModifiers::CONTROL) {
            self.spawn_submit();
            return;
        }

        let model = self.model.lock().await;
        let Some(form) = model.get_create_form().await else {
            return;
        };

        match key.code {
            KeyCode::Esc => {
                drop(model);
                self.close_create_form().await;
            }
            KeyCode::Tab => model.edit_create_form(|f| f.focused = f.focused.next()).await,
            KeyCode::BackTab => model.edit_create_form(|f| f.focused = f.focused.prev()).await,
            KeyCode::Enter => match form.focused {
                FormField::Songs => model.edit_create_form(|f| f.songs.push('\n')).await,
                FormField::Private => model.edit_create_form(|f| f.private = !f.private).await,
                FormField::Save => {
                    drop(model);
                    self.spawn_submit();
                }
                FormField::Title | FormField::Description => {
                    model.edit_create_form(|f| f.focused = f.focused.next()).await
                }
            },
            KeyCode::Char(' ') if form.focused == FormField::Private => {
                model.edit_create_form(|f| f.private = !f.private).await
            }
            KeyCode::Char(c)
                if form.focused.is_text() && !key.modifiers.contains(KeyModifiers::CONTROL) =>
            {
                model
                    .edit_create_form(|f| {
                        if let Some(text) = f.focused_text_mut() {
                            text.push(c);
                        }
                    })
                    .await
            }
            KeyCode::Backspace if form.focused.is_text() => {
                model
                    .edit_create_form(|f| {
                        if let Some(text) = f.focused_text_mut() {
                            text.pop();
                        }
                    })
                    .await
            }
            _ => {}
        }
    }

    fn spawn_submit(&self) {
        let controller = self.clone();
        tokio::spawn(async move {
            controller.submit_create_form().await;
        });
    }
}
