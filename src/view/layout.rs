//! Layout rendering (header and control bar)

use ratatui::{
    layout::{Constraint, Direction, Layout, Rect},
    style::{Color, Modifier, Style},
    text::{Line, Span},
    widgets::{Block, Borders, Paragraph},
    Frame,
};
use ratatui::widgets::Padding;

use crate::model::{ContentState, UiState, ViewMode};

pub fn render_top_bar(frame: &mut Frame, area: Rect, ui_state: &UiState, content_state: &ContentState) {
    let chunks = Layout::default()
        .direction(Direction::Horizontal)
        .constraints([
            Constraint::Min(0),     // Title + location
            Constraint::Length(26), // Last refresh
        ])
        .split(area);

    let location = match content_state.mode {
        ViewMode::List => "Your playlists".to_string(),
        ViewMode::Detail => content_state
            .detail
            .as_ref()
            .map(|d| format!("Your playlists / {}", d.title))
            .unwrap_or_else(|| "Your playlists".to_string()),
    };

    let title = Paragraph::new(Line::from(vec![
        Span::styled("OwlTune  ", Style::default().fg(Color::Green).add_modifier(Modifier::BOLD)),
        Span::styled(location, Style::default().fg(Color::White)),
    ]))
    .block(
        Block::default()
            .borders(Borders::ALL)
            .title(format!(" {} ", ui_state.backend_url))
            .padding(Padding::horizontal(1)),
    );
    frame.render_widget(title, chunks[0]);

    let refreshed = match ui_state.last_refreshed {
        Some(at) => format!("Refreshed {}", at.format("%H:%M:%S")),
        None => "Not loaded yet".to_string(),
    };
    let refreshed = Paragraph::new(refreshed)
        .style(Style::default().fg(Color::Cyan))
        .block(Block::default().borders(Borders::ALL).padding(Padding::horizontal(1)));
    frame.render_widget(refreshed, chunks[1]);
}

/// Key hints. The list controls (refresh, delete, new, select all) only
/// exist while the list screen is shown.
pub fn render_controls_bar(frame: &mut Frame, area: Rect, content_state: &ContentState) {
    let controls: &[(&str, &str)] = if content_state.list_controls_visible() {
        &[
            ("Enter", "Open"),
            ("Space", "Select"),
            ("A", "Select all"),
            ("R", "Refresh"),
            ("D", "Delete selected"),
            ("N", "New playlist"),
            ("H", "Help"),
            ("Q", "Quit"),
        ]
    } else {
        &[
            ("Esc", "Back to playlists"),
            ("↑/↓", "Scroll songs"),
            ("H", "Help"),
            ("Q", "Quit"),
        ]
    };

    let spans: Vec<Span> = controls
        .iter()
        .flat_map(|(key, label)| {
            [
                Span::styled(
                    format!(" {} ", key),
                    Style::default().fg(Color::Black).bg(Color::Green),
                ),
                Span::styled(format!(" {}  ", label), Style::default().fg(Color::White)),
            ]
        })
        .collect();

    let bar = Paragraph::new(Line::from(spans)).block(Block::default().borders(Borders::ALL));
    frame.render_widget(bar, area);
}
