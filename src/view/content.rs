//! Main content area rendering (playlist list, playlist detail)

use ratatui::{
    layout::{Constraint, Direction, Layout, Rect},
    style::{Color, Modifier, Style},
    text::{Line, Span},
    widgets::{Block, Borders, ListItem, Paragraph},
    Frame,
};
use ratatui::widgets::Padding;

use crate::model::{ContentState, PlaylistDetailView, PlaylistRow, ViewMode};
use super::utils::{calculate_num_width, render_scrollable_list, truncate_string};

pub fn render_main_content(frame: &mut Frame, area: Rect, content_state: &ContentState) {
    match (&content_state.mode, &content_state.detail) {
        (ViewMode::Detail, Some(detail)) => {
            render_playlist_detail(frame, area, detail, content_state.song_cursor)
        }
        _ => render_playlist_list(frame, area, content_state),
    }
}

fn checkbox(checked: bool) -> &'static str {
    if checked { "[x]" } else { "[ ]" }
}

fn render_playlist_list(frame: &mut Frame, area: Rect, content_state: &ContentState) {
    let border_style = Style::default().fg(Color::Green);

    let chunks = Layout::default()
        .direction(Direction::Vertical)
        .constraints([
            Constraint::Length(3), // Select-all header
            Constraint::Min(0),    // Rows
        ])
        .split(area);

    let content_width = chunks[1].width.saturating_sub(4) as usize;
    let num_width = calculate_num_width(content_state.playlists.len());
    let (title_width, tracks_width, owner_width, type_width) = list_column_widths(content_width, num_width);

    let header = format!(
        "{} {:>num_width$} {} {} {} {}",
        checkbox(content_state.select_all),
        "#",
        truncate_string("Title", title_width),
        truncate_string("Tracks", tracks_width),
        truncate_string("Creator", owner_width),
        truncate_string("Type", type_width),
        num_width = num_width,
    );
    let header = Paragraph::new(header)
        .style(Style::default().fg(Color::Cyan).add_modifier(Modifier::BOLD))
        .block(
            Block::default()
                .borders(Borders::ALL)
                .title(" Select all (A) ")
                .padding(Padding::horizontal(1)),
        );
    frame.render_widget(header, chunks[0]);

    let title = if content_state.is_loading {
        format!(" Playlists ({}) - loading... ", content_state.playlists.len())
    } else {
        format!(" Playlists ({}) ", content_state.playlists.len())
    };
    let block = Block::default()
        .borders(Borders::ALL)
        .title(title)
        .padding(Padding::horizontal(1))
        .border_style(border_style);

    if content_state.playlists.is_empty() {
        let hint = if content_state.is_loading {
            "Loading..."
        } else {
            "No playlists. Press R to refresh or N to create one."
        };
        let empty = Paragraph::new(hint)
            .style(Style::default().fg(Color::DarkGray))
            .block(block);
        frame.render_widget(empty, chunks[1]);
        return;
    }

    let items: Vec<ListItem> = content_state
        .playlists
        .iter()
        .enumerate()
        .map(|(i, row)| {
            let text = format_playlist_row(
                row,
                i + 1,
                content_state.is_selected(&row.id),
                num_width,
                (title_width, tracks_width, owner_width, type_width),
            );
            let style = if i == content_state.cursor {
                Style::default().fg(Color::Green).add_modifier(Modifier::BOLD)
            } else if content_state.is_selected(&row.id) {
                Style::default().fg(Color::Yellow)
            } else {
                Style::default().fg(Color::White)
            };
            ListItem::new(text).style(style)
        })
        .collect();

    render_scrollable_list(frame, chunks[1], items, content_state.cursor, block);
}

/// (title, tracks, creator, type) widths for the list
fn list_column_widths(content_width: usize, num_width: usize) -> (usize, usize, usize, usize) {
    let tracks_width = 12;
    let type_width = 8;
    // checkbox(3) + num + 5 separators
    let fixed = 3 + num_width + 5 + tracks_width + type_width;
    let remaining = content_width.saturating_sub(fixed);
    let title_width = (remaining * 60) / 100;
    let owner_width = remaining.saturating_sub(title_width);
    (title_width, tracks_width, owner_width, type_width)
}

fn format_playlist_row(
    row: &PlaylistRow,
    number: usize,
    selected: bool,
    num_width: usize,
    (title_width, tracks_width, owner_width, type_width): (usize, usize, usize, usize),
) -> String {
    format!(
        "{} {:>num_width$} {} {} {} {}",
        checkbox(selected),
        number,
        truncate_string(&row.title, title_width),
        truncate_string(&row.tracks, tracks_width),
        truncate_string(&row.owner, owner_width),
        truncate_string(row.visibility.label(), type_width),
        num_width = num_width,
    )
}

fn render_playlist_detail(frame: &mut Frame, area: Rect, detail: &PlaylistDetailView, song_cursor: usize) {
    let border_style = Style::default().fg(Color::Green);

    let chunks = Layout::default()
        .direction(Direction::Vertical)
        .constraints([
            Constraint::Length(8), // Metadata
            Constraint::Min(0),    // Songs
        ])
        .split(area);

    let dim = Style::default().fg(Color::Gray);
    let header = Paragraph::new(vec![
        Line::from(Span::styled(
            detail.title.clone(),
            Style::default().fg(Color::Cyan).add_modifier(Modifier::BOLD),
        )),
        Line::from(Span::styled(detail.creator.clone(), dim)),
        Line::from(Span::styled(detail.playlist_type.clone(), dim)),
        Line::from(Span::styled(
            format!("{}  |  {}", detail.tracks, detail.followers),
            dim,
        )),
        Line::from(Span::styled(
            format!("Cover: {}", detail.cover_image),
            Style::default().fg(Color::DarkGray),
        )),
    ])
    .block(
        Block::default()
            .borders(Borders::ALL)
            .title(" Playlist (Esc: back to playlists) ")
            .padding(Padding::horizontal(1))
            .border_style(border_style),
    );
    frame.render_widget(header, chunks[0]);

    let content_width = chunks[1].width.saturating_sub(4) as usize;
    let num_width = calculate_num_width(detail.songs.len());
    let duration_width = 7;
    // num + 4 separators
    let remaining = content_width.saturating_sub(num_width + 4 + duration_width);
    let title_width = (remaining * 40) / 100;
    let artist_width = (remaining * 30) / 100;
    let album_width = remaining.saturating_sub(title_width + artist_width);

    let items: Vec<ListItem> = detail
        .songs
        .iter()
        .enumerate()
        .map(|(i, song)| {
            let text = format!(
                "{:>num_width$} {} {} {} {:>duration_width$}",
                i + 1,
                truncate_string(&song.title, title_width),
                truncate_string(&song.artists, artist_width),
                truncate_string(&song.album, album_width),
                song.duration,
                num_width = num_width,
                duration_width = duration_width,
            );
            let style = if i == song_cursor {
                Style::default().fg(Color::Green).add_modifier(Modifier::BOLD)
            } else {
                Style::default().fg(Color::White)
            };
            ListItem::new(text).style(style)
        })
        .collect();

    let songs_block = Block::default()
        .borders(Borders::ALL)
        .title(format!(" Songs ({}) ", detail.songs.len()))
        .padding(Padding::horizontal(1))
        .border_style(border_style);

    render_scrollable_list(frame, chunks[1], items, song_cursor, songs_block);
}
