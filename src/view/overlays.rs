//! Overlay rendering (notices, delete confirmation, create form, help popup)

use ratatui::{
    layout::Rect,
    style::{Color, Modifier, Style},
    text::{Line, Span},
    widgets::{Block, Borders, Clear, Paragraph, Wrap},
    Frame,
};

use crate::model::{CreateForm, FormField, Notice, NoticeLevel, PendingDeletion};
use super::utils::centered_rect;

fn notice_color(level: NoticeLevel) -> (Color, &'static str) {
    match level {
        NoticeLevel::Info => (Color::Cyan, " Info "),
        NoticeLevel::Success => (Color::Green, " Success "),
        NoticeLevel::Warning => (Color::Yellow, " Warning "),
        NoticeLevel::Error => (Color::Red, " Error "),
    }
}

/// Toast in the bottom right corner, above the controls bar. Does not take
/// input focus; `x` dismisses it early.
pub fn render_notice(frame: &mut Frame, notice: &Notice, queued: usize) {
    let area = frame.area();

    let popup_width = 52.min(area.width.saturating_sub(4));
    let inner_width = popup_width.saturating_sub(2).max(1) as usize;

    // Calculate how many lines the message will take when wrapped
    let line_count = ((notice.message.chars().count() as f32) / (inner_width as f32)).ceil() as u16;
    let popup_height = (2 + line_count.max(1)).min(area.height.saturating_sub(4));

    let popup_area = Rect {
        x: area.width.saturating_sub(popup_width + 2),
        y: area.height.saturating_sub(popup_height + 3),
        width: popup_width,
        height: popup_height,
    };

    frame.render_widget(Clear, popup_area);

    let (color, label) = notice_color(notice.level);
    let title = if queued > 1 {
        format!("{}(+{} more, X to dismiss) ", label, queued - 1)
    } else {
        format!("{}(X to dismiss) ", label)
    };

    let widget = Paragraph::new(notice.message.clone())
        .style(Style::default().fg(color))
        .wrap(Wrap { trim: false })
        .block(
            Block::default()
                .borders(Borders::ALL)
                .border_style(Style::default().fg(color))
                .title(title)
                .title_style(Style::default().fg(color).add_modifier(Modifier::BOLD))
                .style(Style::default().bg(Color::Black)),
        );

    frame.render_widget(widget, popup_area);
}

pub fn render_delete_confirmation(frame: &mut Frame, pending: &PendingDeletion) {
    let popup_area = centered_rect(frame.area(), 56, 6);
    frame.render_widget(Clear, popup_area);

    let lines = vec![
        Line::from(Span::styled(pending.prompt(), Style::default().fg(Color::White))),
        Line::from(""),
        Line::from(vec![
            Span::styled(" Y ", Style::default().fg(Color::Black).bg(Color::Red)),
            Span::raw(" Delete   "),
            Span::styled(" N ", Style::default().fg(Color::Black).bg(Color::Gray)),
            Span::raw(" Cancel"),
        ]),
    ];

    let dialog = Paragraph::new(lines).wrap(Wrap { trim: false }).block(
        Block::default()
            .borders(Borders::ALL)
            .border_style(Style::default().fg(Color::Red))
            .title(" Delete playlists ")
            .title_style(Style::default().fg(Color::Red).add_modifier(Modifier::BOLD))
            .style(Style::default().bg(Color::Black)),
    );

    frame.render_widget(dialog, popup_area);
}

pub fn render_create_form(frame: &mut Frame, form: &CreateForm) {
    let song_lines: Vec<&str> = form.songs.split('\n').collect();
    // title, description, songs label, song lines, private, blank, save, progress + borders
    let height = (song_lines.len() as u16 + 10).max(12);
    let popup_area = centered_rect(frame.area(), 64, height);
    frame.render_widget(Clear, popup_area);

    let label_style = |field: FormField| {
        if form.focused == field {
            Style::default().fg(Color::Green).add_modifier(Modifier::BOLD)
        } else {
            Style::default().fg(Color::Gray)
        }
    };
    let cursor = |field: FormField| if form.focused == field && !form.submitting { "_" } else { "" };

    let mut lines = vec![
        Line::from(vec![
            Span::styled("Title*:       ", label_style(FormField::Title)),
            Span::raw(format!("{}{}", form.title, cursor(FormField::Title))),
        ]),
        Line::from(vec![
            Span::styled("Description:  ", label_style(FormField::Description)),
            Span::raw(format!("{}{}", form.description, cursor(FormField::Description))),
        ]),
        Line::from(Span::styled(
            "Songs* (one per line, \"Artist - Title\"):",
            label_style(FormField::Songs),
        )),
    ];

    let last = song_lines.len().saturating_sub(1);
    for (i, line) in song_lines.iter().enumerate() {
        let suffix = if i == last { cursor(FormField::Songs) } else { "" };
        lines.push(Line::from(format!("  {}{}", line, suffix)));
    }

    lines.push(Line::from(vec![
        Span::styled("Private:      ", label_style(FormField::Private)),
        Span::raw(if form.private { "[x]" } else { "[ ]" }),
    ]));
    lines.push(Line::from(""));

    let save_style = if form.can_submit() {
        if form.focused == FormField::Save {
            Style::default().fg(Color::Black).bg(Color::Green).add_modifier(Modifier::BOLD)
        } else {
            Style::default().fg(Color::Green)
        }
    } else {
        Style::default().fg(Color::DarkGray)
    };
    lines.push(Line::from(Span::styled(" Save (Ctrl+S) ", save_style)));

    if let Some(progress) = &form.progress_message {
        lines.push(Line::from(Span::styled(
            progress.clone(),
            Style::default().fg(Color::Yellow).add_modifier(Modifier::ITALIC),
        )));
    }

    let title = if form.submitting {
        " New playlist "
    } else {
        " New playlist (Tab: next field, Esc: cancel) "
    };

    let widget = Paragraph::new(lines).block(
        Block::default()
            .borders(Borders::ALL)
            .border_style(Style::default().fg(Color::Cyan))
            .title(title)
            .title_style(Style::default().fg(Color::Cyan).add_modifier(Modifier::BOLD))
            .style(Style::default().bg(Color::Black)),
    );

    frame.render_widget(widget, popup_area);
}

pub fn render_help_popup(frame: &mut Frame) {
    let area = frame.area();

    let keybindings = [
        ("", "── Playlists ──"),
        ("↑ / ↓", "Move cursor"),
        ("Enter", "Open playlist"),
        ("Space", "Select / unselect playlist"),
        ("A", "Select all / none"),
        ("R", "Refresh playlists"),
        ("D / Delete", "Delete selected"),
        ("N", "New playlist"),
        ("", ""),
        ("", "── Playlist details ──"),
        ("↑ / ↓", "Scroll songs"),
        ("Esc / Backspace", "Back to playlists"),
        ("", ""),
        ("", "── New playlist form ──"),
        ("Tab / Shift+Tab", "Next / previous field"),
        ("Ctrl+S", "Save"),
        ("Esc", "Cancel"),
        ("", ""),
        ("", "── General ──"),
        ("X", "Dismiss notice"),
        ("H", "Toggle this help"),
        ("Q / Ctrl+Q", "Quit"),
    ];

    let popup_height = keybindings.len() as u16 + 2;
    let popup_area = centered_rect(area, 62, popup_height);

    frame.render_widget(Clear, popup_area);

    let lines: Vec<Line> = keybindings
        .iter()
        .map(|(key, desc)| {
            if key.is_empty() {
                // Section header or empty line
                Line::from(Span::styled(
                    format!("{:^38}", desc),
                    Style::default().fg(Color::Yellow).add_modifier(Modifier::BOLD),
                ))
            } else {
                Line::from(vec![
                    Span::styled(
                        format!("{:>18}", key),
                        Style::default().fg(Color::Green).add_modifier(Modifier::BOLD),
                    ),
                    Span::raw("  "),
                    Span::styled(desc.to_string(), Style::default().fg(Color::White)),
                ])
            }
        })
        .collect();

    let help_text = Paragraph::new(lines)
        .block(
            Block::default()
                .borders(Borders::ALL)
                .border_style(Style::default().fg(Color::Cyan))
                .title(" Help (H or Esc to close) ")
                .title_style(Style::default().fg(Color::Cyan).add_modifier(Modifier::BOLD))
                .style(Style::default().bg(Color::Black)),
        )
        .style(Style::default().bg(Color::Black));

    frame.render_widget(help_text, popup_area);
}
