use crate::core::app::App;
use crate::core::constants::THINKING_INDICATOR;
use crate::core::message::Role;
use ratatui::{
    layout::{Constraint, Direction, Layout},
    style::{Color, Modifier, Style},
    text::{Line, Span},
    widgets::{Block, Borders, Paragraph, Wrap},
    Frame,
};
use unicode_width::UnicodeWidthStr;

/// Build the transcript view as owned lines: stored turns first, then the
/// transient notice, progress, and error lines that are never part of
/// history.
pub fn build_display_lines(app: &App) -> Vec<Line<'static>> {
    let mut lines = Vec::new();

    for msg in app.session.transcript.iter() {
        if msg.is_user() {
            lines.push(Line::from(vec![
                Span::styled(
                    "You: ",
                    Style::default().fg(Color::Cyan).add_modifier(Modifier::BOLD),
                ),
                Span::styled(msg.content.clone(), Style::default().fg(Color::Cyan)),
            ]));
            lines.push(Line::from("")); // Empty line for spacing
        } else if msg.role == Role::System {
            lines.push(Line::from(Span::styled(
                msg.content.clone(),
                Style::default().fg(Color::DarkGray),
            )));
            lines.push(Line::from(""));
        } else if !msg.content.is_empty() {
            // Assistant messages: no prefix, split into lines for wrapping
            for content_line in msg.content.lines() {
                if content_line.trim().is_empty() {
                    lines.push(Line::from(""));
                } else {
                    lines.push(Line::from(Span::styled(
                        content_line.to_string(),
                        Style::default().fg(Color::White),
                    )));
                }
            }
            lines.push(Line::from(""));
        }
    }

    if let Some(notice) = &app.notice {
        for notice_line in notice.lines() {
            lines.push(Line::from(Span::styled(
                notice_line.to_string(),
                Style::default().fg(Color::DarkGray),
            )));
        }
        lines.push(Line::from(""));
    }

    if app.pending {
        lines.push(Line::from(Span::styled(
            THINKING_INDICATOR,
            Style::default()
                .fg(Color::DarkGray)
                .add_modifier(Modifier::ITALIC),
        )));
        lines.push(Line::from(""));
    }

    if let Some(error) = &app.error {
        lines.push(Line::from(vec![
            Span::styled(
                "Error: ",
                Style::default().fg(Color::Red).add_modifier(Modifier::BOLD),
            ),
            Span::styled(error.clone(), Style::default().fg(Color::Red)),
        ]));
        lines.push(Line::from(""));
    }

    lines
}

pub fn ui(f: &mut Frame, app: &mut App) {
    let chunks = Layout::default()
        .direction(Direction::Vertical)
        .constraints([Constraint::Min(0), Constraint::Length(3)])
        .split(f.area());

    let lines = build_display_lines(app);

    // Keep the offset within bounds; reaching the bottom resumes follow mode
    let available_height = chunks[0].height.saturating_sub(1); // Account for title only (no borders)
    let total_lines = lines.len() as u16;
    let max_offset = total_lines.saturating_sub(available_height);
    if app.auto_scroll || app.scroll_offset >= max_offset {
        app.scroll_offset = max_offset;
        app.auto_scroll = true;
    }

    let title = format!(
        "Charmeur v{} - {} (temp {}) • Logging: {}",
        env!("CARGO_PKG_VERSION"),
        app.session.settings.model,
        app.session.settings.temperature,
        app.session.logging.get_status_string()
    );

    let messages_paragraph = Paragraph::new(lines)
        .block(Block::default().title(title))
        .wrap(Wrap { trim: true })
        .scroll((app.scroll_offset, 0));

    f.render_widget(messages_paragraph, chunks[0]);

    let input_title = match &app.status {
        Some(status) => status.clone(),
        None => "Ask a Python question (Enter to send, /help for commands, Ctrl+C to quit)"
            .to_string(),
    };

    let input = Paragraph::new(app.input.as_str())
        .style(Style::default().fg(Color::Yellow))
        .block(Block::default().borders(Borders::ALL).title(input_title))
        .wrap(Wrap { trim: true });

    f.render_widget(input, chunks[1]);

    // Cursor sits after the typed text, clamped inside the input borders
    let cursor_x = (UnicodeWidthStr::width(app.input.as_str()) as u16 + 1)
        .min(chunks[1].width.saturating_sub(2));
    f.set_cursor_position((chunks[1].x + cursor_x, chunks[1].y + 1));
}
