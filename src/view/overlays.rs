//! Overlay rendering (book detail dialog, help popup)

use ratatui::{
    layout::Rect,
    style::{Color, Modifier, Style},
    text::{Line, Span},
    widgets::{Block, Borders, Clear, Padding, Paragraph, Wrap},
    Frame,
};

use crate::model::{BookRecord, ContentState};
use super::utils::{centered_rect, cover_line, dialog_description};

pub fn render_book_dialog(frame: &mut Frame, book: &BookRecord, content_state: &ContentState) {
    let popup_area = centered_rect(70, 70, frame.area());

    // Clear the area behind the popup first
    frame.render_widget(Clear, popup_area);

    let lines = vec![
        Line::from(Span::styled(
            book.title.clone(),
            Style::default().fg(Color::White).add_modifier(Modifier::BOLD),
        )),
        Line::from(""),
        Line::from(Span::styled(
            cover_line(book.cover(&content_state.broken_thumbnails)),
            Style::default().fg(Color::Cyan),
        )),
        Line::from(""),
        Line::from(dialog_description(book).to_string()),
    ];

    let dialog = Paragraph::new(lines)
        .wrap(Wrap { trim: false })
        .block(
            Block::default()
                .borders(Borders::ALL)
                .border_style(Style::default().fg(Color::Cyan))
                .title(" Details (Esc to close) ")
                .title_style(Style::default().fg(Color::Cyan).add_modifier(Modifier::BOLD))
                .padding(Padding::uniform(1))
                .style(Style::default().bg(Color::Black)),
        );

    frame.render_widget(dialog, popup_area);
}

pub fn render_help_popup(frame: &mut Frame) {
    let area = frame.area();

    let keybindings = vec![
        ("", "── Search ──"),
        ("type", "Edit query"),
        ("Enter", "Run search"),
        ("Esc", "Clear query"),
        ("", ""),
        ("", "── Category ──"),
        ("← / →", "Change category (searches again)"),
        ("", ""),
        ("", "── Results ──"),
        ("arrows", "Move between cards"),
        ("Enter", "Open details"),
        ("Esc / x", "Close details"),
        ("", ""),
        ("", "── General ──"),
        ("Tab / Shift+Tab", "Cycle focus"),
        ("/ or G", "Focus search"),
        ("?", "Toggle this help"),
        ("Q / Ctrl+Q", "Quit"),
    ];

    let popup_width = 58.min(area.width);
    let popup_height = (keybindings.len() as u16 + 2).min(area.height);

    let popup_area = Rect {
        x: area.width.saturating_sub(popup_width) / 2,
        y: area.height.saturating_sub(popup_height) / 2,
        width: popup_width,
        height: popup_height,
    };

    frame.render_widget(Clear, popup_area);

    let lines: Vec<Line> = keybindings
        .iter()
        .map(|(key, desc)| {
            if key.is_empty() {
                Line::from(Span::styled(
                    format!("{:^54}", desc),
                    Style::default().fg(Color::Yellow).add_modifier(Modifier::BOLD),
                ))
            } else {
                Line::from(vec![
                    Span::styled(
                        format!("{:>16}", key),
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
                .title(" Help (? or Esc to close) ")
                .title_style(Style::default().fg(Color::Cyan).add_modifier(Modifier::BOLD))
                .style(Style::default().bg(Color::Black)),
        )
        .style(Style::default().bg(Color::Black));

    frame.render_widget(help_text, popup_area);
}
