//! Main content area rendering (loading, error, result cards)

use ratatui::{
    layout::{Constraint, Direction, Layout, Rect},
    style::{Color, Modifier, Style},
    text::Line,
    widgets::{Block, Borders, Padding, Paragraph, Wrap},
    Frame,
};

use crate::model::{ActiveSection, BookRecord, ContentState, UiState, ViewState, CARD_COLUMNS};
use super::utils::{card_description, cover_line, truncate_string};

const CARD_HEIGHT: u16 = 9;

pub fn render_main_content(frame: &mut Frame, area: Rect, ui_state: &UiState, content_state: &ContentState) {
    let is_focused = ui_state.active_section == ActiveSection::Results;
    let border_style = if is_focused {
        Style::default().fg(Color::Green)
    } else {
        Style::default()
    };

    match &content_state.view {
        ViewState::Idle => {
            let hint = Paragraph::new("Type a title, author or topic and press Enter to search\n\nUse Tab to move between search, category and results\nPress ? for help")
                .style(Style::default().fg(Color::DarkGray))
                .block(
                    Block::default()
                        .borders(Borders::ALL)
                        .padding(Padding::horizontal(1))
                        .border_style(border_style),
                );
            frame.render_widget(hint, area);
        }
        ViewState::Loading => {
            let loading = Paragraph::new("Loading books...")
                .style(Style::default().fg(Color::Yellow))
                .block(
                    Block::default()
                        .borders(Borders::ALL)
                        .title(" Results ")
                        .border_style(border_style),
                );
            frame.render_widget(loading, area);
        }
        ViewState::Failed(message) => {
            let error = Paragraph::new(format!("Error fetching books: {}", message))
                .style(Style::default().fg(Color::Red))
                .wrap(Wrap { trim: false })
                .block(
                    Block::default()
                        .borders(Borders::ALL)
                        .title(" Results ")
                        .padding(Padding::horizontal(1))
                        .border_style(Style::default().fg(Color::Red)),
                );
            frame.render_widget(error, area);
        }
        ViewState::Loaded(books) => {
            render_cards(frame, area, books, content_state, is_focused, border_style);
        }
    }
}

fn render_cards(
    frame: &mut Frame,
    area: Rect,
    books: &[BookRecord],
    content_state: &ContentState,
    is_focused: bool,
    border_style: Style,
) {
    let block = Block::default()
        .borders(Borders::ALL)
        .title(format!(" Results ({}) ", books.len()))
        .border_style(border_style);
    let inner = block.inner(area);
    frame.render_widget(block, area);

    if books.is_empty() || inner.height == 0 {
        return;
    }

    // Scroll so the highlighted row is always on screen
    let visible_rows = (inner.height / CARD_HEIGHT).max(1) as usize;
    let highlighted_row = content_state.highlighted / CARD_COLUMNS;
    let first_row = highlighted_row.saturating_sub(visible_rows - 1);

    let row_areas = Layout::default()
        .direction(Direction::Vertical)
        .constraints(vec![Constraint::Length(CARD_HEIGHT); visible_rows])
        .split(inner);

    for (slot, row) in books
        .chunks(CARD_COLUMNS)
        .skip(first_row)
        .take(visible_rows)
        .enumerate()
    {
        let column_areas = Layout::default()
            .direction(Direction::Horizontal)
            .constraints(vec![Constraint::Ratio(1, CARD_COLUMNS as u32); CARD_COLUMNS])
            .split(row_areas[slot]);

        for (column, book) in row.iter().enumerate() {
            let index = (first_row + slot) * CARD_COLUMNS + column;
            let highlighted = is_focused && index == content_state.highlighted;
            render_card(frame, column_areas[column], book, content_state, highlighted);
        }
    }
}

fn render_card(frame: &mut Frame, area: Rect, book: &BookRecord, content_state: &ContentState, highlighted: bool) {
    let title_width = area.width.saturating_sub(4) as usize;
    let (border_style, title_style) = if highlighted {
        (
            Style::default().fg(Color::Green),
            Style::default().fg(Color::Green).add_modifier(Modifier::BOLD),
        )
    } else {
        (
            Style::default().fg(Color::DarkGray),
            Style::default().fg(Color::White).add_modifier(Modifier::BOLD),
        )
    };

    let lines = vec![
        Line::styled(
            cover_line(book.cover(&content_state.broken_thumbnails)),
            Style::default().fg(Color::Cyan),
        ),
        Line::raw(card_description(book)),
    ];

    let card = Paragraph::new(lines)
        .wrap(Wrap { trim: true })
        .block(
            Block::default()
                .borders(Borders::ALL)
                .title(truncate_string(&book.title, title_width))
                .title_style(title_style)
                .padding(Padding::horizontal(1))
                .border_style(border_style),
        );
    frame.render_widget(card, area);
}
