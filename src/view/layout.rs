//! Layout rendering (search bar, category selector, key hints)

use ratatui::{
    layout::{Constraint, Direction, Layout, Rect},
    style::{Color, Modifier, Style},
    text::{Line, Span},
    widgets::{Block, Borders, Padding, Paragraph},
    Frame,
};

use crate::model::{ActiveSection, UiState};

fn focus_style(focused: bool) -> Style {
    if focused {
        Style::default().fg(Color::Green)
    } else {
        Style::default()
    }
}

pub fn render_top_bar(frame: &mut Frame, area: Rect, ui_state: &UiState) {
    let chunks = Layout::default()
        .direction(Direction::Horizontal)
        .constraints([
            Constraint::Min(0),     // Search input
            Constraint::Length(24), // Category selector
        ])
        .split(area);

    let search_focused = ui_state.active_section == ActiveSection::Search;
    let (search_text, text_style) = if ui_state.search_input.is_empty() {
        ("Search books...".to_string(), Style::default().fg(Color::DarkGray))
    } else if search_focused {
        (format!("{}▏", ui_state.search_input), Style::default().fg(Color::Green))
    } else {
        (ui_state.search_input.clone(), Style::default().fg(Color::White))
    };

    let search = Paragraph::new(search_text).style(text_style).block(
        Block::default()
            .borders(Borders::ALL)
            .title(" Search ")
            .padding(Padding::horizontal(1))
            .border_style(focus_style(search_focused)),
    );
    frame.render_widget(search, chunks[0]);

    let category_focused = ui_state.active_section == ActiveSection::Category;
    let category = Paragraph::new(Line::from(vec![
        Span::styled("◂ ", Style::default().fg(Color::DarkGray)),
        Span::styled(
            ui_state.category.label(),
            Style::default().fg(Color::Cyan).add_modifier(Modifier::BOLD),
        ),
        Span::styled(" ▸", Style::default().fg(Color::DarkGray)),
    ]))
    .block(
        Block::default()
            .borders(Borders::ALL)
            .title(" Category ")
            .border_style(focus_style(category_focused)),
    );
    frame.render_widget(category, chunks[1]);
}

pub fn render_footer(frame: &mut Frame, area: Rect, ui_state: &UiState) {
    let hint = match ui_state.active_section {
        ActiveSection::Search => "Enter search · Esc clear · Tab next · Ctrl+Q quit",
        ActiveSection::Category => "←/→ change category · Tab next · ? help · q quit",
        ActiveSection::Results => "arrows move · Enter details · Tab next · ? help · q quit",
    };
    let footer = Paragraph::new(format!(" {}", hint)).style(Style::default().fg(Color::DarkGray));
    frame.render_widget(footer, area);
}
