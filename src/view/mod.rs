//! View module - UI rendering
//!
//! This module handles all UI rendering for the application using ratatui.
//! It is organized into submodules by component type:
//!
//! - `utils`: Shared helpers (description truncation, cover placeholder, popup geometry)
//! - `layout`: Search bar, category selector and key hints
//! - `content`: Main content area (idle hint, loading, error, result cards)
//! - `overlays`: Modal overlays (book dialog, help)

mod utils;
mod layout;
mod content;
mod overlays;

use ratatui::{
    layout::{Constraint, Direction, Layout},
    Frame,
};

use crate::model::{ContentState, DialogState, UiState, ViewState};

pub struct AppView;

impl AppView {
    pub fn render(frame: &mut Frame, ui_state: &UiState, content_state: &ContentState) {
        let chunks = Layout::default()
            .direction(Direction::Vertical)
            .constraints([
                Constraint::Length(3), // Search bar + category
                Constraint::Min(0),    // Results
                Constraint::Length(1), // Key hints
            ])
            .split(frame.area());

        layout::render_top_bar(frame, chunks[0], ui_state);
        content::render_main_content(frame, chunks[1], ui_state, content_state);
        layout::render_footer(frame, chunks[2], ui_state);

        // The dialog only exists on top of a loaded result list
        if let (ViewState::Loaded(_), DialogState::Open(book)) = (&content_state.view, &content_state.dialog) {
            overlays::render_book_dialog(frame, book, content_state);
        }

        if ui_state.show_help_popup {
            overlays::render_help_popup(frame);
        }
    }
}
