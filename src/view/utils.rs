//! Utility functions for rendering UI components

use ratatui::layout::Rect;

use crate::model::{BookRecord, Cover};

/// Cards show at most this many characters of a description
pub const DESCRIPTION_PREVIEW_CHARS: usize = 150;
pub const TRUNCATION_MARKER: &str = "...";

pub const CARD_DESCRIPTION_FALLBACK: &str = "Description not available.";
pub const DIALOG_DESCRIPTION_FALLBACK: &str = "No description available.";

/// Drawn wherever a cover image is missing or failed to load
pub const PLACEHOLDER_COVER: &str = "▢ no cover available";

/// Card text: the first 150 characters followed by the marker
pub fn card_description(book: &BookRecord) -> String {
    match book.description.as_deref() {
        Some(text) => {
            let preview: String = text.chars().take(DESCRIPTION_PREVIEW_CHARS).collect();
            format!("{}{}", preview, TRUNCATION_MARKER)
        }
        None => CARD_DESCRIPTION_FALLBACK.to_string(),
    }
}

/// Dialog text: the whole description, untruncated
pub fn dialog_description(book: &BookRecord) -> &str {
    book.description.as_deref().unwrap_or(DIALOG_DESCRIPTION_FALLBACK)
}

pub fn cover_line(cover: Cover<'_>) -> String {
    match cover {
        Cover::Remote(url) => format!("▣ cover: {}", url),
        Cover::Placeholder => PLACEHOLDER_COVER.to_string(),
    }
}

pub fn truncate_string(s: &str, max_width: usize) -> String {
    if s.chars().count() > max_width {
        let truncated: String = s.chars().take(max_width.saturating_sub(3)).collect();
        format!("{}...", truncated)
    } else {
        s.to_string()
    }
}

/// A rectangle of the given percentage size centered in `area`
pub fn centered_rect(percent_x: u16, percent_y: u16, area: Rect) -> Rect {
    let scale = |len: u16, percent: u16| (u32::from(len) * u32::from(percent.min(100)) / 100) as u16;
    let width = scale(area.width, percent_x);
    let height = scale(area.height, percent_y);
    Rect {
        x: area.x + (area.width.saturating_sub(width)) / 2,
        y: area.y + (area.height.saturating_sub(height)) / 2,
        width,
        height,
    }
}
