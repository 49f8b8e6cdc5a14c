//! Fetch lifecycle state: what the content area shows and whether the dialog is open

use std::collections::HashSet;

use super::types::BookRecord;

/// Cards per row in the results grid; vertical moves jump by this much
pub const CARD_COLUMNS: usize = 2;

/// Identifies one fetch; only the most recent ticket may change the view
#[derive(Clone, Copy, Debug, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct FetchTicket(pub(crate) u64);

#[derive(Clone, Debug, PartialEq, Eq, Default)]
pub enum ViewState {
    #[default]
    Idle,
    Loading,
    Loaded(Vec<BookRecord>),
    Failed(String),
}

impl ViewState {
    pub fn books(&self) -> Option<&[BookRecord]> {
        match self {
            ViewState::Loaded(books) => Some(books),
            _ => None,
        }
    }
}

#[derive(Clone, Debug, PartialEq, Eq, Default)]
pub enum DialogState {
    #[default]
    Closed,
    Open(BookRecord),
}

impl DialogState {
    pub fn is_open(&self) -> bool {
        matches!(self, DialogState::Open(_))
    }
}

/// Everything the content area renders, mutated together under one lock
#[derive(Clone, Debug, Default)]
pub struct ContentState {
    pub view: ViewState,
    pub dialog: DialogState,
    /// Card with the keyboard highlight
    pub highlighted: usize,
    /// Record ids whose thumbnail failed to load
    pub broken_thumbnails: HashSet<String>,
    /// Ticket of the most recently started fetch
    pub current_ticket: Option<FetchTicket>,
    next_ticket: u64,
}

impl ContentState {
    /// Enter Loading for a new fetch, superseding whatever was in flight
    pub fn begin_fetch(&mut self) -> FetchTicket {
        self.next_ticket += 1;
        let ticket = FetchTicket(self.next_ticket);
        self.current_ticket = Some(ticket);
        self.view = ViewState::Loading;
        self.dialog = DialogState::Closed;
        self.highlighted = 0;
        self.broken_thumbnails.clear();
        ticket
    }

    pub fn is_current(&self, ticket: FetchTicket) -> bool {
        self.current_ticket == Some(ticket)
    }

    /// Apply a fetch outcome. Returns false and leaves state untouched if the ticket is stale.
    pub fn finish_fetch(&mut self, ticket: FetchTicket, outcome: Result<Vec<BookRecord>, String>) -> bool {
        if !self.is_current(ticket) {
            return false;
        }
        self.view = match outcome {
            Ok(books) => ViewState::Loaded(books),
            Err(message) => ViewState::Failed(message),
        };
        true
    }

    pub fn select(&mut self, record: &BookRecord) -> bool {
        let is_member = self
            .view
            .books()
            .is_some_and(|books| books.iter().any(|b| b == record));
        if is_member {
            self.dialog = DialogState::Open(record.clone());
        }
        is_member
    }

    pub fn highlighted_book(&self) -> Option<&BookRecord> {
        self.view.books().and_then(|books| books.get(self.highlighted))
    }

    pub fn move_highlight(&mut self, delta: isize) {
        let len = self.view.books().map_or(0, <[BookRecord]>::len);
        if len == 0 {
            self.highlighted = 0;
            return;
        }
        let target = self.highlighted as isize + delta;
        self.highlighted = target.clamp(0, len as isize - 1) as usize;
    }

    pub fn mark_thumbnail_broken(&mut self, ticket: FetchTicket, book_id: &str) -> bool {
        if !self.is_current(ticket) {
            return false;
        }
        self.broken_thumbnails.insert(book_id.to_string())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn book(id: &str) -> BookRecord {
        BookRecord {
            id: id.to_string(),
            title: format!("Book {id}"),
            thumbnail_url: None,
            description: None,
        }
    }

    #[test]
    fn begin_fetch_enters_loading_and_closes_dialog() {
        let mut state = ContentState::default();
        let first = state.begin_fetch();
        assert!(state.finish_fetch(first, Ok(vec![book("a")])));
        assert!(state.select(&book("a")));

        let second = state.begin_fetch();
        assert!(second > first);
        assert_eq!(state.view, ViewState::Loading);
        assert_eq!(state.dialog, DialogState::Closed);
    }

    #[test]
    fn stale_outcome_is_discarded() {
        let mut state = ContentState::default();
        let stale = state.begin_fetch();
        let fresh = state.begin_fetch();

        assert!(state.finish_fetch(fresh, Ok(vec![book("fresh")])));
        assert!(!state.finish_fetch(stale, Err("boom".to_string())));
        assert_eq!(state.view, ViewState::Loaded(vec![book("fresh")]));
    }

    #[test]
    fn select_requires_membership_in_loaded_list() {
        let mut state = ContentState::default();
        assert!(!state.select(&book("a")));

        let ticket = state.begin_fetch();
        assert!(!state.select(&book("a")));

        state.finish_fetch(ticket, Ok(vec![book("a"), book("b")]));
        assert!(!state.select(&book("z")));
        assert_eq!(state.dialog, DialogState::Closed);
        assert!(state.select(&book("b")));
        assert_eq!(state.dialog, DialogState::Open(book("b")));
    }

    #[test]
    fn highlight_is_clamped_to_results() {
        let mut state = ContentState::default();
        state.move_highlight(3);
        assert_eq!(state.highlighted, 0);

        let ticket = state.begin_fetch();
        state.finish_fetch(ticket, Ok(vec![book("a"), book("b"), book("c")]));
        state.move_highlight(10);
        assert_eq!(state.highlighted, 2);
        state.move_highlight(-1);
        assert_eq!(state.highlighted_book(), Some(&book("b")));
        state.move_highlight(-10);
        assert_eq!(state.highlighted, 0);
    }

    #[test]
    fn broken_thumbnails_only_count_for_current_fetch() {
        let mut state = ContentState::default();
        let stale = state.begin_fetch();
        let fresh = state.begin_fetch();

        assert!(!state.mark_thumbnail_broken(stale, "a"));
        assert!(state.mark_thumbnail_broken(fresh, "b"));
        assert_eq!(state.broken_thumbnails, HashSet::from(["b".to_string()]));
    }
}
