//! Main application model with state management

use std::sync::Arc;
use tokio::sync::Mutex;

use super::content::{ContentState, DialogState, FetchTicket, ViewState};
use super::types::{ActiveSection, BookRecord, Category, SearchCriteria, UiState};

/// Main application model containing all state
pub struct AppModel {
    pub ui_state: Arc<Mutex<UiState>>,
    pub content_state: Arc<Mutex<ContentState>>,
    pub should_quit: Arc<Mutex<bool>>,
}

impl AppModel {
    pub fn new() -> Self {
        Self {
            ui_state: Arc::new(Mutex::new(UiState::default())),
            content_state: Arc::new(Mutex::new(ContentState::default())),
            should_quit: Arc::new(Mutex::new(false)),
        }
    }

    pub async fn should_quit(&self) -> bool {
        *self.should_quit.lock().await
    }

    pub async fn set_should_quit(&self, quit: bool) {
        *self.should_quit.lock().await = quit;
    }

    // ========================================================================
    // Search input
    // ========================================================================

    pub async fn get_ui_state(&self) -> UiState {
        self.ui_state.lock().await.clone()
    }

    pub async fn update_search_input(&self, text: String) {
        let mut state = self.ui_state.lock().await;
        state.search_input = text;
    }

    pub async fn append_to_search(&self, c: char) {
        let mut state = self.ui_state.lock().await;
        state.search_input.push(c);
    }

    pub async fn backspace_search(&self) {
        let mut state = self.ui_state.lock().await;
        state.search_input.pop();
    }

    /// Promote the pending input to the active query and return the resulting criteria
    pub async fn commit_search_input(&self) -> SearchCriteria {
        let mut state = self.ui_state.lock().await;
        state.committed_query = state.search_input.clone();
        state.active_criteria()
    }

    /// Set the active query directly, bypassing the input box
    pub async fn set_committed_query(&self, query: String) -> SearchCriteria {
        let mut state = self.ui_state.lock().await;
        state.committed_query = query;
        state.active_criteria()
    }

    pub async fn set_category(&self, category: Category) -> SearchCriteria {
        let mut state = self.ui_state.lock().await;
        state.category = category;
        state.active_criteria()
    }

    // ========================================================================
    // Focus & popups
    // ========================================================================

    pub async fn cycle_section_forward(&self) {
        let mut state = self.ui_state.lock().await;
        state.active_section = state.active_section.next();
    }

    pub async fn cycle_section_backward(&self) {
        let mut state = self.ui_state.lock().await;
        state.active_section = state.active_section.prev();
    }

    pub async fn set_active_section(&self, section: ActiveSection) {
        let mut state = self.ui_state.lock().await;
        state.active_section = section;
    }

    pub async fn toggle_help_popup(&self) {
        let mut state = self.ui_state.lock().await;
        state.show_help_popup = !state.show_help_popup;
    }

    pub async fn hide_help_popup(&self) {
        let mut state = self.ui_state.lock().await;
        state.show_help_popup = false;
    }

    pub async fn is_help_popup_open(&self) -> bool {
        self.ui_state.lock().await.show_help_popup
    }

    // ========================================================================
    // Fetch lifecycle
    // ========================================================================

    pub async fn get_content_state(&self) -> ContentState {
        self.content_state.lock().await.clone()
    }

    pub async fn get_view_state(&self) -> ViewState {
        self.content_state.lock().await.view.clone()
    }

    pub async fn get_dialog_state(&self) -> DialogState {
        self.content_state.lock().await.dialog.clone()
    }

    pub async fn begin_fetch(&self) -> FetchTicket {
        self.content_state.lock().await.begin_fetch()
    }

    /// Apply a fetch outcome if it belongs to the latest fetch; returns whether it was applied
    pub async fn finish_fetch(&self, ticket: FetchTicket, outcome: Result<Vec<BookRecord>, String>) -> bool {
        self.content_state.lock().await.finish_fetch(ticket, outcome)
    }

    pub async fn mark_thumbnail_broken(&self, ticket: FetchTicket, book_id: &str) -> bool {
        self.content_state
            .lock()
            .await
            .mark_thumbnail_broken(ticket, book_id)
    }

    // ========================================================================
    // Cards & dialog
    // ========================================================================

    pub async fn move_highlight(&self, delta: isize) {
        self.content_state.lock().await.move_highlight(delta);
    }

    pub async fn get_highlighted_book(&self) -> Option<BookRecord> {
        self.content_state.lock().await.highlighted_book().cloned()
    }

    pub async fn open_dialog(&self, record: &BookRecord) -> bool {
        self.content_state.lock().await.select(record)
    }

    pub async fn close_dialog(&self) {
        self.content_state.lock().await.dialog = DialogState::Closed;
    }

    pub async fn is_dialog_open(&self) -> bool {
        self.content_state.lock().await.dialog.is_open()
    }
}

impl Default for AppModel {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[tokio::test]
    async fn typing_does_not_touch_committed_query() {
        let model = AppModel::new();
        model.append_to_search('h').await;
        model.append_to_search('i').await;
        model.backspace_search().await;

        let ui = model.get_ui_state().await;
        assert_eq!(ui.search_input, "h");
        assert!(ui.committed_query.is_empty());

        let criteria = model.commit_search_input().await;
        assert_eq!(criteria, SearchCriteria::new("h", Category::All));
    }

    #[tokio::test]
    async fn category_change_keeps_committed_text() {
        let model = AppModel::new();
        model.update_search_input("dragons".to_string()).await;
        model.commit_search_input().await;
        model.update_search_input("ignored until submit".to_string()).await;

        let criteria = model.set_category(Category::Horror).await;
        assert_eq!(criteria, SearchCriteria::new("dragons", Category::Horror));
    }

    #[tokio::test]
    async fn help_popup_toggles() {
        let model = AppModel::new();
        model.toggle_help_popup().await;
        assert!(model.is_help_popup_open().await);
        model.toggle_help_popup().await;
        assert!(!model.is_help_popup_open().await);
    }
}
