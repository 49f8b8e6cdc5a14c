//! Search-related controller methods (query, category, fetch, dialog)

use tokio::task::JoinHandle;

use crate::model::{BookRecord, Category, FetchTicket, SearchCriteria};
use crate::{log_search_outcome, log_search_started};
use super::AppController;

impl AppController {
    /// Replace the pending search text. Nothing is fetched until submit.
    pub async fn update_free_text(&self, text: impl Into<String>) {
        let model = self.model.lock().await;
        model.update_search_input(text.into()).await;
    }

    /// Change the category; re-fetches right away when a query is already committed
    pub async fn update_category(&self, category: Category) -> Option<JoinHandle<()>> {
        let criteria = {
            let model = self.model.lock().await;
            model.set_category(category).await
        };
        tracing::debug!(category = category.value(), "Category changed");

        if criteria.free_text.is_empty() {
            return None;
        }
        Some(self.start_fetch(criteria).await)
    }

    /// Commit the pending text as the active query and fetch it if non-empty
    pub async fn submit_search(&self) -> Option<JoinHandle<()>> {
        let criteria = {
            let model = self.model.lock().await;
            model.commit_search_input().await
        };

        if criteria.free_text.is_empty() {
            tracing::debug!("Empty query submitted, nothing to fetch");
            return None;
        }
        Some(self.start_fetch(criteria).await)
    }

    /// Commit `query` without going through the search box (used for the startup query)
    pub async fn search_for(&self, query: &str) -> Option<JoinHandle<()>> {
        let criteria = {
            let model = self.model.lock().await;
            model.set_committed_query(query.to_string()).await
        };

        if criteria.free_text.is_empty() {
            return None;
        }
        Some(self.start_fetch(criteria).await)
    }

    /// Move to Loading under a fresh ticket, then run the request in the background.
    /// Loading is visible before this returns.
    async fn start_fetch(&self, criteria: SearchCriteria) -> JoinHandle<()> {
        let ticket = {
            let model = self.model.lock().await;
            model.begin_fetch().await
        };

        let controller = self.clone();
        tokio::spawn(async move {
            controller.fetch_results(ticket, criteria).await;
        })
    }

    /// One catalog call, applied only if `ticket` is still current. Thumbnail
    /// probing for the new results runs on its own task; its handle is returned.
    pub(crate) async fn fetch_results(
        &self,
        ticket: FetchTicket,
        criteria: SearchCriteria,
    ) -> Option<JoinHandle<()>> {
        log_search_started!(ticket, criteria);

        let result = self.catalog.search(&criteria).await;
        log_search_outcome!(ticket, result);

        let probe_targets = result.as_ref().ok().cloned();
        let outcome = result.map_err(|e| Self::format_error(&e));

        let applied = {
            let model = self.model.lock().await;
            model.finish_fetch(ticket, outcome).await
        };

        if !applied {
            tracing::debug!(?ticket, query = %criteria.free_text, "Discarding stale search response");
            return None;
        }

        let books = probe_targets.filter(|books| books.iter().any(|b| b.thumbnail_url.is_some()))?;
        let controller = self.clone();
        Some(tokio::spawn(async move {
            controller.verify_thumbnails(ticket, books).await;
        }))
    }

    /// Open the dialog for `record`; ignored unless it is in the current result list
    pub async fn select_book(&self, record: &BookRecord) -> bool {
        let model = self.model.lock().await;
        let opened = model.open_dialog(record).await;
        if !opened {
            tracing::debug!(id = %record.id, "Ignoring selection of a book not in the current results");
        }
        opened
    }

    pub async fn open_highlighted_book(&self) -> bool {
        let highlighted = {
            let model = self.model.lock().await;
            model.get_highlighted_book().await
        };
        match highlighted {
            Some(record) => self.select_book(&record).await,
            None => false,
        }
    }

    pub async fn close_dialog(&self) {
        let model = self.model.lock().await;
        model.close_dialog().await;
    }
}
