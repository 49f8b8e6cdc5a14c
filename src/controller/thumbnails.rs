//! Background thumbnail probing, the terminal stand-in for a broken-image swap

use futures::future::join_all;

use crate::model::{BookRecord, FetchTicket};
use super::AppController;

impl AppController {
    /// Probe every thumbnail of a freshly loaded result set and mark the ones that fail.
    /// Marks for a superseded fetch are dropped by the model.
    pub(crate) async fn verify_thumbnails(&self, ticket: FetchTicket, books: Vec<BookRecord>) {
        let probes = books.iter().filter_map(|book| {
            let url = book.thumbnail_url.as_deref()?;
            let catalog = self.catalog.clone();
            Some(async move { (book.id.as_str(), catalog.thumbnail_available(url).await) })
        });

        let broken: Vec<&str> = join_all(probes)
            .await
            .into_iter()
            .filter_map(|(id, available)| (!available).then_some(id))
            .collect();

        if broken.is_empty() {
            return;
        }

        let model = self.model.lock().await;
        for id in broken {
            if model.mark_thumbnail_broken(ticket, id).await {
                tracing::debug!(id, "Thumbnail unavailable, using placeholder");
            }
        }
    }
}
