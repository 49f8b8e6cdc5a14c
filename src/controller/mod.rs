//! Controller module - Application logic and event handling
//!
//! This module contains the application controller that handles user input,
//! coordinates between the model and view, and drives catalog fetches.
//! It is organized into submodules by responsibility:
//!
//! - `input`: Key event handling
//! - `search`: Search submission, category changes, fetch lifecycle, dialog selection
//! - `thumbnails`: Background thumbnail availability probing

mod input;
mod search;
mod thumbnails;

use std::sync::Arc;
use tokio::sync::Mutex;

use crate::model::{AppModel, BookCatalog, CatalogError};

#[derive(Clone)]
pub struct AppController {
    pub(crate) model: Arc<Mutex<AppModel>>,
    pub(crate) catalog: Arc<dyn BookCatalog>,
}

impl AppController {
    pub fn new(model: Arc<Mutex<AppModel>>, catalog: Arc<dyn BookCatalog>) -> Self {
        Self { model, catalog }
    }

    pub(crate) fn format_error(error: &CatalogError) -> String {
        format!("Failed to fetch books: {}", error)
    }
}
