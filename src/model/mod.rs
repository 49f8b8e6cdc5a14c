//! Model module - Application state and data types
//!
//! This module contains all the data structures and state management for the application.
//! It is organized into submodules by responsibility:
//!
//! - `types`: Core type definitions (categories, criteria, book records, UI state)
//! - `content`: Fetch lifecycle state (view state, dialog state, fetch tickets)
//! - `catalog_client`: Book catalog API client and payload decoding
//! - `app_model`: Main application model with state management methods

mod types;
mod content;
mod catalog_client;
mod app_model;

pub use types::{ActiveSection, BookRecord, Category, Cover, SearchCriteria, UiState};

pub use content::{CARD_COLUMNS, ContentState, DialogState, FetchTicket, ViewState};

pub use catalog_client::{BookCatalog, CatalogClient, CatalogError};

pub use app_model::AppModel;
