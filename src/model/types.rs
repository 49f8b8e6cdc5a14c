//! Core type definitions for the application

use std::collections::HashSet;

/// Which part of the UI currently receives key input
#[derive(Clone, Copy, Debug, PartialEq, Eq, Default)]
pub enum ActiveSection {
    #[default]
    Search,
    Category,
    Results,
}

impl ActiveSection {
    pub fn next(self) -> Self {
        match self {
            ActiveSection::Search => ActiveSection::Category,
            ActiveSection::Category => ActiveSection::Results,
            ActiveSection::Results => ActiveSection::Search,
        }
    }

    pub fn prev(self) -> Self {
        match self {
            ActiveSection::Search => ActiveSection::Results,
            ActiveSection::Category => ActiveSection::Search,
            ActiveSection::Results => ActiveSection::Category,
        }
    }
}

/// Subject filter applied on top of the free-text query
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Default)]
pub enum Category {
    #[default]
    All,
    Adventure,
    Documentary,
    Fiction,
    NonFiction,
    Horror,
    Romance,
    SciFi,
}

impl Category {
    pub const ALL: [Category; 8] = [
        Category::All,
        Category::Adventure,
        Category::Documentary,
        Category::Fiction,
        Category::NonFiction,
        Category::Horror,
        Category::Romance,
        Category::SciFi,
    ];

    /// Identifier sent to the catalog as `subject:<value>`
    pub fn value(self) -> &'static str {
        match self {
            Category::All => "all",
            Category::Adventure => "adventure",
            Category::Documentary => "documentary",
            Category::Fiction => "fiction",
            Category::NonFiction => "nonfiction",
            Category::Horror => "horror",
            Category::Romance => "romance",
            Category::SciFi => "scifi",
        }
    }

    pub fn label(self) -> &'static str {
        match self {
            Category::All => "All Categories",
            Category::Adventure => "Adventure",
            Category::Documentary => "Documentary",
            Category::Fiction => "Fiction",
            Category::NonFiction => "Non-Fiction",
            Category::Horror => "Horror",
            Category::Romance => "Romance",
            Category::SciFi => "Sci-Fi",
        }
    }

    fn position(self) -> usize {
        Self::ALL.iter().position(|c| *c == self).unwrap_or(0)
    }

    pub fn next(self) -> Self {
        Self::ALL[(self.position() + 1) % Self::ALL.len()]
    }

    pub fn prev(self) -> Self {
        Self::ALL[(self.position() + Self::ALL.len() - 1) % Self::ALL.len()]
    }
}

/// The committed search input that produces exactly one fetch
#[derive(Clone, Debug, PartialEq, Eq, Default)]
pub struct SearchCriteria {
    pub free_text: String,
    pub category: Category,
}

impl SearchCriteria {
    pub fn new(free_text: impl Into<String>, category: Category) -> Self {
        Self {
            free_text: free_text.into(),
            category,
        }
    }
}

/// One book's displayable metadata, as returned by the catalog
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct BookRecord {
    pub id: String,
    pub title: String,
    pub thumbnail_url: Option<String>,
    pub description: Option<String>,
}

/// What to draw in place of a record's cover image
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Cover<'a> {
    Remote(&'a str),
    Placeholder,
}

impl BookRecord {
    /// Resolve the cover, substituting the placeholder for missing or broken thumbnails
    pub fn cover<'a>(&'a self, broken: &HashSet<String>) -> Cover<'a> {
        match self.thumbnail_url.as_deref() {
            Some(url) if !broken.contains(&self.id) => Cover::Remote(url),
            _ => Cover::Placeholder,
        }
    }
}

/// UI state for the application
#[derive(Clone, Debug, Default)]
pub struct UiState {
    pub active_section: ActiveSection,
    /// Text in the search box, not yet submitted
    pub search_input: String,
    /// Text of the last submit; category changes re-fetch with this
    pub committed_query: String,
    pub category: Category,
    pub show_help_popup: bool,
}

impl UiState {
    pub fn active_criteria(&self) -> SearchCriteria {
        SearchCriteria::new(self.committed_query.clone(), self.category)
    }
}
