//! Read-side search and category filtering.
//!
//! A pure projection over the collection: nothing here affects what is
//! stored, only what the grid shows.

use crate::event::{Category, Event};

/// Category filter choice.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum CategoryFilter {
    #[default]
    All,
    Only(Category),
}

/// A search term plus a category filter.
#[derive(Debug, Clone, Default)]
pub struct EventQuery {
    /// Case-insensitive substring matched against title and description.
    /// Empty matches everything.
    pub search: String,
    pub category: CategoryFilter,
}

impl EventQuery {
    pub fn matches(&self, event: &Event) -> bool {
        let category_ok = match self.category {
            CategoryFilter::All => true,
            CategoryFilter::Only(category) => event.category == category,
        };

        let needle = self.search.to_lowercase();
        let search_ok = event.title.to_lowercase().contains(&needle)
            || event
                .description
                .as_deref()
                .is_some_and(|d| d.to_lowercase().contains(&needle));

        category_ok && search_ok
    }
}
