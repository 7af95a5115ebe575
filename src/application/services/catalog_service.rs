//! Catalog lookup and search over the static addiction categories.

use crate::domain::entities::{AddictionType, CATALOG, Category, CategoryGroup};
use crate::error::AppError;

/// Minimum trimmed length, in characters, of a search query.
pub const MIN_QUERY_CHARS: usize = 2;

/// A catalog entry together with the category it belongs to.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CatalogEntry {
    pub category: Category,
    pub addiction: &'static AddictionType,
}

/// Matches for a validated search term.
#[derive(Debug, Clone)]
pub struct SearchResults {
    /// Lowercased, trimmed query actually matched against.
    pub term: String,
    pub matches: Vec<CatalogEntry>,
}

/// Read-only service over a category catalog.
#[derive(Debug, Clone)]
pub struct CatalogService {
    groups: &'static [CategoryGroup],
}

impl Default for CatalogService {
    fn default() -> Self {
        Self::new()
    }
}

impl CatalogService {
    /// Creates a service over the built-in [`CATALOG`].
    pub fn new() -> Self {
        Self::with_groups(CATALOG)
    }

    pub fn with_groups(groups: &'static [CategoryGroup]) -> Self {
        Self { groups }
    }

    /// All groups in display order.
    pub fn groups(&self) -> &'static [CategoryGroup] {
        self.groups
    }

    /// Finds the entry whose id equals `id` exactly.
    pub fn find(&self, id: &str) -> Option<CatalogEntry> {
        self.entries().find(|entry| entry.addiction.id == id)
    }

    /// Case-insensitive substring search on entry name or id.
    ///
    /// # Errors
    ///
    /// Returns [`AppError::BadRequest`] if the trimmed query is shorter than
    /// [`MIN_QUERY_CHARS`].
    pub fn search(&self, query: &str) -> Result<SearchResults, AppError> {
        let trimmed = query.trim();
        if trimmed.chars().count() < MIN_QUERY_CHARS {
            return Err(AppError::bad_request(format!(
                "Search query must be at least {MIN_QUERY_CHARS} characters"
            )));
        }

        let term = trimmed.to_lowercase();
        let matches = self
            .entries()
            .filter(|entry| {
                entry.addiction.name.to_lowercase().contains(&term)
                    || entry.addiction.id.contains(&term)
            })
            .collect();

        Ok(SearchResults { term, matches })
    }

    pub fn entries(&self) -> impl Iterator<Item = CatalogEntry> + '_ {
        self.groups.iter().flat_map(|group| {
            group.items.iter().map(move |addiction| CatalogEntry {
                category: group.category,
                addiction,
            })
        })
    }
}
