//! DTOs for the addiction catalog and content endpoints.

use serde::Serialize;

use crate::application::services::{CatalogEntry, CatalogService};
use crate::domain::entities::{AddictionType, Category, ContentRecord};

/// Catalog grouped by category: `{"substance":[..],"behavioral":[..],"emotional":[..]}`.
#[derive(Debug, Serialize)]
pub struct AddictionTypesResponse {
    pub substance: Vec<&'static AddictionType>,
    pub behavioral: Vec<&'static AddictionType>,
    pub emotional: Vec<&'static AddictionType>,
}

impl From<&CatalogService> for AddictionTypesResponse {
    fn from(catalog: &CatalogService) -> Self {
        let mut response = Self {
            substance: Vec::new(),
            behavioral: Vec::new(),
            emotional: Vec::new(),
        };
        for group in catalog.groups() {
            let bucket = match group.category {
                Category::Substance => &mut response.substance,
                Category::Behavioral => &mut response.behavioral,
                Category::Emotional => &mut response.emotional,
            };
            bucket.extend(group.items.iter());
        }
        response
    }
}

/// Catalog entry flattened with its category.
#[derive(Debug, Serialize)]
pub struct AddictionSummary {
    #[serde(flatten)]
    pub addiction: &'static AddictionType,
    pub category: Category,
}

impl From<CatalogEntry> for AddictionSummary {
    fn from(entry: CatalogEntry) -> Self {
        Self {
            addiction: entry.addiction,
            category: entry.category,
        }
    }
}

/// The presentation subset of a [`ContentRecord`].
#[derive(Debug, Serialize)]
pub struct ContentView {
    pub title: String,
    pub reasons: Vec<String>,
    pub methods: Vec<String>,
    pub benefits: Vec<String>,
}

impl From<&ContentRecord> for ContentView {
    fn from(record: &ContentRecord) -> Self {
        Self {
            title: record.title.clone(),
            reasons: record.reasons.clone(),
            methods: record.methods.clone(),
            benefits: record.benefits.clone(),
        }
    }
}

/// Catalog entry plus its loaded content.
#[derive(Debug, Serialize)]
pub struct AddictionDetail {
    #[serde(flatten)]
    pub summary: AddictionSummary,
    pub content: ContentView,
}

/// Search results with the normalized query echoed back.
#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct SearchResponse {
    pub status: &'static str,
    pub data: Vec<AddictionSummary>,
    pub query: String,
    pub total_results: usize,
}
