//! Search result and error types.

use serde::{Deserialize, Serialize};

use dochub_hierarchy::Breadcrumb;

/// Which field caused a result to be included.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum MatchType {
    /// The query matched the document title.
    Title,
    /// The query matched the body text only.
    Content,
    /// The query matched tags or the category field only.
    Metadata,
}

/// One ranked search hit.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SearchResult {
    /// URI of the matched document.
    pub document_uri: String,
    /// Document title.
    pub title: String,
    /// Excerpt around the match, with `**` highlighting when available.
    pub excerpt: String,
    /// Breadcrumb trail for the document URI.
    pub breadcrumbs: Vec<Breadcrumb>,
    /// Category field from the document, if any.
    pub category: Option<String>,
    /// Relevance score, always >= 0.
    pub relevance_score: f64,
    /// Which field matched (title wins over content wins over metadata).
    pub match_type: MatchType,
    /// Document tags; populated by metadata search, empty otherwise.
    #[serde(skip_serializing_if = "Vec::is_empty", default)]
    pub tags: Vec<String>,
}

/// Error returned when a search query cannot be executed.
#[derive(Debug, thiserror::Error)]
pub enum SearchError {
    /// The query could not be compiled as a pattern.
    #[error("Invalid search pattern: {0}")]
    InvalidPattern(String),
}
