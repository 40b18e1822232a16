//! Ranked search over the document collection.

use std::collections::HashMap;
use std::sync::Arc;

use dochub_cache::{Cache, CacheExt};
use dochub_hierarchy::{Category, breadcrumbs_for_uri};
use dochub_model::Document;

use crate::excerpt::highlighted_excerpt;
use crate::pattern::{Matcher, PatternMode};
use crate::result::{MatchType, SearchError, SearchResult};

/// Relevance weights and excerpt tuning.
///
/// The weights are monotonic by construction: a title match always outranks
/// a body-only match of the same document, and more body occurrences never
/// lower a score.
#[derive(Clone, Debug)]
pub struct SearchConfig {
    /// Score contribution of a title match.
    pub title_weight: f64,
    /// Score contribution per body occurrence.
    pub content_weight: f64,
    /// Body occurrences counted at most this many times.
    pub max_content_occurrences: usize,
    /// Score contribution of a tag/category match.
    pub metadata_weight: f64,
    /// Chars of context on each side of a highlighted match.
    pub context_chars: usize,
    /// Fallback excerpt length when the body has no match to highlight.
    pub excerpt_length: usize,
}

impl Default for SearchConfig {
    fn default() -> Self {
        Self {
            title_weight: 10.0,
            content_weight: 1.0,
            max_content_occurrences: 5,
            metadata_weight: 2.0,
            context_chars: 60,
            excerpt_length: 200,
        }
    }
}

/// Search engine over an in-memory document collection.
///
/// Stateless apart from its config and the injected cache; the document
/// list and category map are passed per call so the host controls snapshot
/// lifetime.
pub struct SearchEngine {
    config: SearchConfig,
    cache: Arc<dyn Cache>,
}

impl SearchEngine {
    #[must_use]
    pub fn new(cache: Arc<dyn Cache>) -> Self {
        Self::with_config(SearchConfig::default(), cache)
    }

    #[must_use]
    pub fn with_config(config: SearchConfig, cache: Arc<dyn Cache>) -> Self {
        Self { config, cache }
    }

    /// Free-text search across titles, bodies, and metadata.
    ///
    /// The empty query returns no results. When `category_filter` is given,
    /// only documents whose `category` field equals the filter exactly are
    /// considered. Results are scored additively (title, then capped body
    /// occurrences, then metadata), sorted by descending score with input
    /// order preserved on ties, and truncated to `limit`. Result sets are
    /// cached read-through; the host clears the `search:` prefix when the
    /// document list is swapped.
    ///
    /// The category map is part of the call contract (hosts hold both
    /// snapshots together) but is not consulted for filtering.
    ///
    /// # Errors
    ///
    /// [`SearchError::InvalidPattern`] when `mode` is
    /// [`PatternMode::Regex`] and the query does not compile.
    pub fn search_content(
        &self,
        query: &str,
        mode: PatternMode,
        documents: &[Document],
        _categories: &HashMap<String, Category>,
        limit: usize,
        category_filter: Option<&str>,
    ) -> Result<Vec<SearchResult>, SearchError> {
        if query.is_empty() {
            return Ok(Vec::new());
        }

        let matcher = Matcher::compile(query, mode)?;

        let cache_key = format!(
            "search:{}:{}:{}:{query}",
            mode.as_str(),
            category_filter.unwrap_or(""),
            limit,
        );
        if let Some(cached) = self.cache.get_json::<Vec<SearchResult>>(&cache_key, None) {
            tracing::debug!(key = cache_key, "search cache hit");
            return Ok(cached);
        }

        let mut results: Vec<SearchResult> = documents
            .iter()
            .filter(|document| {
                category_filter
                    .is_none_or(|filter| document.category.as_deref() == Some(filter))
            })
            .filter_map(|document| self.score_document(document, &matcher))
            .collect();

        results.sort_by(|a, b| b.relevance_score.total_cmp(&a.relevance_score));
        results.truncate(limit);

        tracing::debug!(query, results = results.len(), "content search");
        self.cache.set_json(&cache_key, &results, None, None);
        Ok(results)
    }

    /// Tag/category filter search.
    ///
    /// Tags combine with OR; the tag and category dimensions combine with
    /// AND. Both compare by exact equality. Every hit scores a flat 1.0
    /// with metadata match type and its tags populated. Input order is
    /// preserved.
    #[must_use]
    pub fn search_by_metadata(
        &self,
        tags: &[String],
        category: Option<&str>,
        documents: &[Document],
        limit: usize,
    ) -> Vec<SearchResult> {
        if tags.is_empty() && category.is_none() {
            return Vec::new();
        }

        let mut results: Vec<SearchResult> = documents
            .iter()
            .filter(|document| {
                let tag_hit =
                    tags.is_empty() || document.tags.iter().any(|tag| tags.contains(tag));
                let category_hit = category
                    .is_none_or(|wanted| document.category.as_deref() == Some(wanted));
                tag_hit && category_hit
            })
            .map(|document| SearchResult {
                document_uri: document.uri.clone(),
                title: document.title.clone(),
                excerpt: document.excerpt(self.config.excerpt_length),
                breadcrumbs: breadcrumbs_for_uri(&document.uri),
                category: document.category.clone(),
                relevance_score: 1.0,
                match_type: MatchType::Metadata,
                tags: document.tags.clone(),
            })
            .collect();

        results.truncate(limit);
        results
    }

    fn score_document(&self, document: &Document, matcher: &Matcher) -> Option<SearchResult> {
        let title_hit = matcher.is_match(&document.title);
        let occurrences =
            matcher.count_occurrences(&document.content, self.config.max_content_occurrences);
        let metadata_hit = document.tags.iter().any(|tag| matcher.is_match(tag))
            || document
                .category
                .as_deref()
                .is_some_and(|category| matcher.is_match(category));

        if !title_hit && occurrences == 0 && !metadata_hit {
            return None;
        }

        let mut score = 0.0;
        if title_hit {
            score += self.config.title_weight;
        }
        #[allow(clippy::cast_precision_loss)]
        {
            score += self.config.content_weight * occurrences as f64;
        }
        if metadata_hit {
            score += self.config.metadata_weight;
        }

        let match_type = if title_hit {
            MatchType::Title
        } else if occurrences > 0 {
            MatchType::Content
        } else {
            MatchType::Metadata
        };

        let excerpt = highlighted_excerpt(&document.content, matcher, self.config.context_chars)
            .unwrap_or_else(|| document.excerpt(self.config.excerpt_length));

        Some(SearchResult {
            document_uri: document.uri.clone(),
            title: document.title.clone(),
            excerpt,
            breadcrumbs: breadcrumbs_for_uri(&document.uri),
            category: document.category.clone(),
            relevance_score: score,
            match_type,
            tags: Vec::new(),
        })
    }
}
