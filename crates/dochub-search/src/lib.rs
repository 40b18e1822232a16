//! Ranked search for DocHub.
//!
//! Substring/regex matching over titles, bodies, and metadata with additive
//! relevance scoring, highlighted excerpts, and read-through result caching.
//! No inverted index: the collection is small enough that a linear scan per
//! query, memoized through the cache, stays well under interactive latency.
//!
//! - [`SearchEngine::search_content`]: free-text search with ranking
//! - [`SearchEngine::search_by_metadata`]: tag/category filter search
//! - [`all_tags`] / [`tag_counts`]: tag aggregation for listings
//!
//! Queries are literal substrings by default; regex syntax is only compiled
//! under an explicit [`PatternMode::Regex`] opt-in, and compilation failures
//! surface as [`SearchError::InvalidPattern`] rather than panics.

mod engine;
mod excerpt;
mod pattern;
mod result;
mod tags;

pub use engine::{SearchConfig, SearchEngine};
pub use pattern::PatternMode;
pub use result::{MatchType, SearchError, SearchResult};
pub use tags::{TagCount, all_tags, tag_counts};
