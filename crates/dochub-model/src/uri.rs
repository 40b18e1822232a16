//! URI scheme parsing and label formatting.
//!
//! Documents and categories are addressed by URIs of the form
//! `docs://seg1/seg2/...` (or `api://` for API-operation resources).
//! The scheme and the label title-casing convention are the only
//! wire-visible formatting contracts the host must preserve.

use serde::{Deserialize, Serialize};

/// Root URI of the documentation hierarchy.
pub const DOCS_ROOT: &str = "docs://";

/// URI scheme distinguishing resource kinds.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Scheme {
    /// Document-hierarchy resources (`docs://`).
    Docs,
    /// API-operation resources (`api://`).
    Api,
}

impl Scheme {
    /// The `scheme://` prefix for this scheme.
    #[must_use]
    pub fn prefix(self) -> &'static str {
        match self {
            Self::Docs => "docs://",
            Self::Api => "api://",
        }
    }
}

/// Split a URI into its scheme and slash-separated path.
///
/// Returns `None` for URIs with an unknown scheme. The path may be empty
/// (e.g., for `"docs://"`).
#[must_use]
pub fn split_uri(uri: &str) -> Option<(Scheme, &str)> {
    for scheme in [Scheme::Docs, Scheme::Api] {
        if let Some(path) = uri.strip_prefix(scheme.prefix()) {
            return Some((scheme, path.trim_matches('/')));
        }
    }
    None
}

/// Build the category URI for a breadcrumb prefix.
///
/// # Example
///
/// ```
/// use dochub_model::uri::category_uri;
///
/// let segments = ["guides".to_owned(), "advanced".to_owned()];
/// assert_eq!(category_uri(&segments), "docs://guides/advanced");
/// ```
#[must_use]
pub fn category_uri(segments: &[String]) -> String {
    format!("{DOCS_ROOT}{}", segments.join("/"))
}

/// Turn a path segment into a display label.
///
/// Hyphens and underscores become spaces and each word is capitalized:
/// `"getting-started"` becomes `"Getting Started"`.
#[must_use]
pub fn title_case_label(segment: &str) -> String {
    segment
        .replace(['-', '_'], " ")
        .split_whitespace()
        .map(|word| {
            let mut chars = word.chars();
            match chars.next() {
                None => String::new(),
                Some(first) => first.to_uppercase().chain(chars).collect(),
            }
        })
        .collect::<Vec<_>>()
        .join(" ")
}
