//! Category tree derivation from document paths.

use std::collections::HashMap;

use serde::{Deserialize, Serialize};

use dochub_model::Document;
use dochub_model::uri::{category_uri, title_case_label};

/// One path-segment level of the documentation hierarchy.
///
/// Categories are synthetic: they exist because at least one document's
/// breadcrumb path passes through them, never because of anything on disk.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Category {
    /// Category URI (`docs://seg1/seg2/...`).
    pub uri: String,
    /// Raw last path segment.
    pub name: String,
    /// Display label (title-cased, separators replaced with spaces).
    pub label: String,
    /// 0 for top-level categories.
    pub depth: usize,
    /// Parent category URI; `None` for top-level categories.
    pub parent_uri: Option<String>,
    /// Child category URIs, deduplicated, in first-seen order.
    pub child_categories: Vec<String>,
    /// URIs of documents whose breadcrumb path equals exactly this
    /// category's path (direct children only).
    pub child_documents: Vec<String>,
    /// Documents in this category and all descendant categories.
    pub document_count: usize,
}

/// Derive the category tree from a flat document list.
///
/// For each document with a non-empty breadcrumb path, every prefix of that
/// path becomes a category; the document itself is attached to the category
/// matching its full path. `document_count` aggregates recursively over
/// descendants. Root-level documents (empty breadcrumbs) create no
/// categories.
#[must_use]
pub fn build_category_tree(documents: &[Document]) -> HashMap<String, Category> {
    let mut categories: HashMap<String, Category> = HashMap::new();

    for document in documents {
        let segments = document.breadcrumb_segments();
        for len in 1..=segments.len() {
            let prefix = &segments[..len];
            let uri = category_uri(prefix);

            if !categories.contains_key(&uri) {
                let name = prefix[len - 1].clone();
                categories.insert(
                    uri.clone(),
                    Category {
                        uri: uri.clone(),
                        label: title_case_label(&name),
                        name,
                        depth: len - 1,
                        parent_uri: (len > 1).then(|| category_uri(&prefix[..len - 1])),
                        child_categories: Vec::new(),
                        child_documents: Vec::new(),
                        document_count: 0,
                    },
                );
            }

            if len > 1 {
                let parent_uri = category_uri(&prefix[..len - 1]);
                if let Some(parent) = categories.get_mut(&parent_uri) {
                    if !parent.child_categories.contains(&uri) {
                        parent.child_categories.push(uri);
                    }
                }
            }
        }
    }

    // Attach each document to the category matching its full breadcrumb path
    for document in documents {
        let segments = document.breadcrumb_segments();
        if segments.is_empty() {
            continue;
        }
        if let Some(category) = categories.get_mut(&category_uri(&segments)) {
            category.child_documents.push(document.uri.clone());
        }
    }

    apply_document_counts(&mut categories);

    tracing::debug!(
        categories = categories.len(),
        documents = documents.len(),
        "built category tree"
    );

    categories
}

/// Fill in `document_count` via memoized recursion over the flat map.
///
/// Cycles are impossible since categories are derived strictly from path
/// depth, so the recursion always terminates.
fn apply_document_counts(categories: &mut HashMap<String, Category>) {
    let mut counts: HashMap<String, usize> = HashMap::new();
    let uris: Vec<String> = categories.keys().cloned().collect();

    for uri in &uris {
        let count = count_subtree(uri, categories, &mut counts);
        if let Some(category) = categories.get_mut(uri) {
            category.document_count = count;
        }
    }
}

fn count_subtree(
    uri: &str,
    categories: &HashMap<String, Category>,
    counts: &mut HashMap<String, usize>,
) -> usize {
    if let Some(&count) = counts.get(uri) {
        return count;
    }
    let Some(category) = categories.get(uri) else {
        return 0;
    };

    let children = category.child_categories.clone();
    let mut count = category.child_documents.len();
    for child in &children {
        count += count_subtree(child, categories, counts);
    }

    counts.insert(uri.to_owned(), count);
    count
}
