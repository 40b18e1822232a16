//! Navigation contexts and breadcrumb derivation.

use std::collections::HashMap;

use serde::{Deserialize, Serialize};

use dochub_model::Document;
use dochub_model::uri::{DOCS_ROOT, split_uri, title_case_label};

use crate::tree::Category;

/// Error returned when navigation fails.
#[derive(Debug, thiserror::Error)]
pub enum NavigationError {
    /// The URI resolves to neither a category, a document, nor the root.
    #[error("URI not found: {0}")]
    NotFound(String),
}

/// Kind of node a URI resolves to.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum NodeType {
    /// The hierarchy root.
    Root,
    /// A synthetic category node.
    Category,
    /// A concrete document.
    Document,
}

/// Direction the caller can move from the current node.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum NavDirection {
    /// A parent exists.
    Up,
    /// Children exist.
    Down,
}

/// One breadcrumb entry: display name plus the URI it links to.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct Breadcrumb {
    /// Display name (title-cased path segment).
    pub name: String,
    /// URI of the cumulative path prefix.
    pub uri: String,
}

/// One navigable child of the current node.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct NavChild {
    /// Category or document.
    #[serde(rename = "type")]
    pub node_type: NodeType,
    /// Child URI.
    pub uri: String,
    /// Display name (category label or document title).
    pub name: String,
}

/// Everything a host needs to render "where am I / what's around me".
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct NavigationContext {
    /// The URI that was navigated to (normalized for root aliases).
    pub current_uri: String,
    /// What the URI resolved to.
    pub current_type: NodeType,
    /// Parent URI; `None` only for the root.
    pub parent_uri: Option<String>,
    /// Trail from the first path segment down to the current node.
    pub breadcrumbs: Vec<Breadcrumb>,
    /// Direct children; empty for documents.
    pub children: Vec<NavChild>,
    /// Nodes sharing this node's parent, excluding the node itself.
    pub sibling_count: usize,
    /// Which directions are navigable from here.
    pub navigation_options: Vec<NavDirection>,
}

/// Resolve `uri` against the current snapshot.
///
/// Accepts the root aliases `""`, `"docs"`, and `"docs://"`.
///
/// # Errors
///
/// [`NavigationError::NotFound`] when the URI matches no category, no
/// document, and no root alias.
pub fn navigate_to_uri(
    uri: &str,
    documents: &[Document],
    categories: &HashMap<String, Category>,
) -> Result<NavigationContext, NavigationError> {
    if matches!(uri, "" | "docs" | "docs://") {
        return Ok(root_context(documents, categories));
    }

    if let Some(category) = categories.get(uri) {
        return Ok(category_context(category, documents, categories));
    }

    if let Some(document) = find_document(uri, documents) {
        return Ok(document_context(document, documents, categories));
    }

    Err(NavigationError::NotFound(uri.to_owned()))
}

/// Exact-URI document lookup.
#[must_use]
pub fn find_document<'a>(uri: &str, documents: &'a [Document]) -> Option<&'a Document> {
    documents.iter().find(|document| document.uri == uri)
}

/// Derive breadcrumbs from a URI string alone.
///
/// Pure function of the URI: one entry per cumulative path prefix, names
/// title-cased from the segment. Unknown schemes and empty paths yield an
/// empty trail.
#[must_use]
pub fn breadcrumbs_for_uri(uri: &str) -> Vec<Breadcrumb> {
    let Some((scheme, path)) = split_uri(uri) else {
        return Vec::new();
    };
    if path.is_empty() {
        return Vec::new();
    }

    let segments: Vec<&str> = path.split('/').collect();
    segments
        .iter()
        .enumerate()
        .map(|(idx, segment)| Breadcrumb {
            name: title_case_label(segment),
            uri: format!("{}{}", scheme.prefix(), segments[..=idx].join("/")),
        })
        .collect()
}

fn root_context(
    documents: &[Document],
    categories: &HashMap<String, Category>,
) -> NavigationContext {
    let children = root_children(documents, categories);
    let navigation_options = options(false, !children.is_empty());

    NavigationContext {
        current_uri: DOCS_ROOT.to_owned(),
        current_type: NodeType::Root,
        parent_uri: None,
        breadcrumbs: Vec::new(),
        children,
        sibling_count: 0,
        navigation_options,
    }
}

fn category_context(
    category: &Category,
    documents: &[Document],
    categories: &HashMap<String, Category>,
) -> NavigationContext {
    let children = category_children(category, documents, categories);
    let navigation_options = options(true, !children.is_empty());

    NavigationContext {
        current_uri: category.uri.clone(),
        current_type: NodeType::Category,
        parent_uri: Some(category.parent_uri.clone().unwrap_or_else(|| DOCS_ROOT.to_owned())),
        breadcrumbs: breadcrumbs_for_uri(&category.uri),
        sibling_count: sibling_count(&category.uri, category.parent_uri.as_deref(), documents, categories),
        children,
        navigation_options,
    }
}

fn document_context(
    document: &Document,
    documents: &[Document],
    categories: &HashMap<String, Category>,
) -> NavigationContext {
    let segments = document.breadcrumb_segments();
    let parent_uri = if segments.is_empty() {
        None
    } else {
        Some(dochub_model::uri::category_uri(&segments))
    };

    NavigationContext {
        current_uri: document.uri.clone(),
        current_type: NodeType::Document,
        breadcrumbs: breadcrumbs_for_uri(&document.uri),
        sibling_count: sibling_count(&document.uri, parent_uri.as_deref(), documents, categories),
        parent_uri: Some(parent_uri.unwrap_or_else(|| DOCS_ROOT.to_owned())),
        children: Vec::new(),
        navigation_options: options(true, false),
    }
}

/// Children of the root: top-level categories, then root-level documents.
///
/// Categories are sorted by URI for determinism (the backing map has
/// arbitrary iteration order); documents keep input order.
fn root_children(
    documents: &[Document],
    categories: &HashMap<String, Category>,
) -> Vec<NavChild> {
    let mut top_level: Vec<&Category> = categories
        .values()
        .filter(|category| category.depth == 0)
        .collect();
    top_level.sort_by(|a, b| a.uri.cmp(&b.uri));

    let mut children: Vec<NavChild> = top_level
        .into_iter()
        .map(|category| NavChild {
            node_type: NodeType::Category,
            uri: category.uri.clone(),
            name: category.label.clone(),
        })
        .collect();

    children.extend(
        documents
            .iter()
            .filter(|document| document.breadcrumb_segments().is_empty())
            .map(|document| NavChild {
                node_type: NodeType::Document,
                uri: document.uri.clone(),
                name: document.title.clone(),
            }),
    );

    children
}

/// Direct children of a category: child categories in stored order, then
/// direct child documents.
fn category_children(
    category: &Category,
    documents: &[Document],
    categories: &HashMap<String, Category>,
) -> Vec<NavChild> {
    let mut children: Vec<NavChild> = category
        .child_categories
        .iter()
        .map(|uri| NavChild {
            node_type: NodeType::Category,
            uri: uri.clone(),
            name: categories
                .get(uri)
                .map_or_else(|| uri.clone(), |child| child.label.clone()),
        })
        .collect();

    children.extend(category.child_documents.iter().map(|uri| NavChild {
        node_type: NodeType::Document,
        uri: uri.clone(),
        name: find_document(uri, documents)
            .map_or_else(|| uri.clone(), |document| document.title.clone()),
    }));

    children
}

/// Nodes sharing `parent_uri` with the current node, excluding it.
fn sibling_count(
    current_uri: &str,
    parent_uri: Option<&str>,
    documents: &[Document],
    categories: &HashMap<String, Category>,
) -> usize {
    let peers = match parent_uri {
        Some(parent) => match categories.get(parent) {
            Some(category) => category_children(category, documents, categories),
            None => Vec::new(),
        },
        None => root_children(documents, categories),
    };

    peers.iter().filter(|child| child.uri != current_uri).count()
}

fn options(up: bool, down: bool) -> Vec<NavDirection> {
    let mut directions = Vec::new();
    if up {
        directions.push(NavDirection::Up);
    }
    if down {
        directions.push(NavDirection::Down);
    }
    directions
}
