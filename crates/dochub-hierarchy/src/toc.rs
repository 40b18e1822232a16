//! Table-of-contents tree derivation.

use std::collections::HashMap;

use serde::{Deserialize, Serialize};

use dochub_cache::{Cache, CacheExt};
use dochub_model::Document;
use dochub_model::uri::DOCS_ROOT;

use crate::navigation::NodeType;
use crate::tree::Category;

/// One node of the rendered table of contents.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct TocNode {
    /// Root, category, or document.
    #[serde(rename = "type")]
    pub node_type: NodeType,
    /// Node URI.
    pub uri: String,
    /// Display name (category label or document title).
    pub name: String,
    /// Documents under this node; `None` for document nodes.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub document_count: Option<usize>,
    /// Child nodes in display order.
    #[serde(skip_serializing_if = "Vec::is_empty", default)]
    pub children: Vec<TocNode>,
}

/// Build the full table of contents as a recursive tree.
///
/// The root lists top-level categories sorted by URI, then root-level
/// documents in input order. Within each category, subcategories come first
/// (stored order), then direct documents. `max_depth` limits how many
/// category levels are expanded below the root; `None` means unlimited.
#[must_use]
pub fn table_of_contents(
    documents: &[Document],
    categories: &HashMap<String, Category>,
    max_depth: Option<usize>,
) -> TocNode {
    let mut top_level: Vec<&Category> = categories
        .values()
        .filter(|category| category.depth == 0)
        .collect();
    top_level.sort_by(|a, b| a.uri.cmp(&b.uri));

    let mut children: Vec<TocNode> = top_level
        .into_iter()
        .map(|category| category_node(category, documents, categories, max_depth))
        .collect();

    children.extend(
        documents
            .iter()
            .filter(|document| document.breadcrumb_segments().is_empty())
            .map(document_node),
    );

    TocNode {
        node_type: NodeType::Root,
        uri: DOCS_ROOT.to_owned(),
        name: "Documentation".to_owned(),
        document_count: Some(documents.len()),
        children,
    }
}

fn category_node(
    category: &Category,
    documents: &[Document],
    categories: &HashMap<String, Category>,
    remaining_depth: Option<usize>,
) -> TocNode {
    let descend = remaining_depth != Some(0);
    let next_depth = remaining_depth.map(|depth| depth.saturating_sub(1));

    let mut children = Vec::new();
    if descend {
        children.extend(category.child_categories.iter().filter_map(|uri| {
            categories
                .get(uri)
                .map(|child| category_node(child, documents, categories, next_depth))
        }));
        children.extend(
            category
                .child_documents
                .iter()
                .filter_map(|uri| crate::navigation::find_document(uri, documents))
                .map(document_node),
        );
    }

    TocNode {
        node_type: NodeType::Category,
        uri: category.uri.clone(),
        name: category.label.clone(),
        document_count: Some(category.document_count),
        children,
    }
}

fn document_node(document: &Document) -> TocNode {
    TocNode {
        node_type: NodeType::Document,
        uri: document.uri.clone(),
        name: document.title.clone(),
        document_count: None,
        children: Vec::new(),
    }
}

/// Read-through cached variant of [`table_of_contents`].
///
/// Keyed by depth limit; the host is expected to clear the cache (or
/// invalidate the `toc:` prefix) when the document list is swapped.
pub fn table_of_contents_cached(
    cache: &dyn Cache,
    documents: &[Document],
    categories: &HashMap<String, Category>,
    max_depth: Option<usize>,
) -> TocNode {
    let key = match max_depth {
        Some(depth) => format!("toc:{depth}"),
        None => "toc:all".to_owned(),
    };

    if let Some(cached) = cache.get_json::<TocNode>(&key, None) {
        tracing::debug!(key, "table of contents cache hit");
        return cached;
    }

    let toc = table_of_contents(documents, categories, max_depth);
    cache.set_json(&key, &toc, None, None);
    toc
}
