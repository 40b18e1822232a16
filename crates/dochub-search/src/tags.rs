//! Tag aggregation across the document collection.

use std::collections::BTreeMap;

use serde::{Deserialize, Serialize};

use dochub_model::Document;

/// One tag and the number of documents carrying it.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct TagCount {
    pub tag: String,
    pub document_count: usize,
}

/// Distinct tags across the collection, sorted alphabetically.
///
/// When `category` is given, only documents whose `category` field equals it
/// exactly contribute tags; a category matching no documents yields an empty
/// list.
#[must_use]
pub fn all_tags(documents: &[Document], category: Option<&str>) -> Vec<String> {
    tag_counts(documents, category)
        .into_iter()
        .map(|entry| entry.tag)
        .collect()
}

/// Like [`all_tags`], but with per-tag document counts.
///
/// A document carrying the same tag twice still counts once.
#[must_use]
pub fn tag_counts(documents: &[Document], category: Option<&str>) -> Vec<TagCount> {
    let mut counts: BTreeMap<&str, usize> = BTreeMap::new();

    for document in documents {
        let in_category =
            category.is_none_or(|wanted| document.category.as_deref() == Some(wanted));
        if !in_category {
            continue;
        }
        let mut seen: Vec<&str> = Vec::new();
        for tag in &document.tags {
            if !seen.contains(&tag.as_str()) {
                seen.push(tag);
                *counts.entry(tag).or_insert(0) += 1;
            }
        }
    }

    counts
        .into_iter()
        .map(|(tag, document_count)| TagCount {
            tag: tag.to_owned(),
            document_count,
        })
        .collect()
}
