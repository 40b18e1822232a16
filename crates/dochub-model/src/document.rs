//! Parsed document model.

use std::path::PathBuf;

use serde::{Deserialize, Serialize};

/// One parsed documentation file.
///
/// Produced by the scanning/parsing layer and treated as immutable by the
/// engine. The document list is replaced wholesale when the source tree is
/// rescanned.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Document {
    /// Globally unique URI (`docs://...` or `api://...`).
    pub uri: String,
    /// Document title (resolved by the parsing layer).
    pub title: String,
    /// Raw body text with front matter already parsed out where possible.
    pub content: String,
    /// Metadata tags in original order.
    pub tags: Vec<String>,
    /// Category from front matter, if any.
    pub category: Option<String>,
    /// Path relative to the scanned root; drives breadcrumb derivation.
    pub relative_path: PathBuf,
    /// Source file modification time (Unix timestamp).
    pub last_modified: f64,
    /// Source file size in bytes.
    pub size_bytes: u64,
}

/// Listing-friendly projection of a [`Document`] (everything but the body).
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct DocumentSummary {
    /// Document URI.
    pub uri: String,
    /// Document title.
    pub title: String,
    /// Metadata tags.
    pub tags: Vec<String>,
    /// Category, if any.
    pub category: Option<String>,
    /// Source file size in bytes.
    pub size_bytes: u64,
    /// Source file modification time (Unix timestamp).
    pub last_modified: f64,
}

impl Document {
    /// Path segments leading to this document, excluding the filename.
    ///
    /// Empty for root-level documents. Every non-empty prefix of this list
    /// corresponds to a category in the built tree.
    #[must_use]
    pub fn breadcrumb_segments(&self) -> Vec<String> {
        let mut segments: Vec<String> = self
            .relative_path
            .components()
            .map(|c| c.as_os_str().to_string_lossy().into_owned())
            .collect();
        segments.pop();
        segments
    }

    /// First paragraph of the content, truncated at a word boundary.
    ///
    /// A leading front-matter block (`---` fences) is stripped if the
    /// parsing layer left one behind. When the paragraph exceeds
    /// `max_length` characters it is cut at the last word boundary and
    /// suffixed with `...`.
    #[must_use]
    pub fn excerpt(&self, max_length: usize) -> String {
        let body = strip_front_matter(&self.content);
        let paragraph = body
            .trim_start()
            .split("\n\n")
            .next()
            .unwrap_or("")
            .trim();

        if paragraph.chars().count() <= max_length {
            return paragraph.to_owned();
        }

        let cut: String = paragraph.chars().take(max_length).collect();
        let cut = match cut.rfind(' ') {
            Some(idx) => &cut[..idx],
            None => cut.as_str(),
        };
        format!("{}...", cut.trim_end())
    }

    /// Listing projection without the body text.
    #[must_use]
    pub fn summary(&self) -> DocumentSummary {
        DocumentSummary {
            uri: self.uri.clone(),
            title: self.title.clone(),
            tags: self.tags.clone(),
            category: self.category.clone(),
            size_bytes: self.size_bytes,
            last_modified: self.last_modified,
        }
    }
}

/// Strip a leading `---` front-matter fence pair, if present.
///
/// Returns the content unchanged when there is no opening fence on the first
/// line or no closing fence at all.
fn strip_front_matter(content: &str) -> &str {
    let mut lines = content.split_inclusive('\n');
    let Some(first) = lines.next() else {
        return content;
    };
    if first.trim_end() != "---" {
        return content;
    }

    let mut offset = first.len();
    for line in lines {
        offset += line.len();
        if line.trim_end() == "---" {
            return &content[offset..];
        }
    }
    content
}
