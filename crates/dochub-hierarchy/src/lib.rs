//! Category hierarchy and navigation for DocHub.
//!
//! Turns the flat document list into a URI-keyed category tree and answers
//! "where am I / what's around me" queries over it.
//!
//! # Architecture
//!
//! The hierarchy is a flat `HashMap<String, Category>` keyed by category
//! URI rather than a pointer-linked tree: parent/child relationships are
//! URI references, which keeps the structure trivially serializable and
//! makes aggregate counts a simple memoized recursion over child-URI lists.
//!
//! - [`build_category_tree`]: derive the tree from document paths
//! - [`navigate_to_uri`]: produce a [`NavigationContext`] for any URI
//! - [`breadcrumbs_for_uri`]: pure breadcrumb derivation from a URI string
//! - [`table_of_contents`]: the full hierarchy as a recursive tree
//!
//! The tree is built once after documents are (re)loaded; everything else
//! here is a read-only consumer of the resulting snapshot.

mod navigation;
mod toc;
mod tree;

pub use navigation::{
    Breadcrumb, NavChild, NavDirection, NavigationContext, NavigationError, NodeType,
    breadcrumbs_for_uri, find_document, navigate_to_uri,
};
pub use toc::{TocNode, table_of_contents, table_of_contents_cached};
pub use tree::{Category, build_category_tree};
