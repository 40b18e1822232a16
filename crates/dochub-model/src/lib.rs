//! Document model and URI conventions for the DocHub engine.
//!
//! This crate provides the shared vocabulary of the engine:
//!
//! - [`Document`]: one parsed documentation file as produced by the
//!   (out-of-scope) scanning layer
//! - [`Scheme`] and the URI helpers in [`uri`]: the `docs://` / `api://`
//!   addressing convention and label formatting
//!
//! Everything here is pure data plus string functions; no I/O.

mod document;
pub mod uri;

pub use document::{Document, DocumentSummary};
pub use uri::Scheme;
