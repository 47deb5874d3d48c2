//! Block document model for Tessera.
//!
//! A [`Document`] is an ordered sequence of typed blocks (headings, paragraphs,
//! forms). This crate owns everything that keeps that sequence consistent:
//!
//! - [`Document`]: the container and its only mutation surface
//!   (`add_block`, `delete_block`, `replace_block_content`, `reorder`)
//! - [`EditSession`]: single-block editing through a private draft
//! - [`reorder`]: pure move computation for drag-and-drop
//! - [`export`]: read-only projection into text lines
//!
//! # Invariants
//!
//! Whenever no call is in progress:
//! - block ids are non-empty and unique, and never change
//! - `order` values are exactly `0..len` in display sequence
//! - form field sets are fixed at block creation
//!
//! Every operation is synchronous, does no I/O, and is all-or-nothing.

mod document;
mod error;
pub mod export;
pub mod reorder;
mod session;

pub use document::{Document, DocumentBuilder};
pub use error::DocError;
pub use session::{Draft, DraftPath, EditSession, EditState};
pub use tessera_types::{
    Block, BlockContent, BlockId, BlockKind, DocumentId, FieldId, FieldKind, FormField, Status,
};

/// Result type for document operations.
pub type Result<T> = std::result::Result<T, DocError>;
