//! Error types for document operations.

use thiserror::Error;

use crate::{BlockId, BlockKind};

/// Errors that can occur while mutating or editing a document.
///
/// Every variant is local and recoverable: the operation that produced it left
/// the document exactly as it was.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum DocError {
    /// Block not found in document.
    #[error("block not found: {0:?}")]
    NotFound(BlockId),

    /// A payload tried to change a block's variant kind.
    #[error("kind mismatch on block {id:?}: block is {expected}, payload is {found}")]
    KindMismatch {
        id: BlockId,
        expected: BlockKind,
        found: BlockKind,
    },

    /// Reorder index outside the current block count.
    #[error("index {index} out of range for document with {len} blocks")]
    IndexOutOfRange { index: usize, len: usize },

    /// A form payload added, removed, reordered, or redefined fields.
    #[error("form field set of block {0:?} is fixed at creation")]
    FieldSetChanged(BlockId),

    /// Draft operation with no block under edit.
    #[error("no block is being edited")]
    NoActiveEdit,

    /// Draft path does not address anything in the draft.
    #[error("draft path {path} does not apply to a {kind} block")]
    InvalidDraftPath { kind: BlockKind, path: String },

    /// Document violates a structural invariant (ids, order, field ids).
    #[error("invalid document: {0}")]
    InvalidDocument(String),
}
