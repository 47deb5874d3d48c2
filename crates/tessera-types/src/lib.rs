//! Shared identity and block types for Tessera.
//!
//! This crate is the leaf of the workspace: typed IDs, the closed block
//! variant set, form fields, and document status. It has **no internal
//! tessera dependencies**, and owns no mutation logic. Containers that keep
//! blocks ordered and consistent live in `tessera-doc`.
//!
//! # Key Types
//!
//! |-------------------|----------------------------------------------|
//! | Type              | Purpose                                      |
//! |-------------------|----------------------------------------------|
//! | [`DocumentId`]    | Which document                               |
//! | [`BlockId`]       | Which block (stable across edits/reorders)   |
//! | [`FieldId`]       | Which field, unique within its form          |
//! | [`BlockKind`]     | Tag of the closed variant set                |
//! | [`BlockContent`]  | Variant payload (heading, paragraph, form)   |
//! | [`Block`]         | id + order + payload                         |
//! | [`FormField`]     | One data-entry slot of a form block          |
//! | [`Status`]        | draft / review / submitted                   |
//! |-------------------|----------------------------------------------|

pub mod block;
pub mod ids;

pub use block::{Block, BlockContent, BlockKind, FieldKind, FormField, Status};
pub use ids::{BlockId, DocumentId, FieldId, IdError};

/// Current time as Unix milliseconds. Used by constructors throughout the workspace.
pub fn now_millis() -> u64 {
    std::time::SystemTime::now()
        .duration_since(std::time::UNIX_EPOCH)
        .map(|d| d.as_millis() as u64)
        .unwrap_or(0)
}
