//! Typed identifiers for documents, blocks, and form fields.
//!
//! IDs are opaque strings on the wire. Documents produced by a generation
//! source carry whatever ids the source chose (`"block_1"`, `"company_name"`),
//! so the newtypes wrap `String` rather than a UUID. Ids minted locally use a
//! kind prefix plus a UUIDv7 in simple form (`"block_0192f3…"`), which keeps
//! them time-ordered and never reissued within a document's lifetime.

use std::fmt;

use serde::{Deserialize, Serialize};

/// A document identifier.
#[derive(Clone, Hash, Eq, PartialEq, Ord, PartialOrd, Serialize, Deserialize)]
#[serde(transparent)]
pub struct DocumentId(String);

/// A block identifier, unique within its document.
#[derive(Clone, Hash, Eq, PartialEq, Ord, PartialOrd, Serialize, Deserialize)]
#[serde(transparent)]
pub struct BlockId(String);

/// A form field identifier, unique within its owning form block.
#[derive(Clone, Hash, Eq, PartialEq, Ord, PartialOrd, Serialize, Deserialize)]
#[serde(transparent)]
pub struct FieldId(String);

/// Error from parsing an id string.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum IdError {
    #[error("{0} must not be empty")]
    Empty(&'static str),
}

// ── Shared behavior ─────────────────────────────────────────────────────────

macro_rules! impl_typed_id {
    ($T:ident, $name:literal, $prefix:literal) => {
        impl $T {
            /// Wrap an existing id string. No validation; see [`Self::parse`].
            pub fn new(id: impl Into<String>) -> Self {
                Self(id.into())
            }

            /// Mint a fresh, time-ordered id (`prefix_` + UUIDv7 hex).
            pub fn generate() -> Self {
                Self(format!("{}_{}", $prefix, uuid::Uuid::now_v7().as_simple()))
            }

            /// Parse a non-empty id string.
            pub fn parse(s: &str) -> Result<Self, IdError> {
                if s.is_empty() {
                    Err(IdError::Empty($name))
                } else {
                    Ok(Self(s.to_string()))
                }
            }

            /// Borrow the raw id string.
            pub fn as_str(&self) -> &str {
                &self.0
            }

            /// Check for the empty id, which no valid document contains.
            pub fn is_empty(&self) -> bool {
                self.0.is_empty()
            }
        }

        impl From<&str> for $T {
            fn from(s: &str) -> Self {
                Self::new(s)
            }
        }

        impl From<String> for $T {
            fn from(s: String) -> Self {
                Self(s)
            }
        }

        impl AsRef<str> for $T {
            fn as_ref(&self) -> &str {
                &self.0
            }
        }

        impl fmt::Display for $T {
            fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
                f.write_str(&self.0)
            }
        }

        impl fmt::Debug for $T {
            fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
                write!(f, "{}({})", $name, self.0)
            }
        }
    };
}

impl_typed_id!(DocumentId, "DocumentId", "response");
impl_typed_id!(BlockId, "BlockId", "block");
impl_typed_id!(FieldId, "FieldId", "field");
