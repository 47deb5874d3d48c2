//! Block document container.
//!
//! # Document Structure
//!
//! ```text
//! Document
//! ├── id, title                      # identity
//! ├── source_request_id              # foreign ref to the generation request
//! ├── counterparty_id                # foreign ref to the counterparty
//! ├── blocks: Vec<Block>             # kept sorted, blocks[i].order == i
//! ├── created_at, last_modified      # Unix millis
//! ├── status                         # draft / review / submitted
//! └── version                        # local mutation counter (not serialized)
//! ```
//!
//! # Invariants
//!
//! Between calls, `blocks` is sorted by `order` and the orders are exactly
//! `0..len`. Block ids are non-empty and unique; form field ids are non-empty
//! and unique within their form. Every mutating method either succeeds fully
//! (bumping `version` and `last_modified`) or returns an error having changed
//! nothing. Deserialization goes through [`Document::validate`], so a
//! `Document` obtained from JSON holds the same guarantees.

use std::collections::HashSet;

use serde::{Deserialize, Serialize};
use tessera_types::now_millis;

use crate::reorder;
use crate::{
    Block, BlockContent, BlockId, BlockKind, DocError, DocumentId, Result, Status,
};

/// An ordered, typed block document.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", try_from = "DocumentWire")]
pub struct Document {
    id: DocumentId,
    title: String,
    source_request_id: String,
    counterparty_id: String,
    blocks: Vec<Block>,
    created_at: u64,
    last_modified: u64,
    status: Status,
    #[serde(skip)]
    version: u64,
}

/// Unvalidated wire shape. `rfqId`/`entityId` are accepted for documents
/// produced by older generators.
#[derive(Deserialize)]
#[serde(rename_all = "camelCase")]
struct DocumentWire {
    id: DocumentId,
    title: String,
    #[serde(alias = "rfqId")]
    source_request_id: String,
    #[serde(alias = "entityId")]
    counterparty_id: String,
    blocks: Vec<Block>,
    created_at: u64,
    #[serde(default)]
    last_modified: Option<u64>,
    #[serde(default)]
    status: Status,
}

impl TryFrom<DocumentWire> for Document {
    type Error = DocError;

    fn try_from(wire: DocumentWire) -> Result<Self> {
        let mut doc = Document {
            id: wire.id,
            title: wire.title,
            source_request_id: wire.source_request_id,
            counterparty_id: wire.counterparty_id,
            blocks: wire.blocks,
            created_at: wire.created_at,
            last_modified: wire.last_modified.unwrap_or(wire.created_at),
            status: wire.status,
            version: 0,
        };
        doc.blocks.sort_by_key(|b| b.order);
        doc.validate()?;
        Ok(doc)
    }
}

impl Document {
    /// Create an empty draft document.
    pub fn new(
        title: impl Into<String>,
        source_request_id: impl Into<String>,
        counterparty_id: impl Into<String>,
    ) -> Self {
        let now = now_millis();
        Self {
            id: DocumentId::generate(),
            title: title.into(),
            source_request_id: source_request_id.into(),
            counterparty_id: counterparty_id.into(),
            blocks: Vec::new(),
            created_at: now,
            last_modified: now,
            status: Status::Draft,
            version: 0,
        }
    }

    /// Start building a document with caller-chosen block ids.
    pub fn builder(title: impl Into<String>) -> DocumentBuilder {
        DocumentBuilder::new(title)
    }

    // =========================================================================
    // Accessors
    // =========================================================================

    pub fn id(&self) -> &DocumentId {
        &self.id
    }

    pub fn title(&self) -> &str {
        &self.title
    }

    pub fn source_request_id(&self) -> &str {
        &self.source_request_id
    }

    pub fn counterparty_id(&self) -> &str {
        &self.counterparty_id
    }

    pub fn status(&self) -> Status {
        self.status
    }

    /// Creation time (Unix millis).
    pub fn created_at(&self) -> u64 {
        self.created_at
    }

    /// Time of the last successful mutation (Unix millis).
    pub fn last_modified(&self) -> u64 {
        self.last_modified
    }

    /// Local mutation counter. Starts at 0, +1 per successful mutation.
    pub fn version(&self) -> u64 {
        self.version
    }

    /// Blocks in display order.
    pub fn blocks(&self) -> &[Block] {
        &self.blocks
    }

    pub fn len(&self) -> usize {
        self.blocks.len()
    }

    pub fn is_empty(&self) -> bool {
        self.blocks.is_empty()
    }

    pub fn block(&self, id: &BlockId) -> Option<&Block> {
        self.blocks.iter().find(|b| &b.id == id)
    }

    /// Display position of a block.
    pub fn position_of(&self, id: &BlockId) -> Option<usize> {
        self.blocks.iter().position(|b| &b.id == id)
    }

    /// Block ids in display order.
    pub fn block_ids(&self) -> Vec<BlockId> {
        self.blocks.iter().map(|b| b.id.clone()).collect()
    }

    // =========================================================================
    // Mutations
    // =========================================================================

    fn touch(&mut self) {
        self.version += 1;
        self.last_modified = now_millis().max(self.last_modified);
    }

    /// Append a placeholder block of `kind` and return its id.
    pub fn add_block(&mut self, kind: BlockKind) -> BlockId {
        let block = Block::placeholder(kind, self.blocks.len());
        let id = block.id.clone();
        debug_assert!(self.block(&id).is_none(), "minted id collided: {id:?}");

        self.blocks.push(block);
        self.touch();
        tracing::debug!(block = %id, %kind, order = self.blocks.len() - 1, "added block");
        id
    }

    /// Remove a block and close the gap it leaves in `order`.
    ///
    /// Deleting an id that is not present is a no-op and returns `false`; a
    /// repeated delete of the same block is a benign race, not an error.
    pub fn delete_block(&mut self, id: &BlockId) -> bool {
        let Some(position) = self.position_of(id) else {
            tracing::debug!(block = %id, "delete of absent block ignored");
            return false;
        };

        self.blocks.remove(position);
        reorder::restamp(&mut self.blocks);
        self.touch();
        tracing::debug!(block = %id, position, remaining = self.blocks.len(), "deleted block");
        true
    }

    /// Replace a block's payload, keeping its id and order.
    ///
    /// The payload must be the same kind as the block. For forms every field
    /// must match the existing one at its position in everything but `value`.
    pub fn replace_block_content(&mut self, id: &BlockId, content: BlockContent) -> Result<()> {
        let block = self
            .blocks
            .iter_mut()
            .find(|b| &b.id == id)
            .ok_or_else(|| DocError::NotFound(id.clone()))?;

        let expected = block.kind();
        let found = content.kind();
        if expected != found {
            tracing::warn!(block = %id, %expected, %found, "rejected payload of another kind");
            return Err(DocError::KindMismatch {
                id: id.clone(),
                expected,
                found,
            });
        }

        let current = block.content.fields();
        let incoming = content.fields();
        let same_fields = current.len() == incoming.len()
            && current.iter().zip(incoming).all(|(a, b)| a.same_definition(b));
        if !same_fields {
            tracing::warn!(block = %id, "rejected form payload with a different field set");
            return Err(DocError::FieldSetChanged(id.clone()));
        }

        block.content = content;
        self.touch();
        tracing::debug!(block = %id, kind = %expected, "replaced block content");
        Ok(())
    }

    /// Move the block at display position `from` to position `to`.
    pub fn reorder(&mut self, from: usize, to: usize) -> Result<()> {
        let permutation = reorder::move_permutation(self.blocks.len(), from, to)?;

        let blocks = std::mem::take(&mut self.blocks);
        self.blocks = reorder::apply_permutation(blocks, &permutation);
        reorder::restamp(&mut self.blocks);
        self.touch();
        tracing::debug!(from, to, "reordered blocks");
        Ok(())
    }

    /// Move a block by id to display position `to`.
    pub fn move_block(&mut self, id: &BlockId, to: usize) -> Result<()> {
        let from = self
            .position_of(id)
            .ok_or_else(|| DocError::NotFound(id.clone()))?;
        self.reorder(from, to)
    }

    pub fn set_status(&mut self, status: Status) {
        self.status = status;
        self.touch();
    }

    pub fn set_title(&mut self, title: impl Into<String>) {
        self.title = title.into();
        self.touch();
    }

    // =========================================================================
    // Validation
    // =========================================================================

    /// Check every structural invariant.
    ///
    /// Expects `blocks` sorted by `order`, which every constructor guarantees.
    pub fn validate(&self) -> Result<()> {
        let mut seen = HashSet::with_capacity(self.blocks.len());

        for (index, block) in self.blocks.iter().enumerate() {
            if block.id.is_empty() {
                return Err(DocError::InvalidDocument(format!(
                    "block at position {index} has an empty id"
                )));
            }
            if !seen.insert(&block.id) {
                return Err(DocError::InvalidDocument(format!(
                    "duplicate block id {}",
                    block.id
                )));
            }
            if block.order != index {
                return Err(DocError::InvalidDocument(format!(
                    "block {} has order {} at position {index}; orders must be 0..{}",
                    block.id,
                    block.order,
                    self.blocks.len()
                )));
            }

            let mut field_ids = HashSet::new();
            for field in block.content.fields() {
                if field.id.is_empty() || !field_ids.insert(&field.id) {
                    return Err(DocError::InvalidDocument(format!(
                        "form {} has an empty or duplicate field id {:?}",
                        block.id,
                        field.id.as_str()
                    )));
                }
            }
        }

        Ok(())
    }

    // =========================================================================
    // JSON
    // =========================================================================

    /// Parse and validate a document from JSON.
    pub fn from_json(json: &str) -> std::result::Result<Self, serde_json::Error> {
        serde_json::from_str(json)
    }

    pub fn to_json_pretty(&self) -> std::result::Result<String, serde_json::Error> {
        serde_json::to_string_pretty(self)
    }
}

/// Builder for documents whose block ids are chosen by the caller
/// (generation sources, fallback documents, tests).
///
/// Blocks receive consecutive orders in the sequence they are added.
#[derive(Debug)]
pub struct DocumentBuilder {
    id: Option<DocumentId>,
    title: String,
    source_request_id: String,
    counterparty_id: String,
    blocks: Vec<Block>,
    created_at: Option<u64>,
    status: Status,
}

impl DocumentBuilder {
    pub fn new(title: impl Into<String>) -> Self {
        Self {
            id: None,
            title: title.into(),
            source_request_id: String::new(),
            counterparty_id: String::new(),
            blocks: Vec::new(),
            created_at: None,
            status: Status::Draft,
        }
    }

    pub fn id(mut self, id: impl Into<DocumentId>) -> Self {
        self.id = Some(id.into());
        self
    }

    pub fn source_request_id(mut self, id: impl Into<String>) -> Self {
        self.source_request_id = id.into();
        self
    }

    pub fn counterparty_id(mut self, id: impl Into<String>) -> Self {
        self.counterparty_id = id.into();
        self
    }

    pub fn created_at(mut self, millis: u64) -> Self {
        self.created_at = Some(millis);
        self
    }

    pub fn status(mut self, status: Status) -> Self {
        self.status = status;
        self
    }

    /// Append a block at the next order.
    pub fn block(mut self, id: impl Into<BlockId>, content: BlockContent) -> Self {
        let order = self.blocks.len();
        self.blocks.push(Block::new(id, order, content));
        self
    }

    /// Validate and produce the document.
    pub fn build(self) -> Result<Document> {
        let created_at = self.created_at.unwrap_or_else(now_millis);
        let doc = Document {
            id: self.id.unwrap_or_else(DocumentId::generate),
            title: self.title,
            source_request_id: self.source_request_id,
            counterparty_id: self.counterparty_id,
            blocks: self.blocks,
            created_at,
            last_modified: created_at,
            status: self.status,
            version: 0,
        };
        doc.validate()?;
        Ok(doc)
    }
}
