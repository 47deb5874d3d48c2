//! Block model: the closed variant set a document is built from.
//!
//! ## Design: BlockKind + BlockContent
//!
//! `BlockContent` is a sum type carrying the payload of each variant. Every
//! consumer (container, editor, export) matches it exhaustively, so adding a
//! variant is a compile error at each site that forgot about it. `BlockKind`
//! is the payload-free tag, used wherever only the shape matters (kind
//! checks on commit, `add_block`, CLI parsing).
//!
//! On the wire a block is flat: `{"id", "order", "type", ...payload}` with
//! `type` one of `h1`, `h2`, `h3`, `text`, `form`.

use std::str::FromStr;

use serde::{Deserialize, Serialize};
use strum::EnumString;

use crate::ids::{BlockId, FieldId};

/// What a block *is*.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize, EnumString)]
#[strum(ascii_case_insensitive)]
pub enum BlockKind {
    /// Top-level heading.
    #[serde(rename = "h1")]
    #[strum(serialize = "h1", serialize = "heading1")]
    Heading1,
    /// Section heading.
    #[serde(rename = "h2")]
    #[strum(serialize = "h2", serialize = "heading2")]
    Heading2,
    /// Subsection heading.
    #[serde(rename = "h3")]
    #[strum(serialize = "h3", serialize = "heading3")]
    Heading3,
    /// Body text.
    #[serde(rename = "text")]
    #[strum(serialize = "text", serialize = "paragraph", serialize = "p")]
    Paragraph,
    /// Titled group of data-entry fields.
    #[serde(rename = "form")]
    #[strum(serialize = "form")]
    Form,
}

impl BlockKind {
    /// Every kind, in the order an "add block" menu lists them.
    pub const ALL: [BlockKind; 5] = [
        BlockKind::Heading1,
        BlockKind::Heading2,
        BlockKind::Heading3,
        BlockKind::Paragraph,
        BlockKind::Form,
    ];

    /// Parse from string (case-insensitive).
    ///
    /// Supports aliases: "heading1" -> Heading1, "paragraph"/"p" -> Paragraph.
    #[allow(clippy::should_implement_trait)]
    pub fn from_str(s: &str) -> Option<Self> {
        <Self as FromStr>::from_str(s).ok()
    }

    /// Convert to the wire tag.
    pub fn as_str(&self) -> &'static str {
        match self {
            BlockKind::Heading1 => "h1",
            BlockKind::Heading2 => "h2",
            BlockKind::Heading3 => "h3",
            BlockKind::Paragraph => "text",
            BlockKind::Form => "form",
        }
    }

    /// Heading level (1–3), or None for non-heading kinds.
    pub fn heading_level(&self) -> Option<u8> {
        match self {
            BlockKind::Heading1 => Some(1),
            BlockKind::Heading2 => Some(2),
            BlockKind::Heading3 => Some(3),
            BlockKind::Paragraph | BlockKind::Form => None,
        }
    }

    pub fn is_heading(&self) -> bool {
        self.heading_level().is_some()
    }
}

impl std::fmt::Display for BlockKind {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

/// Input type of a form field.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize, Default, EnumString)]
#[serde(rename_all = "lowercase")]
#[strum(ascii_case_insensitive)]
pub enum FieldKind {
    /// Single-line text.
    #[default]
    Text,
    Number,
    Date,
    Email,
    /// Multi-line text.
    #[serde(rename = "textarea")]
    #[strum(serialize = "textarea", serialize = "multiline")]
    Multiline,
}

impl FieldKind {
    /// Parse from string (case-insensitive).
    #[allow(clippy::should_implement_trait)]
    pub fn from_str(s: &str) -> Option<Self> {
        <Self as FromStr>::from_str(s).ok()
    }

    /// Convert to the wire tag.
    pub fn as_str(&self) -> &'static str {
        match self {
            FieldKind::Text => "text",
            FieldKind::Number => "number",
            FieldKind::Date => "date",
            FieldKind::Email => "email",
            FieldKind::Multiline => "textarea",
        }
    }
}

impl std::fmt::Display for FieldKind {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

/// Lifecycle status of a whole document.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize, Default, EnumString)]
#[serde(rename_all = "lowercase")]
#[strum(ascii_case_insensitive)]
pub enum Status {
    /// Being written; the state every generated document starts in.
    #[default]
    Draft,
    /// Ready for someone else to look at.
    Review,
    /// Sent to the counterparty.
    Submitted,
}

impl Status {
    /// Parse from string (case-insensitive).
    #[allow(clippy::should_implement_trait)]
    pub fn from_str(s: &str) -> Option<Self> {
        <Self as FromStr>::from_str(s).ok()
    }

    /// Convert to string representation.
    pub fn as_str(&self) -> &'static str {
        match self {
            Status::Draft => "draft",
            Status::Review => "review",
            Status::Submitted => "submitted",
        }
    }
}

impl std::fmt::Display for Status {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

/// One data-entry slot of a form block.
///
/// The set of fields in a form is fixed when the block is created; only
/// `value` is expected to change afterwards.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct FormField {
    /// Unique within the owning form.
    pub id: FieldId,
    pub label: String,
    #[serde(rename = "type")]
    pub kind: FieldKind,
    /// Current value. Empty means "not filled in yet".
    #[serde(default)]
    pub value: String,
    #[serde(default)]
    pub required: bool,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub placeholder: Option<String>,
}

impl FormField {
    /// Create an empty, optional field.
    pub fn new(id: impl Into<FieldId>, label: impl Into<String>, kind: FieldKind) -> Self {
        Self {
            id: id.into(),
            label: label.into(),
            kind,
            value: String::new(),
            required: false,
            placeholder: None,
        }
    }

    pub fn value(mut self, value: impl Into<String>) -> Self {
        self.value = value.into();
        self
    }

    pub fn required(mut self, required: bool) -> Self {
        self.required = required;
        self
    }

    pub fn placeholder(mut self, placeholder: impl Into<String>) -> Self {
        self.placeholder = Some(placeholder.into());
        self
    }

    /// Required but still empty. The only content validation Tessera does.
    pub fn is_missing(&self) -> bool {
        self.required && self.value.is_empty()
    }

    /// Same field apart from its value: id, label, kind, required, placeholder.
    pub fn same_definition(&self, other: &FormField) -> bool {
        self.id == other.id
            && self.label == other.label
            && self.kind == other.kind
            && self.required == other.required
            && self.placeholder == other.placeholder
    }
}

/// Payload of a block, tagged by kind.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "type")]
pub enum BlockContent {
    #[serde(rename = "h1")]
    Heading1 { content: String },
    #[serde(rename = "h2")]
    Heading2 { content: String },
    #[serde(rename = "h3")]
    Heading3 { content: String },
    #[serde(rename = "text")]
    Paragraph { content: String },
    #[serde(rename = "form")]
    Form { title: String, fields: Vec<FormField> },
}

/// Placeholder heading text for freshly added heading blocks.
pub const PLACEHOLDER_HEADING: &str = "New Heading";
/// Placeholder body for freshly added paragraph blocks.
pub const PLACEHOLDER_PARAGRAPH: &str = "New paragraph content...";
/// Placeholder title for freshly added form blocks.
pub const PLACEHOLDER_FORM_TITLE: &str = "New Form Section";

impl BlockContent {
    /// Deterministic placeholder payload for a new block of `kind`.
    pub fn placeholder(kind: BlockKind) -> Self {
        match kind {
            BlockKind::Heading1 => Self::heading(1, PLACEHOLDER_HEADING),
            BlockKind::Heading2 => Self::heading(2, PLACEHOLDER_HEADING),
            BlockKind::Heading3 => Self::heading(3, PLACEHOLDER_HEADING),
            BlockKind::Paragraph => Self::Paragraph {
                content: PLACEHOLDER_PARAGRAPH.to_string(),
            },
            BlockKind::Form => Self::Form {
                title: PLACEHOLDER_FORM_TITLE.to_string(),
                fields: vec![
                    FormField::new("sample_field", "Sample Field", FieldKind::Text)
                        .placeholder("Enter value..."),
                ],
            },
        }
    }

    /// Heading payload. Levels outside 1–3 clamp to the nearest valid level.
    pub fn heading(level: u8, content: impl Into<String>) -> Self {
        let content = content.into();
        match level {
            0 | 1 => Self::Heading1 { content },
            2 => Self::Heading2 { content },
            _ => Self::Heading3 { content },
        }
    }

    pub fn paragraph(content: impl Into<String>) -> Self {
        Self::Paragraph {
            content: content.into(),
        }
    }

    pub fn form(title: impl Into<String>, fields: Vec<FormField>) -> Self {
        Self::Form {
            title: title.into(),
            fields,
        }
    }

    /// The kind tag of this payload.
    pub fn kind(&self) -> BlockKind {
        match self {
            Self::Heading1 { .. } => BlockKind::Heading1,
            Self::Heading2 { .. } => BlockKind::Heading2,
            Self::Heading3 { .. } => BlockKind::Heading3,
            Self::Paragraph { .. } => BlockKind::Paragraph,
            Self::Form { .. } => BlockKind::Form,
        }
    }

    /// Text of a heading or paragraph; None for forms.
    pub fn text(&self) -> Option<&str> {
        match self {
            Self::Heading1 { content }
            | Self::Heading2 { content }
            | Self::Heading3 { content }
            | Self::Paragraph { content } => Some(content),
            Self::Form { .. } => None,
        }
    }

    /// Fields of a form; empty slice for other kinds.
    pub fn fields(&self) -> &[FormField] {
        match self {
            Self::Form { fields, .. } => fields,
            Self::Heading1 { .. }
            | Self::Heading2 { .. }
            | Self::Heading3 { .. }
            | Self::Paragraph { .. } => &[],
        }
    }
}

/// A block as stored in a document: stable id, display order, payload.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct Block {
    /// Immutable once created; survives edits and reorders.
    pub id: BlockId,
    /// Position in the document's rendering sequence (0-based, dense).
    pub order: usize,
    #[serde(flatten)]
    pub content: BlockContent,
}

impl Block {
    pub fn new(id: impl Into<BlockId>, order: usize, content: BlockContent) -> Self {
        Self {
            id: id.into(),
            order,
            content,
        }
    }

    /// A placeholder block of `kind` with a freshly minted id.
    pub fn placeholder(kind: BlockKind, order: usize) -> Self {
        Self::new(BlockId::generate(), order, BlockContent::placeholder(kind))
    }

    pub fn kind(&self) -> BlockKind {
        self.content.kind()
    }
}
