//! Editing session: one block under edit at a time, through a private draft.
//!
//! ```text
//!            begin_edit(id)                update_draft(path, v)
//!   Idle ─────────────────────▶ Editing ◀──────────────────────┐
//!    ▲                            │  │                          │
//!    │        commit(doc) ok      │  └──────────────────────────┘
//!    ├────────────────────────────┤
//!    │        cancel()            │
//!    └────────────────────────────┘
//! ```
//!
//! The session does not own a document. Each call that needs one takes it as
//! an argument, so independent documents can be edited with independent
//! sessions. Drafts never touch the document until `commit`.

use tessera_types::FormField;

use crate::{BlockContent, BlockId, BlockKind, DocError, Document, FieldId, Result};

/// Addresses one editable value inside a draft.
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum DraftPath {
    /// Text of a heading or paragraph.
    Content,
    /// Title of a form.
    Title,
    /// Value of one form field.
    FieldValue(FieldId),
}

impl std::fmt::Display for DraftPath {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            DraftPath::Content => write!(f, "content"),
            DraftPath::Title => write!(f, "title"),
            DraftPath::FieldValue(id) => write!(f, "field:{id}"),
        }
    }
}

/// Deep copy of a block's editable payload.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Draft {
    content: BlockContent,
}

impl Draft {
    fn of(content: &BlockContent) -> Self {
        Self {
            content: content.clone(),
        }
    }

    pub fn kind(&self) -> BlockKind {
        self.content.kind()
    }

    /// Current draft payload.
    pub fn content(&self) -> &BlockContent {
        &self.content
    }

    /// Required form fields whose draft value is still empty.
    pub fn missing_required(&self) -> Vec<&FormField> {
        self.content.fields().iter().filter(|f| f.is_missing()).collect()
    }

    fn set(&mut self, path: &DraftPath, value: String) -> Result<()> {
        let kind = self.kind();
        let invalid = || DocError::InvalidDraftPath {
            kind,
            path: path.to_string(),
        };

        match (&mut self.content, path) {
            (
                BlockContent::Heading1 { content }
                | BlockContent::Heading2 { content }
                | BlockContent::Heading3 { content }
                | BlockContent::Paragraph { content },
                DraftPath::Content,
            ) => *content = value,
            (BlockContent::Form { title, .. }, DraftPath::Title) => *title = value,
            (BlockContent::Form { fields, .. }, DraftPath::FieldValue(id)) => {
                let field = fields.iter_mut().find(|f| &f.id == id).ok_or_else(invalid)?;
                field.value = value;
            }
            _ => return Err(invalid()),
        }
        Ok(())
    }
}

/// Session state.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub enum EditState {
    #[default]
    Idle,
    Editing { block_id: BlockId, draft: Draft },
}

/// Drives single-block editing against a caller-supplied [`Document`].
#[derive(Clone, Debug, Default)]
pub struct EditSession {
    state: EditState,
}

impl EditSession {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn state(&self) -> &EditState {
        &self.state
    }

    pub fn is_editing(&self) -> bool {
        matches!(self.state, EditState::Editing { .. })
    }

    /// Id of the block under edit.
    pub fn editing_block(&self) -> Option<&BlockId> {
        match &self.state {
            EditState::Editing { block_id, .. } => Some(block_id),
            EditState::Idle => None,
        }
    }

    pub fn draft(&self) -> Option<&Draft> {
        match &self.state {
            EditState::Editing { draft, .. } => Some(draft),
            EditState::Idle => None,
        }
    }

    /// Start editing `id`, copying its payload into a fresh draft; read it
    /// back through [`Self::draft`].
    ///
    /// An edit already in progress is discarded first; its block is not
    /// touched. If `id` is absent the session is left exactly as it was.
    pub fn begin_edit(&mut self, doc: &Document, id: &BlockId) -> Result<()> {
        let block = doc.block(id).ok_or_else(|| DocError::NotFound(id.clone()))?;

        if let EditState::Editing { block_id, .. } = &self.state {
            tracing::debug!(previous = %block_id, next = %id, "discarding draft on switch");
        }

        self.state = EditState::Editing {
            block_id: id.clone(),
            draft: Draft::of(&block.content),
        };
        tracing::debug!(block = %id, kind = %block.kind(), "began edit");
        Ok(())
    }

    /// Change one value in the draft. The document is not touched.
    pub fn update_draft(&mut self, path: &DraftPath, value: impl Into<String>) -> Result<()> {
        match &mut self.state {
            EditState::Editing { draft, .. } => draft.set(path, value.into()),
            EditState::Idle => Err(DocError::NoActiveEdit),
        }
    }

    /// Write the draft back to `doc` and return to idle.
    ///
    /// The document checks the draft's shape (kind, form field set). On error
    /// the session stays in `Editing` with the draft intact, and the document
    /// is unchanged.
    pub fn commit(&mut self, doc: &mut Document) -> Result<BlockId> {
        let EditState::Editing { block_id, draft } = &self.state else {
            return Err(DocError::NoActiveEdit);
        };

        doc.replace_block_content(block_id, draft.content.clone())?;

        let id = block_id.clone();
        self.state = EditState::Idle;
        tracing::debug!(block = %id, "committed edit");
        Ok(id)
    }

    /// Drop the draft. Does nothing when idle.
    pub fn cancel(&mut self) {
        if let EditState::Editing { block_id, .. } = &self.state {
            tracing::debug!(block = %block_id, "cancelled edit");
        }
        self.state = EditState::Idle;
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use tessera_types::FieldKind;

    fn doc() -> Document {
        Document::builder("Proposal")
            .block("title", BlockContent::heading(1, "Proposal"))
            .block("body", BlockContent::paragraph("Original body"))
            .block(
                "contact",
                BlockContent::form(
                    "Contact",
                    vec![
                        FormField::new("poc", "Point of Contact", FieldKind::Text).required(true),
                        FormField::new("email", "Email", FieldKind::Email).required(true),
                        FormField::new("fax", "Fax", FieldKind::Text),
                    ],
                ),
            )
            .build()
            .unwrap()
    }

    fn id(s: &str) -> BlockId {
        BlockId::new(s)
    }

    #[test]
    fn test_begin_edit_copies_payload() {
        let doc = doc();
        let mut session = EditSession::new();
        session.begin_edit(&doc, &id("body")).unwrap();
        let draft = session.draft().unwrap();
        assert_eq!(draft.kind(), BlockKind::Paragraph);
        assert_eq!(draft.content().text(), Some("Original body"));
        assert_eq!(session.editing_block(), Some(&id("body")));
    }

    #[test]
    fn test_begin_edit_missing_block_stays_idle() {
        let doc = doc();
        let mut session = EditSession::new();
        assert_eq!(
            session.begin_edit(&doc, &id("ghost")).unwrap_err(),
            DocError::NotFound(id("ghost"))
        );
        assert_eq!(session.state(), &EditState::Idle);
    }

    #[test]
    fn test_begin_edit_missing_block_keeps_current_edit() {
        let doc = doc();
        let mut session = EditSession::new();
        session.begin_edit(&doc, &id("body")).unwrap();
        session.update_draft(&DraftPath::Content, "pending").unwrap();

        assert!(session.begin_edit(&doc, &id("ghost")).is_err());
        assert_eq!(session.editing_block(), Some(&id("body")));
        assert_eq!(session.draft().unwrap().content().text(), Some("pending"));
    }

    #[test]
    fn test_draft_updates_do_not_touch_document() {
        let mut doc = doc();
        let before = doc.clone();
        let mut session = EditSession::new();

        session.begin_edit(&doc, &id("body")).unwrap();
        session.update_draft(&DraftPath::Content, "New body").unwrap();
        assert_eq!(doc, before);

        let committed = session.commit(&mut doc).unwrap();
        assert_eq!(committed, id("body"));
        assert!(!session.is_editing());
        assert_eq!(doc.block(&id("body")).unwrap().content.text(), Some("New body"));
        assert_eq!(doc.version(), before.version() + 1);
    }

    #[test]
    fn test_cancel_after_updates_leaves_document_identical() {
        let doc_before = doc();
        let json_before = doc_before.to_json_pretty().unwrap();
        let doc = doc_before.clone();
        let mut session = EditSession::new();

        session.begin_edit(&doc, &id("contact")).unwrap();
        session.update_draft(&DraftPath::Title, "Changed").unwrap();
        session
            .update_draft(&DraftPath::FieldValue(FieldId::new("poc")), "Jane")
            .unwrap();
        session
            .update_draft(&DraftPath::FieldValue(FieldId::new("email")), "j@x.io")
            .unwrap();
        session.cancel();

        assert_eq!(session.state(), &EditState::Idle);
        assert_eq!(doc, doc_before);
        assert_eq!(doc.to_json_pretty().unwrap(), json_before);
    }

    #[test]
    fn test_commit_form_values() {
        let mut doc = doc();
        let mut session = EditSession::new();
        session.begin_edit(&doc, &id("contact")).unwrap();
        session
            .update_draft(&DraftPath::FieldValue(FieldId::new("email")), "ops@acme.io")
            .unwrap();
        session.commit(&mut doc).unwrap();

        let fields = doc.block(&id("contact")).unwrap().content.fields();
        assert_eq!(fields[1].value, "ops@acme.io");
        assert_eq!(fields.len(), 3);
    }

    #[test]
    fn test_invalid_paths() {
        let doc = doc();
        let mut session = EditSession::new();

        session.begin_edit(&doc, &id("body")).unwrap();
        let err = session.update_draft(&DraftPath::Title, "x").unwrap_err();
        assert_eq!(
            err,
            DocError::InvalidDraftPath {
                kind: BlockKind::Paragraph,
                path: "title".to_string(),
            }
        );

        session.begin_edit(&doc, &id("contact")).unwrap();
        assert!(session.update_draft(&DraftPath::Content, "x").is_err());
        let err = session
            .update_draft(&DraftPath::FieldValue(FieldId::new("nope")), "x")
            .unwrap_err();
        assert!(matches!(err, DocError::InvalidDraftPath { .. }));
    }

    #[test]
    fn test_operations_while_idle() {
        let mut doc = doc();
        let mut session = EditSession::new();
        assert_eq!(
            session.update_draft(&DraftPath::Content, "x"),
            Err(DocError::NoActiveEdit)
        );
        assert_eq!(session.commit(&mut doc), Err(DocError::NoActiveEdit));
        session.cancel();
        assert_eq!(doc.version(), 0);
    }

    #[test]
    fn test_discard_on_switch() {
        let mut doc = doc();
        let before = doc.clone();
        let mut session = EditSession::new();

        session.begin_edit(&doc, &id("body")).unwrap();
        session.update_draft(&DraftPath::Content, "unsaved").unwrap();

        session.begin_edit(&doc, &id("title")).unwrap();
        assert_eq!(session.draft().unwrap().content().text(), Some("Proposal"));
        assert_eq!(session.editing_block(), Some(&id("title")));
        assert_eq!(doc, before);

        session.update_draft(&DraftPath::Content, "Final Proposal").unwrap();
        session.commit(&mut doc).unwrap();
        assert_eq!(doc.block(&id("body")).unwrap().content.text(), Some("Original body"));
        assert_eq!(doc.block(&id("title")).unwrap().content.text(), Some("Final Proposal"));
    }

    #[test]
    fn test_commit_onto_block_of_other_kind() {
        let source = doc();
        let mut target = Document::builder("Other")
            .block(
                "body",
                BlockContent::form("Shadow", vec![FormField::new("x", "X", FieldKind::Text)]),
            )
            .build()
            .unwrap();
        let before = target.clone();

        let mut session = EditSession::new();
        session.begin_edit(&source, &id("body")).unwrap();
        let err = session.commit(&mut target).unwrap_err();

        assert!(matches!(
            err,
            DocError::KindMismatch {
                expected: BlockKind::Form,
                found: BlockKind::Paragraph,
                ..
            }
        ));
        assert_eq!(target, before);
        assert!(session.is_editing());
    }

    #[test]
    fn test_commit_onto_form_with_other_fields() {
        let source = doc();
        let mut target = Document::builder("Other")
            .block(
                "contact",
                BlockContent::form(
                    "Contact",
                    vec![FormField::new("poc", "Point of Contact", FieldKind::Text)],
                ),
            )
            .build()
            .unwrap();
        let before = target.clone();

        let mut session = EditSession::new();
        session.begin_edit(&source, &id("contact")).unwrap();
        session
            .update_draft(&DraftPath::FieldValue(FieldId::new("poc")), "Jane")
            .unwrap();

        assert_eq!(
            session.commit(&mut target),
            Err(DocError::FieldSetChanged(id("contact")))
        );
        assert_eq!(target, before);
        assert_eq!(session.editing_block(), Some(&id("contact")));
    }

    #[test]
    fn test_commit_after_block_deleted() {
        let mut doc = doc();
        let mut session = EditSession::new();
        session.begin_edit(&doc, &id("body")).unwrap();
        doc.delete_block(&id("body"));

        assert_eq!(session.commit(&mut doc), Err(DocError::NotFound(id("body"))));
        session.cancel();
        assert!(!session.is_editing());
    }

    #[test]
    fn test_missing_required_tracks_draft() {
        let doc = doc();
        let mut session = EditSession::new();
        session.begin_edit(&doc, &id("contact")).unwrap();
        let missing: Vec<&str> = session
            .draft()
            .unwrap()
            .missing_required()
            .iter()
            .map(|f| f.id.as_str())
            .collect();
        assert_eq!(missing, vec!["poc", "email"]);

        session
            .update_draft(&DraftPath::FieldValue(FieldId::new("poc")), "Jane")
            .unwrap();
        assert_eq!(session.draft().unwrap().missing_required().len(), 1);
    }

    #[test]
    fn test_sessions_on_separate_documents_are_independent() {
        let mut a = doc();
        let mut b = doc();
        let mut session_a = EditSession::new();
        let mut session_b = EditSession::new();

        session_a.begin_edit(&a, &id("body")).unwrap();
        session_b.begin_edit(&b, &id("body")).unwrap();
        session_a.update_draft(&DraftPath::Content, "from a").unwrap();
        session_b.cancel();

        session_a.commit(&mut a).unwrap();
        assert_eq!(a.block(&id("body")).unwrap().content.text(), Some("from a"));
        assert_eq!(b.block(&id("body")).unwrap().content.text(), Some("Original body"));
        assert_eq!(session_b.commit(&mut b), Err(DocError::NoActiveEdit));
    }
}
