//! Edit operations accepted by `tessera edit --op ...`.
//!
//! | Syntax                         | Effect                                   |
//! |--------------------------------|------------------------------------------|
//! | `add <kind>`                   | append placeholder block (h1..form)      |
//! | `delete <block-id>`            | remove block, renumber                   |
//! | `move <from> <to>`             | drag block from position to position     |
//! | `set <block-id> <path> <text>` | edit via session; path = content, title, |
//! |                                | or field:<field-id>                      |
//! | `status <status>`              | draft / review / submitted               |
//! | `title <text>`                 | rename the document                      |

use std::str::FromStr;

use anyhow::{Context, Result, anyhow, bail};
use tessera_doc::{BlockId, BlockKind, Document, DraftPath, EditSession, FieldId, Status};

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum EditOp {
    Add(BlockKind),
    Delete(BlockId),
    Move { from: usize, to: usize },
    Set { id: BlockId, path: DraftPath, value: String },
    Status(Status),
    Title(String),
}

impl FromStr for EditOp {
    type Err = anyhow::Error;

    fn from_str(s: &str) -> Result<Self> {
        let s = s.trim();
        let (verb, rest) = s.split_once(' ').unwrap_or((s, ""));
        let rest = rest.trim_start();

        match verb {
            "add" => BlockKind::from_str(rest)
                .map(EditOp::Add)
                .ok_or_else(|| anyhow!("unknown block kind {rest:?}")),
            "delete" => Ok(EditOp::Delete(BlockId::parse(rest)?)),
            "move" => {
                let mut parts = rest.split_whitespace();
                let (Some(from), Some(to), None) = (parts.next(), parts.next(), parts.next()) else {
                    bail!("usage: move <from> <to>");
                };
                Ok(EditOp::Move {
                    from: from.parse().context("invalid <from> index")?,
                    to: to.parse().context("invalid <to> index")?,
                })
            }
            "set" => {
                let mut parts = rest.splitn(3, ' ');
                let (Some(id), Some(path)) = (parts.next(), parts.next()) else {
                    bail!("usage: set <block-id> <path> <text>");
                };
                let value = parts.next().unwrap_or_default().to_string();
                Ok(EditOp::Set {
                    id: BlockId::parse(id)?,
                    path: parse_path(path)?,
                    value,
                })
            }
            "status" => Status::from_str(rest)
                .map(EditOp::Status)
                .ok_or_else(|| anyhow!("unknown status {rest:?}")),
            "title" => Ok(EditOp::Title(rest.to_string())),
            other => bail!("unknown operation {other:?}"),
        }
    }
}

fn parse_path(path: &str) -> Result<DraftPath> {
    match path {
        "content" => Ok(DraftPath::Content),
        "title" => Ok(DraftPath::Title),
        _ => match path.strip_prefix("field:") {
            Some(id) => Ok(DraftPath::FieldValue(FieldId::parse(id)?)),
            None => bail!("unknown draft path {path:?}; expected content, title, or field:<id>"),
        },
    }
}

/// Apply one operation. Field edits go through `session` like an interactive edit.
pub fn apply(doc: &mut Document, session: &mut EditSession, op: &EditOp) -> Result<()> {
    match op {
        EditOp::Add(kind) => {
            let id = doc.add_block(*kind);
            tracing::info!(block = %id, %kind, "added block");
        }
        EditOp::Delete(id) => {
            if !doc.delete_block(id) {
                tracing::warn!(block = %id, "no such block, nothing deleted");
            }
        }
        EditOp::Move { from, to } => doc.reorder(*from, *to)?,
        EditOp::Set { id, path, value } => {
            session.begin_edit(doc, id)?;
            if let Err(e) = session.update_draft(path, value.as_str()) {
                session.cancel();
                return Err(e.into());
            }
            session.commit(doc)?;
        }
        EditOp::Status(status) => doc.set_status(*status),
        EditOp::Title(title) => doc.set_title(title.as_str()),
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use tessera_doc::BlockContent;

    fn doc() -> Document {
        Document::builder("Doc")
            .block("a", BlockContent::heading(1, "A"))
            .block("b", BlockContent::paragraph("B"))
            .block("c", BlockContent::placeholder(BlockKind::Form))
            .build()
            .unwrap()
    }

    #[test]
    fn test_parse_ops() {
        assert_eq!("add h2".parse::<EditOp>().unwrap(), EditOp::Add(BlockKind::Heading2));
        assert_eq!(
            "delete block_3".parse::<EditOp>().unwrap(),
            EditOp::Delete(BlockId::new("block_3"))
        );
        assert_eq!(
            "move 2 0".parse::<EditOp>().unwrap(),
            EditOp::Move { from: 2, to: 0 }
        );
        assert_eq!(
            "set b content Hello there".parse::<EditOp>().unwrap(),
            EditOp::Set {
                id: BlockId::new("b"),
                path: DraftPath::Content,
                value: "Hello there".to_string(),
            }
        );
        assert_eq!(
            "set c field:sample_field 12".parse::<EditOp>().unwrap(),
            EditOp::Set {
                id: BlockId::new("c"),
                path: DraftPath::FieldValue(FieldId::new("sample_field")),
                value: "12".to_string(),
            }
        );
        assert_eq!(
            "status review".parse::<EditOp>().unwrap(),
            EditOp::Status(Status::Review)
        );
    }

    #[test]
    fn test_parse_rejects_garbage() {
        assert!("add table".parse::<EditOp>().is_err());
        assert!("move 1".parse::<EditOp>().is_err());
        assert!("move 1 2 3".parse::<EditOp>().is_err());
        assert!("move x 2".parse::<EditOp>().is_err());
        assert!("set b body x".parse::<EditOp>().is_err());
        assert!("delete".parse::<EditOp>().is_err());
        assert!("explode".parse::<EditOp>().is_err());
    }

    #[test]
    fn test_set_with_empty_value_clears_content() {
        let op: EditOp = "set b content".parse().unwrap();
        let mut doc = doc();
        apply(&mut doc, &mut EditSession::new(), &op).unwrap();
        assert_eq!(doc.block(&BlockId::new("b")).unwrap().content.text(), Some(""));
    }

    #[test]
    fn test_apply_sequence() {
        let mut doc = doc();
        let mut session = EditSession::new();
        for op in ["move 2 0", "set b content Rewritten", "delete a", "status submitted"] {
            apply(&mut doc, &mut session, &op.parse().unwrap()).unwrap();
        }

        let ids: Vec<&str> = doc.blocks().iter().map(|b| b.id.as_str()).collect();
        assert_eq!(ids, vec!["c", "b"]);
        assert_eq!(doc.block(&BlockId::new("b")).unwrap().content.text(), Some("Rewritten"));
        assert_eq!(doc.status(), Status::Submitted);
        assert!(!session.is_editing());
    }

    #[test]
    fn test_bad_set_path_leaves_session_idle() {
        let mut doc = doc();
        let before = doc.clone();
        let mut session = EditSession::new();

        let op: EditOp = "set b title Nope".parse().unwrap();
        assert!(apply(&mut doc, &mut session, &op).is_err());
        assert!(!session.is_editing());
        assert_eq!(doc, before);
    }

    #[test]
    fn test_delete_missing_is_not_an_error() {
        let mut doc = doc();
        apply(&mut doc, &mut EditSession::new(), &"delete zzz".parse().unwrap()).unwrap();
        assert_eq!(doc.len(), 3);
    }
}
