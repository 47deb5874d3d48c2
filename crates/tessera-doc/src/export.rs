//! Export adapter: a document as a linear sequence of text lines.
//!
//! Output is plain text with light markdown markers:
//!
//! ```text
//! # Heading 1
//!
//! ## Heading 2
//!
//! Paragraph text, verbatim.
//!
//! **Form title**
//! Label: value
//! Other label: [TO BE FILLED]
//! ```
//!
//! Export is read-only and deterministic: the same document always renders to
//! the same lines. Packaging the lines into a file is the caller's job.

use crate::{Block, BlockContent, Document};

/// Substituted for empty form field values.
pub const PLACEHOLDER: &str = "[TO BE FILLED]";

/// Knobs for [`export_with`].
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct ExportOptions {
    /// Token printed for empty field values.
    pub placeholder: String,
    /// Prefix the output with the document title and creation date.
    pub include_header: bool,
}

impl Default for ExportOptions {
    fn default() -> Self {
        Self {
            placeholder: PLACEHOLDER.to_string(),
            include_header: false,
        }
    }
}

/// Render `doc` with default options.
pub fn export(doc: &Document) -> Vec<String> {
    export_with(doc, &ExportOptions::default())
}

/// Render `doc` as lines. Each block is followed by one blank line.
pub fn export_with(doc: &Document, options: &ExportOptions) -> Vec<String> {
    let mut lines = Vec::new();

    if options.include_header {
        lines.push(doc.title().to_string());
        lines.push(format!("Generated: {}", format_date(doc.created_at())));
        lines.push(String::new());
    }

    // Sort a view rather than trusting storage order.
    let mut blocks: Vec<&Block> = doc.blocks().iter().collect();
    blocks.sort_by_key(|b| b.order);

    for block in blocks {
        render_block(&block.content, &options.placeholder, &mut lines);
        lines.push(String::new());
    }

    lines
}

fn render_block(content: &BlockContent, placeholder: &str, lines: &mut Vec<String>) {
    match content {
        BlockContent::Heading1 { content } => lines.push(format!("# {content}")),
        BlockContent::Heading2 { content } => lines.push(format!("## {content}")),
        BlockContent::Heading3 { content } => lines.push(format!("### {content}")),
        BlockContent::Paragraph { content } => lines.push(content.clone()),
        BlockContent::Form { title, fields } => {
            lines.push(format!("**{title}**"));
            for field in fields {
                let value = if field.value.is_empty() {
                    placeholder
                } else {
                    field.value.as_str()
                };
                lines.push(format!("{}: {value}", field.label));
            }
        }
    }
}

/// `YYYY-MM-DD` for a Unix-millis timestamp (UTC).
fn format_date(millis: u64) -> String {
    i64::try_from(millis)
        .ok()
        .and_then(chrono::DateTime::<chrono::Utc>::from_timestamp_millis)
        .map(|dt| dt.format("%Y-%m-%d").to_string())
        .unwrap_or_else(|| "unknown".to_string())
}

/// Join lines into a single newline-terminated text.
pub fn render_text(lines: &[String]) -> String {
    let mut text = lines.join("\n");
    text.push('\n');
    text
}

/// Split lines into pages of at most `lines_per_page`. Zero means one page.
pub fn paginate(lines: &[String], lines_per_page: usize) -> Vec<Vec<String>> {
    if lines_per_page == 0 || lines.is_empty() {
        return vec![lines.to_vec()];
    }
    lines.chunks(lines_per_page).map(<[String]>::to_vec).collect()
}

/// File name for an exported document: non-alphanumerics become `_`.
pub fn export_file_name(title: &str) -> String {
    let stem: String = title
        .chars()
        .map(|c| if c.is_ascii_alphanumeric() { c } else { '_' })
        .collect();
    format!("{stem}.txt")
}
