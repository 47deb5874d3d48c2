//! Locally constructed fallback document.
//!
//! Used whenever a generation source fails. The structure mirrors what a
//! generated proposal contains (title, summary, quote form, technical notes,
//! contact form, compliance) so the user always has something to edit.

use tessera_doc::{BlockContent, DocError, Document, FieldKind, FormField};

use crate::GenerationRequest;

/// Build the fallback proposal for `request`.
pub fn fallback_document(request: &GenerationRequest) -> Result<Document, DocError> {
    let title = format!("RFQ Response - {}", request.request_id);

    Document::builder(title)
        .source_request_id(request.request_id.clone())
        .counterparty_id(request.counterparty_id.clone())
        .block("block_1", BlockContent::heading(1, format!("RFQ Response: {}", request.request_id)))
        .block("block_2", BlockContent::heading(2, "Executive Summary"))
        .block(
            "block_3",
            BlockContent::paragraph(
                "We are pleased to submit this response. This section summarizes the proposed \
                 solution, delivery approach, and relevant experience.",
            ),
        )
        .block("block_4", quote_form())
        .block("block_5", BlockContent::heading(2, "Technical Specifications & Compliance"))
        .block(
            "block_6",
            BlockContent::paragraph(
                "The proposed solution meets all requirements specified in the Statement of \
                 Work. Technical drawings, specifications, and product photographs will be \
                 provided as attachments.",
            ),
        )
        .block("block_7", contact_form())
        .block("block_8", BlockContent::heading(2, "Certifications & Compliance"))
        .block(
            "block_9",
            BlockContent::paragraph(
                "We maintain active registration with current representations and \
                 certifications, and confirm compliance with all provisions incorporated by \
                 reference in this solicitation.",
            ),
        )
        .build()
}

fn quote_form() -> BlockContent {
    BlockContent::form(
        "Basic Quote Information",
        vec![
            FormField::new("company_name", "Company Name", FieldKind::Text).required(true),
            FormField::new("cage_code", "CAGE/SAM Unique Entity ID", FieldKind::Text)
                .required(true)
                .placeholder("Enter CAGE code"),
            FormField::new("payment_terms", "Payment Terms", FieldKind::Text)
                .value("Net 30 Days")
                .required(true),
            FormField::new("delivery_date", "Estimated Delivery Date", FieldKind::Date)
                .required(true),
            FormField::new("total_price", "Total Price", FieldKind::Number)
                .required(true)
                .placeholder("Enter total price"),
            FormField::new("warranty", "Warranty Information", FieldKind::Multiline)
                .value(
                    "Standard manufacturer warranty covering defects in materials and \
                     workmanship for one (1) year from date of delivery.",
                )
                .required(true),
        ],
    )
}

fn contact_form() -> BlockContent {
    BlockContent::form(
        "Contact Information",
        vec![
            FormField::new("poc_name", "Point of Contact Name", FieldKind::Text)
                .required(true)
                .placeholder("Enter primary contact name"),
            FormField::new("phone", "Telephone Number", FieldKind::Text)
                .required(true)
                .placeholder("(XXX) XXX-XXXX"),
            FormField::new("email", "Email Address", FieldKind::Email)
                .required(true)
                .placeholder("contact@example.com"),
            FormField::new("tax_id", "Tax ID Number", FieldKind::Text)
                .required(true)
                .placeholder("XX-XXXXXXX"),
        ],
    )
}

#[cfg(test)]
mod tests {
    use super::*;
    use tessera_doc::{BlockKind, Status};

    #[test]
    fn test_fallback_is_valid_draft() {
        let doc = fallback_document(&GenerationRequest::new("FA3016", "gunn")).unwrap();
        doc.validate().unwrap();
        assert_eq!(doc.status(), Status::Draft);
        assert_eq!(doc.source_request_id(), "FA3016");
        assert_eq!(doc.counterparty_id(), "gunn");
        assert_eq!(doc.len(), 9);
    }

    #[test]
    fn test_fallback_structure() {
        let doc = fallback_document(&GenerationRequest::new("R", "C")).unwrap();
        let kinds: Vec<BlockKind> = doc.blocks().iter().map(|b| b.kind()).collect();
        assert_eq!(
            kinds,
            vec![
                BlockKind::Heading1,
                BlockKind::Heading2,
                BlockKind::Paragraph,
                BlockKind::Form,
                BlockKind::Heading2,
                BlockKind::Paragraph,
                BlockKind::Form,
                BlockKind::Heading2,
                BlockKind::Paragraph,
            ]
        );
    }

    #[test]
    fn test_fallback_is_deterministic_apart_from_identity() {
        let request = GenerationRequest::new("R", "C");
        let a = fallback_document(&request).unwrap();
        let b = fallback_document(&request).unwrap();
        assert_eq!(a.blocks(), b.blocks());
        assert_eq!(a.title(), b.title());
    }
}
