//! Document generation for Tessera.
//!
//! The generator itself (an LLM call, a template service) lives outside this
//! workspace. This crate defines the seam it plugs into, a JSON file source for
//! documents generated elsewhere, and the local fallback used when generation
//! fails. Whatever comes back is a complete [`Document`] or nothing: there is
//! no partially applied state.

mod fallback;
mod source;

pub use fallback::fallback_document;
pub use source::{
    DocumentSource, GenerationError, GenerationRequest, JsonFileSource, check_request,
};

use tessera_doc::{DocError, Document};

/// Ask `source` for a document, substituting the fallback on any failure.
///
/// Only fails if the fallback itself cannot be built, which indicates a bug in
/// [`fallback_document`].
pub async fn generate_or_fallback(
    source: &dyn DocumentSource,
    request: &GenerationRequest,
) -> Result<Document, DocError> {
    match source.generate(request).await {
        Ok(doc) => {
            tracing::info!(
                request = %request.request_id,
                blocks = doc.len(),
                "generated document"
            );
            Ok(doc)
        }
        Err(e) => {
            tracing::warn!(request = %request.request_id, error = %e, "generation failed, using fallback");
            fallback_document(request)
        }
    }
}
