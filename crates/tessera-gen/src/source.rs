//! Generation sources: where a fresh document comes from.

use std::path::{Path, PathBuf};

use async_trait::async_trait;
use tessera_doc::{DocError, Document};
use thiserror::Error;

/// Identifies what to generate a document for.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct GenerationRequest {
    /// Opaque id of the upstream request (e.g. an RFQ number).
    pub request_id: String,
    /// Opaque id of the party the document is written for or by.
    pub counterparty_id: String,
}

impl GenerationRequest {
    pub fn new(request_id: impl Into<String>, counterparty_id: impl Into<String>) -> Self {
        Self {
            request_id: request_id.into(),
            counterparty_id: counterparty_id.into(),
        }
    }
}

/// Errors a generation source can report. None of these are fatal: callers
/// substitute a fallback document.
#[derive(Error, Debug)]
pub enum GenerationError {
    #[error("failed to read {path}: {source}")]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    /// Malformed JSON, or JSON that breaks a document invariant.
    #[error("failed to parse generated document: {0}")]
    Parse(#[from] serde_json::Error),

    /// The document answers a different request.
    #[error("document is for request {got_request}/{got_counterparty}, expected {expected_request}/{expected_counterparty}")]
    RequestMismatch {
        expected_request: String,
        expected_counterparty: String,
        got_request: String,
        got_counterparty: String,
    },

    #[error(transparent)]
    Invalid(#[from] DocError),

    /// The source could not produce anything.
    #[error("generation unavailable: {0}")]
    Unavailable(String),
}

/// Produces complete documents. Implementations may suspend (network, disk)
/// but must only ever return documents that pass [`Document::validate`].
#[async_trait]
pub trait DocumentSource: Send + Sync {
    async fn generate(&self, request: &GenerationRequest) -> Result<Document, GenerationError>;
}

/// Reads a previously generated document from a JSON file.
#[derive(Clone, Debug)]
pub struct JsonFileSource {
    path: PathBuf,
}

impl JsonFileSource {
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self { path: path.into() }
    }

    pub fn path(&self) -> &Path {
        &self.path
    }
}

#[async_trait]
impl DocumentSource for JsonFileSource {
    async fn generate(&self, request: &GenerationRequest) -> Result<Document, GenerationError> {
        let json = tokio::fs::read_to_string(&self.path)
            .await
            .map_err(|source| GenerationError::Io {
                path: self.path.clone(),
                source,
            })?;

        let doc = Document::from_json(&json)?;
        check_request(&doc, request)?;
        tracing::debug!(path = %self.path.display(), blocks = doc.len(), "loaded generated document");
        Ok(doc)
    }
}

/// Reject documents whose foreign references answer a different request.
///
/// An empty field in `request` matches anything.
pub fn check_request(doc: &Document, request: &GenerationRequest) -> Result<(), GenerationError> {
    let matches = |wanted: &str, got: &str| wanted.is_empty() || wanted == got;

    if !matches(&request.request_id, doc.source_request_id())
        || !matches(&request.counterparty_id, doc.counterparty_id())
    {
        return Err(GenerationError::RequestMismatch {
            expected_request: request.request_id.clone(),
            expected_counterparty: request.counterparty_id.clone(),
            got_request: doc.source_request_id().to_string(),
            got_counterparty: doc.counterparty_id().to_string(),
        });
    }
    Ok(())
}
