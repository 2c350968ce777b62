//! Service facade shared by the HTTP handlers.
//!
//! [`NotesApi`] is the seam the router depends on; [`StudyNotesService`] wires the document
//! intake and the notes generator together. The service holds no per-document state: upload and
//! summarize are independent calls and the client re-submits the cleaned text.

use crate::{
    config::Config,
    document::{self, DocumentError, UploadedDocument},
    notes::{NoteSections, NotesGenerator},
    summarization::{GeminiSummarizationClient, SummarizationClient, SummarizationClientError},
};
use async_trait::async_trait;
use thiserror::Error;

/// Errors surfaced to HTTP callers.
#[derive(Debug, Error)]
pub enum NotesError {
    /// Upload could not be turned into cleaned text.
    #[error(transparent)]
    Document(#[from] DocumentError),
    /// Multipart form did not carry a `file` field.
    #[error("Missing form field: file")]
    MissingFile,
    /// Multipart body could not be read.
    #[error("Malformed upload: {0}")]
    MalformedUpload(String),
    /// Summarize was called with blank text.
    #[error("No valid text found")]
    EmptyText,
    /// The LLM call failed or returned nothing usable.
    #[error("Notes generation failed: {0}")]
    Upstream(#[from] SummarizationClientError),
}

/// Operations exposed by the HTTP surface.
#[async_trait]
pub trait NotesApi: Send + Sync {
    /// Extract and clean the text of an uploaded document.
    async fn extract_text(&self, document: UploadedDocument) -> Result<String, NotesError>;

    /// Generate study notes for previously cleaned text.
    async fn summarize(&self, text: &str, difficulty: &str) -> Result<NoteSections, NotesError>;
}

/// Production implementation backed by `lopdf` and the configured LLM provider.
pub struct StudyNotesService {
    generator: NotesGenerator,
}

impl StudyNotesService {
    /// Build the service from the startup configuration.
    pub fn new(config: &Config) -> Result<Self, SummarizationClientError> {
        tracing::info!(model = %config.gemini_model, "Initializing summarization client");
        let client = GeminiSummarizationClient::from_config(config)?;
        Ok(Self::with_client(Box::new(client)))
    }

    /// Build the service around an arbitrary completion provider.
    pub fn with_client(client: Box<dyn SummarizationClient>) -> Self {
        Self {
            generator: NotesGenerator::new(client),
        }
    }
}

#[async_trait]
impl NotesApi for StudyNotesService {
    async fn extract_text(&self, document: UploadedDocument) -> Result<String, NotesError> {
        Ok(document::extract_cleaned_text(document).await?)
    }

    async fn summarize(&self, text: &str, difficulty: &str) -> Result<NoteSections, NotesError> {
        if text.trim().is_empty() {
            return Err(NotesError::EmptyText);
        }
        Ok(self.generator.generate(text, difficulty).await?)
    }
}
