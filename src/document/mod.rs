//! Document intake: format dispatch, PDF text extraction, and text cleaning.

pub mod cleaner;
pub mod pdf;
mod types;

pub use cleaner::clean_text;
pub use pdf::extract_pdf_text;
pub use types::{DocumentError, SourceFormat, UploadedDocument};

/// Turn an uploaded file into cleaned text ready for prompting.
///
/// Dispatches on the filename extension, cleans the extracted text, and rejects uploads whose
/// cleaned text is empty.
pub async fn extract_cleaned_text(document: UploadedDocument) -> Result<String, DocumentError> {
    let format = SourceFormat::from_filename(document.filename.as_deref())?;
    let raw = match format {
        SourceFormat::Pdf => {
            let bytes = document.bytes;
            tokio::task::spawn_blocking(move || extract_pdf_text(&bytes))
                .await
                .map_err(|error| DocumentError::Parse(format!("extraction task failed: {error}")))??
        }
        SourceFormat::PlainText => String::from_utf8(document.bytes.to_vec())
            .map_err(|error| DocumentError::InvalidEncoding(error.to_string()))?,
    };

    let cleaned = clean_text(&raw);
    tracing::debug!(
        ?format,
        raw_chars = raw.chars().count(),
        cleaned_chars = cleaned.chars().count(),
        "Cleaned uploaded document"
    );
    if cleaned.is_empty() {
        return Err(DocumentError::EmptyContent);
    }
    Ok(cleaned)
}
