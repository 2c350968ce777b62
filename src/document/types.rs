//! Upload types and error definitions for document intake.

use axum::body::Bytes;
use thiserror::Error;

/// Errors raised while turning an upload into cleaned text.
#[derive(Debug, Error)]
pub enum DocumentError {
    /// The PDF could not be parsed.
    #[error("PDF text extraction failed: {0}")]
    Parse(String),
    /// A plain-text upload was not valid UTF-8.
    #[error("Text file is not valid UTF-8: {0}")]
    InvalidEncoding(String),
    /// The filename does not carry a supported extension.
    #[error("Only PDF and TXT supported (got {0})")]
    UnsupportedFormat(String),
    /// Cleaning left nothing worth summarizing.
    #[error("No valid text found")]
    EmptyContent,
}

/// A file received by `POST /upload`, alive for a single request.
#[derive(Debug, Clone)]
pub struct UploadedDocument {
    /// Filename declared by the client, if any.
    pub filename: Option<String>,
    /// Raw file contents.
    pub bytes: Bytes,
}

/// Input formats accepted by the upload endpoint.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SourceFormat {
    /// Portable Document Format, parsed page by page.
    Pdf,
    /// UTF-8 plain text.
    PlainText,
}

impl SourceFormat {
    /// Resolve the format from a filename extension (case-insensitive).
    pub fn from_filename(filename: Option<&str>) -> Result<Self, DocumentError> {
        let name = filename.unwrap_or_default();
        let lower = name.to_lowercase();
        if lower.ends_with(".pdf") {
            Ok(Self::Pdf)
        } else if lower.ends_with(".txt") {
            Ok(Self::PlainText)
        } else if name.is_empty() {
            Err(DocumentError::UnsupportedFormat("file without a name".into()))
        } else {
            Err(DocumentError::UnsupportedFormat(name.to_string()))
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn format_follows_extension() {
        assert_eq!(
            SourceFormat::from_filename(Some("notes.pdf")).unwrap(),
            SourceFormat::Pdf
        );
        assert_eq!(
            SourceFormat::from_filename(Some("NOTES.PDF")).unwrap(),
            SourceFormat::Pdf
        );
        assert_eq!(
            SourceFormat::from_filename(Some("reading.txt")).unwrap(),
            SourceFormat::PlainText
        );
    }

    #[test]
    fn unknown_or_missing_names_are_unsupported() {
        assert!(matches!(
            SourceFormat::from_filename(Some("data.csv")),
            Err(DocumentError::UnsupportedFormat(name)) if name == "data.csv"
        ));
        assert!(matches!(
            SourceFormat::from_filename(Some("pdf")),
            Err(DocumentError::UnsupportedFormat(_))
        ));
        assert!(matches!(
            SourceFormat::from_filename(None),
            Err(DocumentError::UnsupportedFormat(_))
        ));
    }
}
