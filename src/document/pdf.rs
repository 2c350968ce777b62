//! PDF text extraction backed by `lopdf`.

use lopdf::Document;

use super::types::DocumentError;

/// Extract the text of every page, in page order, joined by a single space.
///
/// The parsed document lives only inside this call. Any load or per-page failure is reported as
/// [`DocumentError::Parse`]; this is CPU-bound and should run off the async workers.
pub fn extract_pdf_text(bytes: &[u8]) -> Result<String, DocumentError> {
    let document =
        Document::load_mem(bytes).map_err(|error| DocumentError::Parse(error.to_string()))?;

    let pages = document.get_pages();
    let mut texts = Vec::with_capacity(pages.len());
    for page_number in pages.keys() {
        let text = document
            .extract_text(&[*page_number])
            .map_err(|error| {
                DocumentError::Parse(format!("page {page_number}: {error}"))
            })?;
        texts.push(text);
    }

    tracing::debug!(pages = texts.len(), "Extracted PDF text");
    Ok(texts.join(" "))
}
