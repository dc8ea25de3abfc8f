//! Direct PDF text-layer extraction.
//!
//! Absence of text is a signal, not an error: scanned PDFs have no text
//! layer and fall through to the vision OCR path.

/// Extract the text layer from PDF bytes. Returns None when the PDF has no
/// usable text layer or cannot be parsed at all.
pub fn extract_pdf_text(bytes: &[u8]) -> Option<String> {
    match pdf_extract::extract_text_from_mem(bytes) {
        Ok(text) => {
            let trimmed = text.trim();
            if trimmed.is_empty() {
                tracing::debug!("PDF has an empty text layer, will attempt OCR");
                None
            } else {
                Some(trimmed.to_string())
            }
        }
        Err(e) => {
            tracing::warn!(error = %e, "Could not extract text directly from PDF, will attempt OCR");
            None
        }
    }
}
