//! Extraction orchestrator — routes a document to direct PDF text or
//! vision OCR by MIME type.

use std::sync::Arc;

use super::pdf::extract_pdf_text;
use super::types::{ExtractedDocument, ExtractionMethod, TextExtractor};
use super::vision::ocr_document;
use super::ExtractionError;
use crate::pipeline::gemini::LlmClient;

/// Production extractor.
///
/// PDFs are tried text-layer first; image-based PDFs and plain images go
/// through the vision OCR path.
pub struct DocumentExtractor {
    llm: Arc<dyn LlmClient>,
}

impl DocumentExtractor {
    pub fn new(llm: Arc<dyn LlmClient>) -> Self {
        Self { llm }
    }
}

impl TextExtractor for DocumentExtractor {
    fn extract(&self, bytes: &[u8], mime_type: &str) -> Result<ExtractedDocument, ExtractionError> {
        if mime_type == "application/pdf" {
            if let Some(text) = extract_pdf_text(bytes) {
                tracing::info!(text_len = text.len(), "Text extracted directly from PDF");
                return Ok(ExtractedDocument {
                    text,
                    method: ExtractionMethod::PdfDirect,
                });
            }
            let text = ocr_document(self.llm.as_ref(), bytes, mime_type)?;
            return Ok(ExtractedDocument {
                text,
                method: ExtractionMethod::VisionOcr,
            });
        }

        if mime_type.starts_with("image/") {
            let text = ocr_document(self.llm.as_ref(), bytes, mime_type)?;
            return Ok(ExtractedDocument {
                text,
                method: ExtractionMethod::VisionOcr,
            });
        }

        Err(ExtractionError::UnsupportedFormat(mime_type.to_string()))
    }
}
