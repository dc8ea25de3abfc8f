use serde::{Deserialize, Serialize};

use super::ExtractionError;

/// Result of text extraction from a single document
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ExtractedDocument {
    pub text: String,
    pub method: ExtractionMethod,
}

/// How text was extracted
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum ExtractionMethod {
    /// Text layer read directly from the PDF.
    PdfDirect,
    /// LLM vision call over the raw document bytes.
    VisionOcr,
}

/// Text extraction abstraction (allows mocking)
pub trait TextExtractor {
    /// Best-effort text for a document given its bytes and declared MIME type.
    fn extract(&self, bytes: &[u8], mime_type: &str) -> Result<ExtractedDocument, ExtractionError>;
}
