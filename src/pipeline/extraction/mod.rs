pub mod orchestrator;
pub mod pdf;
pub mod types;
pub mod vision;

pub use orchestrator::*;
pub use types::*;

use thiserror::Error;

#[derive(Error, Debug)]
pub enum ExtractionError {
    #[error("OCR processing failed: {0}")]
    OcrProcessing(String),

    #[error("No text could be extracted from the document")]
    NoTextExtracted,

    #[error("Unsupported format for extraction: {0}")]
    UnsupportedFormat(String),
}
