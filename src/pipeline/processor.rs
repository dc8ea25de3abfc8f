//! Prescription processing orchestrator.
//!
//! Single entry point that drives the full pipeline for one document:
//! extract text → identify medicine names → per name: normalize + detail
//! lookup → aggregate into one Session.
//!
//! Uses trait-based DI for the extractor and the LLM client so the
//! orchestrator remains fully testable with mock implementations. The
//! per-medicine loop is fault-isolated: a degraded record never aborts the
//! remaining medicines.

use std::sync::Arc;

use crate::models::Session;
use crate::pipeline::detail::fetch_medicine_details;
use crate::pipeline::extraction::{ExtractionError, TextExtractor};
use crate::pipeline::gemini::{LlmClient, LlmError};
use crate::pipeline::names::extract_medicine_names;
use crate::pipeline::normalize::normalize_name;

/// Maximum preview length kept on the session, in characters.
const PREVIEW_CHARS: usize = 200;

/// Errors that abort processing of a whole document.
///
/// Everything past text extraction degrades to sentinels instead.
#[derive(Debug, thiserror::Error)]
pub enum ProcessingError {
    #[error("Extraction failed: {0}")]
    Extraction(#[from] ExtractionError),
}

/// Orchestrates one document end to end, strictly sequentially.
pub struct PrescriptionProcessor {
    extractor: Box<dyn TextExtractor>,
    llm: Arc<dyn LlmClient>,
}

impl PrescriptionProcessor {
    pub fn new(extractor: Box<dyn TextExtractor>, llm: Arc<dyn LlmClient>) -> Self {
        Self { extractor, llm }
    }

    /// Process one uploaded document into an immutable Session.
    ///
    /// The mention list and the record list stay positionally parallel no
    /// matter how many lookups degrade.
    pub fn process_document(
        &self,
        bytes: &[u8],
        mime_type: &str,
        file_name: &str,
    ) -> Result<Session, ProcessingError> {
        let document = self.extractor.extract(bytes, mime_type)?;
        tracing::info!(
            file = %file_name,
            method = ?document.method,
            text_len = document.text.len(),
            "Document text extracted"
        );

        let mentions = match extract_medicine_names(self.llm.as_ref(), &document.text) {
            Ok(names) => names,
            Err(LlmError::Blocked(reason)) => {
                tracing::warn!(file = %file_name, reason = %reason, "Medicine name extraction blocked");
                Vec::new()
            }
            Err(e) => {
                tracing::error!(file = %file_name, error = %e, "Error extracting medicine names");
                Vec::new()
            }
        };
        tracing::info!(file = %file_name, count = mentions.len(), "Identified potential medicines");

        let mut records = Vec::with_capacity(mentions.len());
        for (i, mention) in mentions.iter().enumerate() {
            tracing::info!(
                medicine = %mention,
                position = i + 1,
                total = mentions.len(),
                "Processing medicine"
            );
            let query_name = normalize_name(self.llm.as_ref(), mention);
            records.push(fetch_medicine_details(
                self.llm.as_ref(),
                mention,
                &query_name,
            ));
        }

        Ok(Session::new(
            chrono::Local::now().naive_local(),
            file_name.to_string(),
            preview_of(&document.text),
            mentions,
            records,
        ))
    }
}

/// First `PREVIEW_CHARS` characters of the text, `...`-suffixed when cut.
/// Char-based so multi-byte scripts cannot split a code point.
fn preview_of(text: &str) -> String {
    let mut preview: String = text.chars().take(PREVIEW_CHARS).collect();
    if text.chars().count() > PREVIEW_CHARS {
        preview.push_str("...");
    }
    preview
}
