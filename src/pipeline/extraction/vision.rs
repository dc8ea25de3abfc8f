//! Vision OCR — extracts prescription text from document bytes via an
//! image-grounded LLM call.

use super::ExtractionError;
use crate::pipeline::gemini::LlmClient;
use crate::pipeline::prompts::VISION_OCR_PROMPT;

/// Run one vision OCR call over the raw document bytes.
///
/// An empty reply is treated as extraction failure, matching the contract
/// that extraction produces either text or an absence signal.
pub fn ocr_document(
    client: &dyn LlmClient,
    bytes: &[u8],
    mime_type: &str,
) -> Result<String, ExtractionError> {
    let start = std::time::Instant::now();

    let response = client
        .generate_with_image(VISION_OCR_PROMPT, bytes, mime_type)
        .map_err(|e| ExtractionError::OcrProcessing(e.to_string()))?;

    let text = response.trim();
    if text.is_empty() {
        return Err(ExtractionError::NoTextExtracted);
    }

    tracing::info!(
        elapsed_ms = %start.elapsed().as_millis(),
        text_len = text.len(),
        "Vision OCR successful"
    );
    Ok(text.to_string())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::pipeline::gemini::MockLlmClient;

    #[test]
    fn returns_trimmed_response_text() {
        let client = MockLlmClient::new().push_response("  Napa 500mg\n1+1+1  ");
        let text = ocr_document(&client, b"imagebytes", "image/png").unwrap();
        assert_eq!(text, "Napa 500mg\n1+1+1");
    }

    #[test]
    fn empty_response_is_no_text() {
        let client = MockLlmClient::new().push_response("   ");
        assert!(matches!(
            ocr_document(&client, b"x", "image/png"),
            Err(ExtractionError::NoTextExtracted)
        ));
    }

    #[test]
    fn llm_failure_becomes_ocr_error() {
        let client = MockLlmClient::new().push_blocked("SAFETY");
        assert!(matches!(
            ocr_document(&client, b"x", "image/jpeg"),
            Err(ExtractionError::OcrProcessing(_))
        ));
    }

    #[test]
    fn sends_the_ocr_prompt() {
        let client = MockLlmClient::new().push_response("text");
        ocr_document(&client, b"x", "image/png").unwrap();
        assert_eq!(client.prompts()[0], VISION_OCR_PROMPT);
    }
}
