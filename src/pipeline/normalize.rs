//! Script normalization — maps Bengali medicine names to their canonical
//! English pharmaceutical equivalents.
//!
//! Fail-open by contract: whatever goes wrong, the caller gets a usable
//! name back, never an error.

use crate::pipeline::gemini::LlmClient;
use crate::pipeline::prompts::build_normalization_prompt;

/// Marker the normalization prompt asks the model to prefix its answer with.
const PROCESSED_NAME_MARKER: &str = "processed name:";

/// True iff any code point falls in the Bengali Unicode block.
pub fn contains_bengali(text: &str) -> bool {
    text.chars().any(|ch| ('\u{0980}'..='\u{09FF}').contains(&ch))
}

/// Resolve the name the detail lookup should be issued for.
///
/// Only names containing Bengali script trigger a translation call. Latin
/// names pass through untouched, and so do names in neither script —
/// ambiguous script is not an error here.
pub fn normalize_name(client: &dyn LlmClient, name: &str) -> String {
    // Latin and ambiguous-script names both pass through unchanged.
    if !contains_bengali(name) {
        return name.to_string();
    }

    tracing::debug!(name = %name, "Translating medicine name to English");
    let prompt = build_normalization_prompt(name);
    match client.generate(&prompt) {
        Ok(response) => {
            let translated = parse_translation(&response);
            if translated.is_empty() {
                return name.to_string();
            }
            if !translated.eq_ignore_ascii_case(name) {
                tracing::info!(from = %name, to = %translated, "Translated medicine name");
            }
            translated
        }
        Err(e) => {
            tracing::warn!(name = %name, error = %e, "Translation attempt failed");
            name.to_string()
        }
    }
}

/// Take the text after the `Processed Name:` marker when the model echoed
/// it, otherwise the whole trimmed reply.
fn parse_translation(response: &str) -> String {
    let trimmed = response.trim();
    // ASCII lowercasing keeps byte offsets 1:1 with the original reply, so
    // the marker position is safe to slice with.
    let lower = trimmed.to_ascii_lowercase();
    if let Some(pos) = lower.find(PROCESSED_NAME_MARKER) {
        trimmed[pos + PROCESSED_NAME_MARKER.len()..].trim().to_string()
    } else {
        trimmed.to_string()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::pipeline::gemini::{LlmError, MockLlmClient};

    #[test]
    fn bengali_block_detection() {
        assert!(contains_bengali("নাপা"));
        assert!(contains_bengali("Napa নাপা mixed"));
        assert!(!contains_bengali("Napa"));
        assert!(!contains_bengali(""));
    }

    #[test]
    fn latin_name_passes_through_without_a_call() {
        let client = MockLlmClient::new();
        assert_eq!(normalize_name(&client, "Amoxicillin"), "Amoxicillin");
        assert_eq!(client.call_count(), 0);
    }

    #[test]
    fn ambiguous_script_passes_through_without_a_call() {
        let client = MockLlmClient::new();
        assert_eq!(normalize_name(&client, "دواء"), "دواء");
        assert_eq!(client.call_count(), 0);
    }

    #[test]
    fn bengali_name_triggers_translation_call() {
        let client = MockLlmClient::new().push_response("Processed Name: Napa");
        assert_eq!(normalize_name(&client, "নাপা"), "Napa");
        assert_eq!(client.call_count(), 1);
        assert!(client.prompts()[0].contains("'নাপা'"));
    }

    #[test]
    fn marker_offset_survives_length_changing_lowercase() {
        // 'İ' (U+0130) grows from 2 to 3 bytes under full Unicode
        // lowercasing; a drifted offset would slice mid-character and
        // panic instead of failing open.
        let client = MockLlmClient::new().push_response("İProcessed Name:Napa");
        assert_eq!(normalize_name(&client, "নাপা"), "Napa");
    }

    #[test]
    fn bare_reply_without_marker_is_accepted() {
        let client = MockLlmClient::new().push_response("Seclo\n");
        assert_eq!(normalize_name(&client, "সেকলো"), "Seclo");
    }

    #[test]
    fn failed_call_fails_open_to_input() {
        let client = MockLlmClient::new().push_error(LlmError::Http("boom".into()));
        assert_eq!(normalize_name(&client, "নাপা"), "নাপা");
    }

    #[test]
    fn blank_reply_fails_open_to_input() {
        let client = MockLlmClient::new().push_response("Processed Name:   ");
        assert_eq!(normalize_name(&client, "নাপা"), "নাপা");
    }
}
