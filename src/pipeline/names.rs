//! Medicine-name extraction from raw prescription text.
//!
//! One LLM call, then a two-tier parse of the reply: a structured scan keyed
//! on a `Medicine Names:` marker line, and a line-filter fallback for replies
//! that skip the marker. The format is requested, not guaranteed.

use crate::pipeline::gemini::{LlmClient, LlmError};
use crate::pipeline::prompts::build_name_extraction_prompt;

/// Reply meaning "no medicines found", compared case-insensitively.
const NONE_SENTINEL: &str = "NONE";

/// Marker that switches the structured scan into collecting mode.
const NAMES_MARKER: &str = "medicine names:";

/// Line prefixes the fallback heuristic treats as field headers, not names.
const HEADER_PREFIXES: &[&str] = &["dosage:", "frequency:", "dr."];

/// Issue the extraction call and parse the reply into an ordered name list.
///
/// A safety block is returned as `LlmError::Blocked` so the caller can
/// surface the reason; it and every other error degrade to an empty list at
/// the caller's boundary.
pub fn extract_medicine_names(
    client: &dyn LlmClient,
    document_text: &str,
) -> Result<Vec<String>, LlmError> {
    let prompt = build_name_extraction_prompt(document_text);
    let response = client.generate(&prompt)?;
    Ok(parse_name_response(&response))
}

/// Parse one extraction reply. Duplicates and empty entries are excluded;
/// first-occurrence order is preserved.
pub fn parse_name_response(response: &str) -> Vec<String> {
    let trimmed = response.trim();
    if trimmed.eq_ignore_ascii_case(NONE_SENTINEL) {
        return Vec::new();
    }

    let mut names = scan_after_marker(trimmed);

    // Fallback: the model ignored the requested format but said something.
    if names.is_empty() && !trimmed.is_empty() {
        names = fallback_line_filter(trimmed);
    }

    dedup_preserving_order(names)
}

/// Structured scan: everything after a `Medicine Names:` marker line is a
/// candidate, one per line.
fn scan_after_marker(response: &str) -> Vec<String> {
    let mut collecting = false;
    let mut names = Vec::new();

    for raw_line in response.lines() {
        let line = raw_line.trim();
        if line.is_empty() {
            continue;
        }

        // ASCII lowercasing keeps byte offsets 1:1 with the original line,
        // so the marker position is safe to slice with. Full Unicode
        // lowercasing can change byte lengths and drift the offset.
        let lower = line.to_ascii_lowercase();
        if let Some(pos) = lower.find(NAMES_MARKER) {
            collecting = true;
            // Slice the original line so the name's case survives.
            let remainder = line[pos + NAMES_MARKER.len()..].trim();
            if !remainder.is_empty() && !remainder.eq_ignore_ascii_case(NONE_SENTINEL) {
                names.push(remainder.to_string());
            }
            continue;
        }

        if collecting && !line.eq_ignore_ascii_case(NONE_SENTINEL) {
            names.push(line.to_string());
        }
    }

    names
}

/// Heuristic fallback: keep lines longer than two characters that do not
/// look like field headers. Documented behavior — it can drop valid short
/// names and admit non-medicine text.
fn fallback_line_filter(response: &str) -> Vec<String> {
    response
        .lines()
        .map(str::trim)
        .filter(|line| !line.is_empty() && !line.eq_ignore_ascii_case(NONE_SENTINEL))
        .filter(|line| line.chars().count() > 2)
        .filter(|line| {
            let lower = line.to_ascii_lowercase();
            !HEADER_PREFIXES.iter().any(|prefix| lower.starts_with(prefix))
        })
        .map(ToString::to_string)
        .collect()
}

fn dedup_preserving_order(names: Vec<String>) -> Vec<String> {
    let mut seen = std::collections::HashSet::new();
    names
        .into_iter()
        .filter(|name| seen.insert(name.clone()))
        .collect()
}
