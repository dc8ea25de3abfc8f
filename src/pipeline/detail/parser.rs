//! Parser for one free-text detail response.
//!
//! The response format is requested by the prompt, never guaranteed, so the
//! scan is deliberately lenient: unrecognized lines attach to whatever field
//! or highlight is open, and anything never seen defaults to a sentinel.
//! Parsing cannot fail — the worst input yields an all-`Not Found` record.

use crate::models::{
    DetailField, DetailFields, MedicineRecord, WebHighlight, NOT_FOUND_COMPLETE_FAILURE,
};
use crate::pipeline::prompts::{COMPLETE_FAILURE_MARKER, HIGHLIGHTS_HEADER, NO_HIGHLIGHTS_MARKER};

/// Scanner states for one response.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum ParserState {
    /// Reading the numbered 1-16 field section.
    ScanningFields,
    /// Past the `17. Web Search Highlights:` header.
    CollectingHighlights,
    /// Input exhausted; everything in progress has been flushed.
    Done,
}

/// Parse one detail response into a complete record.
///
/// All sixteen fields are present in the output regardless of how much of
/// the response was parseable.
pub fn parse_detail_response(
    original_name: &str,
    query_name: &str,
    response: &str,
) -> MedicineRecord {
    let mut record = MedicineRecord {
        original_name: original_name.to_string(),
        query_name: query_name.to_string(),
        fields: DetailFields::default(),
        highlights: Vec::new(),
        suggested_queries: Vec::new(),
        error_message: None,
    };

    // Total-failure short-circuit: suggested queries instead of field data.
    if let Some(pos) = response.find(COMPLETE_FAILURE_MARKER) {
        let remainder = &response[pos + COMPLETE_FAILURE_MARKER.len()..];
        record.suggested_queries = remainder
            .split(',')
            .map(str::trim)
            .filter(|q| !q.is_empty())
            .map(ToString::to_string)
            .collect();
        record.fields = DetailFields::with_value(NOT_FOUND_COMPLETE_FAILURE);
        return record;
    }

    let mut state = ParserState::ScanningFields;
    let mut open_field: Option<DetailField> = None;
    let mut value_lines: Vec<String> = Vec::new();
    let mut current_highlight = WebHighlight::default();

    for raw_line in response.lines() {
        let line = raw_line.trim();
        if line.is_empty() {
            continue;
        }

        match state {
            ParserState::ScanningFields => {
                if line.starts_with(HIGHLIGHTS_HEADER) {
                    flush_field(&mut record.fields, &mut open_field, &mut value_lines);
                    state = ParserState::CollectingHighlights;
                    if line.contains(NO_HIGHLIGHTS_MARKER) {
                        record.highlights.push(no_highlights_placeholder());
                    }
                    continue;
                }

                if let Some(field) = match_field_start(line) {
                    flush_field(&mut record.fields, &mut open_field, &mut value_lines);
                    open_field = Some(field);
                    value_lines.push(text_after_colon(line).to_string());
                } else if open_field.is_some() {
                    // Continuation of the open field's text.
                    value_lines.push(line.to_string());
                }
            }
            ParserState::CollectingHighlights => {
                if let Some(title) = line.strip_prefix("Title:") {
                    if has_snippet(&current_highlight) {
                        record.highlights.push(std::mem::take(&mut current_highlight));
                    }
                    current_highlight.title = Some(title.trim().to_string());
                } else if let Some(url) = line.strip_prefix("URL:") {
                    current_highlight.url = Some(url.trim().to_string());
                } else if let Some(snippet) = line.strip_prefix("Snippet:") {
                    current_highlight.snippet = Some(snippet.trim().to_string());
                } else if has_snippet(&current_highlight) {
                    // Wrapped continuation of the snippet text.
                    if let Some(snippet) = current_highlight.snippet.as_mut() {
                        snippet.push(' ');
                        snippet.push_str(line);
                    }
                }
            }
            ParserState::Done => break,
        }
    }

    // Terminal flush: whatever is in progress when input ends is committed.
    flush_field(&mut record.fields, &mut open_field, &mut value_lines);
    if has_snippet(&current_highlight) {
        record.highlights.push(current_highlight);
    }
    state = ParserState::Done;
    debug_assert_eq!(state, ParserState::Done);

    record
}

/// Does this line open one of the sixteen numbered fields?
fn match_field_start(line: &str) -> Option<DetailField> {
    DetailField::ALL.into_iter().find(|field| {
        let prefix = format!("{}. {}:", field.index(), field.label());
        line.starts_with(&prefix)
    })
}

/// Commit the open field's newline-joined text, if any. Empty values are
/// dropped so the field keeps its `Not Found` default.
fn flush_field(
    fields: &mut DetailFields,
    open_field: &mut Option<DetailField>,
    value_lines: &mut Vec<String>,
) {
    if let Some(field) = open_field.take() {
        let value = value_lines.join("\n").trim().to_string();
        if !value.is_empty() {
            fields.set(field, value);
        }
    }
    value_lines.clear();
}

fn text_after_colon(line: &str) -> &str {
    line.splitn(2, ':').nth(1).unwrap_or("").trim()
}

/// A highlight is committed only once it carries a non-empty snippet.
fn has_snippet(highlight: &WebHighlight) -> bool {
    highlight.snippet.as_deref().is_some_and(|s| !s.is_empty())
}

fn no_highlights_placeholder() -> WebHighlight {
    WebHighlight {
        title: Some("Info".to_string()),
        url: None,
        snippet: Some("No specific web search highlights found by AI.".to_string()),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::{BLOCKED, NOT_FOUND};

    fn well_formed_response() -> String {
        r#"Begin Response:
1. Medicine Name: Seclo 20
2. Medicine Manufacturer Name: Square Pharmaceuticals
3. Indications: Gastric ulcer
Duodenal ulcer
GERD
4. Pharmacology: Omeprazole is a proton pump inhibitor.
5. Dosage & Administration: 20 mg once daily
6. Interaction: Clopidogrel
7. Contraindications: Hypersensitivity
8. Side Effects: Headache
9. Pregnancy & Lactation: Category C
10. Precautions & Warnings: Long-term use
11. Use in Special Populations: Reduce dose in hepatic impairment
12. Overdose Effects: Not Found
13. Therapeutic Class: Proton Pump Inhibitor
14. Storage Conditions: Store below 30°C
15. Chemical Structure (Molecular Formula): C17H19N3O3S
16. Primary Website URL: https://medex.com.bd/brands/seclo
17. Web Search Highlights:
Title: Seclo 20 - Medex
URL: https://medex.com.bd/brands/seclo
Snippet: Omeprazole 20 mg capsule by Square.
Title: Omeprazole - Wikipedia
URL: https://en.wikipedia.org/wiki/Omeprazole
Snippet: Omeprazole is used to treat GERD.
"#
        .to_string()
    }

    #[test]
    fn well_formed_response_fills_all_fields() {
        let record = parse_detail_response("সেকলো", "Seclo", &well_formed_response());
        assert_eq!(record.fields.medicine_name, "Seclo 20");
        assert_eq!(record.fields.manufacturer_name, "Square Pharmaceuticals");
        assert_eq!(record.fields.therapeutic_class, "Proton Pump Inhibitor");
        assert_eq!(
            record.fields.primary_website_url,
            "https://medex.com.bd/brands/seclo"
        );
        assert_eq!(record.original_name, "সেকলো");
        assert_eq!(record.query_name, "Seclo");
        assert!(record.suggested_queries.is_empty());
        assert!(record.error_message.is_none());
    }

    #[test]
    fn multi_line_field_is_newline_joined_in_order() {
        let record = parse_detail_response("x", "Seclo", &well_formed_response());
        assert_eq!(
            record.fields.indications,
            "Gastric ulcer\nDuodenal ulcer\nGERD"
        );
    }

    #[test]
    fn two_highlights_in_order_fully_populated() {
        let record = parse_detail_response("x", "Seclo", &well_formed_response());
        assert_eq!(record.highlights.len(), 2);
        assert_eq!(record.highlights[0].title.as_deref(), Some("Seclo 20 - Medex"));
        assert_eq!(
            record.highlights[0].url.as_deref(),
            Some("https://medex.com.bd/brands/seclo")
        );
        assert_eq!(
            record.highlights[0].snippet.as_deref(),
            Some("Omeprazole 20 mg capsule by Square.")
        );
        assert_eq!(
            record.highlights[1].title.as_deref(),
            Some("Omeprazole - Wikipedia")
        );
    }

    #[test]
    fn every_field_present_for_any_input() {
        for response in ["", "complete garbage\nwith lines", "1. Medicine Name: Napa"] {
            let record = parse_detail_response("x", "Napa", response);
            for field in DetailField::ALL {
                assert!(!record.fields.get(field).is_empty(), "{response:?}");
            }
        }
    }

    #[test]
    fn unseen_fields_default_to_not_found() {
        let record = parse_detail_response("x", "Napa", "1. Medicine Name: Napa 500");
        assert_eq!(record.fields.medicine_name, "Napa 500");
        assert_eq!(record.fields.pharmacology, NOT_FOUND);
        assert_eq!(record.fields.primary_website_url, NOT_FOUND);
    }

    #[test]
    fn total_failure_marker_short_circuits() {
        let response = "COMPLETE_INFO_FAILURE_SUGGEST_QUERIES: Foo generic name, Foo uses Bangladesh, Foo side effects";
        let record = parse_detail_response("Foo", "Foo", response);
        assert_eq!(
            record.suggested_queries,
            vec!["Foo generic name", "Foo uses Bangladesh", "Foo side effects"]
        );
        for field in DetailField::ALL {
            assert_eq!(record.fields.get(field), NOT_FOUND_COMPLETE_FAILURE);
        }
        assert!(record.highlights.is_empty());
    }

    #[test]
    fn failure_marker_wins_even_with_surrounding_text() {
        let response = "Some preamble.\nCOMPLETE_INFO_FAILURE_SUGGEST_QUERIES: a query";
        let record = parse_detail_response("x", "x", response);
        assert_eq!(record.suggested_queries, vec!["a query"]);
    }

    #[test]
    fn highlights_header_flushes_open_field() {
        let response = "3. Indications: Pain\nFever\n17. Web Search Highlights:\nTitle: T\nSnippet: S";
        let record = parse_detail_response("x", "x", response);
        assert_eq!(record.fields.indications, "Pain\nFever");
        assert_eq!(record.highlights.len(), 1);
    }

    #[test]
    fn explicit_no_highlights_inserts_placeholder() {
        let response = "1. Medicine Name: Napa\n17. Web Search Highlights: No specific web search highlights found under this section.";
        let record = parse_detail_response("x", "Napa", response);
        assert_eq!(record.highlights.len(), 1);
        assert_eq!(record.highlights[0].title.as_deref(), Some("Info"));
        assert!(record.highlights[0]
            .snippet
            .as_deref()
            .unwrap()
            .contains("No specific web search highlights found"));
    }

    #[test]
    fn snippet_continuation_lines_are_appended() {
        let response = "17. Web Search Highlights:\nTitle: T\nURL: https://u\nSnippet: First part\nthat wrapped onto a second line.";
        let record = parse_detail_response("x", "x", response);
        assert_eq!(
            record.highlights[0].snippet.as_deref(),
            Some("First part that wrapped onto a second line.")
        );
    }

    #[test]
    fn trailing_highlight_without_snippet_is_dropped() {
        let response = "17. Web Search Highlights:\nTitle: Kept\nSnippet: S\nTitle: Dropped\nURL: https://only-url";
        let record = parse_detail_response("x", "x", response);
        assert_eq!(record.highlights.len(), 1);
        assert_eq!(record.highlights[0].title.as_deref(), Some("Kept"));
    }

    #[test]
    fn preamble_before_first_field_is_ignored() {
        let response = "Certainly! Here is the information you requested.\n\n1. Medicine Name: Napa";
        let record = parse_detail_response("x", "Napa", response);
        assert_eq!(record.fields.medicine_name, "Napa");
    }

    #[test]
    fn field_with_empty_value_keeps_not_found_default() {
        let response = "3. Indications:\n4. Pharmacology: Analgesic";
        let record = parse_detail_response("x", "x", response);
        assert_eq!(record.fields.indications, NOT_FOUND);
        assert_eq!(record.fields.pharmacology, "Analgesic");
    }

    #[test]
    fn parser_ignores_blocked_sentinel_in_text() {
        // "Blocked" is a caller-set sentinel; plain response text mentioning
        // it parses normally.
        let response = format!("1. Medicine Name: {BLOCKED}");
        let record = parse_detail_response("x", "x", &response);
        assert_eq!(record.fields.medicine_name, BLOCKED);
    }
}
