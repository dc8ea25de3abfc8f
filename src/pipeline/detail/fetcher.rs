//! Detail lookup for one medicine: prompt → LLM → parsed record.
//!
//! This boundary never raises: a refused or failed call degrades every
//! field to the matching sentinel and records a description, which is
//! itself valid output.

use super::parser::parse_detail_response;
use crate::models::{MedicineRecord, BLOCKED, ERROR};
use crate::pipeline::gemini::{LlmClient, LlmError};
use crate::pipeline::prompts::build_detail_prompt;

/// Fetch and parse the sixteen-field record for one normalized name.
pub fn fetch_medicine_details(
    client: &dyn LlmClient,
    original_name: &str,
    query_name: &str,
) -> MedicineRecord {
    let prompt = build_detail_prompt(query_name);

    match client.generate(&prompt) {
        Ok(response) => {
            let record = parse_detail_response(original_name, query_name, &response);
            tracing::info!(
                medicine = %query_name,
                highlights = record.highlights.len(),
                suggested_queries = record.suggested_queries.len(),
                "Detail lookup parsed"
            );
            record
        }
        Err(LlmError::Blocked(reason)) => {
            tracing::warn!(medicine = %query_name, reason = %reason, "Detail lookup blocked");
            let mut record = MedicineRecord::degraded(original_name, query_name, BLOCKED);
            record.error_message = Some(format!("Blocked ({reason})"));
            record
        }
        Err(e) => {
            tracing::error!(medicine = %query_name, error = %e, "Detail lookup failed");
            let mut record = MedicineRecord::degraded(original_name, query_name, ERROR);
            record.error_message = Some(format!("Error during processing: {e}"));
            record
        }
    }
}
