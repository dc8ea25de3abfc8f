//! Plain-text export of one session, suitable for download as a .txt file.
//!
//! One-way rendering: per medicine in mention order, the sixteen fields in
//! fixed order, then highlights, then suggested queries.

use crate::models::{DetailField, Session};

/// Render a full session as plain text.
pub fn render_session(session: &Session) -> String {
    let mut out = String::new();

    for record in &session.records {
        out.push_str(&format!(
            "--- Details for {} (Queried as: {}) ---\n",
            record.original_name, record.query_name
        ));

        for field in DetailField::ALL {
            out.push_str(&format!("{}: {}\n", field.label(), record.fields.get(field)));
        }

        if !record.highlights.is_empty() {
            out.push_str("\nWeb Search Highlights:\n");
            for highlight in &record.highlights {
                out.push_str(&format!(
                    "  Title: {}\n",
                    highlight.title.as_deref().unwrap_or("N/A")
                ));
                out.push_str(&format!(
                    "  URL: {}\n",
                    highlight.url.as_deref().unwrap_or("N/A")
                ));
                out.push_str(&format!(
                    "  Snippet: {}\n\n",
                    highlight.snippet.as_deref().unwrap_or("N/A")
                ));
            }
        }

        if !record.suggested_queries.is_empty() {
            out.push_str("\nSuggested Search Queries (if info was scarce):\n");
            for query in &record.suggested_queries {
                out.push_str(&format!("- {query}\n"));
            }
        }

        out.push_str("\n\n");
    }

    out
}
