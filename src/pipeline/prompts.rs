//! Prompt templates for the three pipeline calls.
//!
//! The detail template's response shape is what `detail::parser` scans for:
//! numbered field lines, a `17. Web Search Highlights:` section, and the
//! total-failure marker line.

use crate::models::DetailField;

/// Marker line signaling that no structured information could be found.
/// Everything after it on the line is a comma-separated query list.
pub const COMPLETE_FAILURE_MARKER: &str = "COMPLETE_INFO_FAILURE_SUGGEST_QUERIES:";

/// Marker phrase for an explicitly empty highlights section.
pub const NO_HIGHLIGHTS_MARKER: &str = "No specific web search highlights found";

/// Header of the highlights section in detail responses.
pub const HIGHLIGHTS_HEADER: &str = "17. Web Search Highlights:";

/// Prompt used by the vision OCR path when a document arrives as an image
/// (or as a PDF with no extractable text layer).
pub const VISION_OCR_PROMPT: &str = "\
This document is a medical prescription. Extract all readable text, paying close \
attention to medicine names, dosages, and doctor's notes. Preserve the layout or \
indicate line breaks if possible. If the text is in Bengali, provide the Bengali text.";

/// Build the name-extraction prompt for one document's text.
///
/// Expected response: one medicine name per line, or the single word `NONE`.
pub fn build_name_extraction_prompt(document_text: &str) -> String {
    format!(
        "From the following doctor's prescription text, extract only the names of medicines.\n\
         List each medicine name on a new line. Do not include dosages, frequencies, or other text.\n\
         If a medicine name appears to be in Bengali, provide it in Bengali.\n\
         If no medicines are found, output the single word 'NONE'.\n\
         \n\
         Prescription Text:\n\
         {document_text}\n\
         \n\
         Medicine Names:\n"
    )
}

/// Build the normalization prompt for one possibly-Bengali medicine name.
///
/// Expected response: the final name alone, ideally after a
/// `Processed Name:` marker.
pub fn build_normalization_prompt(name: &str) -> String {
    format!(
        "The following is a medicine name, possibly in Bengali: '{name}'.\n\
         If this name is primarily in Bengali script, translate it to its common English \
         pharmaceutical equivalent.\n\
         If the name is already in English or a widely recognized Latin-script brand/scientific \
         name (even if used in Bangladesh), return the original name.\n\
         Output ONLY the final name. For example:\n\
         Input: 'নাপা', Output: 'Napa'\n\
         Input: 'প্যারাসিটামল', Output: 'Paracetamol'\n\
         Input: 'Amoxicillin', Output: 'Amoxicillin'\n\
         Input: 'সেকলো', Output: 'Seclo'\n\
         \n\
         Processed Name:"
    )
}

/// Build the detail-lookup prompt for one normalized medicine name.
pub fn build_detail_prompt(medicine_name: &str) -> String {
    let mut numbered_fields = String::new();
    for field in DetailField::ALL {
        let note = match field {
            DetailField::MedicineName => {
                format!(" {medicine_name} (Confirm or provide the most common name)")
            }
            DetailField::ManufacturerName => {
                " (List known in Bangladesh if possible, otherwise general)".to_string()
            }
            DetailField::PrimaryWebsiteUrl => {
                " (The most relevant medex.com.bd page URL if found. Otherwise, the URL of \
                 another primary source used for the above details. If multiple general \
                 sources, state 'Multiple general sources used' or 'Not Found')."
                    .to_string()
            }
            _ => String::new(),
        };
        numbered_fields.push_str(&format!("{}. {}:{}\n", field.index(), field.label(), note));
    }

    format!(
        "You are an AI assistant for a pharmacist in Bangladesh.\n\
         For the medicine '{medicine_name}', provide the following information.\n\
         \n\
         Instructions:\n\
         1. **Primary Source (Medex.com.bd):** First, prioritize finding information from \
         `https://medex.com.bd`. You can simulate searching it using a query like \
         `https://medex.com.bd/search?search={medicine_name}`.\n\
         2. **Secondary Sources (General Web Search):** If Medex.com.bd does not yield complete \
         information, use your general web search capabilities and knowledge from other reliable \
         medical sources.\n\
         3. **Bangladesh Context:** Where possible, provide information relevant to Bangladesh \
         (e.g., manufacturers available locally). For general medical facts, standard information \
         is acceptable if Bangladesh-specific nuances aren't readily found. Do not mark fields as \
         'Not Found' solely for lacking a BD-specific version if general info exists.\n\
         4. **Output Structure:** Use the exact numbered fields below. If information for a field \
         is genuinely unavailable after all search attempts, state 'Not Found'.\n\
         \n\
         **Structured Information (1-16):**\n\
         {numbered_fields}\
         \n\
         **Web Search Highlights (17):**\n\
         {HIGHLIGHTS_HEADER}\n\
         * Provide up to 3 key web search results that appear most relevant for a pharmacist \
         researching '{medicine_name}'.\n\
         * For each result, use this exact format:\n\
         Title: [Page Title]\n\
         URL: [Full URL]\n\
         Snippet: [A brief 1-2 sentence summary or snippet]\n\
         * If no relevant web search results can be summarized in this way, state \
         '{NO_HIGHLIGHTS_MARKER} under this section.'\n\
         \n\
         **Final Fallback (Only if EVERYTHING above fails):**\n\
         If, after all attempts, you can find absolutely no information for points 1-16 AND no web \
         search highlights for point 17, then output ONLY the following line and nothing else:\n\
         {COMPLETE_FAILURE_MARKER} {medicine_name} generic name, {medicine_name} uses Bangladesh, \
         {medicine_name} side effects\n\
         \n\
         --- End of Instructions ---\n\
         Begin Response:\n"
    )
}
