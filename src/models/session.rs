use chrono::NaiveDateTime;
use serde::{Deserialize, Serialize};

use super::medicine::MedicineRecord;

/// One processed document. Built once per upload, never mutated afterwards;
/// the store keeps sessions append-only.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Session {
    /// Assigned by the store on insert; None until persisted.
    pub id: Option<i64>,
    pub timestamp: NaiveDateTime,
    pub file_name: String,
    /// Short preview of the extracted document text.
    pub content_preview: String,
    /// Original mention strings in document order. Parallels `records`.
    pub mentions: Vec<String>,
    /// One record per mention, same order.
    pub records: Vec<MedicineRecord>,
}

impl Session {
    pub fn new(
        timestamp: NaiveDateTime,
        file_name: String,
        content_preview: String,
        mentions: Vec<String>,
        records: Vec<MedicineRecord>,
    ) -> Self {
        debug_assert_eq!(mentions.len(), records.len());
        Self {
            id: None,
            timestamp,
            file_name,
            content_preview,
            mentions,
            records,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::medicine::{MedicineRecord, NOT_FOUND};

    #[test]
    fn session_keeps_mention_record_parallelism() {
        let records = vec![
            MedicineRecord::degraded("Napa", "Napa", NOT_FOUND),
            MedicineRecord::degraded("সেকলো", "Seclo", NOT_FOUND),
        ];
        let session = Session::new(
            chrono::NaiveDate::from_ymd_opt(2024, 3, 1)
                .unwrap()
                .and_hms_opt(9, 30, 0)
                .unwrap(),
            "rx.pdf".into(),
            "preview".into(),
            vec!["Napa".into(), "সেকলো".into()],
            records,
        );
        assert_eq!(session.mentions.len(), session.records.len());
        assert_eq!(session.mentions[1], session.records[1].original_name);
        assert!(session.id.is_none());
    }
}
