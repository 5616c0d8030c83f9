//! crates/moodmorph_core/src/codec.rs
//!
//! JSON encoding of the entry collection: the persisted blob, import payloads
//! and the export file.

use chrono::NaiveDate;
use serde_json::Value;
use tracing::warn;

use crate::domain::JournalEntry;

/// Why an import payload was rejected. The store is never touched in these cases.
#[derive(Debug, thiserror::Error)]
pub enum ImportError {
    #[error("Import payload is not valid JSON: {0}")]
    InvalidJson(#[from] serde_json::Error),
    #[error("Import payload is not a JSON array")]
    NotAnArray,
    #[error("Import item {index} is not a journal entry: {reason}")]
    InvalidEntry { index: usize, reason: String },
}

/// Decodes the persisted blob. Anything unreadable is treated as an empty journal.
pub fn decode_persisted(blob: &str) -> Vec<JournalEntry> {
    match serde_json::from_str::<Vec<JournalEntry>>(blob) {
        Ok(entries) => entries,
        Err(e) => {
            warn!("Failed to parse persisted entries, starting empty: {}", e);
            Vec::new()
        }
    }
}

pub fn encode_persisted(entries: &[JournalEntry]) -> Result<String, serde_json::Error> {
    serde_json::to_string(entries)
}

/// Parses an import file. The top level must be an array and every element
/// must be a complete entry.
pub fn parse_import(text: &str) -> Result<Vec<JournalEntry>, ImportError> {
    let value: Value = serde_json::from_str(text)?;
    let Value::Array(items) = value else {
        return Err(ImportError::NotAnArray);
    };

    items
        .into_iter()
        .enumerate()
        .map(|(index, item)| {
            serde_json::from_value::<JournalEntry>(item).map_err(|e| ImportError::InvalidEntry {
                index,
                reason: e.to_string(),
            })
        })
        .collect()
}

/// Pretty-printed JSON array of the full collection.
pub fn export_json(entries: &[JournalEntry]) -> Result<String, serde_json::Error> {
    serde_json::to_string_pretty(entries)
}

pub fn export_file_name(today: NaiveDate) -> String {
    format!("moodmorph_backup_{}.json", today.format("%Y-%m-%d"))
}

#[cfg(test)]
mod tests {
    use super::*;

    const ENTRY: &str = r#"{"id":"a","date":"2024-05-01T10:00:00Z","action":"call",
        "emotion":"Sad","reaction":"cried","result":"slept","intensity":8}"#;

    #[test]
    fn malformed_blob_decodes_as_empty() {
        assert!(decode_persisted("{not json").is_empty());
        assert!(decode_persisted(r#"{"id":"a"}"#).is_empty());
        assert_eq!(decode_persisted(&format!("[{}]", ENTRY)).len(), 1);
    }

    #[test]
    fn import_rejects_non_arrays() {
        assert!(matches!(parse_import(ENTRY), Err(ImportError::NotAnArray)));
        assert!(matches!(parse_import("oops"), Err(ImportError::InvalidJson(_))));
    }

    #[test]
    fn import_reports_the_first_bad_item() {
        let payload = format!(r#"[{}, {{"id":"b"}}]"#, ENTRY);
        match parse_import(&payload) {
            Err(ImportError::InvalidEntry { index, .. }) => assert_eq!(index, 1),
            other => panic!("unexpected result: {:?}", other),
        }
    }

    #[test]
    fn export_is_pretty_and_reimportable() {
        let entries = parse_import(&format!("[{}]", ENTRY)).unwrap();
        let exported = export_json(&entries).unwrap();
        assert!(exported.contains('\n'));
        assert_eq!(parse_import(&exported).unwrap(), entries);
    }

    #[test]
    fn export_file_name_embeds_the_date() {
        let day = NaiveDate::from_ymd_opt(2024, 5, 1).unwrap();
        assert_eq!(export_file_name(day), "moodmorph_backup_2024-05-01.json");
    }
}
