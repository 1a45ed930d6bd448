//! JSON transfer documents: export for download, import with de-duplication.

use crate::error::QuoteError;
use crate::store::{QuoteStore, quote_from_value};
use chrono::{DateTime, Utc};
use quote_generator_types::{ImportReport, Quote};
use std::path::Path;

pub fn export_document(quotes: &[Quote]) -> Result<String, QuoteError> {
    serde_json::to_string_pretty(quotes)
        .map_err(|e| QuoteError::Storage(format!("Failed to serialize quotes: {}", e)))
}

pub fn export_filename(now: DateTime<Utc>) -> String {
    format!("quotes-{}.json", now.format("%Y%m%d-%H%M%S"))
}

/// Parses a transfer document, keeping entries whose fields are non-blank strings.
pub fn parse_document(raw: &str) -> Result<Vec<Quote>, QuoteError> {
    let invalid = || QuoteError::Parse("Invalid JSON format.".to_string());

    let value: serde_json::Value = serde_json::from_str(raw).map_err(|_| invalid())?;
    let entries = value.as_array().ok_or_else(invalid)?;

    Ok(entries
        .iter()
        .filter_map(quote_from_value)
        .filter(|q| !q.text.trim().is_empty() && !q.category.trim().is_empty())
        .collect())
}

/// Appends every valid entry not already present. Nothing is mutated when
/// the document fails to parse.
pub fn import_document(store: &mut QuoteStore, raw: &str) -> Result<ImportReport, QuoteError> {
    let incoming = parse_document(raw)?;

    let mut accepted = 0usize;
    for quote in incoming {
        if store.contains(&quote) {
            continue;
        }
        store.append(quote)?;
        accepted += 1;
    }

    Ok(ImportReport {
        accepted,
        total: store.len(),
    })
}

pub async fn read_document(path: impl AsRef<Path>) -> Result<String, QuoteError> {
    let path = path.as_ref();
    tokio::fs::read_to_string(path)
        .await
        .map_err(|e| QuoteError::Parse(format!("Failed to read {}: {}", path.display(), e)))
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::TimeZone;

    #[test]
    fn test_export_is_pretty_array() {
        let doc = export_document(&[Quote::new("A", "x")]).unwrap();
        assert!(doc.starts_with("[\n"));
        assert!(doc.contains("  {\n    \"text\": \"A\",\n    \"category\": \"x\"\n  }"));
    }

    #[test]
    fn test_export_filename_embeds_timestamp() {
        let now = Utc.with_ymd_and_hms(2026, 10, 16, 9, 5, 3).unwrap();
        assert_eq!(export_filename(now), "quotes-20261016-090503.json");
    }

    #[test]
    fn test_import_rejects_non_array() {
        let mut store = QuoteStore::seeded();
        let err = import_document(&mut store, r#"{"text":"X","category":"Y"}"#).unwrap_err();
        assert_eq!(err, QuoteError::Parse("Invalid JSON format.".into()));

        assert!(import_document(&mut store, "not json").is_err());
        assert_eq!(store.len(), 3);
    }

    #[test]
    fn test_import_skips_existing_pair() {
        let mut store = QuoteStore::new(vec![Quote::new("X", "Y")]);
        let report = import_document(&mut store, r#"[{"text":"X","category":"Y"}]"#).unwrap();
        assert_eq!(report, ImportReport { accepted: 0, total: 1 });
    }

    #[test]
    fn test_import_filters_invalid_and_duplicate_entries() {
        let mut store = QuoteStore::new(vec![Quote::new("X", "Y")]);
        let raw = r#"[
            {"text":"X","category":"Other"},
            {"text":"","category":"Y"},
            {"text":"  ","category":"Y"},
            {"text":"Z"},
            {"text":7,"category":"Y"},
            {"text":"New","category":"Y"},
            {"text":"New","category":"Y"}
        ]"#;
        let report = import_document(&mut store, raw).unwrap();
        assert_eq!(report, ImportReport { accepted: 2, total: 3 });
        assert!(store.contains(&Quote::new("X", "Other")));
        assert!(store.contains(&Quote::new("New", "Y")));
    }

    #[test]
    fn test_export_then_import_accepts_nothing() {
        let mut store = QuoteStore::seeded();
        store.replace_all(vec![
            Quote::new(" padded server title ", "server"),
            Quote::new("Be kind.", "Life"),
        ]);
        let before = store.clone();

        let doc = export_document(store.as_slice()).unwrap();
        let report = import_document(&mut store, &doc).unwrap();

        assert_eq!(report.accepted, 0);
        assert_eq!(store, before);
    }

    #[tokio::test]
    async fn test_read_document_from_file() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("quotes.json");
        std::fs::write(&path, r#"[{"text":"A","category":"x"}]"#).unwrap();

        let raw = read_document(&path).await.unwrap();
        assert_eq!(parse_document(&raw).unwrap(), vec![Quote::new("A", "x")]);

        let missing = read_document(dir.path().join("nope.json")).await;
        assert!(missing.is_err());
    }
}
