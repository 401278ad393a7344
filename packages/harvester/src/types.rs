//! Core data types for the harvester.

use std::collections::BTreeMap;

use serde_json::{Map, Value};

/// One document as returned by the listing endpoint.
///
/// The full listing object is retained in `raw` because extraction needs
/// fields beyond the ones the discovery filter reads.
#[derive(Debug, Clone)]
pub struct DocumentDescriptor {
    /// EDINET document id (e.g., "S100ABCD").
    pub doc_id: String,

    /// Securities code of the filer; empty for unlisted filers.
    pub sec_code: String,

    /// Ordinance code of the filing.
    pub ordinance_code: String,

    /// Form code of the filing.
    pub form_code: String,

    /// Full listing payload.
    pub raw: Map<String, Value>,
}

/// Read a string field from a listing entry, treating null/missing as empty.
fn str_field(entry: &Map<String, Value>, key: &str) -> String {
    entry
        .get(key)
        .and_then(Value::as_str)
        .unwrap_or_default()
        .to_string()
}

impl DocumentDescriptor {
    /// Build a descriptor from one listing entry.
    ///
    /// Returns `None` if the entry has no `docID`; nothing downstream can
    /// run without one, and the caller decides whether that is fatal.
    #[must_use]
    pub fn from_listing(entry: Map<String, Value>) -> Option<Self> {
        let doc_id = str_field(&entry, "docID");
        if doc_id.is_empty() {
            return None;
        }

        Some(Self {
            doc_id,
            sec_code: str_field(&entry, "secCode"),
            ordinance_code: str_field(&entry, "ordinanceCode"),
            form_code: str_field(&entry, "formCode"),
            raw: entry,
        })
    }
}

/// One output row: column name to extracted value.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ExtractedRecord {
    values: BTreeMap<String, String>,
}

impl ExtractedRecord {
    /// Create an empty record.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Set a column value.
    pub fn set(&mut self, column: impl Into<String>, value: impl Into<String>) {
        self.values.insert(column.into(), value.into());
    }

    /// Whether a column has been set.
    #[must_use]
    pub fn contains(&self, column: &str) -> bool {
        self.values.contains_key(column)
    }

    /// Value of a column, empty string if unset.
    #[must_use]
    pub fn get(&self, column: &str) -> &str {
        self.values.get(column).map(String::as_str).unwrap_or("")
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn listing_entry(json: &str) -> Map<String, Value> {
        match serde_json::from_str(json).unwrap() {
            Value::Object(map) => map,
            other => panic!("expected object, got {other:?}"),
        }
    }

    #[test]
    fn test_descriptor_from_listing() {
        let entry = listing_entry(
            r#"{"docID": "S100ABCD", "secCode": "72030", "ordinanceCode": "010",
                "formCode": "030000", "filerName": "Example Motor Corp"}"#,
        );
        let doc = DocumentDescriptor::from_listing(entry).unwrap();
        assert_eq!(doc.doc_id, "S100ABCD");
        assert_eq!(doc.sec_code, "72030");
        assert_eq!(doc.ordinance_code, "010");
        assert_eq!(doc.form_code, "030000");
        assert_eq!(
            doc.raw.get("filerName").and_then(Value::as_str),
            Some("Example Motor Corp")
        );
    }

    #[test]
    fn test_descriptor_null_sec_code() {
        let entry = listing_entry(
            r#"{"docID": "S100ABCD", "secCode": null, "ordinanceCode": "010", "formCode": "030000"}"#,
        );
        let doc = DocumentDescriptor::from_listing(entry).unwrap();
        assert_eq!(doc.sec_code, "");
    }

    #[test]
    fn test_descriptor_missing_doc_id() {
        let entry = listing_entry(r#"{"ordinanceCode": "010", "formCode": "030000"}"#);
        assert!(DocumentDescriptor::from_listing(entry).is_none());
    }

    #[test]
    fn test_record_get_defaults_empty() {
        let mut record = ExtractedRecord::new();
        record.set("company_name", "Example Motor Corp");

        assert_eq!(record.get("company_name"), "Example Motor Corp");
        assert_eq!(record.get("net_sales"), "");
        assert!(record.contains("company_name"));
        assert!(!record.contains("net_sales"));
    }
}
