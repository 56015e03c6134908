//! CSV parsing for upload files
//!
//! The first row of an upload file is a header; header cells are lower-cased
//! and internal spaces replaced with underscores to form field keys. Each
//! subsequent row maps positionally to those keys. Rows shorter than the
//! header are padded with empty values; longer rows are truncated.

use std::path::Path;
use thiserror::Error;

/// Errors raised while reading an upload file.
///
/// A parse error is recoverable at the file level: the orchestrator records a
/// synthetic whole-file error entry and still archives the file.
#[derive(Debug, Error)]
pub enum ParseError {
    #[error("{0}")]
    Read(#[from] std::io::Error),

    #[error("{0}")]
    Csv(#[from] csv::Error),

    #[error("file does not contain a header row")]
    MissingHeader,
}

/// One CSV data row, keyed by the normalized header.
///
/// Fields keep their column order so that validation messages are emitted in
/// the order the operator sees the columns.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct MetadataRecord {
    fields: Vec<(String, String)>,
}

impl MetadataRecord {
    pub fn new() -> Self {
        Self::default()
    }

    /// Build a record from (field, value) pairs, preserving order.
    pub fn from_pairs<I, K, V>(pairs: I) -> Self
    where
        I: IntoIterator<Item = (K, V)>,
        K: Into<String>,
        V: Into<String>,
    {
        Self {
            fields: pairs
                .into_iter()
                .map(|(k, v)| (k.into(), v.into()))
                .collect(),
        }
    }

    /// Look up a field value by name.
    pub fn get(&self, name: &str) -> Option<&str> {
        self.fields
            .iter()
            .find(|(k, _)| k == name)
            .map(|(_, v)| v.as_str())
    }

    /// Whether the record carries a field of this name.
    pub fn contains(&self, name: &str) -> bool {
        self.fields.iter().any(|(k, _)| k == name)
    }

    /// Replace the value of an existing field, or append the field if absent.
    pub fn set(&mut self, name: &str, value: String) {
        match self.fields.iter_mut().find(|(k, _)| k == name) {
            Some((_, v)) => *v = value,
            None => self.fields.push((name.to_string(), value)),
        }
    }

    /// Iterate fields in column order.
    pub fn iter(&self) -> impl Iterator<Item = (&str, &str)> {
        self.fields.iter().map(|(k, v)| (k.as_str(), v.as_str()))
    }

    pub fn len(&self) -> usize {
        self.fields.len()
    }

    pub fn is_empty(&self) -> bool {
        self.fields.is_empty()
    }
}

/// Normalize a header cell into a field key.
pub fn normalize_header(cell: &str) -> String {
    cell.to_lowercase().replace(' ', "_")
}

/// Parse an upload file into header-keyed records.
///
/// The file must be valid UTF-8; a file that cannot be decoded or tokenized
/// surfaces as a [`ParseError`] for the whole file.
pub fn parse_file(path: &Path) -> Result<Vec<MetadataRecord>, ParseError> {
    let content = std::fs::read_to_string(path)?;
    parse_str(&content)
}

/// Parse CSV content into header-keyed records.
pub fn parse_str(content: &str) -> Result<Vec<MetadataRecord>, ParseError> {
    let mut reader = csv::ReaderBuilder::new()
        .has_headers(false)
        .flexible(true)
        .from_reader(content.as_bytes());

    let mut rows = reader.records();

    let header = match rows.next() {
        Some(row) => row?,
        None => return Err(ParseError::MissingHeader),
    };
    let keys: Vec<String> = header.iter().map(normalize_header).collect();

    let mut records = Vec::new();
    for row in rows {
        let row = row?;
        let record = MetadataRecord::from_pairs(keys.iter().enumerate().map(|(i, key)| {
            (key.clone(), row.get(i).unwrap_or_default().to_string())
        }));
        records.push(record);
    }

    Ok(records)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_normalize_header() {
        assert_eq!(normalize_header("DC Identifier S"), "dc_identifier_s");
        assert_eq!(normalize_header("solr_geom"), "solr_geom");
        assert_eq!(normalize_header("Layer Slug S"), "layer_slug_s");
    }

    #[test]
    fn test_parse_basic() {
        let records =
            parse_str("Dc Title S,Solr Geom\nSome Map,\"10,20,30,40\"\n").unwrap();
        assert_eq!(records.len(), 1);
        assert_eq!(records[0].get("dc_title_s"), Some("Some Map"));
        assert_eq!(records[0].get("solr_geom"), Some("10,20,30,40"));
    }

    #[test]
    fn test_parse_preserves_column_order() {
        let records = parse_str("b,a\n1,2\n").unwrap();
        let keys: Vec<&str> = records[0].iter().map(|(k, _)| k).collect();
        assert_eq!(keys, vec!["b", "a"]);
    }

    #[test]
    fn test_parse_short_row_padded() {
        let records = parse_str("a,b,c\n1,2\n").unwrap();
        assert_eq!(records[0].get("b"), Some("2"));
        assert_eq!(records[0].get("c"), Some(""));
    }

    #[test]
    fn test_parse_long_row_truncated() {
        let records = parse_str("a,b\n1,2,3\n").unwrap();
        assert_eq!(records[0].len(), 2);
        assert_eq!(records[0].get("b"), Some("2"));
    }

    #[test]
    fn test_parse_no_data_rows() {
        let records = parse_str("a,b\n").unwrap();
        assert!(records.is_empty());
    }

    #[test]
    fn test_parse_empty_file() {
        assert!(matches!(parse_str(""), Err(ParseError::MissingHeader)));
    }

    #[test]
    fn test_record_set_replaces_and_appends() {
        let mut record = MetadataRecord::from_pairs([("a", "1")]);
        record.set("a", "9".to_string());
        record.set("z", "2".to_string());
        assert_eq!(record.get("a"), Some("9"));
        assert_eq!(record.get("z"), Some("2"));
        assert_eq!(record.len(), 2);
    }
}
