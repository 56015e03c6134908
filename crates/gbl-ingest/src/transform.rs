//! Record-to-document transformation
//!
//! Rewrites a validated record into the document shape the search index
//! expects: values sanitized to 7-bit ASCII, the reference map serialized
//! into `dct_references_s`, the flat bounding box rewritten as an envelope,
//! and the modification timestamp stamped.

use crate::parser::MetadataRecord;
use chrono::{DateTime, Utc};
use gbl_common::sanitize::sanitize_string;
use serde_json::json;
use tracing::warn;

/// Reference-map key for the download service URL.
pub const DOWNLOAD_URL_KEY: &str = "http://schema.org/downloadUrl";

/// Reference-map key for the WCS service endpoint.
pub const WCS_SERVICE_KEY: &str = "http://www.opengis.net/def/serviceType/ogc/wcs";

/// Timestamp format stamped into `layer_modified_dt`.
const MODIFIED_FORMAT: &str = "%Y-%m-%dT%H:%M:%SZ";

/// A record rewritten into the search index's document shape.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SolrDocument {
    record: MetadataRecord,
}

impl SolrDocument {
    pub fn get(&self, name: &str) -> Option<&str> {
        self.record.get(name)
    }

    /// Flat JSON object for submission; every value is a string.
    pub fn to_json(&self) -> serde_json::Value {
        let mut doc = serde_json::Map::new();
        for (name, value) in self.record.iter() {
            doc.insert(name.to_string(), json!(value));
        }
        serde_json::Value::Object(doc)
    }
}

/// Transform a validated record into a submission document, stamped with the
/// current UTC time.
pub fn transform(record: &MetadataRecord) -> SolrDocument {
    transform_at(record, Utc::now())
}

/// Transform with an explicit clock reading.
pub fn transform_at(record: &MetadataRecord, now: DateTime<Utc>) -> SolrDocument {
    let mut doc = MetadataRecord::from_pairs(
        record
            .iter()
            .map(|(name, value)| (name, sanitize_string(value))),
    );

    if doc.contains("dct_references_s") {
        let references = doc.get("dct_references_s").unwrap_or_default().to_string();
        let identifier = doc.get("dc_identifier_s").unwrap_or_default().to_string();
        match build_reference_map(&references, &identifier) {
            Some(map) => doc.set("dct_references_s", map),
            None => {
                // A value that already looks JSON-shaped has been transformed
                // upstream; re-wrapping it would nest the map inside itself.
                warn!("dct_references_s already contains a reference map, leaving unchanged");
            },
        }
    }

    if doc.contains("solr_geom") {
        let geom = doc.get("solr_geom").unwrap_or_default().to_string();
        match build_envelope(&geom) {
            Some(envelope) => doc.set("solr_geom", envelope),
            None => warn!(value = %geom, "solr_geom is not a four-part extent, leaving unchanged"),
        }
    }

    doc.set("layer_modified_dt", now.format(MODIFIED_FORMAT).to_string());

    SolrDocument { record: doc }
}

/// Serialize the two-entry reference map: the download service pointing at
/// the record identifier, and the original value under the WCS service key.
/// Returns None when the value is already JSON-shaped.
fn build_reference_map(references: &str, identifier: &str) -> Option<String> {
    if references.trim_start().starts_with('{') {
        return None;
    }

    let mut map = serde_json::Map::new();
    map.insert(DOWNLOAD_URL_KEY.to_string(), json!(identifier));
    map.insert(WCS_SERVICE_KEY.to_string(), json!(references));
    Some(serde_json::Value::Object(map).to_string())
}

/// Rewrite the four comma-separated extents as an envelope.
///
/// The reorder is positional, tied to the upstream column order
/// (minY,minX,maxY,maxX): output is `ENVELOPE(t[1],t[3],t[2],t[0])`, i.e.
/// (minX,maxX,maxY,minY). Do not replace this with a label-driven reorder.
fn build_envelope(geom: &str) -> Option<String> {
    let tokens: Vec<&str> = geom.split(',').collect();
    if tokens.len() != 4 {
        return None;
    }
    Some(format!(
        "ENVELOPE({},{},{},{})",
        tokens[1], tokens[3], tokens[2], tokens[0]
    ))
}
