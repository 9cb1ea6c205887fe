//! FILENAME: core/catalog/src/payload.rs
//! PURPOSE: Decode list responses from the catalog API into records.
//! CONTEXT: List endpoints answer either with an envelope (`{"items": [...]}`,
//! occasionally `data` or `results`) or with a bare JSON array. Both are
//! accepted; any other shape decodes to an empty collection.

use crate::error::CatalogError;
use crate::record::Record;

/// Envelope keys that may wrap the item array, in lookup order.
const ENVELOPE_KEYS: [&str; 3] = ["items", "data", "results"];

/// Parse a raw response body into records.
pub fn parse_payload(body: &str) -> Result<Vec<Record>, CatalogError> {
    let json: serde_json::Value = serde_json::from_str(body)?;
    Ok(records_from_json(json))
}

/// Extract records from an already decoded response.
/// Array elements that are not JSON objects are skipped.
pub fn records_from_json(json: serde_json::Value) -> Vec<Record> {
    let items = match json {
        serde_json::Value::Array(items) => items,
        serde_json::Value::Object(mut envelope) => {
            let key = ENVELOPE_KEYS
                .iter()
                .find(|k| matches!(envelope.get(**k), Some(serde_json::Value::Array(_))));
            match key.and_then(|k| envelope.remove(*k)) {
                Some(serde_json::Value::Array(items)) => items,
                _ => Vec::new(),
            }
        }
        _ => Vec::new(),
    };

    items
        .into_iter()
        .filter_map(|item| match item {
            serde_json::Value::Object(object) => Some(Record::from_json_object(object)),
            _ => None,
        })
        .collect()
}
