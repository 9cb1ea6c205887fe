//! FILENAME: core/catalog/src/record.rs
//! PURPOSE: A single catalog entity (table, field, metric, ...) as decoded from the API.
//! CONTEXT: Records are opaque name -> value maps. Field names are stored in
//! canonical snake_case (see `normalize`), so lookups never need aliases.

use crate::normalize::canonical_field_name;
use crate::value::Value;
use serde::{Deserialize, Deserializer, Serialize};
use std::collections::BTreeMap;

/// Named-field access over a record type.
/// The data-table engine is generic over anything implementing this.
///
/// Callers (filters, facets) address fields by their canonical snake_case
/// name, so implementors must resolve that spelling.
pub trait FieldAccess {
    /// Returns the value stored under `name`, or `None` when the field is missing.
    fn field(&self, name: &str) -> Option<&Value>;
}

/// One catalog entity.
#[derive(Debug, Clone, Default, PartialEq, Serialize)]
#[serde(transparent)]
pub struct Record {
    fields: BTreeMap<String, Value>,
}

impl Record {
    pub fn new() -> Self {
        Record {
            fields: BTreeMap::new(),
        }
    }

    /// Builder-style insert, mostly for fixtures.
    pub fn with(mut self, name: &str, value: impl Into<Value>) -> Self {
        self.insert(name, value);
        self
    }

    /// Insert a value under the canonical form of `name`.
    /// Returns the previous value, if any.
    pub fn insert(&mut self, name: &str, value: impl Into<Value>) -> Option<Value> {
        self.fields.insert(canonical_field_name(name), value.into())
    }

    pub fn get(&self, name: &str) -> Option<&Value> {
        match self.fields.get(name) {
            Some(v) => Some(v),
            None => self.fields.get(&canonical_field_name(name)),
        }
    }

    pub fn field_names(&self) -> impl Iterator<Item = &str> {
        self.fields.keys().map(String::as_str)
    }

    pub fn len(&self) -> usize {
        self.fields.len()
    }

    pub fn is_empty(&self) -> bool {
        self.fields.is_empty()
    }

    /// Build a record from a decoded JSON object, folding every top-level key
    /// to snake_case.
    ///
    /// When two spellings of the same field are present (`table_count` and
    /// `tableCount`), a non-null value always beats a null one, and between two
    /// non-null values the key already written in canonical form wins.
    pub fn from_json_object(object: serde_json::Map<String, serde_json::Value>) -> Self {
        let mut fields: BTreeMap<String, Value> = BTreeMap::new();

        for (raw_key, raw_value) in object {
            let key = canonical_field_name(&raw_key);
            let value = Value::from(raw_value);
            let is_canonical_spelling = raw_key == key;

            let replace = match fields.get(&key) {
                None => true,
                Some(existing) if existing.is_absent() => true,
                Some(_) => is_canonical_spelling && !value.is_absent(),
            };
            if replace {
                fields.insert(key, value);
            }
        }

        Record { fields }
    }
}

// Deserialization goes through `from_json_object` so keys are folded the same
// way as for decoded payloads.
impl<'de> Deserialize<'de> for Record {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        let object = serde_json::Map::<String, serde_json::Value>::deserialize(deserializer)?;
        Ok(Record::from_json_object(object))
    }
}

impl FieldAccess for Record {
    fn field(&self, name: &str) -> Option<&Value> {
        self.get(name)
    }
}

impl FieldAccess for BTreeMap<String, Value> {
    fn field(&self, name: &str) -> Option<&Value> {
        self.get(name)
    }
}

impl<'a> FromIterator<(&'a str, Value)> for Record {
    fn from_iter<I: IntoIterator<Item = (&'a str, Value)>>(iter: I) -> Self {
        let mut record = Record::new();
        for (name, value) in iter {
            record.insert(name, value);
        }
        record
    }
}
