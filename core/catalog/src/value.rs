//! FILENAME: core/catalog/src/value.rs
//! PURPOSE: The dynamically typed value held by a catalog record field.
//! CONTEXT: Backend payloads are untyped JSON, so a field may hold a string,
//! a number, a flag or a nested list/object. The engine only ever looks at a
//! value through the helpers below (number, display text, facet key).

use serde::{Deserialize, Serialize};
use std::borrow::Cow;
use std::collections::BTreeMap;

/// A single field value of a catalog record.
/// Serializes to the same JSON shape it was decoded from.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum Value {
    Null,
    Bool(bool),
    Number(f64),
    Text(String),
    List(Vec<Value>),
    Object(BTreeMap<String, Value>),
}

impl Default for Value {
    fn default() -> Self {
        Value::Null
    }
}

impl Value {
    /// `null` is treated exactly like a missing field.
    pub fn is_absent(&self) -> bool {
        matches!(self, Value::Null)
    }

    /// Numeric reading of the value: finite numbers, or text that parses as one.
    pub fn as_number(&self) -> Option<f64> {
        match self {
            Value::Number(n) if n.is_finite() => Some(*n),
            Value::Text(s) => {
                let trimmed = s.trim();
                if trimmed.is_empty() {
                    return None;
                }
                trimmed.parse::<f64>().ok().filter(|n| n.is_finite())
            }
            _ => None,
        }
    }

    pub fn as_str(&self) -> Option<&str> {
        match self {
            Value::Text(s) => Some(s),
            _ => None,
        }
    }

    /// Text of a scalar value. Lists, objects and null have none.
    pub fn scalar_text(&self) -> Option<Cow<'_, str>> {
        match self {
            Value::Text(s) => Some(Cow::Borrowed(s.as_str())),
            Value::Number(n) => Some(Cow::Owned(format_number(*n))),
            Value::Bool(b) => Some(Cow::Borrowed(if *b { "true" } else { "false" })),
            Value::Null | Value::List(_) | Value::Object(_) => None,
        }
    }

    /// The key under which this value is counted in a facet.
    pub fn facet_key(&self) -> Option<String> {
        self.scalar_text().map(Cow::into_owned)
    }

    /// Human readable rendering, used for lexicographic ordering.
    pub fn display_text(&self) -> String {
        match self {
            Value::Null | Value::Object(_) => String::new(),
            Value::List(items) => items
                .iter()
                .map(Value::display_text)
                .filter(|s| !s.is_empty())
                .collect::<Vec<_>>()
                .join(", "),
            scalar => scalar
                .scalar_text()
                .map(Cow::into_owned)
                .unwrap_or_default(),
        }
    }
}

/// Format without unnecessary decimal places.
pub fn format_number(n: f64) -> String {
    if n.fract() == 0.0 && n.abs() < 1e15 {
        format!("{:.0}", n)
    } else {
        format!("{}", n)
    }
}

impl From<serde_json::Value> for Value {
    fn from(json: serde_json::Value) -> Self {
        match json {
            serde_json::Value::Null => Value::Null,
            serde_json::Value::Bool(b) => Value::Bool(b),
            serde_json::Value::Number(n) => n.as_f64().map(Value::Number).unwrap_or(Value::Null),
            serde_json::Value::String(s) => Value::Text(s),
            serde_json::Value::Array(items) => {
                Value::List(items.into_iter().map(Value::from).collect())
            }
            serde_json::Value::Object(map) => Value::Object(
                map.into_iter().map(|(k, v)| (k, Value::from(v))).collect(),
            ),
        }
    }
}

impl From<&str> for Value {
    fn from(s: &str) -> Self {
        Value::Text(s.to_string())
    }
}

impl From<String> for Value {
    fn from(s: String) -> Self {
        Value::Text(s)
    }
}

impl From<f64> for Value {
    fn from(n: f64) -> Self {
        Value::Number(n)
    }
}

impl From<i64> for Value {
    fn from(n: i64) -> Self {
        Value::Number(n as f64)
    }
}

impl From<bool> for Value {
    fn from(b: bool) -> Self {
        Value::Bool(b)
    }
}

impl<T: Into<Value>> From<Option<T>> for Value {
    fn from(opt: Option<T>) -> Self {
        opt.map(Into::into).unwrap_or(Value::Null)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn numbers_render_without_trailing_zero() {
        assert_eq!(Value::Number(5.0).display_text(), "5");
        assert_eq!(Value::Number(2.5).display_text(), "2.5");
        assert_eq!(Value::Number(-12.0).facet_key(), Some("-12".to_string()));
    }

    #[test]
    fn numeric_text_reads_as_number() {
        assert_eq!(Value::from(" 42 ").as_number(), Some(42.0));
        assert_eq!(Value::from("4e2").as_number(), Some(400.0));
        assert_eq!(Value::from("abc").as_number(), None);
        assert_eq!(Value::from("").as_number(), None);
        assert_eq!(Value::from("NaN").as_number(), None);
        assert_eq!(Value::Bool(true).as_number(), None);
    }

    #[test]
    fn lists_and_objects_have_no_facet_key() {
        let list = Value::List(vec![Value::from("a"), Value::from("b")]);
        assert_eq!(list.facet_key(), None);
        assert_eq!(list.display_text(), "a, b");
        assert_eq!(Value::Object(BTreeMap::new()).facet_key(), None);
        assert_eq!(Value::Null.facet_key(), None);
    }

    #[test]
    fn json_round_trips_through_untagged_shape() {
        let json = serde_json::json!({"a": [1.5, "x", null], "b": true});
        let value = Value::from(json.clone());
        assert_eq!(serde_json::to_value(&value).unwrap(), json);
    }
}
