//! FILENAME: core/datatable-engine/src/compare.rs
//! PURPOSE: Ordering of dynamically typed field values for table sorting.
//!
//! Rules:
//! - Two numeric values (numbers, or text that parses as a finite number)
//!   compare numerically.
//! - Everything else compares case-insensitively on display text.
//! - Numeric values come before textual ones, so the order stays total when
//!   a column mixes both.
//! - Absent values (missing, null, nested objects) sort last in either direction.

use crate::definition::SortOrder;
use catalog::Value;
use std::cmp::Ordering;

/// Precomputed sort key, built once per record before sorting.
#[derive(Debug, Clone, PartialEq)]
pub enum SortKey {
    Number(f64),
    Text(String),
    Absent,
}

impl SortKey {
    pub fn from_value(value: Option<&Value>) -> Self {
        match value {
            None | Some(Value::Null) | Some(Value::Object(_)) => SortKey::Absent,
            Some(v) => match v.as_number() {
                Some(n) => SortKey::Number(n),
                None => SortKey::Text(v.display_text().to_lowercase()),
            },
        }
    }

    pub fn is_absent(&self) -> bool {
        matches!(self, SortKey::Absent)
    }
}

/// Compare two keys for the given direction. Absent keys are always last.
pub fn compare_keys(a: &SortKey, b: &SortKey, order: SortOrder) -> Ordering {
    let base = match (a, b) {
        (SortKey::Absent, SortKey::Absent) => return Ordering::Equal,
        (SortKey::Absent, _) => return Ordering::Greater,
        (_, SortKey::Absent) => return Ordering::Less,
        (SortKey::Number(x), SortKey::Number(y)) => x.partial_cmp(y).unwrap_or(Ordering::Equal),
        (SortKey::Number(_), SortKey::Text(_)) => Ordering::Less,
        (SortKey::Text(_), SortKey::Number(_)) => Ordering::Greater,
        (SortKey::Text(x), SortKey::Text(y)) => x.cmp(y),
    };
    match order {
        SortOrder::Ascending => base,
        SortOrder::Descending => base.reverse(),
    }
}

pub fn compare_values(a: Option<&Value>, b: Option<&Value>, order: SortOrder) -> Ordering {
    compare_keys(&SortKey::from_value(a), &SortKey::from_value(b), order)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn numbers_compare_numerically() {
        let a = Value::Number(9.0);
        let b = Value::from("10");
        assert_eq!(compare_values(Some(&a), Some(&b), SortOrder::Ascending), Ordering::Less);
        assert_eq!(compare_values(Some(&a), Some(&b), SortOrder::Descending), Ordering::Greater);
    }

    #[test]
    fn text_compares_case_insensitively() {
        let a = Value::from("apple");
        let b = Value::from("Banana");
        assert_eq!(compare_values(Some(&a), Some(&b), SortOrder::Ascending), Ordering::Less);
        let upper = Value::from("APPLE");
        assert_eq!(compare_values(Some(&a), Some(&upper), SortOrder::Ascending), Ordering::Equal);
    }

    #[test]
    fn absent_sorts_last_in_both_directions() {
        let present = Value::Number(1.0);
        for order in [SortOrder::Ascending, SortOrder::Descending] {
            assert_eq!(compare_values(None, Some(&present), order), Ordering::Greater);
            assert_eq!(compare_values(Some(&present), Some(&Value::Null), order), Ordering::Less);
            assert_eq!(compare_values(None, Some(&Value::Null), order), Ordering::Equal);
        }
    }

    #[test]
    fn numbers_precede_text() {
        let n = Value::Number(100.0);
        let t = Value::from("abc");
        assert_eq!(compare_values(Some(&n), Some(&t), SortOrder::Ascending), Ordering::Less);
    }
}
