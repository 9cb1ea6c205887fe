//! FILENAME: core/catalog/src/lib.rs
//! PURPOSE: Library root for the catalog record model.
//! CONTEXT: Every dashboard screen works on collections of loosely typed
//! catalog records (tables, fields, metrics, ...) fetched from the backend.
//! This crate owns the shared types so the engine and the app agree on them.
//!
//! PIPELINE: JSON payload --> payload --> normalize --> Record --> engine

pub mod entity;
pub mod error;
pub mod normalize;
pub mod payload;
pub mod record;
pub mod value;


pub use entity::EntityKind;
pub use error::CatalogError;
pub use normalize::canonical_field_name;
pub use payload::{parse_payload, records_from_json};
pub use record::{FieldAccess, Record};
pub use value::Value;
