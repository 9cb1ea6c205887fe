//! FILENAME: core/datatable-engine/src/lib.rs
//! Data-table subsystem for the catalog dashboard.
//!
//! Every dashboard screen fetches one collection wholesale and then searches,
//! filters, sorts and pages through it locally. This crate is that local
//! part. It depends on `catalog` only for the shared record types
//! (`Value`, `FieldAccess`).
//!
//! Layers:
//! - `definition`: Serializable configuration (what the table IS)
//! - `filter` / `search`: Which records pass the current UI state
//! - `facets`: Value counts offered as filter choices
//! - `compare`: Sort ordering over dynamic values
//! - `pagination`: Page window arithmetic
//! - `view`: Derived output for the frontend (WHAT we display)
//! - `engine`: UI state plus mutators (HOW we recompute)

pub mod compare;
pub mod definition;
pub mod engine;
pub mod facets;
pub mod filter;
pub mod pagination;
pub mod search;
pub mod view;


pub use definition::*;
pub use engine::DataTableEngine;
pub use facets::{Facet, FacetValue};
pub use pagination::PaginationState;
pub use search::SearchQuery;
pub use view::TableView;
