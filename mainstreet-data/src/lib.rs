//! Waypoint catalog sources for the mainstreet engine.
//!
//! Responsibilities:
//! - Decode catalog rows from files and HTTP services into validated
//!   [`Waypoint`](mainstreet_core::Waypoint)s, skipping invalid rows.
//! - Bridge async HTTP clients to the synchronous
//!   [`WaypointCatalog`](mainstreet_core::WaypointCatalog) trait.
//! - Cache snapshots with explicit freshness and size bounds.
//!
//! Boundaries:
//! - Do not encode planning rules (live in `mainstreet-planner`).
//! - Never install a logger; log through the `log` facade only.
//!
//! Invariants:
//! - No global mutable state; caches are owned values.
//! - A fetch failure is returned as a
//!   [`CatalogError`](mainstreet_core::CatalogError), never a panic.

#![forbid(unsafe_code)]

pub mod cache;
pub mod catalog;
pub mod test_support;

pub use cache::{CachePolicy, CachedCatalog};
pub use catalog::{
    CatalogBuildError, DecodedCatalog, HttpCatalogConfig, HttpWaypointCatalog, JsonFileCatalog,
    RecordError, RecordId, WaypointRecord, decode_records, parse_catalog_json,
};
