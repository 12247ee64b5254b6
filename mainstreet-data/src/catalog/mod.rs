//! Waypoint catalog sources.
//!
//! Every source implements [`mainstreet_core::WaypointCatalog`] and decodes
//! rows through the shared [`wire`] format, so invalid rows are skipped the
//! same way whether they come from a file or a service.

pub mod file;
pub mod http;
pub mod wire;

pub use file::JsonFileCatalog;
pub use http::{CatalogBuildError, HttpCatalogConfig, HttpWaypointCatalog};
pub use wire::{DecodedCatalog, RecordError, RecordId, WaypointRecord, decode_records, parse_catalog_json};
