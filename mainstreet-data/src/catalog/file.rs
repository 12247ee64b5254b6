//! JSON file catalog for offline use and fixtures.

use std::io::BufReader;

use camino::{Utf8Path, Utf8PathBuf};
use cap_std::{ambient_authority, fs_utf8};
use mainstreet_core::{CatalogError, Waypoint, WaypointCatalog};

use super::wire::{WaypointRecord, decode_records};

/// Catalog backed by a JSON array of catalog rows on disk.
///
/// The file is re-read on every fetch; wrap it in
/// [`CachedCatalog`](crate::CachedCatalog) to avoid repeated parsing.
///
/// # Examples
/// ```no_run
/// use mainstreet_core::WaypointCatalog;
/// use mainstreet_data::JsonFileCatalog;
///
/// let catalog = JsonFileCatalog::new("data/route66.json");
/// let waypoints = catalog.fetch_all()?;
/// # Ok::<(), mainstreet_core::CatalogError>(())
/// ```
#[derive(Debug, Clone)]
pub struct JsonFileCatalog {
    path: Utf8PathBuf,
}

impl JsonFileCatalog {
    /// Catalog reading from `path`.
    pub fn new(path: impl Into<Utf8PathBuf>) -> Self {
        Self { path: path.into() }
    }

    /// Path the catalog reads from.
    pub fn path(&self) -> &Utf8Path {
        &self.path
    }

    fn io_error(&self, err: &std::io::Error) -> CatalogError {
        CatalogError::Io {
            path: self.path.to_string(),
            message: err.to_string(),
        }
    }
}

impl WaypointCatalog for JsonFileCatalog {
    fn fetch_all(&self) -> Result<Vec<Waypoint>, CatalogError> {
        let file = fs_utf8::File::open_ambient(&self.path, ambient_authority())
            .map_err(|err| self.io_error(&err))?;
        let records: Vec<WaypointRecord> = serde_json::from_reader(BufReader::new(file))
            .map_err(|err| CatalogError::Parse {
                message: format!("{}: {err}", self.path),
            })?;
        let decoded = decode_records(records);
        log::info!(
            "loaded {} waypoint(s) from {} ({} skipped)",
            decoded.waypoints.len(),
            self.path,
            decoded.skipped
        );
        Ok(decoded.waypoints)
    }
}
