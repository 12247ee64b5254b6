//! Test helpers: catalog fixtures on disk and a stub catalog builder.

use std::cell::RefCell;
use std::fs;

use camino::{Utf8Path, Utf8PathBuf};
use mainstreet_core::test_support::{MemoryCatalog, route_66_waypoints};
use mainstreet_core::{CatalogError, WaypointCatalog};
use tempfile::TempDir;

use crate::CliError;
use crate::catalog::{CatalogBuilder, CatalogSource};

pub(super) fn write_utf8(path: &Utf8Path, contents: &[u8]) {
    fs::write(path.as_std_path(), contents).expect("write fixture");
}

/// A temporary directory holding the Route 66 fixture as a catalog file.
pub(super) struct CatalogFile {
    _dir: TempDir,
    path: Utf8PathBuf,
}

impl CatalogFile {
    pub(super) fn route_66() -> Self {
        let dir = TempDir::new().expect("tempdir");
        let root = Utf8PathBuf::from_path_buf(dir.path().to_path_buf()).expect("utf-8 workspace");
        let path = root.join("route66.json");
        let payload = serde_json::to_vec(&route_66_waypoints()).expect("serialize fixture");
        write_utf8(&path, &payload);
        Self { _dir: dir, path }
    }

    pub(super) fn path(&self) -> &Utf8Path {
        &self.path
    }
}

/// Serves the Route 66 fixture, or a fixed error, and records the source it
/// was asked to build.
#[derive(Debug, Default)]
pub(super) struct StubCatalogBuilder {
    pub(super) error: Option<CatalogError>,
    pub(super) requested: RefCell<Option<CatalogSource>>,
}

#[derive(Debug)]
struct FailingCatalog(CatalogError);

impl WaypointCatalog for FailingCatalog {
    fn fetch_all(&self) -> Result<Vec<mainstreet_core::Waypoint>, CatalogError> {
        Err(self.0.clone())
    }
}

impl CatalogBuilder for StubCatalogBuilder {
    fn build(&self, source: &CatalogSource) -> Result<Box<dyn WaypointCatalog>, CliError> {
        self.requested.replace(Some(source.clone()));
        match &self.error {
            Some(error) => Ok(Box::new(FailingCatalog(error.clone()))),
            None => Ok(Box::new(MemoryCatalog::route_66())),
        }
    }
}
