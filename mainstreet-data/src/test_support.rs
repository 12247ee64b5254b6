//! Test utilities for catalog consumers.
//!
//! [`StubCatalog`] is a deterministic [`WaypointCatalog`] double that returns
//! a configured response, can be switched to failure mid-test, and counts how
//! often it was asked.

use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::{Mutex, PoisonError};

use mainstreet_core::{CatalogError, Waypoint, WaypointCatalog};

#[derive(Debug, Clone)]
enum StubResponse {
    Waypoints(Vec<Waypoint>),
    Error(CatalogError),
}

/// Stub `WaypointCatalog` for testing.
///
/// # Example
///
/// ```
/// use mainstreet_core::{CatalogError, WaypointCatalog};
/// use mainstreet_core::test_support::route_66_waypoints;
/// use mainstreet_data::test_support::StubCatalog;
///
/// let catalog = StubCatalog::with_waypoints(route_66_waypoints());
/// assert!(catalog.fetch_all().is_ok());
///
/// catalog.fail_with(CatalogError::Unavailable { reason: "offline".into() });
/// assert!(catalog.fetch_all().is_err());
/// assert_eq!(catalog.calls(), 2);
/// ```
#[derive(Debug)]
pub struct StubCatalog {
    response: Mutex<StubResponse>,
    calls: AtomicUsize,
}

impl StubCatalog {
    /// Create a catalog that returns the given waypoints.
    #[must_use]
    pub fn with_waypoints(waypoints: Vec<Waypoint>) -> Self {
        Self::from_response(StubResponse::Waypoints(waypoints))
    }

    /// Create a catalog that fails with the given error.
    #[must_use]
    pub fn with_error(error: CatalogError) -> Self {
        Self::from_response(StubResponse::Error(error))
    }

    const fn from_response(response: StubResponse) -> Self {
        Self {
            response: Mutex::new(response),
            calls: AtomicUsize::new(0),
        }
    }

    /// Make every later fetch fail with `error`.
    pub fn fail_with(&self, error: CatalogError) {
        *self.response.lock().unwrap_or_else(PoisonError::into_inner) = StubResponse::Error(error);
    }

    /// Make every later fetch return `waypoints`.
    pub fn serve(&self, waypoints: Vec<Waypoint>) {
        *self.response.lock().unwrap_or_else(PoisonError::into_inner) =
            StubResponse::Waypoints(waypoints);
    }

    /// Number of fetches so far.
    pub fn calls(&self) -> usize {
        self.calls.load(Ordering::SeqCst)
    }
}

impl WaypointCatalog for StubCatalog {
    fn fetch_all(&self) -> Result<Vec<Waypoint>, CatalogError> {
        self.calls.fetch_add(1, Ordering::SeqCst);
        match &*self.response.lock().unwrap_or_else(PoisonError::into_inner) {
            StubResponse::Waypoints(waypoints) => Ok(waypoints.clone()),
            StubResponse::Error(error) => Err(error.clone()),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use mainstreet_core::test_support::route_66_waypoints;
    use rstest::rstest;

    #[rstest]
    fn switches_between_responses() {
        let stub = StubCatalog::with_error(CatalogError::Unavailable {
            reason: "offline".to_owned(),
        });
        assert!(stub.fetch_all().is_err());
        stub.serve(route_66_waypoints());
        assert_eq!(stub.fetch_all().unwrap().len(), route_66_waypoints().len());
        assert_eq!(stub.calls(), 2);
    }
}
