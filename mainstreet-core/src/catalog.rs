//! Read-only access to the waypoint catalog.
//!
//! The [`WaypointCatalog`] trait abstracts the external store that lists every
//! known waypoint. Planning consumes a snapshot fetched once up front; a fetch
//! failure is an input-unavailable condition reported through
//! [`CatalogError`], never a panic.

use thiserror::Error;

use crate::Waypoint;

/// Errors from [`WaypointCatalog::fetch_all`].
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum CatalogError {
    /// The request exceeded its timeout.
    #[error("catalog request to {url} timed out after {timeout_secs}s")]
    Timeout {
        /// Requested URL.
        url: String,
        /// Configured timeout in seconds.
        timeout_secs: u64,
    },
    /// The service answered with a non-success status.
    #[error("catalog request to {url} failed with HTTP {status}: {message}")]
    Http {
        /// Requested URL.
        url: String,
        /// HTTP status code.
        status: u16,
        /// Error message from the client.
        message: String,
    },
    /// The request failed before a response arrived.
    #[error("catalog request to {url} failed: {message}")]
    Network {
        /// Requested URL.
        url: String,
        /// Error message from the client.
        message: String,
    },
    /// The payload could not be decoded.
    #[error("failed to parse catalog data: {message}")]
    Parse {
        /// Decoder message.
        message: String,
    },
    /// A local catalog file could not be read.
    #[error("failed to read catalog file {path}: {message}")]
    Io {
        /// Path that was read.
        path: String,
        /// Underlying I/O message.
        message: String,
    },
    /// The snapshot exceeded the configured size bound.
    #[error("catalog returned {count} waypoints, more than the limit of {limit}")]
    TooLarge {
        /// Waypoints received.
        count: usize,
        /// Configured maximum.
        limit: usize,
    },
    /// No catalog source is reachable or configured.
    #[error("waypoint catalog unavailable: {reason}")]
    Unavailable {
        /// Explanation.
        reason: String,
    },
}

/// Source of the complete waypoint list.
///
/// Implementations must be `Send + Sync` so a catalog can be shared between
/// planning sessions.
///
/// # Examples
/// ```
/// use mainstreet_core::{CatalogError, Waypoint, WaypointCatalog};
///
/// struct Empty;
///
/// impl WaypointCatalog for Empty {
///     fn fetch_all(&self) -> Result<Vec<Waypoint>, CatalogError> {
///         Ok(Vec::new())
///     }
/// }
///
/// assert!(Empty.fetch_all().unwrap().is_empty());
/// ```
pub trait WaypointCatalog: Send + Sync {
    /// Fetch every waypoint the catalog knows about.
    fn fetch_all(&self) -> Result<Vec<Waypoint>, CatalogError>;
}

impl<C: WaypointCatalog + ?Sized> WaypointCatalog for &C {
    fn fetch_all(&self) -> Result<Vec<Waypoint>, CatalogError> {
        (**self).fetch_all()
    }
}

impl<C: WaypointCatalog + ?Sized> WaypointCatalog for Box<C> {
    fn fetch_all(&self) -> Result<Vec<Waypoint>, CatalogError> {
        (**self).fetch_all()
    }
}

/// Order waypoints for display: sequenced ones by `sequence_order`, then the
/// rest by id.
pub fn sort_for_display(waypoints: &mut [Waypoint]) {
    waypoints.sort_by(|a, b| match (a.sequence_order, b.sequence_order) {
        (Some(x), Some(y)) => x.cmp(&y).then_with(|| a.id.cmp(&b.id)),
        (Some(_), None) => std::cmp::Ordering::Less,
        (None, Some(_)) => std::cmp::Ordering::Greater,
        (None, None) => a.id.cmp(&b.id),
    });
}
