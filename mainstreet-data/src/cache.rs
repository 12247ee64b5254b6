//! Bounded, time-limited snapshot cache in front of any catalog.
//!
//! The cache is an owned value: each planner or service holds its own
//! [`CachedCatalog`] and there is no process-wide state. A snapshot is
//! served while fresh, refetched once its time-to-live lapses, and kept as a
//! stale fallback for a grace window when the refetch fails.

use std::sync::{Mutex, MutexGuard, PoisonError};
use std::time::{Duration, Instant};

use mainstreet_core::{CatalogError, Waypoint, WaypointCatalog};

/// Default time a snapshot is served without refetching.
pub const DEFAULT_TTL: Duration = Duration::from_secs(15 * 60);
/// Default window after expiry in which a stale snapshot may still be served.
pub const DEFAULT_STALE_GRACE: Duration = Duration::from_secs(60 * 60);
/// Default largest snapshot accepted from the catalog.
pub const DEFAULT_MAX_WAYPOINTS: usize = 5_000;

/// Freshness and size limits for [`CachedCatalog`].
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct CachePolicy {
    /// How long a snapshot is served before refetching.
    pub ttl: Duration,
    /// How long past `ttl` a snapshot may stand in for a failed refetch.
    pub stale_grace: Duration,
    /// Largest snapshot accepted; larger fetches fail with
    /// [`CatalogError::TooLarge`].
    pub max_waypoints: usize,
}

impl Default for CachePolicy {
    fn default() -> Self {
        Self {
            ttl: DEFAULT_TTL,
            stale_grace: DEFAULT_STALE_GRACE,
            max_waypoints: DEFAULT_MAX_WAYPOINTS,
        }
    }
}

impl CachePolicy {
    /// Set the time-to-live.
    #[must_use]
    pub const fn with_ttl(mut self, ttl: Duration) -> Self {
        self.ttl = ttl;
        self
    }

    /// Set the stale grace window.
    #[must_use]
    pub const fn with_stale_grace(mut self, grace: Duration) -> Self {
        self.stale_grace = grace;
        self
    }

    /// Set the snapshot size bound.
    #[must_use]
    pub const fn with_max_waypoints(mut self, max: usize) -> Self {
        self.max_waypoints = max;
        self
    }

    fn check_size(&self, waypoints: Vec<Waypoint>) -> Result<Vec<Waypoint>, CatalogError> {
        if waypoints.len() > self.max_waypoints {
            return Err(CatalogError::TooLarge {
                count: waypoints.len(),
                limit: self.max_waypoints,
            });
        }
        Ok(waypoints)
    }
}

#[derive(Debug)]
struct Snapshot {
    waypoints: Vec<Waypoint>,
    fetched_at: Instant,
}

/// A [`WaypointCatalog`] that caches another catalog's snapshot.
///
/// Concurrent callers share one snapshot; a refetch holds the lock so an
/// expired cache triggers a single upstream request.
///
/// # Examples
/// ```
/// use mainstreet_core::WaypointCatalog;
/// use mainstreet_core::test_support::MemoryCatalog;
/// use mainstreet_data::{CachePolicy, CachedCatalog};
///
/// let cache = CachedCatalog::new(MemoryCatalog::route_66(), CachePolicy::default());
/// assert!(!cache.is_cached());
/// let first = cache.fetch_all().unwrap();
/// assert!(cache.is_cached());
/// assert_eq!(cache.fetch_all().unwrap(), first);
/// ```
#[derive(Debug)]
pub struct CachedCatalog<C> {
    inner: C,
    policy: CachePolicy,
    snapshot: Mutex<Option<Snapshot>>,
}

impl<C: WaypointCatalog> CachedCatalog<C> {
    /// Wrap `inner` with the given policy.
    pub const fn new(inner: C, policy: CachePolicy) -> Self {
        Self {
            inner,
            policy,
            snapshot: Mutex::new(None),
        }
    }

    /// The wrapped catalog.
    pub const fn inner(&self) -> &C {
        &self.inner
    }

    /// The active policy.
    pub const fn policy(&self) -> &CachePolicy {
        &self.policy
    }

    /// Drop the cached snapshot so the next fetch goes upstream.
    pub fn invalidate(&self) {
        if self.lock().take().is_some() {
            log::debug!("waypoint cache invalidated");
        }
    }

    /// Whether a snapshot is held, fresh or not.
    pub fn is_cached(&self) -> bool {
        self.lock().is_some()
    }

    /// Age of the held snapshot.
    pub fn snapshot_age(&self) -> Option<Duration> {
        self.lock().as_ref().map(|s| s.fetched_at.elapsed())
    }

    fn lock(&self) -> MutexGuard<'_, Option<Snapshot>> {
        self.snapshot.lock().unwrap_or_else(PoisonError::into_inner)
    }
}

impl<C: WaypointCatalog> WaypointCatalog for CachedCatalog<C> {
    fn fetch_all(&self) -> Result<Vec<Waypoint>, CatalogError> {
        let mut guard = self.lock();
        if let Some(snapshot) = guard.as_ref()
            && snapshot.fetched_at.elapsed() < self.policy.ttl
        {
            log::debug!("serving {} cached waypoint(s)", snapshot.waypoints.len());
            return Ok(snapshot.waypoints.clone());
        }

        match self
            .inner
            .fetch_all()
            .and_then(|fetched| self.policy.check_size(fetched))
        {
            Ok(waypoints) => {
                log::debug!("cached {} waypoint(s)", waypoints.len());
                *guard = Some(Snapshot {
                    waypoints: waypoints.clone(),
                    fetched_at: Instant::now(),
                });
                Ok(waypoints)
            }
            Err(err) => {
                let limit = self.policy.ttl.saturating_add(self.policy.stale_grace);
                match guard.as_ref() {
                    Some(snapshot) if snapshot.fetched_at.elapsed() < limit => {
                        log::warn!(
                            "catalog refresh failed ({err}); serving stale snapshot of {} waypoint(s)",
                            snapshot.waypoints.len()
                        );
                        Ok(snapshot.waypoints.clone())
                    }
                    _ => Err(err),
                }
            }
        }
    }
}
