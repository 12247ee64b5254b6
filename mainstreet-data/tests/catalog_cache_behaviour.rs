#![expect(
    clippy::expect_used,
    reason = "behaviour tests use expect for readable failures"
)]

//! Behavioural tests for [`CachedCatalog`] using rstest-bdd.

use std::cell::RefCell;
use std::time::Duration;

use mainstreet_core::test_support::route_66_waypoints;
use mainstreet_core::{CatalogError, Waypoint, WaypointCatalog};
use mainstreet_data::test_support::StubCatalog;
use mainstreet_data::{CachePolicy, CachedCatalog};
use rstest::fixture;
use rstest_bdd_macros::{given, scenario, then, when};

/// World state for cache scenarios.
#[derive(Debug, Default)]
struct CacheWorld {
    upstream: RefCell<Vec<Waypoint>>,
    policy: RefCell<CachePolicy>,
    cache: RefCell<Option<CachedCatalog<StubCatalog>>>,
    outcome: RefCell<Option<Result<Vec<Waypoint>, CatalogError>>>,
}

impl CacheWorld {
    fn with_cache<T>(&self, f: impl FnOnce(&CachedCatalog<StubCatalog>) -> T) -> T {
        let mut slot = self.cache.borrow_mut();
        let cache = slot.get_or_insert_with(|| {
            CachedCatalog::new(
                StubCatalog::with_waypoints(self.upstream.borrow().clone()),
                *self.policy.borrow(),
            )
        });
        f(cache)
    }

    fn outcome(&self) -> Result<Vec<Waypoint>, CatalogError> {
        self.outcome
            .borrow()
            .clone()
            .expect("the catalog should have been fetched")
    }
}

#[fixture]
fn world() -> CacheWorld {
    CacheWorld::default()
}

#[given("an upstream catalog serving the Route 66 waypoints")]
fn given_upstream(world: &CacheWorld) {
    world.upstream.replace(route_66_waypoints());
}

#[given("a cache with a {minutes} minute time-to-live")]
fn given_ttl(world: &CacheWorld, minutes: u64) {
    let policy = world
        .policy
        .borrow()
        .with_ttl(Duration::from_secs(minutes * 60));
    world.policy.replace(policy);
}

#[given("an expiring cache with a {minutes} minute grace window")]
fn given_grace(world: &CacheWorld, minutes: u64) {
    let policy = world
        .policy
        .borrow()
        .with_ttl(Duration::ZERO)
        .with_stale_grace(Duration::from_secs(minutes * 60));
    world.policy.replace(policy);
}

#[given("a cache limited to {count} waypoints")]
fn given_limit(world: &CacheWorld, count: usize) {
    let policy = world.policy.borrow().with_max_waypoints(count);
    world.policy.replace(policy);
}

#[when("I fetch the catalog")]
fn when_fetching(world: &CacheWorld) {
    let outcome = world.with_cache(|cache| cache.fetch_all());
    world.outcome.replace(Some(outcome));
}

#[when("the upstream catalog goes offline")]
fn when_offline(world: &CacheWorld) {
    world.with_cache(|cache| {
        cache.inner().fail_with(CatalogError::Unavailable {
            reason: "upstream offline".to_owned(),
        });
    });
}

#[then("the fetch succeeds with every fixture waypoint")]
fn then_every_waypoint(world: &CacheWorld) {
    let waypoints = world.outcome().expect("fetch should succeed");
    assert_eq!(waypoints, route_66_waypoints());
}

#[then("the upstream catalog was asked {count} times")]
fn then_call_count(world: &CacheWorld, count: usize) {
    let calls = world.with_cache(|cache| cache.inner().calls());
    assert_eq!(calls, count);
}

#[then("the fetch fails because the catalog is unavailable")]
fn then_unavailable(world: &CacheWorld) {
    let outcome = world.outcome();
    assert!(
        matches!(outcome, Err(CatalogError::Unavailable { .. })),
        "expected Unavailable, got {outcome:?}"
    );
}

#[then("the fetch fails because the snapshot is too large")]
fn then_too_large(world: &CacheWorld) {
    let outcome = world.outcome();
    assert!(
        matches!(outcome, Err(CatalogError::TooLarge { limit: 5, .. })),
        "expected TooLarge, got {outcome:?}"
    );
}

#[scenario(path = "tests/features/catalog_cache.feature", index = 0)]
fn fresh_snapshot(world: CacheWorld) {
    let _ = world;
}

#[scenario(path = "tests/features/catalog_cache.feature", index = 1)]
fn stale_fallback(world: CacheWorld) {
    let _ = world;
}

#[scenario(path = "tests/features/catalog_cache.feature", index = 2)]
fn outage_past_grace(world: CacheWorld) {
    let _ = world;
}

#[scenario(path = "tests/features/catalog_cache.feature", index = 3)]
fn oversized_snapshot(world: CacheWorld) {
    let _ = world;
}
