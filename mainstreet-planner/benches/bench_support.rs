//! Benchmark support utilities for the itinerary planner.
//!
//! Generates deterministic route catalogs: waypoints scattered along an
//! east-west corridor, numbered in travel order, with a sprinkling of
//! unsequenced roadside attractions that the sequence index must project.

use mainstreet_core::{Waypoint, WaypointCategory};
use rand::{Rng, SeedableRng};
use rand_chacha::ChaCha8Rng;

/// Seed for deterministic random number generation in benchmarks.
pub const BENCHMARK_SEED: u64 = 66;

/// Eastern end of the generated corridor.
const EAST_LONGITUDE: f64 = -87.6;

/// Longitudinal span of the corridor in degrees.
const SPAN_DEGREES: f64 = 31.0;

/// Largest latitude offset from the corridor centreline in degrees.
const LATERAL_SPREAD: f64 = 0.4;

/// One in this many generated waypoints carries no sequence order.
const UNSEQUENCED_EVERY: usize = 7;

const CATEGORIES: [WaypointCategory; 5] = [
    WaypointCategory::DestinationCity,
    WaypointCategory::Attraction,
    WaypointCategory::HiddenGem,
    WaypointCategory::DriveIn,
    WaypointCategory::RouteWaypoint,
];

/// Generate a corridor catalog of `count` waypoints.
///
/// The first and last waypoints are the endpoints `origin` and `terminus`
/// and always carry sequence orders.
#[must_use]
pub fn generate_route(count: usize, seed: u64) -> Vec<Waypoint> {
    let mut rng = ChaCha8Rng::seed_from_u64(seed);
    let last = count.saturating_sub(1).max(1);

    (0..count)
        .filter_map(|i| {
            #[expect(clippy::float_arithmetic, reason = "corridor positions are linear")]
            #[expect(clippy::as_conversions, reason = "benchmark sizes fit in f64")]
            #[expect(clippy::cast_precision_loss, reason = "benchmark sizes fit in f64")]
            let longitude = EAST_LONGITUDE - SPAN_DEGREES * (i as f64) / (last as f64);
            #[expect(clippy::float_arithmetic, reason = "lateral jitter")]
            let latitude = 35.5 + rng.gen_range(-LATERAL_SPREAD..LATERAL_SPREAD);

            let (id, name) = match i {
                0 => ("origin".to_owned(), "Origin".to_owned()),
                n if n == last => ("terminus".to_owned(), "Terminus".to_owned()),
                n => (format!("wp-{n}"), format!("Waypoint {n}")),
            };
            let category = CATEGORIES
                .get(rng.gen_range(0..CATEGORIES.len()))
                .copied()
                .unwrap_or_default();
            let waypoint = Waypoint::new(id, name, "RT", latitude, longitude)
                .ok()?
                .with_category(category);

            #[expect(
                clippy::integer_division_remainder_used,
                reason = "cyclic choice of unsequenced waypoints"
            )]
            let unsequenced = i != 0 && i != last && i % UNSEQUENCED_EVERY == 0;
            if unsequenced {
                Some(waypoint)
            } else {
                let order = i32::try_from(i).ok()?;
                Some(waypoint.with_sequence_order(order + 1))
            }
        })
        .collect()
}
