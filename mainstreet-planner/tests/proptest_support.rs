//! Proptest strategies for planner property tests.
//!
//! Generated catalogs model a single east-west route: waypoints are evenly
//! spaced in longitude with a little latitude jitter, numbered in travel
//! order, and given a random category. The first and last rows are the trip
//! endpoints.

use mainstreet_core::{PlanningStyle, Waypoint, WaypointCategory};
use proptest::prelude::*;

/// Eastern end of generated routes.
pub const EAST_LONGITUDE: f64 = -88.0;
/// Longitudinal span of generated routes, in degrees.
pub const SPAN_DEGREES: f64 = 30.0;

fn category_strategy() -> impl Strategy<Value = WaypointCategory> {
    prop_oneof![
        Just(WaypointCategory::DestinationCity),
        Just(WaypointCategory::Attraction),
        Just(WaypointCategory::HiddenGem),
        Just(WaypointCategory::DriveIn),
        Just(WaypointCategory::RouteWaypoint),
    ]
}

/// Strategy for a planning style.
pub fn style_strategy() -> impl Strategy<Value = PlanningStyle> {
    prop_oneof![
        Just(PlanningStyle::Balanced),
        Just(PlanningStyle::EvenPacing),
        Just(PlanningStyle::Heritage),
    ]
}

/// Strategy for a linear route of `min_count..=max_count` waypoints.
pub fn route_strategy(min_count: usize, max_count: usize) -> impl Strategy<Value = Vec<Waypoint>> {
    (min_count..=max_count).prop_flat_map(|count| {
        proptest::collection::vec((-0.3_f64..0.3_f64, category_strategy()), count)
            .prop_map(move |rows| build_route(&rows))
    })
}

#[expect(
    clippy::float_arithmetic,
    reason = "generated coordinates are spaced arithmetically"
)]
fn build_route(rows: &[(f64, WaypointCategory)]) -> Vec<Waypoint> {
    let last = rows.len().saturating_sub(1).max(1);
    let step = SPAN_DEGREES / f64::from(u32::try_from(last).unwrap_or(u32::MAX));
    rows.iter()
        .zip(0_i32..)
        .map(|((jitter, category), order)| {
            let longitude = EAST_LONGITUDE - step * f64::from(order);
            Waypoint::new(
                format!("stop-{order}"),
                format!("Stop {order}"),
                "RT",
                35.0 + jitter,
                longitude,
            )
            .expect("generated coordinates are valid")
            .with_category(*category)
            .with_sequence_order(order + 1)
        })
        .collect()
}

/// Id of the last waypoint in a generated route.
pub fn last_id(route: &[Waypoint]) -> String {
    route.last().map(|w| w.id.clone()).unwrap_or_default()
}
