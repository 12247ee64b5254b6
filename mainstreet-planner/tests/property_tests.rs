//! Property-based tests for the itinerary planner.
//!
//! # Invariants tested
//!
//! - **Segment count:** one segment per planned day, never fewer days than
//!   requested.
//! - **Contiguity:** each day starts where the previous one ended.
//! - **Monotonicity:** stops progress westward along the generated route.
//! - **Distance conservation:** segment distances sum to the plan total.
//! - **Drive-time ceiling:** capped days report exactly the ceiling and no
//!   day exceeds it.
//! - **Determinism:** identical inputs give identical plans.

#![expect(
    clippy::expect_used,
    reason = "property tests use expect for readable failures"
)]

mod proptest_support;

use mainstreet_core::{PlanningStyle, TripPlan, TripPlanner, TripRequest, Waypoint};
use mainstreet_planner::{ItineraryPlanner, PlannerConfig, cap_message};
use proptest::prelude::*;

use proptest_support::{last_id, route_strategy, style_strategy};

const CEILING: f64 = 10.0;

fn plan(route: &[Waypoint], days: u16, style: PlanningStyle) -> TripPlan {
    let request = TripRequest::new("stop-0", last_id(route), days).with_style(style);
    ItineraryPlanner::new()
        .with_config(PlannerConfig::default().with_max_daily_drive_hours(CEILING))
        .plan(&request, route)
        .expect("generated routes always plan")
}

proptest! {
    #![proptest_config(ProptestConfig::with_cases(64))]

    /// Property: the plan has one contiguous segment per day.
    #[test]
    fn segments_cover_every_day(
        route in route_strategy(3, 40),
        days in 1_u16..=12,
        style in style_strategy(),
    ) {
        let plan = plan(&route, days, style);
        prop_assert_eq!(plan.segments.len(), usize::from(plan.total_days));
        prop_assert!(plan.total_days >= days);
        if !plan.has_warning("trip-length-adjusted") {
            prop_assert_eq!(plan.total_days, days);
        }
        for (expected, segment) in (1_u16..).zip(&plan.segments) {
            prop_assert_eq!(segment.day, expected);
        }
        for pair in plan.segments.windows(2) {
            let [first, second] = pair else { continue };
            prop_assert_eq!(&first.end, &second.start);
        }
    }

    /// Property: stops never move back towards the start.
    #[test]
    fn stops_progress_westward(
        route in route_strategy(3, 40),
        days in 1_u16..=12,
        style in style_strategy(),
    ) {
        let plan = plan(&route, days, style);
        let longitudes: Vec<f64> = plan.stops().iter().map(|s| s.longitude).collect();
        for pair in longitudes.windows(2) {
            let [east, west] = pair else { continue };
            prop_assert!(west < east, "stop at {west} follows {east}");
        }
    }

    /// Property: reported totals equal the segment sums, and every day
    /// respects the ceiling.
    #[test]
    fn totals_and_ceiling_hold(
        route in route_strategy(3, 40),
        days in 1_u16..=12,
        style in style_strategy(),
    ) {
        let plan = plan(&route, days, style);
        let distance: f64 = plan.segments.iter().map(|s| s.distance_miles).sum();
        prop_assert!((distance - plan.total_distance_miles).abs() < 1e-3);
        for segment in &plan.segments {
            prop_assert!(segment.drive_time_hours <= CEILING);
            if segment.warning.as_deref() == Some(cap_message(CEILING, segment.distance_miles).as_str()) {
                prop_assert!((segment.drive_time_hours - CEILING).abs() < f64::EPSILON);
            }
        }
    }

    /// Property: planning twice gives the same plan.
    #[test]
    fn planning_is_deterministic(
        route in route_strategy(3, 30),
        days in 1_u16..=10,
        style in style_strategy(),
    ) {
        prop_assert_eq!(plan(&route, days, style), plan(&route, days, style));
    }
}
