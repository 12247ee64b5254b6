#![expect(
    clippy::expect_used,
    reason = "behaviour tests use expect for readable failures"
)]

//! Behavioural tests for the itinerary planner using rstest-bdd.

use std::cell::RefCell;

use mainstreet_core::test_support::route_66_waypoints;
use mainstreet_core::{PlanningError, PlanningStyle, TripPlan, TripRequest};
use mainstreet_planner::{ItineraryPlanner, PlanningContext};
use rstest::fixture;
use rstest_bdd_macros::{given, scenario, then, when};

/// World state for trip planning scenarios.
#[derive(Debug, Default)]
struct PlannerWorld {
    context: RefCell<Option<PlanningContext>>,
    style: RefCell<PlanningStyle>,
    outcome: RefCell<Option<Result<TripPlan, PlanningError>>>,
}

impl PlannerWorld {
    fn plan(&self) -> TripPlan {
        let outcome = self.outcome.borrow();
        outcome
            .as_ref()
            .expect("a plan should have been requested")
            .clone()
            .expect("planning should succeed")
    }
}

#[fixture]
fn world() -> PlannerWorld {
    PlannerWorld::default()
}

fn unquote(text: &str) -> &str {
    text.trim_matches('"')
}

#[given("the Route 66 catalog")]
fn given_catalog(world: &PlannerWorld) {
    let context = PlanningContext::new(route_66_waypoints()).expect("fixture catalog");
    world.context.replace(Some(context));
}

#[given("the {style:word} planning style")]
fn given_style(world: &PlannerWorld, style: String) {
    let parsed: PlanningStyle = unquote(&style).parse().expect("known planning style");
    world.style.replace(parsed);
}

#[when("I plan a trip from {start:word} to {end:word} over {days} days")]
fn when_planning(world: &PlannerWorld, start: String, end: String, days: u16) {
    let context = world.context.borrow();
    let context_ref = context.as_ref().expect("catalog should be loaded");
    let request = TripRequest::new(unquote(&start), unquote(&end), days)
        .with_style(*world.style.borrow());
    let outcome = ItineraryPlanner::new().plan_in(context_ref, &request);
    world.outcome.replace(Some(outcome));
}

#[then("the plan has {count} segments")]
fn then_segment_count(world: &PlannerWorld, count: usize) {
    let plan = world.plan();
    assert_eq!(plan.segments.len(), count);
    assert_eq!(usize::from(plan.total_days), count);
}

#[then("the plan has no warnings")]
fn then_no_warnings(world: &PlannerWorld) {
    let plan = world.plan();
    assert!(plan.warnings.is_empty(), "unexpected warnings: {:?}", plan.warnings);
}

#[then("every day stays within the drive-time ceiling")]
fn then_within_ceiling(world: &PlannerWorld) {
    let plan = world.plan();
    for segment in &plan.segments {
        assert!(
            segment.drive_time_hours <= 10.0,
            "day {} drives {:.1}h",
            segment.day,
            segment.drive_time_hours
        );
    }
}

#[then("consecutive days share their boundary stop")]
fn then_contiguous(world: &PlannerWorld) {
    let plan = world.plan();
    for pair in plan.segments.windows(2) {
        let [first, second] = pair else { continue };
        assert_eq!(first.end, second.start);
    }
}

#[then("the plan carries a {kind:word} warning")]
fn then_warning(world: &PlannerWorld, kind: String) {
    let plan = world.plan();
    let wanted = unquote(&kind);
    assert!(
        plan.has_warning(wanted),
        "no {wanted} warning in {:?}",
        plan.warnings
    );
}

#[then("planning fails because a city was not found")]
fn then_city_not_found(world: &PlannerWorld) {
    let outcome = world.outcome.borrow();
    let result = outcome.as_ref().expect("a plan should have been requested");
    assert!(
        matches!(result, Err(PlanningError::CityNotFound { .. })),
        "expected CityNotFound, got {result:?}"
    );
}

#[then("the stops include {id:word}")]
fn then_stops_include(world: &PlannerWorld, id: String) {
    let plan = world.plan();
    let wanted = unquote(&id);
    assert!(plan.stops().iter().any(|s| s.id == wanted), "{wanted} missing");
}

#[scenario(path = "tests/features/trip_planner.feature", index = 0)]
fn short_hop(world: PlannerWorld) {
    let _ = world;
}

#[scenario(path = "tests/features/trip_planner.feature", index = 1)]
fn balanced_week(world: PlannerWorld) {
    let _ = world;
}

#[scenario(path = "tests/features/trip_planner.feature", index = 2)]
fn lengthened_request(world: PlannerWorld) {
    let _ = world;
}

#[scenario(path = "tests/features/trip_planner.feature", index = 3)]
fn unknown_start(world: PlannerWorld) {
    let _ = world;
}

#[scenario(path = "tests/features/trip_planner.feature", index = 4)]
fn synthetic_padding(world: PlannerWorld) {
    let _ = world;
}

#[scenario(path = "tests/features/trip_planner.feature", index = 5)]
fn heritage_landmarks(world: PlannerWorld) {
    let _ = world;
}
