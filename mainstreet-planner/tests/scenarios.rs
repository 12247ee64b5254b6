//! End-to-end planning scenarios over the Route 66 fixture.
//!
//! Each scenario pins one documented behaviour of the planner: a short
//! single-day hop, an evenly balanced week, automatic lengthening of an
//! impossible request, tolerance of duplicate sequence numbers, and heritage
//! landmarks that sit closer together than a day's drive.

use mainstreet_core::test_support::route_66_waypoints;
use mainstreet_core::{
    PlanWarning, PlanningStyle, SequenceViolationKind, TripPlan, TripPlanner, TripRequest,
    Waypoint, WaypointCategory,
};
use mainstreet_planner::{ItineraryPlanner, PlanningContext};
use rstest::{fixture, rstest};

#[fixture]
fn planner() -> ItineraryPlanner {
    ItineraryPlanner::new()
}

#[fixture]
fn context() -> PlanningContext {
    PlanningContext::new(route_66_waypoints()).expect("fixture catalog is not empty")
}

fn assert_well_formed(plan: &TripPlan) {
    assert_eq!(plan.segments.len(), usize::from(plan.total_days));
    for pair in plan.segments.windows(2) {
        let [first, second] = pair else { continue };
        assert_eq!(first.end, second.start);
        assert_eq!(first.day + 1, second.day);
    }
    let summed: f64 = plan.segments.iter().map(|s| s.distance_miles).sum();
    assert!((summed - plan.total_distance_miles).abs() < 1e-3);
}

#[rstest]
fn chicago_to_st_louis_in_one_day(planner: ItineraryPlanner, context: PlanningContext) {
    let plan = planner
        .plan_in(&context, &TripRequest::new("Chicago, IL", "St. Louis, MO", 1))
        .expect("plan");
    assert_well_formed(&plan);
    assert_eq!(plan.segments.len(), 1);
    let day = plan.segments.first().expect("one day");
    assert!((240.0..=320.0).contains(&day.distance_miles), "{}", day.distance_miles);
    assert!((4.4..=5.8).contains(&day.drive_time_hours), "{}", day.drive_time_hours);
    assert!(day.warning.is_none());
    assert!(plan.warnings.is_empty(), "{:?}", plan.warnings);
}

#[rstest]
fn chicago_to_santa_monica_balanced_week(planner: ItineraryPlanner, context: PlanningContext) {
    let request =
        TripRequest::new("Chicago", "Santa Monica", 7).with_style(PlanningStyle::Balanced);
    let plan = planner.plan_in(&context, &request).expect("plan");
    assert_well_formed(&plan);
    assert_eq!(plan.segments.len(), 7);
    assert_eq!(plan.segments.first().map(|s| s.start.id.as_str()), Some("chicago"));
    assert_eq!(plan.segments.last().map(|s| s.end.id.as_str()), Some("santa-monica"));

    let mean = plan.total_drive_time_hours / 7.0;
    for segment in &plan.segments {
        let deviation = (segment.drive_time_hours - mean).abs() / mean;
        assert!(
            deviation <= 0.30,
            "day {} drives {:.1}h against a mean of {mean:.1}h",
            segment.day,
            segment.drive_time_hours
        );
    }
}

#[rstest]
fn impossible_single_day_is_lengthened(planner: ItineraryPlanner, context: PlanningContext) {
    let plan = planner
        .plan_in(&context, &TripRequest::new("Chicago", "Santa Monica", 1))
        .expect("plan");
    assert_well_formed(&plan);
    assert_eq!(plan.total_days, 4);
    assert_eq!(plan.requested_days, 1);
    let adjusted = plan.warnings.iter().find_map(|w| match w {
        PlanWarning::TripLengthAdjusted {
            requested_days,
            adjusted_days,
            estimated_hours,
        } => Some((*requested_days, *adjusted_days, *estimated_hours)),
        _ => None,
    });
    let (requested, days, hours) = adjusted.expect("trip length warning");
    assert_eq!(requested, 1);
    assert_eq!(days, plan.total_days);
    assert!(hours > 30.0);
    assert!(plan.segments.iter().all(|s| s.drive_time_hours <= 10.0));
}

#[rstest]
fn duplicate_sequence_orders_are_diagnosed(planner: ItineraryPlanner) {
    let waypoints: Vec<Waypoint> = route_66_waypoints()
        .into_iter()
        .map(|w| {
            if w.id == "litchfield" {
                w.with_sequence_order(5)
            } else {
                w
            }
        })
        .collect();
    let plan = planner
        .plan(&TripRequest::new("Chicago", "Tulsa", 3), &waypoints)
        .expect("plan");
    assert_well_formed(&plan);
    assert!(plan.warnings.iter().any(|w| matches!(
        w,
        PlanWarning::SequenceViolation {
            kind: SequenceViolationKind::DuplicateSequenceOrder,
            waypoint_ids,
            ..
        } if waypoint_ids.iter().any(|id| id == "litchfield")
    )));
    assert_eq!(plan.total_days, 3);
}

fn panhandle() -> Vec<Waypoint> {
    let rows = [
        ("shamrock", "Shamrock", "TX", 35.2143, -100.2490, WaypointCategory::HiddenGem),
        ("amarillo", "Amarillo", "TX", 35.2220, -101.8313, WaypointCategory::DestinationCity),
        ("cadillac-ranch", "Cadillac Ranch", "TX", 35.1872, -101.9871, WaypointCategory::Attraction),
        ("vega", "Vega", "TX", 35.2428, -102.4285, WaypointCategory::RouteWaypoint),
        ("santa-rosa", "Santa Rosa", "NM", 34.9387, -104.6825, WaypointCategory::RouteWaypoint),
    ];
    rows.into_iter()
        .zip(1..)
        .map(|((id, name, state, lat, lon, category), order)| {
            Waypoint::new(id, name, state, lat, lon)
                .expect("valid fixture row")
                .with_category(category)
                .with_sequence_order(order)
        })
        .collect()
}

#[rstest]
fn adjacent_heritage_landmarks_are_both_kept(planner: ItineraryPlanner) {
    let request =
        TripRequest::new("Shamrock", "Santa Rosa", 3).with_style(PlanningStyle::Heritage);
    let plan = planner.plan(&request, &panhandle()).expect("plan");
    assert_well_formed(&plan);
    let stops: Vec<&str> = plan.stops().iter().map(|s| s.id.as_str()).collect();
    assert_eq!(stops, ["shamrock", "amarillo", "cadillac-ranch", "santa-rosa"]);

    let short_day = plan.segments.get(1).expect("three days");
    assert!(short_day.distance_miles < 20.0);
    assert!(plan.segments.iter().all(|s| s.drive_time_hours <= 10.0));
    assert!(!plan.has_warning("drive-time-capped"));
}

#[rstest]
fn plans_survive_a_json_round_trip(planner: ItineraryPlanner, context: PlanningContext) {
    let request = TripRequest::new("Chicago", "Santa Monica", 6).with_style(PlanningStyle::Heritage);
    let plan = planner.plan_in(&context, &request).expect("plan");

    let json = serde_json::to_value(&plan).expect("serialize plan");
    assert_eq!(json["planning_style"], "heritage");
    assert_eq!(json["direction"], "westbound");
    assert_eq!(json["segments"].as_array().map(Vec::len), Some(6));

    let decoded: TripPlan = serde_json::from_value(json).expect("decode plan");
    assert_eq!(decoded.total_days, plan.total_days);
    let ids = |p: &TripPlan| -> Vec<String> { p.stops().iter().map(|s| s.id.clone()).collect() };
    assert_eq!(ids(&decoded), ids(&plan));
    assert_eq!(decoded.warnings.len(), plan.warnings.len());
    assert!((decoded.total_distance_miles - plan.total_distance_miles).abs() < 1e-9);
    assert_well_formed(&decoded);
}
