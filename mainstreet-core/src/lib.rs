//! Core domain types for the mainstreet itinerary engine.
//!
//! These models describe waypoints on a linear historic route, trip
//! requests, and the daily segments of a finished plan. Constructors return
//! `Result` to surface invalid input early. The crate also defines the
//! great-circle distance model, heritage scoring, and the seams
//! ([`WaypointCatalog`], [`TripPlanner`]) that the planner and data crates
//! implement.

#![cfg_attr(docsrs, feature(doc_cfg))]

pub mod catalog;
pub mod diagnostics;
pub mod distance;
pub mod heritage;
mod plan;
mod planner;
mod request;
mod waypoint;

#[cfg(any(test, feature = "test-support"))]
pub mod test_support;

pub use catalog::{CatalogError, WaypointCatalog, sort_for_display};
pub use diagnostics::{PlanWarning, SequenceViolationKind};
pub use distance::{DriveTimeModel, EARTH_RADIUS_MILES, haversine_miles, interpolate};
pub use heritage::{DEFAULT_HERITAGE_SCORE, HeritageScorer, HeritageTable, MAX_HERITAGE_SCORE};
pub use plan::{DailySegment, DriveCategory, PlanHeader, TravelDirection, TripPlan};
pub use planner::{EndpointRole, PlanningError, TripPlanner};
pub use request::{MAX_TRIP_DAYS, PlanningStyle, TripRequest, TripRequestValidationError};
pub use waypoint::{Waypoint, WaypointCategory, WaypointError, WaypointRef, validate_coordinates};
