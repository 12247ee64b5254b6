//! Segmentation engine for linear historic-route road trips.
//!
//! Given a catalog snapshot, a start, an end, and a day count, the
//! [`ItineraryPlanner`] splits the route into daily driving segments:
//!
//! - the [`sequence`] module keys every waypoint along the route and keeps
//!   only candidates that lie strictly between the endpoints without a large
//!   detour;
//! - a [`select`] strategy chooses the overnight stops;
//! - segments are built, capped at the daily ceiling, padded with synthetic
//!   stops when the catalog runs short, and optionally rebalanced.
//!
//! Planning never fails after the endpoints resolve. Every degraded outcome
//! is reported as a [`PlanWarning`](mainstreet_core::PlanWarning) on the
//! returned plan.
//!
//! # Examples
//!
//! ```
//! use mainstreet_core::test_support::route_66_waypoints;
//! use mainstreet_core::{PlanningStyle, TripRequest};
//! use mainstreet_planner::{ItineraryPlanner, PlannerConfig, PlanningContext};
//!
//! # fn main() -> Result<(), Box<dyn std::error::Error>> {
//! let context = PlanningContext::new(route_66_waypoints())?;
//! let planner = ItineraryPlanner::new().with_config(PlannerConfig::default());
//! let request = TripRequest::new("Tulsa", "Amarillo", 2).with_style(PlanningStyle::EvenPacing);
//! let plan = planner.plan_in(&context, &request)?;
//! assert_eq!(plan.total_days, 2);
//! assert!(plan.segments.iter().all(|s| s.drive_time_hours <= 10.0));
//! # Ok(())
//! # }
//! ```

#![forbid(unsafe_code)]
#![cfg_attr(docsrs, feature(doc_cfg))]

mod config;
mod context;
mod feasibility;
mod itinerary;
mod rebalance;
mod repair;
mod resolve;
mod segments;
pub mod select;
pub mod sequence;
mod stops;

pub use config::PlannerConfig;
pub use context::PlanningContext;
pub use feasibility::Feasibility;
pub use itinerary::ItineraryPlanner;
pub use rebalance::{drive_time_variance, rebalance};
pub use repair::{SYNTHETIC_NOTE, cap_message, emergency_fill, find_split, repair_segments};
pub use resolve::{
    FUZZY_THRESHOLD, MAX_SUGGESTIONS, SUGGESTION_THRESHOLD, find_endpoint, normalise_location,
    resolve_endpoint, similarity, suggestions,
};
pub use segments::{build_segment, build_segments, check_integrity};
pub use stops::{Stop, local_detours, references, stops_for};

/// Convert a count to `f64` for averaging.
pub(crate) fn count_to_f64(count: usize) -> f64 {
    f64::from(u32::try_from(count).unwrap_or(u32::MAX))
}
