//! Facade crate for the mainstreet itinerary engine.
//!
//! This crate re-exports the core domain types and exposes the planner and
//! catalog implementations behind feature flags.

#![forbid(unsafe_code)]

pub use mainstreet_core::{
    CatalogError, DailySegment, DriveCategory, EndpointRole, PlanWarning, PlanningError,
    PlanningStyle, TravelDirection, TripPlan, TripPlanner, TripRequest, Waypoint,
    WaypointCatalog, WaypointCategory,
};

#[cfg(feature = "planner")]
pub use mainstreet_planner::{ItineraryPlanner, PlannerConfig};

#[cfg(feature = "catalog-http")]
pub use mainstreet_data::{
    CachePolicy, CachedCatalog, HttpCatalogConfig, HttpWaypointCatalog, JsonFileCatalog,
};
