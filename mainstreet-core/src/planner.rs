use std::fmt;

use thiserror::Error;

use crate::{TripPlan, TripRequest, TripRequestValidationError, Waypoint};

/// Which end of the trip a location query describes.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(rename_all = "kebab-case"))]
pub enum EndpointRole {
    /// The starting location.
    Start,
    /// The destination.
    End,
}

impl fmt::Display for EndpointRole {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(match self {
            Self::Start => "start",
            Self::End => "end",
        })
    }
}

/// Fatal planning failures.
///
/// Every other condition degrades to a best-effort plan carrying
/// [`PlanWarning`](crate::PlanWarning)s.
#[derive(Debug, Clone, PartialEq, Error)]
pub enum PlanningError {
    /// The request itself was malformed.
    #[error("invalid trip request: {0}")]
    InvalidRequest(#[from] TripRequestValidationError),
    /// A location could not be matched against the catalog.
    #[error("{role} location '{query}' not found{}", format_suggestions(.suggestions))]
    CityNotFound {
        /// Which endpoint failed.
        role: EndpointRole,
        /// The text supplied by the caller.
        query: String,
        /// Closest catalog names, best first.
        suggestions: Vec<String>,
    },
    /// A waypoint with unusable data reached segment construction.
    #[error("waypoint '{waypoint_id}' failed integrity check: {reason}")]
    DataIntegrity {
        /// Offending waypoint.
        waypoint_id: String,
        /// What was wrong.
        reason: String,
    },
    /// The catalog snapshot held no waypoints.
    #[error("waypoint catalog is empty")]
    EmptyCatalog,
}

fn format_suggestions(suggestions: &[String]) -> String {
    if suggestions.is_empty() {
        String::new()
    } else {
        format!("; did you mean {}?", suggestions.join(", "))
    }
}

/// Produce a multi-day itinerary from a request and a catalog snapshot.
///
/// Implementations must be deterministic: the same request and snapshot
/// always yield the same plan. They must be `Send + Sync` so a planner can
/// serve concurrent sessions.
pub trait TripPlanner: Send + Sync {
    /// Plan a trip over `waypoints`.
    fn plan(&self, request: &TripRequest, waypoints: &[Waypoint]) -> Result<TripPlan, PlanningError>;
}
