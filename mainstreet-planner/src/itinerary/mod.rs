//! The end-to-end planning pipeline.
//!
//! ```text
//! resolve endpoints -> enforce corridor -> check feasibility -> select
//!   -> emergency fill -> build segments -> repair -> rebalance -> order check
//! ```
//!
//! Each stage is a plain function over the corridor and stop list, so the
//! orchestrator only sequences them and collects warnings.

#![expect(
    clippy::float_arithmetic,
    reason = "emergency margin compares floating-point drive time"
)]

use mainstreet_core::{
    EndpointRole, HeritageScorer, HeritageTable, PlanHeader, PlanWarning, PlanningError,
    PlanningStyle, TripPlan, TripPlanner, TripRequest, TripRequestValidationError, Waypoint,
    WaypointRef,
};

use crate::PlannerConfig;
use crate::context::PlanningContext;
use crate::feasibility::Feasibility;
use crate::rebalance::rebalance;
use crate::repair::{emergency_fill, repair_segments};
use crate::resolve::resolve_endpoint;
use crate::segments::{build_segments, check_integrity};
use crate::select::{
    BalancedSelector, DestinationSelector, EvenPacingSelector, HeritageSelector, Selection,
};
use crate::sequence::{Corridor, check_stop_order};
use crate::stops::{Stop, local_detours, references, stops_for};

/// Deterministic multi-day itinerary planner.
///
/// The planner is stateless between calls: all per-trip data lives in a
/// [`PlanningContext`], so one planner can serve many sessions at once.
///
/// # Examples
/// ```
/// use mainstreet_core::test_support::route_66_waypoints;
/// use mainstreet_core::{TripPlanner, TripRequest};
/// use mainstreet_planner::ItineraryPlanner;
///
/// # fn main() -> Result<(), Box<dyn std::error::Error>> {
/// let planner = ItineraryPlanner::new();
/// let request = TripRequest::new("Chicago", "Santa Monica", 7);
/// let plan = planner.plan(&request, &route_66_waypoints())?;
/// assert_eq!(plan.segments.len(), 7);
/// assert_eq!(plan.segments[0].start.id, "chicago");
/// # Ok(())
/// # }
/// ```
#[derive(Debug, Clone)]
pub struct ItineraryPlanner<H = HeritageTable> {
    config: PlannerConfig,
    heritage: H,
}

impl ItineraryPlanner {
    /// Planner with default configuration and the Route 66 heritage table.
    pub fn new() -> Self {
        Self {
            config: PlannerConfig::default(),
            heritage: HeritageTable::route_66(),
        }
    }
}

impl Default for ItineraryPlanner {
    fn default() -> Self {
        Self::new()
    }
}

impl<H: HeritageScorer> ItineraryPlanner<H> {
    /// Replace the configuration.
    #[must_use]
    pub fn with_config(mut self, config: PlannerConfig) -> Self {
        self.config = config;
        self
    }

    /// Replace the heritage scorer used by [`PlanningStyle::Heritage`].
    pub fn with_heritage<S: HeritageScorer>(self, heritage: S) -> ItineraryPlanner<S> {
        ItineraryPlanner {
            config: self.config,
            heritage,
        }
    }

    /// The active configuration.
    pub const fn config(&self) -> &PlannerConfig {
        &self.config
    }

    /// Plan a trip against a prepared context.
    ///
    /// Reuse one context across calls to avoid re-indexing the catalog.
    ///
    /// # Errors
    /// Returns [`PlanningError::InvalidRequest`] for malformed requests or
    /// identical endpoints, [`PlanningError::CityNotFound`] when a location
    /// cannot be matched, and [`PlanningError::DataIntegrity`] when an
    /// endpoint carries unusable coordinates.
    pub fn plan_in(
        &self,
        context: &PlanningContext,
        request: &TripRequest,
    ) -> Result<TripPlan, PlanningError> {
        request.validate()?;
        self.plan_validated(context, request)
    }

    fn plan_validated(
        &self,
        context: &PlanningContext,
        request: &TripRequest,
    ) -> Result<TripPlan, PlanningError> {
        let waypoints = context.waypoints();
        let start = resolve_endpoint(&request.start_location, EndpointRole::Start, waypoints)?;
        let end = resolve_endpoint(&request.end_location, EndpointRole::End, waypoints)?;
        if start.id == end.id {
            return Err(TripRequestValidationError::SameEndpoints {
                waypoint_id: start.id.clone(),
            }
            .into());
        }
        check_integrity(&WaypointRef::from_waypoint(start))?;
        check_integrity(&WaypointRef::from_waypoint(end))?;

        let corridor = context.corridor(start, end, &self.config);
        log::debug!(
            "corridor {} -> {} has {} candidate(s) in {:?} mode",
            start.id,
            end.id,
            corridor.candidates.len(),
            corridor.key_mode
        );
        let mut warnings = corridor.diagnostics.clone();

        let feasibility = Feasibility::assess(&corridor, &self.config);
        let (days, adjusted) = feasibility.adjust(request.total_days, &self.config);
        warnings.extend(adjusted);

        let needed = usize::from(days).saturating_sub(1);
        let selection = self.select(request.planning_style, &corridor, needed);
        log::debug!(
            "{} selector chose {} of {needed} stop(s)",
            request.planning_style,
            selection.len()
        );

        let mut stops = stops_for(&corridor, &selection);
        warnings.extend(self.emergency(&mut stops, &corridor, &feasibility, days, needed));

        let mut segments = build_segments(&references(&stops), &self.config.drive_model)?;
        warnings.extend(repair_segments(&mut segments, &stops, &corridor, &self.config));

        if self.config.rebalance {
            warnings.extend(rebalance(&mut stops, &mut segments, &corridor, &self.config));
        }

        let detours = local_detours(&stops);
        warnings.extend(check_stop_order(
            stops
                .iter()
                .zip(detours)
                .map(|(s, ratio)| (s.reference.id.as_str(), s.progress, ratio)),
            self.config.detour_allowance,
        ));

        let header = PlanHeader {
            start_city: start.display_name(),
            end_city: end.display_name(),
            requested_days: request.total_days,
            planning_style: request.planning_style,
            direction: corridor.direction,
        };
        let plan = TripPlan::new(header, segments, warnings);
        log::info!(
            "planned {} -> {}: {} day(s), {:.0} mi, {} warning(s)",
            plan.start_city,
            plan.end_city,
            plan.total_days,
            plan.total_distance_miles,
            plan.warnings.len()
        );
        Ok(plan)
    }

    fn select(&self, style: PlanningStyle, corridor: &Corridor, needed: usize) -> Selection {
        match style {
            PlanningStyle::Balanced => BalancedSelector::new(&self.config).select(corridor, needed),
            PlanningStyle::EvenPacing => {
                EvenPacingSelector::new(&self.config).select(corridor, needed)
            }
            PlanningStyle::Heritage => {
                HeritageSelector::new(&self.config, &self.heritage).select(corridor, needed)
            }
        }
    }

    /// Fill a selection shortfall with synthetic stops, or flag a single-day
    /// trip that is far beyond the ceiling.
    fn emergency(
        &self,
        stops: &mut Vec<Stop>,
        corridor: &Corridor,
        feasibility: &Feasibility,
        days: u16,
        needed: usize,
    ) -> Option<PlanWarning> {
        let found = stops.len().saturating_sub(2);
        if found < needed {
            let inserted = emergency_fill(stops, usize::from(days));
            log::warn!(
                "only {found} of {needed} stop(s) available between {} and {}; inserted {inserted} synthetic stop(s)",
                corridor.start.id,
                corridor.end.id
            );
            return Some(PlanWarning::EmergencyFallbackApplied {
                synthetic_stops: inserted,
                reason: format!(
                    "only {found} of {needed} overnight stops could be found between {} and {}",
                    corridor.start.display_name(),
                    corridor.end.display_name()
                ),
            });
        }
        let limit = self.config.ceiling() * self.config.emergency_margin;
        if days == 1 && feasibility.estimated_hours > limit {
            log::warn!(
                "single-day trip needs {:.1}h, beyond {limit:.1}h",
                feasibility.estimated_hours
            );
            return Some(PlanWarning::EmergencyFallbackApplied {
                synthetic_stops: 0,
                reason: format!(
                    "single-day trip needs {:.1}h of driving; the day will be capped",
                    feasibility.estimated_hours
                ),
            });
        }
        None
    }
}

impl<H: HeritageScorer> TripPlanner for ItineraryPlanner<H> {
    fn plan(
        &self,
        request: &TripRequest,
        waypoints: &[Waypoint],
    ) -> Result<TripPlan, PlanningError> {
        request.validate()?;
        let context = PlanningContext::new(waypoints.to_vec())?;
        self.plan_validated(&context, request)
    }
}
