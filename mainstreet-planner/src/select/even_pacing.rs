//! Even-pacing selection: distance pacing blended with drive comfort and
//! stop variety.

#![expect(
    clippy::float_arithmetic,
    reason = "blended pacing scores are floating-point heuristics"
)]

use super::scoring::{drive_quality, greedy_walk, triangular, variety};
use super::{DestinationSelector, Selection};
use crate::PlannerConfig;
use crate::sequence::Corridor;

const DISTANCE_WEIGHT: f64 = 0.5;
const DRIVE_QUALITY_WEIGHT: f64 = 0.3;
const VARIETY_WEIGHT: f64 = 0.2;

/// Balances distance pacing against drive-time comfort and stop variety.
///
/// Each candidate leg scores 50% on closeness to the daily distance target,
/// 30% on how comfortable its drive time is relative to the ceiling, and 20%
/// on not repeating the previous stop's category.
///
/// The up-front day-count check runs in the planner's feasibility stage for
/// every style, so this selector assumes the day count is already drivable.
#[derive(Debug, Clone)]
pub struct EvenPacingSelector<'a> {
    config: &'a PlannerConfig,
}

impl<'a> EvenPacingSelector<'a> {
    /// Create a selector bound to `config`.
    pub const fn new(config: &'a PlannerConfig) -> Self {
        Self { config }
    }
}

impl DestinationSelector for EvenPacingSelector<'_> {
    fn select(&self, corridor: &Corridor, needed: usize) -> Selection {
        let tolerance = self.config.pacing_tolerance;
        let ceiling = self.config.ceiling();
        let picks = greedy_walk(corridor, needed, self.config, |position, candidate, leg| {
            DISTANCE_WEIGHT * triangular(leg.miles, leg.target_miles, tolerance)
                + DRIVE_QUALITY_WEIGHT * drive_quality(leg.hours, ceiling)
                + VARIETY_WEIGHT * variety(position.category, candidate.waypoint.category)
        });
        Selection::from_indices(picks)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::context::PlanningContext;
    use mainstreet_core::test_support::route_66_waypoints;
    use rstest::rstest;

    #[rstest]
    #[case(4)]
    #[case(6)]
    #[case(8)]
    fn keeps_days_under_the_ceiling(#[case] days: usize) {
        let config = PlannerConfig::default();
        let context = PlanningContext::new(route_66_waypoints()).unwrap();
        let corridor = context.corridor_by_id("chicago", "santa-monica", &config).unwrap();
        let selection = EvenPacingSelector::new(&config).select(&corridor, days - 1);
        assert_eq!(selection.len(), days - 1);
        for miles in corridor.leg_miles(selection.indices()) {
            assert!(config.drive_model.hours(miles) <= config.max_daily_drive_hours);
        }
    }

    #[rstest]
    fn avoids_repeating_categories_when_pacing_allows() {
        let config = PlannerConfig::default();
        let context = PlanningContext::new(route_66_waypoints()).unwrap();
        let corridor = context.corridor_by_id("chicago", "santa-monica", &config).unwrap();
        let selection = EvenPacingSelector::new(&config).select(&corridor, 6);
        let categories: Vec<_> = selection
            .indices()
            .map(|i| corridor.candidates[i].waypoint.category)
            .collect();
        let repeats = categories.windows(2).filter(|w| w[0] == w[1]).count();
        assert!(repeats <= 1, "{categories:?}");
    }
}
