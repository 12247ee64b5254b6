//! Up-front check that the requested day count can be driven under the
//! daily ceiling.

#![expect(
    clippy::float_arithmetic,
    reason = "day estimates divide floating-point drive time"
)]

use mainstreet_core::PlanWarning;

use crate::PlannerConfig;
use crate::sequence::Corridor;

/// Drive-time estimate for a corridor.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Feasibility {
    /// Hours to drive the corridor through every admissible candidate.
    pub estimated_hours: f64,
    /// Fewest days that keep the average day under the ceiling.
    pub minimum_days: u16,
}

impl Feasibility {
    /// Estimate the corridor's total drive time and minimum day count.
    pub fn assess(corridor: &Corridor, config: &PlannerConfig) -> Self {
        let estimated_hours = config.drive_model.hours(corridor.chain_miles());
        let raw = (estimated_hours / config.ceiling()).ceil().max(1.0);
        let cap = config.max_trip_days.max(1);
        let minimum_days = if raw >= f64::from(cap) {
            cap
        } else {
            (1..cap).find(|d| f64::from(*d) >= raw).unwrap_or(cap)
        };
        Self {
            estimated_hours,
            minimum_days,
        }
    }

    /// Day count to plan for and the warning explaining any change.
    ///
    /// Requests that already meet the minimum, and every request when
    /// automatic adjustment is off, keep their day count.
    pub fn adjust(
        &self,
        requested_days: u16,
        config: &PlannerConfig,
    ) -> (u16, Option<PlanWarning>) {
        if requested_days >= self.minimum_days {
            return (requested_days, None);
        }
        if !config.auto_adjust_days {
            log::warn!(
                "{requested_days} day(s) requested but {} needed to stay under {}h per day",
                self.minimum_days,
                config.max_daily_drive_hours
            );
            return (requested_days, None);
        }
        log::info!(
            "raising trip from {requested_days} to {} day(s) for {:.1}h of driving",
            self.minimum_days,
            self.estimated_hours
        );
        (
            self.minimum_days,
            Some(PlanWarning::TripLengthAdjusted {
                requested_days,
                adjusted_days: self.minimum_days,
                estimated_hours: self.estimated_hours,
            }),
        )
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::context::PlanningContext;
    use mainstreet_core::test_support::route_66_waypoints;
    use rstest::{fixture, rstest};

    #[fixture]
    fn context() -> PlanningContext {
        PlanningContext::new(route_66_waypoints()).unwrap()
    }

    #[rstest]
    fn full_route_needs_four_days(context: PlanningContext) {
        let config = PlannerConfig::default();
        let corridor = context.corridor_by_id("chicago", "santa-monica", &config).unwrap();
        let feasibility = Feasibility::assess(&corridor, &config);
        assert_eq!(feasibility.minimum_days, 4);
        assert!(feasibility.estimated_hours > 30.0);
    }

    #[rstest]
    fn short_hop_needs_one_day(context: PlanningContext) {
        let config = PlannerConfig::default();
        let corridor = context.corridor_by_id("tulsa", "okc", &config).unwrap();
        assert_eq!(Feasibility::assess(&corridor, &config).minimum_days, 1);
    }

    #[rstest]
    #[case(1, true, 4, true)]
    #[case(6, true, 6, false)]
    #[case(1, false, 1, false)]
    fn adjusts_only_when_allowed(
        context: PlanningContext,
        #[case] requested: u16,
        #[case] auto_adjust: bool,
        #[case] expected: u16,
        #[case] warns: bool,
    ) {
        let config = PlannerConfig::default().with_auto_adjust_days(auto_adjust);
        let corridor = context.corridor_by_id("chicago", "santa-monica", &config).unwrap();
        let (days, warning) = Feasibility::assess(&corridor, &config).adjust(requested, &config);
        assert_eq!(days, expected);
        assert_eq!(warning.is_some(), warns);
        if let Some(PlanWarning::TripLengthAdjusted {
            requested_days,
            adjusted_days,
            ..
        }) = warning
        {
            assert_eq!((requested_days, adjusted_days), (1, 4));
        }
    }

    #[rstest]
    fn minimum_is_clamped_to_max_trip_days(context: PlanningContext) {
        let config = PlannerConfig::default()
            .with_max_daily_drive_hours(1.0)
            .with_max_trip_days(5);
        let corridor = context.corridor_by_id("chicago", "santa-monica", &config).unwrap();
        assert_eq!(Feasibility::assess(&corridor, &config).minimum_days, 5);
    }
}
