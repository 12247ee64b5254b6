//! Balanced selection: equal drive time per day.

use super::scoring::{greedy_walk, triangular};
use super::{DestinationSelector, Selection};
use crate::PlannerConfig;
use crate::sequence::Corridor;

/// Aims for equal drive time on every day.
///
/// Walks the corridor left to right, scoring each reachable candidate by
/// how close its leg comes to the remaining drive time divided by the
/// remaining days.
#[derive(Debug, Clone)]
pub struct BalancedSelector<'a> {
    config: &'a PlannerConfig,
}

impl<'a> BalancedSelector<'a> {
    /// Create a selector using `config`'s drive model and pacing tolerance.
    pub const fn new(config: &'a PlannerConfig) -> Self {
        Self { config }
    }
}

impl DestinationSelector for BalancedSelector<'_> {
    fn select(&self, corridor: &Corridor, needed: usize) -> Selection {
        let tolerance = self.config.pacing_tolerance;
        let picks = greedy_walk(corridor, needed, self.config, |_, _, leg| {
            triangular(leg.hours, leg.target_hours, tolerance)
        });
        Selection::from_indices(picks)
    }
}
