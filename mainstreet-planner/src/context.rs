//! Per-session planning state.

use mainstreet_core::{PlanningError, Waypoint};

use crate::PlannerConfig;
use crate::sequence::{Corridor, SequenceIndex, enforce};

/// Owns one catalog snapshot and the sequence index derived from it.
///
/// Build one per planning call or per session and pass it explicitly; the
/// planner keeps no process-wide state, so concurrent sessions never share
/// mutable data.
///
/// # Examples
/// ```
/// use mainstreet_planner::{PlannerConfig, PlanningContext};
/// use mainstreet_core::Waypoint;
///
/// # fn main() -> Result<(), Box<dyn std::error::Error>> {
/// let waypoints = vec![
///     Waypoint::new("a", "Amarillo", "TX", 35.2220, -101.8313)?.with_sequence_order(1),
///     Waypoint::new("b", "Tucumcari", "NM", 35.1717, -103.7250)?.with_sequence_order(2),
/// ];
/// let context = PlanningContext::new(waypoints)?;
/// assert_eq!(context.waypoints().len(), 2);
/// # Ok(())
/// # }
/// ```
#[derive(Debug, Clone)]
pub struct PlanningContext {
    waypoints: Vec<Waypoint>,
    index: SequenceIndex,
}

impl PlanningContext {
    /// Take ownership of a snapshot and index it.
    ///
    /// # Errors
    /// Returns [`PlanningError::EmptyCatalog`] when `waypoints` is empty.
    pub fn new(waypoints: Vec<Waypoint>) -> Result<Self, PlanningError> {
        if waypoints.is_empty() {
            return Err(PlanningError::EmptyCatalog);
        }
        let index = SequenceIndex::new(&waypoints);
        Ok(Self { waypoints, index })
    }

    /// The snapshot in catalog order.
    pub fn waypoints(&self) -> &[Waypoint] {
        &self.waypoints
    }

    /// The sequence index built from the snapshot.
    pub const fn index(&self) -> &SequenceIndex {
        &self.index
    }

    /// Enforce the corridor between two resolved waypoints.
    pub fn corridor(&self, start: &Waypoint, end: &Waypoint, config: &PlannerConfig) -> Corridor {
        enforce(&self.index, &self.waypoints, start, end, config)
    }

    /// Enforce the corridor between two waypoints looked up by id.
    pub fn corridor_by_id(
        &self,
        start_id: &str,
        end_id: &str,
        config: &PlannerConfig,
    ) -> Option<Corridor> {
        let start = self.find(start_id)?;
        let end = self.find(end_id)?;
        Some(self.corridor(start, end, config))
    }

    /// Look up a waypoint by id.
    pub fn find(&self, id: &str) -> Option<&Waypoint> {
        self.waypoints.iter().find(|w| w.id == id)
    }
}
