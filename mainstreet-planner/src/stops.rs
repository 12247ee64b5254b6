//! Ordered overnight stops carried between pipeline stages.

use mainstreet_core::{Waypoint, WaypointRef};

use crate::select::{SelectedStop, Selection};
use crate::sequence::{Corridor, detour_ratio};

/// One stop in `[start, ..., end]` order.
#[derive(Debug, Clone, PartialEq)]
pub struct Stop {
    /// Reference written into segments.
    pub reference: WaypointRef,
    /// Position between start (0) and end (1).
    pub progress: f64,
    /// Corridor index for catalog candidates; `None` for endpoints and
    /// synthetic stops.
    pub candidate: Option<usize>,
    /// Pinned stops are never moved by the rebalancer.
    pub pinned: bool,
}

impl Stop {
    /// A trip endpoint at the given progress.
    pub fn endpoint(waypoint: &Waypoint, progress: f64) -> Self {
        Self {
            reference: WaypointRef::from_waypoint(waypoint),
            progress,
            candidate: None,
            pinned: true,
        }
    }

    /// The corridor candidate at `index`, if it exists.
    pub fn from_candidate(corridor: &Corridor, index: usize, pinned: bool) -> Option<Self> {
        corridor.candidates.get(index).map(|candidate| Self {
            reference: candidate.reference(),
            progress: candidate.progress,
            candidate: Some(index),
            pinned,
        })
    }

    /// `true` for interpolated stops.
    pub const fn is_synthetic(&self) -> bool {
        self.reference.is_synthetic
    }
}

/// Expand a selection into `[start, ...selected, end]`.
pub fn stops_for(corridor: &Corridor, selection: &Selection) -> Vec<Stop> {
    let mut stops = Vec::with_capacity(selection.len() + 2);
    stops.push(Stop::endpoint(&corridor.start, 0.0));
    stops.extend(
        selection
            .stops
            .iter()
            .filter_map(|&SelectedStop { index, pinned }| {
                Stop::from_candidate(corridor, index, pinned)
            }),
    );
    stops.push(Stop::endpoint(&corridor.end, 1.0));
    stops
}

/// Segment references for the stops, in order.
pub fn references(stops: &[Stop]) -> Vec<WaypointRef> {
    stops.iter().map(|s| s.reference.clone()).collect()
}

/// Detour ratio of each stop against its neighbours in the stop list.
///
/// Endpoints and synthetic stops report zero.
pub fn local_detours(stops: &[Stop]) -> Vec<f64> {
    let mut ratios = vec![0.0; stops.len()];
    for (offset, window) in stops.windows(3).enumerate() {
        let [prev, here, next] = window else { continue };
        if here.is_synthetic() {
            continue;
        }
        if let Some(slot) = ratios.get_mut(offset + 1) {
            *slot = detour_ratio(
                prev.reference.location(),
                here.reference.location(),
                next.reference.location(),
            );
        }
    }
    ratios
}
