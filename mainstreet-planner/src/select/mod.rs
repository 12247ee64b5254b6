//! Destination selection strategies.
//!
//! Every strategy implements [`DestinationSelector`] and returns candidate
//! indices in corridor order, so the segment builder, repair cascade, and
//! rebalancer never care which strategy ran.

mod balanced;
mod even_pacing;
mod heritage;
mod scoring;

pub use balanced::BalancedSelector;
pub use even_pacing::EvenPacingSelector;
pub use heritage::HeritageSelector;

use crate::sequence::Corridor;

/// A chosen overnight stop.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct SelectedStop {
    /// Index into [`Corridor::candidates`].
    pub index: usize,
    /// Pinned stops are never moved by the rebalancer.
    pub pinned: bool,
}

/// Result of a selection pass.
///
/// Stops are strictly increasing by index and never include the endpoints.
/// Fewer stops than requested signals a shortfall the caller must repair.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Selection {
    /// Chosen stops in travel order.
    pub stops: Vec<SelectedStop>,
}

impl Selection {
    /// Unpinned selection of the given candidate indices.
    pub fn from_indices<I: IntoIterator<Item = usize>>(indices: I) -> Self {
        Self {
            stops: indices
                .into_iter()
                .map(|index| SelectedStop {
                    index,
                    pinned: false,
                })
                .collect(),
        }
    }

    /// Number of stops chosen.
    pub fn len(&self) -> usize {
        self.stops.len()
    }

    /// `true` if nothing was chosen.
    pub fn is_empty(&self) -> bool {
        self.stops.is_empty()
    }

    /// Candidate indices in order.
    pub fn indices(&self) -> impl Iterator<Item = usize> + '_ {
        self.stops.iter().map(|s| s.index)
    }
}

/// Choose `needed` intermediate stops from a corridor.
///
/// Implementations must return stops sorted by position with no duplicates.
/// When the corridor cannot supply `needed` in-order stops they return as
/// many as they can.
pub trait DestinationSelector {
    /// Select up to `needed` stops.
    fn select(&self, corridor: &Corridor, needed: usize) -> Selection;
}
