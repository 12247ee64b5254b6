//! Sequence index and enforcer.
//!
//! The [`SequenceIndex`] assigns every catalog waypoint a position key along
//! the route. The enforcer turns those keys into a [`Corridor`]: the
//! admissible candidates strictly between a start and end, ordered in the
//! direction of travel, plus any ordering diagnostics.

mod enforcer;
mod index;

pub use enforcer::{Candidate, Corridor, KeyMode, check_stop_order, detour_ratio, enforce};
pub use index::{DuplicateOrder, SequenceIndex};
