//! Scoring helpers shared by the greedy selectors.

#![expect(
    clippy::float_arithmetic,
    reason = "selection scores are floating-point heuristics"
)]

use std::cmp::Ordering;

use geo::Coord;
use mainstreet_core::{WaypointCategory, haversine_miles};

use crate::PlannerConfig;
use crate::count_to_f64;
use crate::sequence::{Candidate, Corridor};

/// Triangular closeness score: 100 at `target`, falling linearly to 0 at a
/// relative deviation of `tolerance`.
pub(crate) fn triangular(value: f64, target: f64, tolerance: f64) -> f64 {
    if target <= 0.0 || tolerance <= 0.0 {
        return 0.0;
    }
    let deviation = (value - target).abs() / target;
    (100.0 * (1.0 - deviation / tolerance)).max(0.0)
}

/// Comfort of a day's drive: 100 inside 40–80% of the ceiling, tapering to
/// 0 at no driving and at the ceiling, and 0 beyond it.
pub(crate) fn drive_quality(hours: f64, ceiling: f64) -> f64 {
    let low = 0.4 * ceiling;
    let high = 0.8 * ceiling;
    if hours > ceiling || ceiling <= 0.0 {
        0.0
    } else if hours < low {
        100.0 * hours / low
    } else if hours > high {
        100.0 * (ceiling - hours) / (ceiling - high)
    } else {
        100.0
    }
}

/// 100 when the category changes from the previous stop, else 0.
pub(crate) fn variety(previous: WaypointCategory, next: WaypointCategory) -> f64 {
    if previous == next { 0.0 } else { 100.0 }
}

/// Where the greedy walk currently stands.
#[derive(Debug, Clone, Copy)]
pub(crate) struct Position {
    pub location: Coord<f64>,
    pub progress: f64,
    pub category: WaypointCategory,
    /// Corridor index of the current stop, `None` at the start.
    pub index: Option<usize>,
}

/// A candidate leg evaluated from the current position.
#[derive(Debug, Clone, Copy)]
pub(crate) struct Leg {
    pub miles: f64,
    pub hours: f64,
    pub target_miles: f64,
    pub target_hours: f64,
}

/// Lexicographic ranking: drivable legs first, then the strategy score,
/// then closeness to the target, then earlier progress.
#[derive(Debug, Clone, Copy)]
struct Rank {
    drivable: bool,
    score: f64,
    closeness: f64,
    earliness: f64,
}

impl Rank {
    fn cmp(&self, other: &Self) -> Ordering {
        self.drivable
            .cmp(&other.drivable)
            .then_with(|| self.score.total_cmp(&other.score))
            .then_with(|| self.closeness.total_cmp(&other.closeness))
            .then_with(|| self.earliness.total_cmp(&other.earliness))
    }
}

/// Shared greedy walk for pacing strategies.
///
/// At each step the pool is the candidates ahead of the current position,
/// minus enough trailing ones to leave room for the remaining stops. The
/// daily target is the chained distance still to drive divided by the days
/// left.
pub(crate) fn greedy_walk<F>(
    corridor: &Corridor,
    needed: usize,
    config: &PlannerConfig,
    score: F,
) -> Vec<usize>
where
    F: Fn(&Position, &Candidate, &Leg) -> f64,
{
    let ceiling = config.ceiling();
    let model = &config.drive_model;
    let mut picks = Vec::with_capacity(needed);
    let mut position = Position {
        location: corridor.start.location(),
        progress: 0.0,
        category: corridor.start.category,
        index: None,
    };

    for step in 0..needed {
        let remaining: Vec<usize> = corridor
            .candidates
            .iter()
            .enumerate()
            .filter(|(i, c)| position.index.is_none_or(|p| *i > p) && c.progress > position.progress)
            .map(|(i, _)| i)
            .collect();
        if remaining.is_empty() {
            log::debug!("selector ran out of candidates after {step} stop(s)");
            break;
        }
        let must_leave = needed - step - 1;
        let pool_len = remaining
            .len()
            .saturating_sub(must_leave)
            .max(1)
            .min(remaining.len());
        let days_left = needed - step + 1;
        let target_miles = corridor.chain_miles_from(position.location, position.progress)
            / count_to_f64(days_left);
        let target_hours = model.hours(target_miles);

        let mut best: Option<(usize, Rank)> = None;
        for &i in remaining.iter().take(pool_len) {
            let Some(candidate) = corridor.candidates.get(i) else {
                continue;
            };
            let miles = haversine_miles(position.location, candidate.location());
            let leg = Leg {
                miles,
                hours: model.hours(miles),
                target_miles,
                target_hours,
            };
            let rank = Rank {
                drivable: leg.hours <= ceiling,
                score: score(&position, candidate, &leg),
                closeness: -(miles - target_miles).abs(),
                earliness: -candidate.progress,
            };
            if best
                .as_ref()
                .is_none_or(|(_, current)| rank.cmp(current) == Ordering::Greater)
            {
                best = Some((i, rank));
            }
        }
        let Some((chosen, _)) = best else { break };
        let Some(candidate) = corridor.candidates.get(chosen) else {
            break;
        };
        picks.push(chosen);
        position = Position {
            location: candidate.location(),
            progress: candidate.progress,
            category: candidate.waypoint.category,
            index: Some(chosen),
        };
    }
    picks
}
