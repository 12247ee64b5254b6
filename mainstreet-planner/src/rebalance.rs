//! Variance-reducing local search over overnight stops.

#![expect(
    clippy::float_arithmetic,
    reason = "variance and drive-time comparisons are floating-point"
)]

use mainstreet_core::{DailySegment, PlanWarning, haversine_miles};

use crate::PlannerConfig;
use crate::count_to_f64;
use crate::segments::build_segment;
use crate::sequence::{Corridor, detour_ratio};
use crate::stops::Stop;

const VARIANCE_EPSILON: f64 = 1e-9;

/// Population variance of daily drive times.
pub fn drive_time_variance(hours: &[f64]) -> f64 {
    if hours.is_empty() {
        return 0.0;
    }
    let n = count_to_f64(hours.len());
    let mean = hours.iter().sum::<f64>() / n;
    hours.iter().map(|h| (h - mean).powi(2)).sum::<f64>() / n
}

#[derive(Debug, Clone, Copy)]
struct Swap {
    stop: usize,
    candidate: usize,
    before: f64,
    after: f64,
    variance: f64,
}

/// Move unpinned stops to adjacent corridor candidates while each move
/// strictly lowers drive-time variance.
///
/// A move must keep the corridor order, must not push either affected day
/// over the ceiling, and must not raise the longest day. Days that already
/// carry a warning and synthetic stops are left alone. At most
/// `rebalance_iterations` moves are applied, best first.
///
/// Returns `None` for single-day trips, which have nothing to rebalance.
pub fn rebalance(
    stops: &mut [Stop],
    segments: &mut [DailySegment],
    corridor: &Corridor,
    config: &PlannerConfig,
) -> Option<PlanWarning> {
    if stops.len() < 3 {
        return None;
    }
    let mut hours: Vec<f64> = segments.iter().map(|s| s.drive_time_hours).collect();
    let variance_before = drive_time_variance(&hours);
    let mut swaps = 0_usize;

    for pass in 0..config.rebalance_iterations {
        let Some(swap) = best_swap(stops, segments, &hours, corridor, config) else {
            log::debug!("rebalance converged after {pass} pass(es)");
            break;
        };
        if !apply(stops, segments, corridor, config, swap) {
            break;
        }
        if let Some(slot) = hours.get_mut(swap.stop - 1) {
            *slot = swap.before;
        }
        if let Some(slot) = hours.get_mut(swap.stop) {
            *slot = swap.after;
        }
        swaps += 1;
    }

    if swaps == 0 {
        return Some(PlanWarning::RebalanceSkipped {
            reason: "no adjacent swap lowers drive-time variance within limits".to_owned(),
        });
    }
    Some(PlanWarning::RebalanceApplied {
        swaps,
        variance_before,
        variance_after: drive_time_variance(&hours),
    })
}

/// Replace the stop at `swap.stop` and rebuild its two adjacent days.
fn apply(
    stops: &mut [Stop],
    segments: &mut [DailySegment],
    corridor: &Corridor,
    config: &PlannerConfig,
    swap: Swap,
) -> bool {
    let Some(moved) = Stop::from_candidate(corridor, swap.candidate, false) else {
        return false;
    };
    let Some(slot) = stops.get_mut(swap.stop) else {
        return false;
    };
    log::debug!(
        "rebalance moves stop {} from {} to {} (variance {:.3})",
        swap.stop,
        slot.reference.id,
        moved.reference.id,
        swap.variance
    );
    *slot = moved;
    for leg in [swap.stop - 1, swap.stop] {
        let (Some(from), Some(to), Some(segment)) =
            (stops.get(leg), stops.get(leg + 1), segments.get_mut(leg))
        else {
            return false;
        };
        *segment = build_segment(
            segment.day,
            &from.reference,
            &to.reference,
            &config.drive_model,
        );
    }
    true
}

fn best_swap(
    stops: &[Stop],
    segments: &[DailySegment],
    hours: &[f64],
    corridor: &Corridor,
    config: &PlannerConfig,
) -> Option<Swap> {
    let ceiling = config.ceiling();
    let model = &config.drive_model;
    let current_variance = drive_time_variance(hours);
    let current_max = hours.iter().copied().fold(0.0, f64::max);
    let mut best: Option<Swap> = None;

    for (offset, window) in stops.windows(3).enumerate() {
        let [prev, here, next] = window else { continue };
        let stop = offset + 1;
        let Some(index) = here.candidate else { continue };
        if here.pinned || here.is_synthetic() {
            continue;
        }
        let warned = segments
            .get(offset..=stop)
            .is_none_or(|pair| pair.iter().any(|s| s.warning.is_some()));
        if warned {
            continue;
        }
        for neighbour in [index.checked_sub(1), index.checked_add(1)].into_iter().flatten() {
            let Some(candidate) = corridor.candidates.get(neighbour) else {
                continue;
            };
            if stops.iter().any(|s| s.candidate == Some(neighbour)) {
                continue;
            }
            if candidate.progress <= prev.progress || candidate.progress >= next.progress {
                continue;
            }
            let local = detour_ratio(
                prev.reference.location(),
                candidate.location(),
                next.reference.location(),
            );
            if local > config.detour_allowance {
                continue;
            }
            let before =
                model.hours(haversine_miles(prev.reference.location(), candidate.location()));
            let after =
                model.hours(haversine_miles(candidate.location(), next.reference.location()));
            if before > ceiling || after > ceiling {
                continue;
            }
            let trial: Vec<f64> = hours
                .iter()
                .enumerate()
                .map(|(day, h)| match day {
                    d if d == offset => before,
                    d if d == stop => after,
                    _ => *h,
                })
                .collect();
            let trial_max = trial.iter().copied().fold(0.0, f64::max);
            if trial_max > current_max + VARIANCE_EPSILON {
                continue;
            }
            let variance = drive_time_variance(&trial);
            if variance >= current_variance - VARIANCE_EPSILON {
                continue;
            }
            if best.is_none_or(|b| variance < b.variance) {
                best = Some(Swap {
                    stop,
                    candidate: neighbour,
                    before,
                    after,
                    variance,
                });
            }
        }
    }
    best
}
