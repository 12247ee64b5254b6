//! Heritage-weighted selection: landmarks first, then the best remaining
//! heritage scores.

#![expect(
    clippy::float_arithmetic,
    reason = "slot spacing is a floating-point heuristic"
)]

use std::cmp::Ordering;

use mainstreet_core::HeritageScorer;

use super::{DestinationSelector, SelectedStop, Selection};
use crate::PlannerConfig;
use crate::count_to_f64;
use crate::sequence::{Candidate, Corridor};

/// Score lost per unit of progress a mandatory stop sits from its slot when
/// there are more mandatory stops than days.
const SLOT_DISTANCE_PENALTY: f64 = 200.0;

/// Always stops at high-heritage landmarks, then fills the remaining days by
/// heritage score, breaking ties by spacing from the stops already chosen and
/// then by closeness to an evenly spaced slot.
///
/// A candidate is mandatory when its heritage score reaches the threshold
/// and its detour ratio stays below the heritage allowance. Mandatory stops
/// are pinned so the rebalancer leaves them in place.
#[derive(Debug)]
pub struct HeritageSelector<'a, H> {
    config: &'a PlannerConfig,
    scorer: &'a H,
}

impl<'a, H: HeritageScorer> HeritageSelector<'a, H> {
    /// Create a selector scoring candidates with `scorer`.
    pub const fn new(config: &'a PlannerConfig, scorer: &'a H) -> Self {
        Self { config, scorer }
    }

    fn score(&self, candidate: &Candidate) -> f64 {
        f64::from(H::sanitise(self.scorer.score(&candidate.waypoint)))
    }

    fn mandatory(&self, corridor: &Corridor) -> Vec<usize> {
        corridor
            .candidates
            .iter()
            .enumerate()
            .filter(|(_, c)| {
                H::sanitise(self.scorer.score(&c.waypoint)) >= self.config.heritage_threshold
                    && c.detour_ratio < self.config.heritage_detour_allowance
            })
            .map(|(i, _)| i)
            .collect()
    }

    /// Keep the `needed` mandatory stops that best cover evenly spaced slots.
    fn thin_mandatory(&self, corridor: &Corridor, mut pool: Vec<usize>, slots: &[f64]) -> Vec<usize> {
        let mut kept = Vec::with_capacity(slots.len());
        for &slot in slots {
            let best = pool
                .iter()
                .enumerate()
                .filter_map(|(pos, &i)| corridor.candidates.get(i).map(|c| (pos, c)))
                .map(|(pos, c)| {
                    let value = self.score(c) - SLOT_DISTANCE_PENALTY * (c.progress - slot).abs();
                    (pos, value, -c.progress)
                })
                .reduce(|best, next| {
                    match next.1.total_cmp(&best.1).then(next.2.total_cmp(&best.2)) {
                        Ordering::Greater => next,
                        _ => best,
                    }
                });
            if let Some((pos, _, _)) = best {
                kept.push(pool.remove(pos));
            }
        }
        kept.sort_unstable();
        kept
    }
}

/// Ranking key for a candidate considered for a spare slot.
struct FillRank {
    index: usize,
    heritage: f64,
    spacing: f64,
    proximity: f64,
    progress: f64,
}

impl FillRank {
    /// Heritage first, then spacing, then slot proximity, then the earlier
    /// position.
    fn outranks(&self, other: &Self) -> bool {
        self.heritage
            .total_cmp(&other.heritage)
            .then(self.spacing.total_cmp(&other.spacing))
            .then(other.proximity.total_cmp(&self.proximity))
            .then(other.progress.total_cmp(&self.progress))
            == Ordering::Greater
    }
}

impl<H: HeritageScorer> DestinationSelector for HeritageSelector<'_, H> {
    fn select(&self, corridor: &Corridor, needed: usize) -> Selection {
        if needed == 0 {
            return Selection::default();
        }
        let slot_width = 1.0 / count_to_f64(needed + 1);
        let slots: Vec<f64> = (1..=needed)
            .map(|k| count_to_f64(k) * slot_width)
            .collect();

        let mut mandatory = self.mandatory(corridor);
        if mandatory.len() > needed {
            log::info!(
                "{} mandatory heritage stops for {needed} slot(s); keeping the best spaced",
                mandatory.len()
            );
            mandatory = self.thin_mandatory(corridor, mandatory, &slots);
        }
        let mut chosen: Vec<SelectedStop> = mandatory
            .into_iter()
            .map(|index| SelectedStop {
                index,
                pinned: true,
            })
            .collect();

        while chosen.len() < needed {
            let mut bounds: Vec<f64> = Vec::with_capacity(chosen.len() + 2);
            bounds.push(0.0);
            bounds.extend(
                chosen
                    .iter()
                    .filter_map(|s| corridor.candidates.get(s.index).map(|c| c.progress)),
            );
            bounds.push(1.0);

            let best = corridor
                .candidates
                .iter()
                .enumerate()
                .filter(|(i, _)| chosen.iter().all(|s| s.index != *i))
                .filter_map(|(i, c)| {
                    let gap = bounds
                        .iter()
                        .map(|b| (c.progress - b).abs())
                        .fold(f64::INFINITY, f64::min);
                    if gap <= f64::EPSILON {
                        return None;
                    }
                    let spacing = (100.0 * gap / slot_width).min(100.0);
                    let proximity = slots
                        .iter()
                        .map(|s| (c.progress - s).abs())
                        .fold(f64::INFINITY, f64::min);
                    Some(FillRank {
                        index: i,
                        heritage: self.score(c),
                        spacing,
                        proximity,
                        progress: c.progress,
                    })
                })
                .reduce(|best, next| {
                    if next.outranks(&best) { next } else { best }
                });
            let Some(FillRank { index, .. }) = best else {
                log::debug!("heritage selector exhausted candidates at {} stop(s)", chosen.len());
                break;
            };
            chosen.push(SelectedStop {
                index,
                pinned: false,
            });
            chosen.sort_by_key(|s| s.index);
        }
        chosen.sort_by_key(|s| s.index);
        Selection { stops: chosen }
    }
}
