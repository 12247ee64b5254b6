//! Corridor enforcement: admissible candidates between two endpoints and
//! the ordering checks run over chosen stops.

#![expect(
    clippy::float_arithmetic,
    reason = "progress and detour ratios are floating-point measures"
)]

use geo::Coord;
use mainstreet_core::{
    PlanWarning, SequenceViolationKind, TravelDirection, Waypoint, WaypointRef, haversine_miles,
};

use super::index::{SequenceIndex, projected_fraction};
use crate::PlannerConfig;

/// How candidate progress was derived for a corridor.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum KeyMode {
    /// Catalog `sequence_order`, interpolated for unsequenced candidates.
    Sequence,
    /// Planar projection onto the start→end line.
    Projection,
}

/// An admissible waypoint and its position between start (0) and end (1).
#[derive(Debug, Clone, PartialEq)]
pub struct Candidate {
    /// The catalog waypoint.
    pub waypoint: Waypoint,
    /// Fraction of the way from start to end, strictly inside `(0, 1)`.
    pub progress: f64,
    /// Detour ratio of routing start→candidate→end versus start→end.
    pub detour_ratio: f64,
}

impl Candidate {
    /// Waypoint position.
    pub const fn location(&self) -> Coord<f64> {
        self.waypoint.location()
    }

    /// Segment endpoint reference.
    pub fn reference(&self) -> WaypointRef {
        WaypointRef::from_waypoint(&self.waypoint)
    }
}

/// The enforced view of the route between one start and end.
#[derive(Debug, Clone)]
pub struct Corridor {
    /// Resolved start waypoint.
    pub start: Waypoint,
    /// Resolved end waypoint.
    pub end: Waypoint,
    /// Sense of travel.
    pub direction: TravelDirection,
    /// How progress was keyed.
    pub key_mode: KeyMode,
    /// Admissible candidates sorted by `(progress, id)`.
    pub candidates: Vec<Candidate>,
    /// Ordering diagnostics found while enforcing.
    pub diagnostics: Vec<PlanWarning>,
}

impl Corridor {
    /// Great-circle distance from start to end.
    pub fn direct_miles(&self) -> f64 {
        haversine_miles(self.start.location(), self.end.location())
    }

    /// Distance from `from` through every candidate beyond `after` to the end.
    pub fn chain_miles_from(&self, from: Coord<f64>, after: f64) -> f64 {
        let mut total = 0.0;
        let mut previous = from;
        for candidate in self.candidates.iter().filter(|c| c.progress > after) {
            total += haversine_miles(previous, candidate.location());
            previous = candidate.location();
        }
        total + haversine_miles(previous, self.end.location())
    }

    /// Distance from start through every candidate to the end.
    pub fn chain_miles(&self) -> f64 {
        self.chain_miles_from(self.start.location(), 0.0)
    }

    /// Leg distances for `start → candidates[indices] → end`.
    pub fn leg_miles<I: IntoIterator<Item = usize>>(&self, indices: I) -> Vec<f64> {
        let mut points = vec![self.start.location()];
        points.extend(
            indices
                .into_iter()
                .filter_map(|i| self.candidates.get(i).map(Candidate::location)),
        );
        points.push(self.end.location());
        points
            .windows(2)
            .filter_map(|pair| match pair {
                [a, b] => Some(haversine_miles(*a, *b)),
                _ => None,
            })
            .collect()
    }

    /// Index of the candidate with the given id.
    pub fn position_of(&self, id: &str) -> Option<usize> {
        self.candidates.iter().position(|c| c.waypoint.id == id)
    }
}

/// Extra distance of routing `previous → candidate → next` relative to the
/// direct `previous → next` distance.
pub fn detour_ratio(previous: Coord<f64>, candidate: Coord<f64>, next: Coord<f64>) -> f64 {
    let direct = haversine_miles(previous, next);
    let via = haversine_miles(previous, candidate) + haversine_miles(candidate, next);
    if direct <= f64::EPSILON {
        return if via <= f64::EPSILON { 0.0 } else { f64::INFINITY };
    }
    (via - direct) / direct
}

/// Filter `waypoints` to the admissible candidates between `start` and `end`.
///
/// A candidate is admissible when its progress lies strictly inside `(0, 1)`
/// and its detour ratio does not exceed the configured allowance. Waypoints
/// failing coordinate validation are skipped with a warning.
pub fn enforce(
    index: &SequenceIndex,
    waypoints: &[Waypoint],
    start: &Waypoint,
    end: &Waypoint,
    config: &PlannerConfig,
) -> Corridor {
    let direction = TravelDirection::between(start.longitude, end.longitude);
    let endpoint_keys = match (start.sequence_order, end.sequence_order) {
        (Some(s), Some(e)) if s != e && index.has_polyline() => Some((f64::from(s), f64::from(e))),
        _ => None,
    };
    let key_mode = if endpoint_keys.is_some() {
        KeyMode::Sequence
    } else {
        KeyMode::Projection
    };
    log::debug!(
        "enforcing corridor {} -> {} ({direction}, {key_mode:?})",
        start.id,
        end.id
    );

    let progress_of = |waypoint: &Waypoint| -> f64 {
        endpoint_keys
            .and_then(|(ks, ke)| index.key(waypoint).map(|k| (k - ks) / (ke - ks)))
            .unwrap_or_else(|| {
                projected_fraction(waypoint.location(), start.location(), end.location())
            })
    };

    let mut skipped = 0_usize;
    let mut candidates: Vec<Candidate> = Vec::new();
    for waypoint in waypoints {
        if waypoint.id == start.id || waypoint.id == end.id {
            continue;
        }
        if let Err(err) = waypoint.validate() {
            skipped += 1;
            log::warn!("skipping waypoint: {err}");
            continue;
        }
        let progress = progress_of(waypoint);
        if !(progress > 0.0 && progress < 1.0) {
            continue;
        }
        let ratio = detour_ratio(start.location(), waypoint.location(), end.location());
        if ratio > config.detour_allowance {
            continue;
        }
        candidates.push(Candidate {
            waypoint: waypoint.clone(),
            progress,
            detour_ratio: ratio,
        });
    }
    candidates.sort_by(|a, b| {
        a.progress
            .total_cmp(&b.progress)
            .then_with(|| a.waypoint.id.cmp(&b.waypoint.id))
    });
    candidates.dedup_by(|a, b| a.waypoint.id == b.waypoint.id);
    if skipped > 0 {
        log::warn!("{skipped} waypoint(s) skipped for invalid coordinates");
    }

    let mut diagnostics = duplicate_order_warnings(index, &candidates, start, end);
    diagnostics.extend(large_gap_warnings(&candidates, start, end, config));

    Corridor {
        start: start.clone(),
        end: end.clone(),
        direction,
        key_mode,
        candidates,
        diagnostics,
    }
}

fn duplicate_order_warnings(
    index: &SequenceIndex,
    candidates: &[Candidate],
    start: &Waypoint,
    end: &Waypoint,
) -> Vec<PlanWarning> {
    let involved = |id: &str| {
        id == start.id || id == end.id || candidates.iter().any(|c| c.waypoint.id == id)
    };
    index
        .duplicates()
        .iter()
        .filter(|dup| dup.waypoint_ids.iter().any(|id| involved(id)))
        .map(|dup| PlanWarning::SequenceViolation {
            kind: SequenceViolationKind::DuplicateSequenceOrder,
            waypoint_ids: dup.waypoint_ids.clone(),
            detail: format!(
                "{} waypoints share sequence order {}; their relative order is ambiguous",
                dup.waypoint_ids.len(),
                dup.order
            ),
        })
        .collect()
}

fn large_gap_warnings(
    candidates: &[Candidate],
    start: &Waypoint,
    end: &Waypoint,
    config: &PlannerConfig,
) -> Vec<PlanWarning> {
    if candidates.is_empty() {
        return Vec::new();
    }
    let mut points: Vec<(&str, f64)> = Vec::with_capacity(candidates.len() + 2);
    points.push((start.id.as_str(), 0.0));
    points.extend(candidates.iter().map(|c| (c.waypoint.id.as_str(), c.progress)));
    points.push((end.id.as_str(), 1.0));

    let gaps: Vec<(&str, &str, f64)> = points
        .windows(2)
        .filter_map(|pair| match pair {
            [(a, pa), (b, pb)] => Some((*a, *b, pb - pa)),
            _ => None,
        })
        .collect();
    let Some(median) = median(gaps.iter().map(|(_, _, g)| *g).collect()) else {
        return Vec::new();
    };
    if median <= f64::EPSILON {
        return Vec::new();
    }
    let limit = median * config.large_gap_multiple;
    gaps.into_iter()
        .filter(|(_, _, gap)| *gap > limit)
        .map(|(a, b, gap)| PlanWarning::SequenceViolation {
            kind: SequenceViolationKind::LargeGap,
            waypoint_ids: vec![a.to_owned(), b.to_owned()],
            detail: format!(
                "gap between {a} and {b} is {:.1}x the median spacing",
                gap / median
            ),
        })
        .collect()
}

fn median(mut values: Vec<f64>) -> Option<f64> {
    values.sort_by(f64::total_cmp);
    let mid = values.len() / 2;
    match values.len() {
        0 => None,
        n if n % 2 == 1 => values.get(mid).copied(),
        _ => Some((values.get(mid - 1)? + values.get(mid)?) / 2.0),
    }
}

/// Report backtracking and overshoot among the final ordered stops.
///
/// Each stop is `(id, progress, detour_ratio)`; endpoints carry progress 0
/// and 1.
pub fn check_stop_order<'a, I>(stops: I, allowance: f64) -> Vec<PlanWarning>
where
    I: IntoIterator<Item = (&'a str, f64, f64)>,
{
    let mut warnings = Vec::new();
    let mut previous: Option<(&str, f64)> = None;
    for (id, progress, ratio) in stops {
        if let Some((prev_id, prev_progress)) = previous
            && progress <= prev_progress
        {
            warnings.push(PlanWarning::SequenceViolation {
                kind: SequenceViolationKind::Backtracking,
                waypoint_ids: vec![prev_id.to_owned(), id.to_owned()],
                detail: format!("{id} does not advance past {prev_id}"),
            });
        }
        if ratio > allowance {
            warnings.push(PlanWarning::SequenceViolation {
                kind: SequenceViolationKind::Overshoot,
                waypoint_ids: vec![id.to_owned()],
                detail: format!(
                    "{id} adds a {:.0}% detour, above the {:.0}% allowance",
                    ratio * 100.0,
                    allowance * 100.0
                ),
            });
        }
        previous = Some((id, progress));
    }
    warnings
}

#[cfg(test)]
mod tests {
    use super::*;
    use mainstreet_core::test_support::{route_66_waypoint, route_66_waypoints};
    use rstest::{fixture, rstest};

    #[fixture]
    fn catalog() -> Vec<Waypoint> {
        route_66_waypoints()
    }

    fn corridor_between(catalog: &[Waypoint], start: &str, end: &str) -> Corridor {
        let index = SequenceIndex::new(catalog);
        let start = route_66_waypoint(start).unwrap();
        let end = route_66_waypoint(end).unwrap();
        enforce(&index, catalog, &start, &end, &PlannerConfig::default())
    }

    #[rstest]
    fn westbound_corridor_is_ordered(catalog: Vec<Waypoint>) {
        let corridor = corridor_between(&catalog, "chicago", "santa-monica");
        assert_eq!(corridor.direction, TravelDirection::Westbound);
        assert_eq!(corridor.key_mode, KeyMode::Sequence);
        assert_eq!(corridor.candidates.len(), 42);
        assert!(
            corridor
                .candidates
                .windows(2)
                .all(|w| w[0].progress <= w[1].progress)
        );
        assert_eq!(corridor.candidates[0].waypoint.id, "joliet");
        assert!(corridor.diagnostics.is_empty());
    }

    #[rstest]
    fn eastbound_corridor_reverses_progress(catalog: Vec<Waypoint>) {
        let corridor = corridor_between(&catalog, "tulsa", "st-louis");
        assert_eq!(corridor.direction, TravelDirection::Eastbound);
        let first = &corridor.candidates[0];
        assert_eq!(first.waypoint.id, "blue-whale");
        assert!(corridor.candidates.iter().all(|c| c.progress > 0.0 && c.progress < 1.0));
        assert!(corridor.position_of("chicago").is_none());
    }

    #[rstest]
    fn unsequenced_endpoints_fall_back_to_projection(catalog: Vec<Waypoint>) {
        let corridor = corridor_between(&catalog, "cadillac-ranch", "wigwam");
        assert_eq!(corridor.key_mode, KeyMode::Projection);
        assert!(corridor.position_of("albuquerque").is_some());
        assert!(corridor.position_of("tulsa").is_none());
    }

    #[rstest]
    fn invalid_waypoints_are_skipped(mut catalog: Vec<Waypoint>) {
        if let Some(rolla) = catalog.iter_mut().find(|w| w.id == "rolla") {
            rolla.latitude = f64::NAN;
        }
        let corridor = corridor_between(&catalog, "chicago", "tulsa");
        assert!(corridor.position_of("rolla").is_none());
        assert!(corridor.position_of("cuba").is_some());
    }

    #[rstest]
    fn duplicate_orders_are_reported_but_kept(mut catalog: Vec<Waypoint>) {
        if let Some(rolla) = catalog.iter_mut().find(|w| w.id == "rolla") {
            rolla.sequence_order = Some(8);
        }
        let corridor = corridor_between(&catalog, "chicago", "tulsa");
        assert!(corridor.position_of("rolla").is_some());
        assert!(corridor.position_of("cuba").is_some());
        assert!(corridor.diagnostics.iter().any(|w| matches!(
            w,
            PlanWarning::SequenceViolation {
                kind: SequenceViolationKind::DuplicateSequenceOrder,
                ..
            }
        )));
    }

    #[rstest]
    fn large_gaps_are_reported() {
        let catalog: Vec<Waypoint> = route_66_waypoints()
            .into_iter()
            .filter(|w| {
                !matches!(
                    w.sequence_order,
                    Some(order) if (8..=20).contains(&order)
                ) || w.id == "elk-city"
            })
            .filter(|w| w.sequence_order.is_some())
            .collect();
        let corridor = corridor_between(&catalog, "chicago", "amarillo");
        assert!(corridor.diagnostics.iter().any(|w| matches!(
            w,
            PlanWarning::SequenceViolation {
                kind: SequenceViolationKind::LargeGap,
                waypoint_ids,
                ..
            } if waypoint_ids == &["st-louis".to_owned(), "elk-city".to_owned()]
        )));
    }

    #[rstest]
    fn detour_ratio_of_collinear_point_is_zero() {
        let a = Coord { x: -90.0, y: 35.0 };
        let b = Coord { x: -95.0, y: 35.0 };
        let c = Coord { x: -100.0, y: 35.0 };
        assert!(detour_ratio(a, b, c) < 1e-3);
        assert!(detour_ratio(a, Coord { x: -95.0, y: 40.0 }, c) > 0.3);
        assert_eq!(detour_ratio(a, a, a), 0.0);
    }

    #[rstest]
    fn stop_order_flags_backtracking_and_overshoot() {
        let stops = [
            ("start", 0.0, 0.0),
            ("b", 0.5, 0.0),
            ("a", 0.4, 0.5),
            ("end", 1.0, 0.0),
        ];
        let warnings = check_stop_order(stops, 0.3);
        let kinds: Vec<_> = warnings
            .iter()
            .filter_map(|w| match w {
                PlanWarning::SequenceViolation { kind, .. } => Some(*kind),
                _ => None,
            })
            .collect();
        assert_eq!(
            kinds,
            [
                SequenceViolationKind::Backtracking,
                SequenceViolationKind::Overshoot
            ]
        );
    }
}
