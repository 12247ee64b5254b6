//! Feasibility repair cascade: split detection, capping, and the emergency
//! synthetic-stop fallback.

#![expect(
    clippy::float_arithmetic,
    reason = "leg lengths and interpolation are floating-point"
)]

use mainstreet_core::{
    DailySegment, DriveCategory, PlanWarning, WaypointRef, haversine_miles, interpolate,
};

use crate::PlannerConfig;
use crate::sequence::{Candidate, Corridor};
use crate::stops::Stop;

/// Note attached to uncapped legs that start or end at a synthetic stop.
pub const SYNTHETIC_NOTE: &str =
    "Interpolated stop; no catalog waypoint was available for this day.";

/// Segment warning for a capped leg.
pub fn cap_message(cap_hours: f64, distance_miles: f64) -> String {
    format!(
        "Drive time capped at {cap_hours}h due to {distance_miles:.0}mi leg; consider adding a day."
    )
}

/// Find the admissible candidate that would split the leg `from → to` into
/// two days under the ceiling, preferring the most even split.
pub fn find_split<'c>(
    corridor: &'c Corridor,
    from: &Stop,
    to: &Stop,
    config: &PlannerConfig,
) -> Option<&'c Candidate> {
    let ceiling = config.ceiling();
    let model = &config.drive_model;
    corridor
        .candidates
        .iter()
        .filter(|c| c.progress > from.progress && c.progress < to.progress)
        .filter_map(|c| {
            let first = model.hours(haversine_miles(from.reference.location(), c.location()));
            let second = model.hours(haversine_miles(c.location(), to.reference.location()));
            (first <= ceiling && second <= ceiling).then_some((c, first.max(second)))
        })
        .reduce(|best, next| if next.1 < best.1 { next } else { best })
        .map(|(c, _)| c)
}

/// Cap every over-ceiling segment in place and flag synthetic legs.
///
/// Segments that could be split by adding a day produce an
/// [`PlanWarning::InfeasibleTrip`]; the split is reported, never applied.
/// Capped segments keep their true distance and report exactly the ceiling.
pub fn repair_segments(
    segments: &mut [DailySegment],
    stops: &[Stop],
    corridor: &Corridor,
    config: &PlannerConfig,
) -> Vec<PlanWarning> {
    let ceiling = config.ceiling();
    let mut warnings = Vec::new();
    for (position, segment) in segments.iter_mut().enumerate() {
        if segment.drive_time_hours > ceiling {
            let estimated = segment.drive_time_hours;
            if let (Some(from), Some(to)) = (stops.get(position), stops.get(position + 1))
                && let Some(split) = find_split(corridor, from, to, config)
            {
                warnings.push(PlanWarning::InfeasibleTrip {
                    day: segment.day,
                    split_candidate_id: split.waypoint.id.clone(),
                    estimated_hours: estimated,
                });
            }
            log::warn!(
                "day {} needs {estimated:.1}h of driving; capping at {ceiling}h",
                segment.day
            );
            segment.drive_time_hours = ceiling;
            segment.category = DriveCategory::from_hours(ceiling);
            segment.warning = Some(cap_message(ceiling, segment.distance_miles));
            warnings.push(PlanWarning::DriveTimeCapped {
                day: segment.day,
                distance_miles: segment.distance_miles,
                estimated_hours: estimated,
                capped_hours: ceiling,
            });
        } else if segment.touches_synthetic() {
            segment.warning = Some(SYNTHETIC_NOTE.to_owned());
        }
    }
    warnings
}

/// Insert evenly interpolated synthetic stops until the trip has
/// `target_days` legs.
///
/// Extra stops go to the longest legs first, measured as distance per
/// resulting sub-leg. Returns the number of stops inserted.
pub fn emergency_fill(stops: &mut Vec<Stop>, target_days: usize) -> usize {
    let legs = stops.len().saturating_sub(1);
    if legs == 0 || target_days <= legs {
        return 0;
    }
    let missing = target_days - legs;
    let lengths: Vec<f64> = stops
        .windows(2)
        .filter_map(|pair| match pair {
            [a, b] => Some(haversine_miles(a.reference.location(), b.reference.location())),
            _ => None,
        })
        .collect();
    let mut counts = vec![0_u32; lengths.len()];
    for _ in 0..missing {
        let longest = lengths
            .iter()
            .zip(&counts)
            .enumerate()
            .map(|(leg, (length, count))| (leg, length / f64::from(count + 1)))
            .reduce(|best, next| if next.1 > best.1 { next } else { best });
        if let Some((leg, _)) = longest
            && let Some(count) = counts.get_mut(leg)
        {
            *count += 1;
        }
    }

    let mut filled = Vec::with_capacity(target_days + 1);
    let mut serial = 0_u32;
    for (leg, pair) in stops.windows(2).enumerate() {
        let [from, to] = pair else { continue };
        filled.push(from.clone());
        let count = counts.get(leg).copied().unwrap_or(0);
        for step in 1..=count {
            serial += 1;
            let t = f64::from(step) / f64::from(count + 1);
            filled.push(synthetic_stop(from, to, t, serial));
        }
    }
    if let Some(last) = stops.last() {
        filled.push(last.clone());
    }
    *stops = filled;
    usize::try_from(serial).unwrap_or(usize::MAX)
}

fn synthetic_stop(from: &Stop, to: &Stop, t: f64, serial: u32) -> Stop {
    let location = interpolate(from.reference.location(), to.reference.location(), t);
    Stop {
        reference: WaypointRef {
            id: format!("synthetic-{serial}"),
            name: format!(
                "Stopover between {} and {}",
                from.reference.name, to.reference.name
            ),
            state: String::new(),
            latitude: location.y,
            longitude: location.x,
            is_synthetic: true,
        },
        progress: from.progress + (to.progress - from.progress) * t,
        candidate: None,
        pinned: false,
    }
}
