//! Directional position keys for catalog waypoints.

#![expect(
    clippy::float_arithmetic,
    reason = "polyline projection is floating-point geometry"
)]

use std::collections::BTreeMap;

use geo::Coord;
use mainstreet_core::Waypoint;

/// One vertex of the route polyline.
#[derive(Debug, Clone, PartialEq)]
struct Vertex {
    key: f64,
    location: Coord<f64>,
}

/// Waypoints sharing a `sequence_order` value.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DuplicateOrder {
    /// The shared order.
    pub order: i32,
    /// Waypoint ids in ascending order.
    pub waypoint_ids: Vec<String>,
}

/// Polyline of sequenced waypoints used to key every waypoint along the route.
///
/// Waypoints with a `sequence_order` use it directly. Others are projected
/// onto the nearest polyline segment and receive an interpolated key. The
/// index is built once per catalog snapshot.
#[derive(Debug, Clone, Default)]
pub struct SequenceIndex {
    polyline: Vec<Vertex>,
    duplicates: Vec<DuplicateOrder>,
}

impl SequenceIndex {
    /// Build the polyline from the valid, sequenced waypoints in `waypoints`.
    pub fn new(waypoints: &[Waypoint]) -> Self {
        let mut by_order: BTreeMap<i32, Vec<&Waypoint>> = BTreeMap::new();
        for waypoint in waypoints.iter().filter(|w| w.validate().is_ok()) {
            if let Some(order) = waypoint.sequence_order {
                by_order.entry(order).or_default().push(waypoint);
            }
        }

        let mut polyline = Vec::new();
        let mut duplicates = Vec::new();
        for (order, mut group) in by_order {
            group.sort_by(|a, b| a.id.cmp(&b.id));
            group.dedup_by(|a, b| a.id == b.id);
            if group.len() > 1 {
                duplicates.push(DuplicateOrder {
                    order,
                    waypoint_ids: group.iter().map(|w| w.id.clone()).collect(),
                });
            }
            polyline.extend(group.iter().map(|w| Vertex {
                key: f64::from(order),
                location: w.location(),
            }));
        }
        if !duplicates.is_empty() {
            log::debug!("{} duplicated sequence order value(s)", duplicates.len());
        }
        Self {
            polyline,
            duplicates,
        }
    }

    /// `true` when at least two sequenced waypoints exist.
    pub fn has_polyline(&self) -> bool {
        self.polyline.len() >= 2
    }

    /// Groups of waypoints sharing a `sequence_order`.
    pub fn duplicates(&self) -> &[DuplicateOrder] {
        &self.duplicates
    }

    /// Position key for `waypoint`, or `None` when it cannot be keyed.
    pub fn key(&self, waypoint: &Waypoint) -> Option<f64> {
        if let Some(order) = waypoint.sequence_order {
            return Some(f64::from(order));
        }
        self.interpolated_key(waypoint.location())
    }

    fn interpolated_key(&self, point: Coord<f64>) -> Option<f64> {
        let mut best: Option<(f64, f64)> = None;
        for pair in self.polyline.windows(2) {
            let [a, b] = pair else { continue };
            let (t, distance) = project_onto_segment(point, a.location, b.location);
            if best.is_none_or(|(d, _)| distance < d) {
                best = Some((distance, a.key + t * (b.key - a.key)));
            }
        }
        best.map(|(_, key)| key)
    }
}

/// Planar coordinates scaled so a degree of longitude matches a degree of
/// latitude at `reference_latitude`.
pub(crate) fn planar(point: Coord<f64>, reference_latitude: f64) -> Coord<f64> {
    Coord {
        x: point.x * reference_latitude.to_radians().cos(),
        y: point.y,
    }
}

/// Project `point` onto segment `a`–`b`, returning the clamped parameter and
/// the planar distance from the segment.
pub(crate) fn project_onto_segment(
    point: Coord<f64>,
    a: Coord<f64>,
    b: Coord<f64>,
) -> (f64, f64) {
    let reference = (a.y + b.y) / 2.0;
    let p = planar(point, reference);
    let pa = planar(a, reference);
    let pb = planar(b, reference);
    let dx = pb.x - pa.x;
    let dy = pb.y - pa.y;
    let length_sq = dx * dx + dy * dy;
    if length_sq <= f64::EPSILON {
        return (0.0, (p.x - pa.x).hypot(p.y - pa.y));
    }
    let t = (((p.x - pa.x) * dx + (p.y - pa.y) * dy) / length_sq).clamp(0.0, 1.0);
    let cx = pa.x + t * dx;
    let cy = pa.y + t * dy;
    (t, (p.x - cx).hypot(p.y - cy))
}

/// Unclamped fraction of the way along `start`–`end` that `point` projects to.
pub(crate) fn projected_fraction(point: Coord<f64>, start: Coord<f64>, end: Coord<f64>) -> f64 {
    let reference = (start.y + end.y) / 2.0;
    let p = planar(point, reference);
    let s = planar(start, reference);
    let e = planar(end, reference);
    let dx = e.x - s.x;
    let dy = e.y - s.y;
    let length_sq = dx * dx + dy * dy;
    if length_sq <= f64::EPSILON {
        return 0.0;
    }
    ((p.x - s.x) * dx + (p.y - s.y) * dy) / length_sq
}
