//! Great-circle distance and the drive-time estimate derived from it.
//!
//! Distances are a proxy for road mileage; no road network is consulted.

#![expect(
    clippy::float_arithmetic,
    reason = "distance and drive-time estimates are floating-point by nature"
)]

use geo::Coord;

/// Mean Earth radius in statute miles.
pub const EARTH_RADIUS_MILES: f64 = 3959.0;

/// Great-circle distance between two WGS84 coordinates, in miles.
///
/// Coordinates use `x = longitude`, `y = latitude`. Identical points yield 0.
///
/// # Examples
/// ```
/// use geo::Coord;
/// use mainstreet_core::haversine_miles;
///
/// let chicago = Coord { x: -87.6298, y: 41.8781 };
/// let st_louis = Coord { x: -90.1994, y: 38.6270 };
/// let miles = haversine_miles(chicago, st_louis);
/// assert!((250.0..275.0).contains(&miles));
/// assert_eq!(haversine_miles(chicago, chicago), 0.0);
/// ```
pub fn haversine_miles(a: Coord<f64>, b: Coord<f64>) -> f64 {
    if a == b {
        return 0.0;
    }
    let lat1 = a.y.to_radians();
    let lat2 = b.y.to_radians();
    let d_lat = (b.y - a.y).to_radians();
    let d_lon = (b.x - a.x).to_radians();
    let h = (d_lat / 2.0).sin().powi(2) + lat1.cos() * lat2.cos() * (d_lon / 2.0).sin().powi(2);
    let c = 2.0 * h.sqrt().min(1.0).asin();
    EARTH_RADIUS_MILES * c
}

/// Point a fraction `t` of the way from `a` to `b`, interpolating latitude
/// and longitude linearly.
pub fn interpolate(a: Coord<f64>, b: Coord<f64>, t: f64) -> Coord<f64> {
    Coord {
        x: a.x + (b.x - a.x) * t,
        y: a.y + (b.y - a.y) * t,
    }
}

/// Converts miles into an estimated driving time.
///
/// The estimate is `miles / average_speed_mph`, floored at
/// `miles / max_plausible_speed_mph`. The model reports the true estimate;
/// callers decide whether to cap it.
///
/// # Examples
/// ```
/// use mainstreet_core::DriveTimeModel;
///
/// let model = DriveTimeModel::default();
/// assert!((model.hours(275.0) - 5.0).abs() < 1e-9);
/// assert_eq!(model.hours(-3.0), 0.0);
/// ```
#[derive(Debug, Clone, Copy, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct DriveTimeModel {
    /// Typical cruising speed including stops.
    pub average_speed_mph: f64,
    /// Fastest speed considered plausible over a whole leg.
    pub max_plausible_speed_mph: f64,
}

impl Default for DriveTimeModel {
    fn default() -> Self {
        Self {
            average_speed_mph: 55.0,
            max_plausible_speed_mph: 75.0,
        }
    }
}

impl DriveTimeModel {
    /// Build a model with explicit speeds.
    pub const fn new(average_speed_mph: f64, max_plausible_speed_mph: f64) -> Self {
        Self {
            average_speed_mph,
            max_plausible_speed_mph,
        }
    }

    /// Estimated hours to drive `miles`.
    ///
    /// Non-positive or non-finite distances, and non-positive speeds, yield 0.
    pub fn hours(&self, miles: f64) -> f64 {
        if !miles.is_finite() || miles <= 0.0 || self.average_speed_mph <= 0.0 {
            return 0.0;
        }
        let estimate = miles / self.average_speed_mph;
        if self.max_plausible_speed_mph > 0.0 {
            estimate.max(miles / self.max_plausible_speed_mph)
        } else {
            estimate
        }
    }

    /// Distance coverable in `hours` at the average speed.
    pub fn miles_for(&self, hours: f64) -> f64 {
        if hours.is_finite() && hours > 0.0 {
            hours * self.average_speed_mph
        } else {
            0.0
        }
    }
}
