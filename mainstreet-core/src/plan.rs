//! The planner's output: daily segments and the aggregate trip plan.

use std::fmt;

use crate::{PlanWarning, PlanningStyle, WaypointRef};

/// Workload label derived from a day's drive time.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(rename_all = "kebab-case"))]
pub enum DriveCategory {
    /// Four hours or less.
    Light,
    /// More than four, up to six hours.
    Moderate,
    /// More than six, up to eight hours.
    Heavy,
    /// More than eight hours.
    Extreme,
}

impl DriveCategory {
    /// Band a drive time in hours.
    ///
    /// # Examples
    /// ```
    /// use mainstreet_core::DriveCategory;
    ///
    /// assert_eq!(DriveCategory::from_hours(4.0), DriveCategory::Light);
    /// assert_eq!(DriveCategory::from_hours(8.5), DriveCategory::Extreme);
    /// ```
    pub fn from_hours(hours: f64) -> Self {
        if hours <= 4.0 {
            Self::Light
        } else if hours <= 6.0 {
            Self::Moderate
        } else if hours <= 8.0 {
            Self::Heavy
        } else {
            Self::Extreme
        }
    }

    /// Return the category as a lowercase `&str`.
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Light => "light",
            Self::Moderate => "moderate",
            Self::Heavy => "heavy",
            Self::Extreme => "extreme",
        }
    }
}

impl fmt::Display for DriveCategory {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Compass sense of travel along the route.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(rename_all = "kebab-case"))]
pub enum TravelDirection {
    /// The destination lies east of (or level with) the start.
    Eastbound,
    /// The destination lies west of the start.
    Westbound,
}

impl TravelDirection {
    /// Direction implied by the endpoints' longitudes.
    pub fn between(start_longitude: f64, end_longitude: f64) -> Self {
        if end_longitude < start_longitude {
            Self::Westbound
        } else {
            Self::Eastbound
        }
    }
}

impl fmt::Display for TravelDirection {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(match self {
            Self::Eastbound => "eastbound",
            Self::Westbound => "westbound",
        })
    }
}

/// One day of the itinerary.
#[derive(Debug, Clone, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct DailySegment {
    /// 1-based day number.
    pub day: u16,
    /// Where the day begins.
    pub start: WaypointRef,
    /// Where the day ends.
    pub end: WaypointRef,
    /// Great-circle length of the leg.
    pub distance_miles: f64,
    /// Reported drive time; capped legs report the ceiling exactly.
    pub drive_time_hours: f64,
    /// Workload band of `drive_time_hours`.
    pub category: DriveCategory,
    /// Set when the leg was capped or involves synthetic stops.
    pub warning: Option<String>,
}

impl DailySegment {
    /// Build an unwarned segment, deriving the category from `drive_time_hours`.
    pub fn new(
        day: u16,
        start: WaypointRef,
        end: WaypointRef,
        distance_miles: f64,
        drive_time_hours: f64,
    ) -> Self {
        Self {
            day,
            start,
            end,
            distance_miles,
            drive_time_hours,
            category: DriveCategory::from_hours(drive_time_hours),
            warning: None,
        }
    }

    /// `true` if either end of the leg is synthetic.
    pub const fn touches_synthetic(&self) -> bool {
        self.start.is_synthetic || self.end.is_synthetic
    }
}

/// The complete itinerary returned by a planner.
///
/// Totals are computed from the segments on construction, so they always
/// agree with them.
#[derive(Debug, Clone, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct TripPlan {
    /// Display name of the start waypoint.
    pub start_city: String,
    /// Display name of the end waypoint.
    pub end_city: String,
    /// Days actually planned; equals `segments.len()`.
    pub total_days: u16,
    /// Days the caller asked for.
    pub requested_days: u16,
    /// Strategy used to choose stops.
    pub planning_style: PlanningStyle,
    /// Sense of travel.
    pub direction: TravelDirection,
    /// Daily legs in day order.
    pub segments: Vec<DailySegment>,
    /// Sum of segment distances.
    pub total_distance_miles: f64,
    /// Sum of segment drive times.
    pub total_drive_time_hours: f64,
    /// Non-fatal diagnostics.
    #[cfg_attr(feature = "serde", serde(default))]
    pub warnings: Vec<PlanWarning>,
}

/// Descriptive fields of a [`TripPlan`] that are not derived from segments.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PlanHeader {
    /// Display name of the start waypoint.
    pub start_city: String,
    /// Display name of the end waypoint.
    pub end_city: String,
    /// Days the caller asked for.
    pub requested_days: u16,
    /// Strategy used to choose stops.
    pub planning_style: PlanningStyle,
    /// Sense of travel.
    pub direction: TravelDirection,
}

impl TripPlan {
    /// Assemble a plan, summing distance and drive time over `segments`.
    pub fn new(header: PlanHeader, segments: Vec<DailySegment>, warnings: Vec<PlanWarning>) -> Self {
        let total_distance_miles = segments.iter().map(|s| s.distance_miles).sum();
        let total_drive_time_hours = segments.iter().map(|s| s.drive_time_hours).sum();
        let total_days = u16::try_from(segments.len()).unwrap_or(u16::MAX);
        Self {
            start_city: header.start_city,
            end_city: header.end_city,
            total_days,
            requested_days: header.requested_days,
            planning_style: header.planning_style,
            direction: header.direction,
            segments,
            total_distance_miles,
            total_drive_time_hours,
            warnings,
        }
    }

    /// Ordered overnight stops, including both termini.
    pub fn stops(&self) -> Vec<&WaypointRef> {
        let mut stops = Vec::with_capacity(self.segments.len() + 1);
        if let Some(first) = self.segments.first() {
            stops.push(&first.start);
        }
        stops.extend(self.segments.iter().map(|s| &s.end));
        stops
    }

    /// `true` if any warning of the given serialised kind is attached.
    pub fn has_warning(&self, kind: &str) -> bool {
        self.warnings.iter().any(|w| w.kind() == kind)
    }
}
