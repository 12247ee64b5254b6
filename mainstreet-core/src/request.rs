use std::fmt;
use std::str::FromStr;

use thiserror::Error;

/// Longest trip the planner will produce, in days.
pub const MAX_TRIP_DAYS: u16 = 30;

/// Strategy used to choose the overnight stops.
///
/// # Examples
/// ```
/// use mainstreet_core::PlanningStyle;
///
/// assert_eq!("even-pacing".parse(), Ok(PlanningStyle::EvenPacing));
/// assert_eq!(PlanningStyle::default(), PlanningStyle::Balanced);
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(rename_all = "kebab-case"))]
pub enum PlanningStyle {
    /// Aim for equal drive time per day.
    #[default]
    Balanced,
    /// Blend distance pacing with drive-time comfort and stop variety.
    EvenPacing,
    /// Always stop at high-heritage landmarks, then space the rest.
    Heritage,
}

impl PlanningStyle {
    /// Return the style as a kebab-case `&str`.
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Balanced => "balanced",
            Self::EvenPacing => "even-pacing",
            Self::Heritage => "heritage",
        }
    }
}

impl fmt::Display for PlanningStyle {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for PlanningStyle {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_lowercase().replace('_', "-").as_str() {
            "balanced" => Ok(Self::Balanced),
            "even-pacing" | "even" => Ok(Self::EvenPacing),
            "heritage" => Ok(Self::Heritage),
            _ => Err(format!("unknown planning style '{s}'")),
        }
    }
}

/// A single planning invocation.
///
/// Locations are free text and are resolved against the catalog before the
/// segmentation engine sees them.
///
/// # Examples
/// ```
/// use mainstreet_core::{PlanningStyle, TripRequest};
///
/// let request = TripRequest::new("Chicago", "Santa Monica", 7)
///     .with_style(PlanningStyle::Heritage);
/// assert!(request.validate().is_ok());
/// ```
#[derive(Debug, Clone, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct TripRequest {
    /// Free-text name of the starting town.
    pub start_location: String,
    /// Free-text name of the destination town.
    pub end_location: String,
    /// Requested number of driving days.
    pub total_days: u16,
    /// Stop selection strategy.
    #[cfg_attr(feature = "serde", serde(default))]
    pub planning_style: PlanningStyle,
}

/// Reasons a [`TripRequest`] is rejected before planning.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum TripRequestValidationError {
    /// The start location was blank.
    #[error("start location must not be empty")]
    EmptyStart,
    /// The end location was blank.
    #[error("end location must not be empty")]
    EmptyEnd,
    /// Zero days were requested.
    #[error("trip must last at least one day")]
    ZeroDays,
    /// More days were requested than the planner supports.
    #[error("trip of {requested} days exceeds the maximum of {max}")]
    TooManyDays {
        /// Days requested.
        requested: u16,
        /// Largest accepted value.
        max: u16,
    },
    /// Start and end resolved to the same waypoint.
    #[error("start and end both resolve to '{waypoint_id}'")]
    SameEndpoints {
        /// The shared waypoint identifier.
        waypoint_id: String,
    },
}

impl TripRequest {
    /// Construct a balanced-style request.
    pub fn new(start: impl Into<String>, end: impl Into<String>, total_days: u16) -> Self {
        Self {
            start_location: start.into(),
            end_location: end.into(),
            total_days,
            planning_style: PlanningStyle::default(),
        }
    }

    /// Choose the planning style.
    #[must_use]
    pub const fn with_style(mut self, style: PlanningStyle) -> Self {
        self.planning_style = style;
        self
    }

    /// Check the request shape without consulting a catalog.
    ///
    /// # Errors
    /// Returns the first violated constraint.
    pub fn validate(&self) -> Result<(), TripRequestValidationError> {
        if self.start_location.trim().is_empty() {
            return Err(TripRequestValidationError::EmptyStart);
        }
        if self.end_location.trim().is_empty() {
            return Err(TripRequestValidationError::EmptyEnd);
        }
        if self.total_days == 0 {
            return Err(TripRequestValidationError::ZeroDays);
        }
        if self.total_days > MAX_TRIP_DAYS {
            return Err(TripRequestValidationError::TooManyDays {
                requested: self.total_days,
                max: MAX_TRIP_DAYS,
            });
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rstest::rstest;

    #[rstest]
    #[case(TripRequest::new("", "Tulsa", 2), TripRequestValidationError::EmptyStart)]
    #[case(TripRequest::new("Chicago", "  ", 2), TripRequestValidationError::EmptyEnd)]
    #[case(TripRequest::new("Chicago", "Tulsa", 0), TripRequestValidationError::ZeroDays)]
    #[case(
        TripRequest::new("Chicago", "Tulsa", 31),
        TripRequestValidationError::TooManyDays { requested: 31, max: MAX_TRIP_DAYS }
    )]
    fn rejects_malformed_requests(
        #[case] request: TripRequest,
        #[case] expected: TripRequestValidationError,
    ) {
        assert_eq!(request.validate(), Err(expected));
    }

    #[rstest]
    #[case(1)]
    #[case(MAX_TRIP_DAYS)]
    fn accepts_boundary_day_counts(#[case] days: u16) {
        assert!(TripRequest::new("Chicago", "Tulsa", days).validate().is_ok());
    }

    #[rstest]
    #[case("balanced", PlanningStyle::Balanced)]
    #[case("Even_Pacing", PlanningStyle::EvenPacing)]
    #[case(" heritage ", PlanningStyle::Heritage)]
    fn parses_styles(#[case] input: &str, #[case] expected: PlanningStyle) {
        assert_eq!(input.parse(), Ok(expected));
    }

    #[rstest]
    fn rejects_unknown_style() {
        assert!("scenic".parse::<PlanningStyle>().is_err());
    }
}
