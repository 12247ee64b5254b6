//! Waypoints along the route and the lightweight references segments hold.
//!
//! A [`Waypoint`] is read-only catalog data. The planner filters, copies, and
//! annotates waypoints but never mutates them. Segments refer to their
//! endpoints through [`WaypointRef`] so a serialised plan carries no cycles.

use std::fmt;
use std::str::FromStr;

use geo::Coord;
use thiserror::Error;

/// Broad classification of a waypoint.
///
/// # Examples
/// ```
/// use mainstreet_core::WaypointCategory;
///
/// assert_eq!(WaypointCategory::HiddenGem.as_str(), "hidden-gem");
/// assert_eq!("drive-in".parse(), Ok(WaypointCategory::DriveIn));
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(rename_all = "kebab-case"))]
pub enum WaypointCategory {
    /// A town or city that anchors a day of travel.
    DestinationCity,
    /// A roadside attraction.
    Attraction,
    /// A lesser-known local stop.
    HiddenGem,
    /// A drive-in theatre.
    DriveIn,
    /// A plain point on the road.
    #[default]
    RouteWaypoint,
}

impl WaypointCategory {
    /// Return the category as a kebab-case `&str`.
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::DestinationCity => "destination-city",
            Self::Attraction => "attraction",
            Self::HiddenGem => "hidden-gem",
            Self::DriveIn => "drive-in",
            Self::RouteWaypoint => "route-waypoint",
        }
    }
}

impl fmt::Display for WaypointCategory {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for WaypointCategory {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_lowercase().replace('_', "-").as_str() {
            "destination-city" | "destination" => Ok(Self::DestinationCity),
            "attraction" => Ok(Self::Attraction),
            "hidden-gem" => Ok(Self::HiddenGem),
            "drive-in" => Ok(Self::DriveIn),
            "route-waypoint" | "waypoint" => Ok(Self::RouteWaypoint),
            _ => Err(format!("unknown waypoint category '{s}'")),
        }
    }
}

/// Errors returned by [`Waypoint::new`] and [`Waypoint::validate`].
#[derive(Debug, Clone, PartialEq, Error)]
pub enum WaypointError {
    /// The identifier was empty.
    #[error("waypoint id must not be empty")]
    EmptyId,
    /// The display name was empty.
    #[error("waypoint {id} must have a name")]
    EmptyName {
        /// Identifier of the offending waypoint.
        id: String,
    },
    /// A coordinate was NaN or infinite.
    #[error("waypoint {id} has a non-finite coordinate ({latitude}, {longitude})")]
    NonFiniteCoordinate {
        /// Identifier of the offending waypoint.
        id: String,
        /// Latitude as supplied.
        latitude: f64,
        /// Longitude as supplied.
        longitude: f64,
    },
    /// A coordinate was exactly zero, the catalog's marker for "unknown".
    #[error("waypoint {id} has a zero coordinate ({latitude}, {longitude})")]
    ZeroCoordinate {
        /// Identifier of the offending waypoint.
        id: String,
        /// Latitude as supplied.
        latitude: f64,
        /// Longitude as supplied.
        longitude: f64,
    },
    /// A coordinate fell outside the WGS84 range.
    #[error("waypoint {id} coordinate ({latitude}, {longitude}) is out of range")]
    OutOfRange {
        /// Identifier of the offending waypoint.
        id: String,
        /// Latitude as supplied.
        latitude: f64,
        /// Longitude as supplied.
        longitude: f64,
    },
}

/// A geocoded stop or point of interest on the route.
///
/// Coordinates are WGS84 degrees. `sequence_order`, when present, is the
/// catalog's authoritative position along the route.
///
/// # Examples
/// ```
/// use mainstreet_core::{Waypoint, WaypointCategory};
///
/// # fn main() -> Result<(), mainstreet_core::WaypointError> {
/// let tulsa = Waypoint::new("tulsa", "Tulsa", "OK", 36.1540, -95.9928)?
///     .with_category(WaypointCategory::DestinationCity)
///     .with_sequence_order(16)
///     .major_stop();
/// assert!(tulsa.is_major_stop);
/// assert_eq!(tulsa.location().x, -95.9928);
/// # Ok(())
/// # }
/// ```
#[derive(Debug, Clone, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct Waypoint {
    /// Stable catalog identifier.
    pub id: String,
    /// Display name.
    pub name: String,
    /// Town the waypoint belongs to, when it differs from `name`.
    #[cfg_attr(feature = "serde", serde(default))]
    pub city_name: Option<String>,
    /// Two-letter state code.
    pub state: String,
    /// Latitude in degrees.
    pub latitude: f64,
    /// Longitude in degrees.
    pub longitude: f64,
    /// Classification used for variety scoring.
    #[cfg_attr(feature = "serde", serde(default))]
    pub category: WaypointCategory,
    /// Whether the catalog marks this as a major overnight stop.
    #[cfg_attr(feature = "serde", serde(default))]
    pub is_major_stop: bool,
    /// Authoritative position along the route, if known.
    #[cfg_attr(feature = "serde", serde(default))]
    pub sequence_order: Option<i32>,
    /// Free-form description.
    #[cfg_attr(feature = "serde", serde(default))]
    pub description: Option<String>,
}

impl Waypoint {
    /// Validate and construct a plain route waypoint.
    ///
    /// # Errors
    /// Returns [`WaypointError`] when the id or name is blank or the
    /// coordinates are zero, non-finite, or out of range.
    pub fn new(
        id: impl Into<String>,
        name: impl Into<String>,
        state: impl Into<String>,
        latitude: f64,
        longitude: f64,
    ) -> Result<Self, WaypointError> {
        let waypoint = Self {
            id: id.into(),
            name: name.into(),
            city_name: None,
            state: state.into(),
            latitude,
            longitude,
            category: WaypointCategory::default(),
            is_major_stop: false,
            sequence_order: None,
            description: None,
        };
        waypoint.validate()?;
        Ok(waypoint)
    }

    /// Check identifier, name, and coordinate invariants.
    ///
    /// Deserialised waypoints bypass [`Waypoint::new`], so callers that
    /// receive catalog data should run this before trusting the record.
    ///
    /// # Errors
    /// Returns the first violated invariant.
    pub fn validate(&self) -> Result<(), WaypointError> {
        if self.id.trim().is_empty() {
            return Err(WaypointError::EmptyId);
        }
        if self.name.trim().is_empty() {
            return Err(WaypointError::EmptyName {
                id: self.id.clone(),
            });
        }
        validate_coordinates(&self.id, self.latitude, self.longitude)
    }

    /// Position as a `geo` coordinate (`x = longitude`, `y = latitude`).
    pub const fn location(&self) -> Coord<f64> {
        Coord {
            x: self.longitude,
            y: self.latitude,
        }
    }

    /// Set the category.
    #[must_use]
    pub fn with_category(mut self, category: WaypointCategory) -> Self {
        self.category = category;
        self
    }

    /// Set the town name.
    #[must_use]
    pub fn with_city_name(mut self, city_name: impl Into<String>) -> Self {
        self.city_name = Some(city_name.into());
        self
    }

    /// Set the authoritative sequence position.
    #[must_use]
    pub fn with_sequence_order(mut self, order: i32) -> Self {
        self.sequence_order = Some(order);
        self
    }

    /// Attach a description.
    #[must_use]
    pub fn with_description(mut self, description: impl Into<String>) -> Self {
        self.description = Some(description.into());
        self
    }

    /// Mark the waypoint as a major stop.
    #[must_use]
    pub fn major_stop(mut self) -> Self {
        self.is_major_stop = true;
        self
    }

    /// Name with state suffix, e.g. `"Tulsa, OK"`.
    pub fn display_name(&self) -> String {
        if self.state.is_empty() {
            self.name.clone()
        } else {
            format!("{}, {}", self.name, self.state)
        }
    }
}

/// Check that a coordinate pair is finite, non-zero, and within WGS84 bounds.
///
/// # Errors
/// Returns the matching [`WaypointError`] variant tagged with `id`.
pub fn validate_coordinates(id: &str, latitude: f64, longitude: f64) -> Result<(), WaypointError> {
    if !latitude.is_finite() || !longitude.is_finite() {
        return Err(WaypointError::NonFiniteCoordinate {
            id: id.to_owned(),
            latitude,
            longitude,
        });
    }
    if latitude == 0.0 || longitude == 0.0 {
        return Err(WaypointError::ZeroCoordinate {
            id: id.to_owned(),
            latitude,
            longitude,
        });
    }
    if !(-90.0..=90.0).contains(&latitude) || !(-180.0..=180.0).contains(&longitude) {
        return Err(WaypointError::OutOfRange {
            id: id.to_owned(),
            latitude,
            longitude,
        });
    }
    Ok(())
}

/// Acyclic reference to a segment endpoint.
#[derive(Debug, Clone, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct WaypointRef {
    /// Identifier of the referenced waypoint.
    pub id: String,
    /// Display name.
    pub name: String,
    /// Two-letter state code; empty for synthetic stops.
    pub state: String,
    /// Latitude in degrees.
    pub latitude: f64,
    /// Longitude in degrees.
    pub longitude: f64,
    /// `true` when the stop was interpolated rather than taken from the catalog.
    #[cfg_attr(feature = "serde", serde(default))]
    pub is_synthetic: bool,
}

impl WaypointRef {
    /// Reference a catalog waypoint.
    pub fn from_waypoint(waypoint: &Waypoint) -> Self {
        Self {
            id: waypoint.id.clone(),
            name: waypoint.name.clone(),
            state: waypoint.state.clone(),
            latitude: waypoint.latitude,
            longitude: waypoint.longitude,
            is_synthetic: false,
        }
    }

    /// Mark the reference as synthetic.
    #[must_use]
    pub const fn into_synthetic(mut self) -> Self {
        self.is_synthetic = true;
        self
    }

    /// Position as a `geo` coordinate.
    pub const fn location(&self) -> Coord<f64> {
        Coord {
            x: self.longitude,
            y: self.latitude,
        }
    }
}

impl From<&Waypoint> for WaypointRef {
    fn from(waypoint: &Waypoint) -> Self {
        Self::from_waypoint(waypoint)
    }
}
