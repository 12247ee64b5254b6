//! Catalog wire format.
//!
//! Catalog services and files deliver rows shaped like the catalog table:
//! snake_case columns, optionally camelCase when a client library has already
//! converted them. Rows are decoded leniently into [`WaypointRecord`] and
//! then validated into [`Waypoint`]s; rows that fail validation are skipped
//! and counted rather than failing the whole snapshot.

use std::fmt;

use mainstreet_core::{CatalogError, Waypoint, WaypointCategory, WaypointError};
use serde::{Deserialize, Serialize};
use thiserror::Error;

/// Catalog identifiers arrive as text or as integer primary keys.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum RecordId {
    /// Text identifier, e.g. a slug or UUID.
    Text(String),
    /// Integer primary key.
    Number(i64),
}

impl fmt::Display for RecordId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Text(text) => f.write_str(text),
            Self::Number(number) => write!(f, "{number}"),
        }
    }
}

/// One catalog row as delivered by a catalog source.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct WaypointRecord {
    /// Stable identifier.
    pub id: RecordId,
    /// Display name.
    pub name: String,
    /// Town name, when different from `name`.
    #[serde(default, alias = "cityName")]
    pub city_name: Option<String>,
    /// Two-letter state code.
    #[serde(default)]
    pub state: String,
    /// Latitude in degrees; rows without one are skipped.
    #[serde(default)]
    pub latitude: Option<f64>,
    /// Longitude in degrees; rows without one are skipped.
    #[serde(default)]
    pub longitude: Option<f64>,
    /// Category label, e.g. `destination_city`.
    #[serde(default)]
    pub category: Option<String>,
    /// Whether the row is a major overnight stop.
    #[serde(default, alias = "isMajorStop")]
    pub is_major_stop: Option<bool>,
    /// Authoritative route position.
    #[serde(default, alias = "sequenceOrder")]
    pub sequence_order: Option<i32>,
    /// Free-form description.
    #[serde(default)]
    pub description: Option<String>,
}

/// Why a catalog row was rejected.
#[derive(Debug, Clone, PartialEq, Error)]
pub enum RecordError {
    /// Latitude or longitude was absent.
    #[error("waypoint {id} has no coordinates")]
    MissingCoordinate {
        /// Identifier of the row.
        id: String,
    },
    /// The row failed domain validation.
    #[error(transparent)]
    Invalid(#[from] WaypointError),
}

impl TryFrom<WaypointRecord> for Waypoint {
    type Error = RecordError;

    fn try_from(record: WaypointRecord) -> Result<Self, Self::Error> {
        let id = record.id.to_string();
        let (Some(latitude), Some(longitude)) = (record.latitude, record.longitude) else {
            return Err(RecordError::MissingCoordinate { id });
        };
        let mut waypoint = Self::new(id, record.name.trim(), record.state.trim(), latitude, longitude)?;

        if let Some(label) = record.category.as_deref() {
            match label.parse::<WaypointCategory>() {
                Ok(category) => waypoint = waypoint.with_category(category),
                Err(reason) => log::debug!("waypoint {}: {reason}; using default", waypoint.id),
            }
        }
        if let Some(city) = record.city_name.filter(|c| !c.trim().is_empty()) {
            waypoint = waypoint.with_city_name(city.trim());
        }
        if let Some(order) = record.sequence_order {
            waypoint = waypoint.with_sequence_order(order);
        }
        if let Some(description) = record.description.filter(|d| !d.trim().is_empty()) {
            waypoint = waypoint.with_description(description);
        }
        if record.is_major_stop.unwrap_or(false) {
            waypoint = waypoint.major_stop();
        }
        Ok(waypoint)
    }
}

/// Validated waypoints plus the number of rows that were dropped.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct DecodedCatalog {
    /// Waypoints that passed validation, in source order.
    pub waypoints: Vec<Waypoint>,
    /// Rows rejected during validation.
    pub skipped: usize,
}

/// Validate catalog rows, logging and counting the ones that fail.
///
/// # Examples
/// ```
/// use mainstreet_data::{WaypointRecord, decode_records};
///
/// let rows: Vec<WaypointRecord> = serde_json::from_str(
///     r#"[
///         {"id": "tulsa", "name": "Tulsa", "state": "OK",
///          "latitude": 36.154, "longitude": -95.9928, "sequenceOrder": 16},
///         {"id": "nowhere", "name": "Nowhere", "state": "OK",
///          "latitude": 0.0, "longitude": 0.0}
///     ]"#,
/// ).unwrap();
/// let decoded = decode_records(rows);
/// assert_eq!(decoded.waypoints.len(), 1);
/// assert_eq!(decoded.skipped, 1);
/// ```
pub fn decode_records(records: Vec<WaypointRecord>) -> DecodedCatalog {
    let mut decoded = DecodedCatalog {
        waypoints: Vec::with_capacity(records.len()),
        skipped: 0,
    };
    for record in records {
        match Waypoint::try_from(record) {
            Ok(waypoint) => decoded.waypoints.push(waypoint),
            Err(err) => {
                log::warn!("skipping catalog record: {err}");
                decoded.skipped += 1;
            }
        }
    }
    if decoded.skipped > 0 {
        log::warn!(
            "skipped {} invalid catalog record(s); {} remain",
            decoded.skipped,
            decoded.waypoints.len()
        );
    }
    decoded
}

/// Decode a JSON array of catalog rows.
///
/// # Errors
/// Returns [`CatalogError::Parse`] when the payload is not an array of rows.
pub fn parse_catalog_json(payload: &[u8]) -> Result<DecodedCatalog, CatalogError> {
    let records: Vec<WaypointRecord> =
        serde_json::from_slice(payload).map_err(|err| CatalogError::Parse {
            message: err.to_string(),
        })?;
    Ok(decode_records(records))
}
