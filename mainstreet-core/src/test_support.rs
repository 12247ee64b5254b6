//! Test-only catalog and fixtures shared by unit and behaviour tests.

use crate::{CatalogError, Waypoint, WaypointCatalog, WaypointCategory};
use WaypointCategory::{Attraction, DestinationCity, DriveIn, HiddenGem, RouteWaypoint};

/// In-memory `WaypointCatalog` used in tests.
///
/// Returns a clone of its contents on every fetch.
#[derive(Default, Debug, Clone)]
pub struct MemoryCatalog {
    waypoints: Vec<Waypoint>,
}

impl MemoryCatalog {
    /// Create a catalog from a collection of waypoints.
    pub fn with_waypoints<I>(waypoints: I) -> Self
    where
        I: IntoIterator<Item = Waypoint>,
    {
        Self {
            waypoints: waypoints.into_iter().collect(),
        }
    }

    /// The Route 66 fixture catalog.
    pub fn route_66() -> Self {
        Self::with_waypoints(route_66_waypoints())
    }
}

impl WaypointCatalog for MemoryCatalog {
    fn fetch_all(&self) -> Result<Vec<Waypoint>, CatalogError> {
        Ok(self.waypoints.clone())
    }
}

type Row = (
    &'static str,
    &'static str,
    &'static str,
    f64,
    f64,
    WaypointCategory,
    bool,
    Option<i32>,
);

const ROUTE_66: &[Row] = &[
    ("chicago", "Chicago", "IL", 41.8781, -87.6298, DestinationCity, true, Some(1)),
    ("joliet", "Joliet", "IL", 41.5250, -88.0817, RouteWaypoint, false, Some(2)),
    ("pontiac", "Pontiac", "IL", 40.8809, -88.6298, Attraction, false, Some(3)),
    ("bloomington", "Bloomington", "IL", 40.4842, -88.9937, RouteWaypoint, false, Some(4)),
    ("springfield-il", "Springfield", "IL", 39.7817, -89.6501, DestinationCity, true, Some(5)),
    ("litchfield", "Litchfield", "IL", 39.1753, -89.6542, DriveIn, false, Some(6)),
    ("st-louis", "St. Louis", "MO", 38.6270, -90.1994, DestinationCity, true, Some(7)),
    ("cuba", "Cuba", "MO", 38.0628, -91.4035, HiddenGem, false, Some(8)),
    ("rolla", "Rolla", "MO", 37.9514, -91.7713, RouteWaypoint, false, Some(9)),
    ("lebanon", "Lebanon", "MO", 37.6806, -92.6638, RouteWaypoint, false, Some(10)),
    ("springfield-mo", "Springfield", "MO", 37.2090, -93.2923, DestinationCity, true, Some(11)),
    ("carthage", "Carthage", "MO", 37.1765, -94.3102, DriveIn, false, Some(12)),
    ("joplin", "Joplin", "MO", 37.0842, -94.5133, DestinationCity, false, Some(13)),
    ("galena", "Galena", "KS", 37.0759, -94.6394, HiddenGem, false, Some(14)),
    ("miami", "Miami", "OK", 36.8745, -94.8775, RouteWaypoint, false, Some(15)),
    ("tulsa", "Tulsa", "OK", 36.1540, -95.9928, DestinationCity, true, Some(16)),
    ("stroud", "Stroud", "OK", 35.7487, -96.6586, HiddenGem, false, Some(17)),
    ("okc", "Oklahoma City", "OK", 35.4676, -97.5164, DestinationCity, true, Some(18)),
    ("clinton", "Clinton", "OK", 35.5159, -98.9673, Attraction, false, Some(19)),
    ("elk-city", "Elk City", "OK", 35.4120, -99.4043, RouteWaypoint, false, Some(20)),
    ("shamrock", "Shamrock", "TX", 35.2143, -100.2490, HiddenGem, false, Some(21)),
    ("amarillo", "Amarillo", "TX", 35.2220, -101.8313, DestinationCity, true, Some(22)),
    ("tucumcari", "Tucumcari", "NM", 35.1717, -103.7250, HiddenGem, false, Some(23)),
    ("santa-rosa", "Santa Rosa", "NM", 34.9387, -104.6825, RouteWaypoint, false, Some(24)),
    ("albuquerque", "Albuquerque", "NM", 35.0844, -106.6504, DestinationCity, true, Some(25)),
    ("grants", "Grants", "NM", 35.1473, -107.8514, RouteWaypoint, false, Some(26)),
    ("gallup", "Gallup", "NM", 35.5281, -108.7426, DestinationCity, false, Some(27)),
    ("holbrook", "Holbrook", "AZ", 34.9022, -110.1582, RouteWaypoint, false, Some(28)),
    ("winslow", "Winslow", "AZ", 35.0242, -110.6974, Attraction, false, Some(29)),
    ("flagstaff", "Flagstaff", "AZ", 35.1983, -111.6513, DestinationCity, true, Some(30)),
    ("williams", "Williams", "AZ", 35.2495, -112.1910, RouteWaypoint, false, Some(31)),
    ("seligman", "Seligman", "AZ", 35.3256, -112.8738, HiddenGem, false, Some(32)),
    ("kingman", "Kingman", "AZ", 35.1894, -114.0530, DestinationCity, true, Some(33)),
    ("oatman", "Oatman", "AZ", 35.0264, -114.3839, HiddenGem, false, Some(34)),
    ("needles", "Needles", "CA", 34.8481, -114.6141, RouteWaypoint, false, Some(35)),
    ("barstow", "Barstow", "CA", 34.8958, -117.0173, DestinationCity, true, Some(36)),
    ("victorville", "Victorville", "CA", 34.5362, -117.2928, RouteWaypoint, false, Some(37)),
    ("san-bernardino", "San Bernardino", "CA", 34.1083, -117.2898, RouteWaypoint, false, Some(38)),
    ("pasadena", "Pasadena", "CA", 34.1478, -118.1445, RouteWaypoint, false, Some(39)),
    ("santa-monica", "Santa Monica", "CA", 34.0089, -118.4973, DestinationCity, true, Some(40)),
    ("blue-whale", "Blue Whale of Catoosa", "OK", 36.1895, -95.7458, Attraction, false, None),
    ("cadillac-ranch", "Cadillac Ranch", "TX", 35.1872, -101.9871, Attraction, false, None),
    ("wigwam", "Wigwam Motel", "AZ", 34.9058, -110.1587, Attraction, false, None),
    ("66-drive-in", "66 Drive-In", "MO", 37.1626, -94.2880, DriveIn, false, None),
];

/// Forty sequenced Route 66 towns from Chicago to Santa Monica plus four
/// unsequenced roadside attractions.
pub fn route_66_waypoints() -> Vec<Waypoint> {
    ROUTE_66
        .iter()
        .map(|&(id, name, state, lat, lon, category, major, order)| {
            Waypoint {
                id: id.to_owned(),
                name: name.to_owned(),
                city_name: None,
                state: state.to_owned(),
                latitude: lat,
                longitude: lon,
                category,
                is_major_stop: major,
                sequence_order: order,
                description: None,
            }
        })
        .collect()
}

/// Look up a fixture waypoint by id.
pub fn route_66_waypoint(id: &str) -> Option<Waypoint> {
    route_66_waypoints().into_iter().find(|w| w.id == id)
}
