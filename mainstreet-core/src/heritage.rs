//! Heritage weighting for waypoints.
//!
//! The `HeritageScorer` trait assigns an integer significance score in
//! `0..=100` to a [`Waypoint`](crate::Waypoint). The bundled
//! [`HeritageTable`] is a static name-keyed lookup for the historic route.

use std::collections::HashMap;

use crate::Waypoint;

/// Score given to names missing from a table.
pub const DEFAULT_HERITAGE_SCORE: u8 = 50;

/// Highest possible heritage score.
pub const MAX_HERITAGE_SCORE: u8 = 100;

/// Rate how historically significant a waypoint is.
///
/// Implementations must be deterministic and return values in `0..=100`;
/// [`HeritageScorer::sanitise`] clamps out-of-range values.
///
/// # Examples
/// ```
/// use mainstreet_core::{HeritageScorer, Waypoint};
///
/// struct Flat;
///
/// impl HeritageScorer for Flat {
///     fn score(&self, _waypoint: &Waypoint) -> u8 {
///         70
///     }
/// }
///
/// # fn main() -> Result<(), mainstreet_core::WaypointError> {
/// let tulsa = Waypoint::new("tulsa", "Tulsa", "OK", 36.1540, -95.9928)?;
/// assert_eq!(Flat.score(&tulsa), 70);
/// # Ok(())
/// # }
/// ```
pub trait HeritageScorer: Send + Sync {
    /// Return the heritage score for `waypoint`.
    fn score(&self, waypoint: &Waypoint) -> u8;

    /// Clamp a raw score into `0..=100`.
    fn sanitise(score: u8) -> u8 {
        score.min(MAX_HERITAGE_SCORE)
    }
}

/// Static lookup from lowercase waypoint name to heritage score.
///
/// Lookups try the waypoint's `name`, then its `city_name`, falling back to
/// [`DEFAULT_HERITAGE_SCORE`].
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct HeritageTable {
    scores: HashMap<String, u8>,
    fallback: u8,
}

const ROUTE_66_SCORES: &[(u8, &[&str])] = &[
    (100, &["chicago", "santa monica"]),
    (95, &["cadillac ranch"]),
    (90, &["st. louis", "amarillo", "wigwam motel"]),
    (
        88,
        &["flagstaff", "seligman", "tucumcari", "blue whale of catoosa"],
    ),
    (
        85,
        &[
            "tulsa",
            "oklahoma city",
            "albuquerque",
            "kingman",
            "oatman",
            "winslow",
            "shamrock",
        ],
    ),
    (82, &["williams", "gallup"]),
    (80, &["pontiac", "springfield", "galena", "66 drive-in"]),
    (78, &["cuba", "holbrook", "barstow", "santa rosa"]),
    (75, &["joplin", "carthage", "elk city", "clinton"]),
    (72, &["needles", "stroud"]),
    (70, &["miami"]),
];

impl Default for HeritageTable {
    fn default() -> Self {
        Self::route_66()
    }
}

impl HeritageTable {
    /// An empty table scoring every waypoint at the fallback.
    pub fn empty() -> Self {
        Self {
            scores: HashMap::new(),
            fallback: DEFAULT_HERITAGE_SCORE,
        }
    }

    /// The built-in Route 66 landmark table.
    pub fn route_66() -> Self {
        let mut table = Self::empty();
        for (score, names) in ROUTE_66_SCORES {
            for name in *names {
                table.insert(name, *score);
            }
        }
        table
    }

    /// Add or replace an entry.
    pub fn insert(&mut self, name: &str, score: u8) {
        self.scores
            .insert(normalise(name), <Self as HeritageScorer>::sanitise(score));
    }

    /// Builder form of [`HeritageTable::insert`].
    #[must_use]
    pub fn with_score(mut self, name: &str, score: u8) -> Self {
        self.insert(name, score);
        self
    }

    /// Score used for unknown names.
    #[must_use]
    pub fn with_fallback(mut self, fallback: u8) -> Self {
        self.fallback = <Self as HeritageScorer>::sanitise(fallback);
        self
    }

    /// Look up a bare name.
    pub fn lookup(&self, name: &str) -> Option<u8> {
        self.scores.get(&normalise(name)).copied()
    }
}

impl HeritageScorer for HeritageTable {
    fn score(&self, waypoint: &Waypoint) -> u8 {
        self.lookup(&waypoint.name)
            .or_else(|| waypoint.city_name.as_deref().and_then(|c| self.lookup(c)))
            .unwrap_or(self.fallback)
    }
}

fn normalise(name: &str) -> String {
    name.split_whitespace()
        .collect::<Vec<_>>()
        .join(" ")
        .to_lowercase()
}
