//! Match free-text start and end locations against the catalog.
//!
//! Matching runs in stages and stops at the first stage that finds anything:
//! exact name, then `"City, ST"` within the named state, then substring,
//! then fuzzy. Ties prefer destination cities, then major stops, then the
//! earliest sequence position, then the id.

#![expect(
    clippy::float_arithmetic,
    reason = "similarity scores are floating-point ratios"
)]

use std::cmp::Ordering;

use mainstreet_core::{EndpointRole, PlanningError, Waypoint, WaypointCategory};

use crate::count_to_f64;

/// Similarity a fuzzy match must reach.
pub const FUZZY_THRESHOLD: f64 = 0.8;
/// Similarity a name must reach to be offered as a suggestion.
pub const SUGGESTION_THRESHOLD: f64 = 0.4;
/// Most suggestions attached to [`PlanningError::CityNotFound`].
pub const MAX_SUGGESTIONS: usize = 3;

/// Lowercase, strip punctuation, and collapse whitespace.
///
/// ```
/// use mainstreet_planner::normalise_location;
///
/// assert_eq!(normalise_location("  St. Louis,  MO "), "st louis mo");
/// ```
pub fn normalise_location(text: &str) -> String {
    text.chars()
        .map(|c| {
            if c.is_alphanumeric() {
                c.to_ascii_lowercase()
            } else if c.is_whitespace() || c == '-' || c == ',' || c == '/' {
                ' '
            } else {
                '\0'
            }
        })
        .filter(|c| *c != '\0')
        .collect::<String>()
        .split_whitespace()
        .collect::<Vec<_>>()
        .join(" ")
}

/// Levenshtein similarity in `[0, 1]`, where 1 means identical.
pub fn similarity(a: &str, b: &str) -> f64 {
    let left: Vec<char> = a.chars().collect();
    let right: Vec<char> = b.chars().collect();
    let longest = left.len().max(right.len());
    if longest == 0 {
        return 1.0;
    }
    let mut previous: Vec<usize> = (0..=right.len()).collect();
    for (i, ca) in left.iter().enumerate() {
        let mut current = Vec::with_capacity(right.len() + 1);
        current.push(i + 1);
        for (j, cb) in right.iter().enumerate() {
            let diagonal = previous.get(j).copied().unwrap_or(usize::MAX - 1);
            let above = previous.get(j + 1).copied().unwrap_or(usize::MAX - 1);
            let beside = current.last().copied().unwrap_or(usize::MAX - 1);
            let cost = (diagonal + usize::from(ca != cb)).min(above + 1).min(beside + 1);
            current.push(cost);
        }
        previous = current;
    }
    let distance = previous.last().copied().unwrap_or(longest);
    1.0 - count_to_f64(distance) / count_to_f64(longest)
}

fn keys(waypoint: &Waypoint) -> Vec<String> {
    let mut keys = vec![
        normalise_location(&waypoint.name),
        normalise_location(&waypoint.display_name()),
        normalise_location(&waypoint.id),
    ];
    if let Some(city) = &waypoint.city_name {
        keys.push(normalise_location(city));
        keys.push(normalise_location(&format!("{city}, {}", waypoint.state)));
    }
    keys.retain(|k| !k.is_empty());
    keys.dedup();
    keys
}

fn name_keys(waypoint: &Waypoint) -> impl Iterator<Item = String> + '_ {
    std::iter::once(normalise_location(&waypoint.name))
        .chain(waypoint.city_name.as_deref().map(normalise_location))
}

fn best_similarity(query: &str, waypoint: &Waypoint) -> f64 {
    keys(waypoint)
        .iter()
        .map(|k| similarity(query, k))
        .fold(0.0, f64::max)
}

fn preference(a: &Waypoint, b: &Waypoint) -> Ordering {
    let destination = |w: &Waypoint| w.category != WaypointCategory::DestinationCity;
    destination(a)
        .cmp(&destination(b))
        .then_with(|| (!a.is_major_stop).cmp(&!b.is_major_stop))
        .then_with(|| match (a.sequence_order, b.sequence_order) {
            (Some(x), Some(y)) => x.cmp(&y),
            (Some(_), None) => Ordering::Less,
            (None, Some(_)) => Ordering::Greater,
            (None, None) => Ordering::Equal,
        })
        .then_with(|| a.id.cmp(&b.id))
}

fn preferred<'w>(matches: impl Iterator<Item = &'w Waypoint>) -> Option<&'w Waypoint> {
    matches.min_by(|a, b| preference(a, b))
}

/// Split `"City, ST"` into the city text and a two-letter state code.
fn split_state(query: &str) -> Option<(&str, &str)> {
    let (city, raw_state) = query.rsplit_once(',')?;
    let state = raw_state.trim();
    (state.len() == 2 && state.chars().all(|c| c.is_ascii_alphabetic()))
        .then_some((city.trim(), state))
}

/// Best catalog match for `query`, if any stage finds one.
pub fn find_endpoint<'w>(query: &str, waypoints: &'w [Waypoint]) -> Option<&'w Waypoint> {
    let normalised = normalise_location(query);
    if normalised.is_empty() {
        return None;
    }

    if let Some(found) = preferred(
        waypoints
            .iter()
            .filter(|w| keys(w).iter().any(|k| *k == normalised)),
    ) {
        return Some(found);
    }

    if let Some((raw_city, state)) = split_state(query) {
        let city = normalise_location(raw_city);
        let in_state: Vec<&Waypoint> = waypoints
            .iter()
            .filter(|w| w.state.eq_ignore_ascii_case(state))
            .collect();
        if let Some(found) = preferred(
            in_state
                .iter()
                .copied()
                .filter(|w| name_keys(w).any(|k| k == city)),
        ) {
            return Some(found);
        }
        if !city.is_empty()
            && let Some(found) = preferred(
                in_state
                    .iter()
                    .copied()
                    .filter(|w| name_keys(w).any(|k| k.contains(&city))),
            )
        {
            return Some(found);
        }
    }

    if let Some(found) = preferred(
        waypoints
            .iter()
            .filter(|w| keys(w).iter().any(|k| k.contains(&normalised))),
    ) {
        return Some(found);
    }

    waypoints
        .iter()
        .map(|w| (w, best_similarity(&normalised, w)))
        .filter(|(_, score)| *score >= FUZZY_THRESHOLD)
        .min_by(|(a, sa), (b, sb)| sb.total_cmp(sa).then_with(|| preference(a, b)))
        .map(|(w, _)| w)
}

/// Up to [`MAX_SUGGESTIONS`] display names that resemble `query`.
pub fn suggestions(query: &str, waypoints: &[Waypoint]) -> Vec<String> {
    let normalised = normalise_location(query);
    let mut scored: Vec<(&Waypoint, f64)> = waypoints
        .iter()
        .map(|w| (w, best_similarity(&normalised, w)))
        .filter(|(_, score)| *score >= SUGGESTION_THRESHOLD)
        .collect();
    scored.sort_by(|(a, sa), (b, sb)| sb.total_cmp(sa).then_with(|| preference(a, b)));

    let mut names: Vec<String> = Vec::with_capacity(MAX_SUGGESTIONS);
    for (waypoint, _) in scored {
        let name = waypoint.display_name();
        if !names.contains(&name) {
            names.push(name);
        }
        if names.len() == MAX_SUGGESTIONS {
            break;
        }
    }
    names
}

/// Resolve one endpoint of a request.
///
/// # Errors
/// Returns [`PlanningError::CityNotFound`] with suggestions when no stage
/// matches.
pub fn resolve_endpoint<'w>(
    query: &str,
    role: EndpointRole,
    waypoints: &'w [Waypoint],
) -> Result<&'w Waypoint, PlanningError> {
    if let Some(found) = find_endpoint(query, waypoints) {
        log::debug!("{role} location '{query}' resolved to {}", found.id);
        return Ok(found);
    }
    Err(PlanningError::CityNotFound {
        role,
        query: query.to_owned(),
        suggestions: suggestions(query, waypoints),
    })
}
