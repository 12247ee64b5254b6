//! Turn an ordered stop list into daily segments.

use mainstreet_core::{
    DailySegment, DriveTimeModel, PlanningError, WaypointRef, haversine_miles,
    validate_coordinates,
};

/// Reject a stop whose coordinates cannot produce a meaningful leg.
///
/// # Errors
/// Returns [`PlanningError::DataIntegrity`] naming the waypoint.
pub fn check_integrity(stop: &WaypointRef) -> Result<(), PlanningError> {
    validate_coordinates(&stop.id, stop.latitude, stop.longitude).map_err(|err| {
        PlanningError::DataIntegrity {
            waypoint_id: stop.id.clone(),
            reason: err.to_string(),
        }
    })
}

/// Build one segment between two stops.
pub fn build_segment(
    day: u16,
    start: &WaypointRef,
    end: &WaypointRef,
    model: &DriveTimeModel,
) -> DailySegment {
    let distance = haversine_miles(start.location(), end.location());
    DailySegment::new(day, start.clone(), end.clone(), distance, model.hours(distance))
}

/// Build segments for `[start, ..., end]`, numbering days from 1.
///
/// No warnings are attached; capping is the repair cascade's job.
///
/// # Errors
/// Returns [`PlanningError::DataIntegrity`] if any stop has invalid
/// coordinates.
pub fn build_segments(
    stops: &[WaypointRef],
    model: &DriveTimeModel,
) -> Result<Vec<DailySegment>, PlanningError> {
    stops.iter().try_for_each(check_integrity)?;
    Ok(stops
        .windows(2)
        .zip(1_u16..)
        .filter_map(|(pair, day)| match pair {
            [start, end] => Some(build_segment(day, start, end, model)),
            _ => None,
        })
        .collect())
}

#[cfg(test)]
mod tests {
    use super::*;
    use mainstreet_core::DriveCategory;
    use mainstreet_core::test_support::route_66_waypoint;
    use rstest::rstest;

    fn stop(id: &str) -> WaypointRef {
        WaypointRef::from(&route_66_waypoint(id).unwrap())
    }

    #[rstest]
    fn builds_contiguous_numbered_days() {
        let stops = [stop("chicago"), stop("st-louis"), stop("tulsa")];
        let segments = build_segments(&stops, &DriveTimeModel::default()).unwrap();
        assert_eq!(segments.len(), 2);
        assert_eq!(segments[0].day, 1);
        assert_eq!(segments[1].day, 2);
        assert_eq!(segments[0].end, segments[1].start);
        assert!(segments.iter().all(|s| s.warning.is_none()));
    }

    #[rstest]
    fn derives_distance_time_and_category() {
        let stops = [stop("chicago"), stop("st-louis")];
        let segments = build_segments(&stops, &DriveTimeModel::default()).unwrap();
        let day = &segments[0];
        assert!((240.0..320.0).contains(&day.distance_miles));
        assert!((day.drive_time_hours - day.distance_miles / 55.0).abs() < 1e-9);
        assert_eq!(day.category, DriveCategory::Moderate);
    }

    #[rstest]
    fn rejects_corrupt_coordinates() {
        let mut broken = stop("tulsa");
        broken.latitude = 0.0;
        let err = build_segments(&[stop("chicago"), broken], &DriveTimeModel::default())
            .unwrap_err();
        assert!(matches!(
            err,
            PlanningError::DataIntegrity { ref waypoint_id, .. } if waypoint_id == "tulsa"
        ));
    }

    #[rstest]
    fn single_stop_yields_no_segments() {
        let segments = build_segments(&[stop("chicago")], &DriveTimeModel::default()).unwrap();
        assert!(segments.is_empty());
    }
}
