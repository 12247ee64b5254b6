//! Structured, non-fatal diagnostics attached to a [`TripPlan`](crate::TripPlan).

use std::fmt;

/// Which ordering rule a selected or admissible waypoint broke.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(rename_all = "kebab-case"))]
pub enum SequenceViolationKind {
    /// A later stop sits at or behind an earlier one.
    Backtracking,
    /// A stop's detour ratio exceeds the admissibility threshold.
    Overshoot,
    /// Consecutive candidates are unusually far apart.
    LargeGap,
    /// Two waypoints share a `sequence_order` value.
    DuplicateSequenceOrder,
}

impl SequenceViolationKind {
    /// Return the kind as a kebab-case `&str`.
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Backtracking => "backtracking",
            Self::Overshoot => "overshoot",
            Self::LargeGap => "large-gap",
            Self::DuplicateSequenceOrder => "duplicate-sequence-order",
        }
    }
}

impl fmt::Display for SequenceViolationKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// A warning surfaced to the caller alongside the plan.
///
/// None of these prevent a plan from being produced.
#[derive(Debug, Clone, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(tag = "type", rename_all = "kebab-case"))]
pub enum PlanWarning {
    /// Ordering diagnostic from the sequence enforcer.
    SequenceViolation {
        /// Which rule was broken.
        kind: SequenceViolationKind,
        /// Waypoints involved, in catalog order.
        waypoint_ids: Vec<String>,
        /// Human-readable explanation.
        detail: String,
    },
    /// A day's reported drive time was capped at the ceiling.
    DriveTimeCapped {
        /// 1-based day number.
        day: u16,
        /// Great-circle length of the leg.
        distance_miles: f64,
        /// Uncapped drive-time estimate.
        estimated_hours: f64,
        /// The ceiling applied.
        capped_hours: f64,
    },
    /// Interpolated stops were synthesised to reach the day count.
    EmergencyFallbackApplied {
        /// Number of synthetic stops inserted.
        synthetic_stops: usize,
        /// Why the fallback ran.
        reason: String,
    },
    /// The day count was raised to keep each day drivable.
    TripLengthAdjusted {
        /// Days the caller asked for.
        requested_days: u16,
        /// Days actually planned.
        adjusted_days: u16,
        /// Estimated driving hours for the whole route.
        estimated_hours: f64,
    },
    /// A day exceeds the ceiling and could be split by adding a day.
    InfeasibleTrip {
        /// 1-based day number of the long leg.
        day: u16,
        /// Waypoint that would split the leg into two drivable days.
        split_candidate_id: String,
        /// Drive-time estimate of the leg.
        estimated_hours: f64,
    },
    /// The rebalancer moved one or more overnight stops.
    RebalanceApplied {
        /// Number of swaps applied.
        swaps: usize,
        /// Drive-time variance before rebalancing.
        variance_before: f64,
        /// Drive-time variance after rebalancing.
        variance_after: f64,
    },
    /// The rebalancer found no improving move.
    RebalanceSkipped {
        /// Why nothing changed.
        reason: String,
    },
}

impl PlanWarning {
    /// Short machine-readable tag matching the serialised `type` field.
    pub const fn kind(&self) -> &'static str {
        match self {
            Self::SequenceViolation { .. } => "sequence-violation",
            Self::DriveTimeCapped { .. } => "drive-time-capped",
            Self::EmergencyFallbackApplied { .. } => "emergency-fallback-applied",
            Self::TripLengthAdjusted { .. } => "trip-length-adjusted",
            Self::InfeasibleTrip { .. } => "infeasible-trip",
            Self::RebalanceApplied { .. } => "rebalance-applied",
            Self::RebalanceSkipped { .. } => "rebalance-skipped",
        }
    }
}

impl fmt::Display for PlanWarning {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::SequenceViolation { kind, detail, .. } => write!(f, "{kind}: {detail}"),
            Self::DriveTimeCapped {
                day,
                distance_miles,
                capped_hours,
                ..
            } => write!(
                f,
                "day {day}: drive time capped at {capped_hours}h for a {distance_miles:.0}mi leg"
            ),
            Self::EmergencyFallbackApplied {
                synthetic_stops,
                reason,
            } => write!(f, "{synthetic_stops} synthetic stop(s) inserted: {reason}"),
            Self::TripLengthAdjusted {
                requested_days,
                adjusted_days,
                estimated_hours,
            } => write!(
                f,
                "trip lengthened from {requested_days} to {adjusted_days} days \
                 ({estimated_hours:.1}h of driving)"
            ),
            Self::InfeasibleTrip {
                day,
                split_candidate_id,
                estimated_hours,
            } => write!(
                f,
                "day {day} needs {estimated_hours:.1}h; adding a day at \
                 '{split_candidate_id}' would make it drivable"
            ),
            Self::RebalanceApplied {
                swaps,
                variance_before,
                variance_after,
            } => write!(
                f,
                "rebalanced {swaps} stop(s); variance {variance_before:.2} -> {variance_after:.2}"
            ),
            Self::RebalanceSkipped { reason } => write!(f, "rebalance skipped: {reason}"),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rstest::rstest;

    #[cfg(feature = "serde")]
    #[rstest]
    fn kind_matches_serialised_tag() {
        let warning = PlanWarning::RebalanceSkipped {
            reason: "no improving swap".into(),
        };
        let json = serde_json::to_value(&warning).unwrap();
        assert_eq!(json["type"], warning.kind());
        assert_eq!(json["reason"], "no improving swap");
    }

    #[cfg(feature = "serde")]
    #[rstest]
    fn sequence_violation_serialises_kind_in_kebab_case() {
        let warning = PlanWarning::SequenceViolation {
            kind: SequenceViolationKind::DuplicateSequenceOrder,
            waypoint_ids: vec!["a".into(), "b".into()],
            detail: "share order 4".into(),
        };
        let json = serde_json::to_value(&warning).unwrap();
        assert_eq!(json["kind"], "duplicate-sequence-order");
        assert_eq!(json["waypoint_ids"][1], "b");
    }

    #[rstest]
    fn display_mentions_days() {
        let warning = PlanWarning::TripLengthAdjusted {
            requested_days: 1,
            adjusted_days: 4,
            estimated_hours: 36.5,
        };
        assert_eq!(
            warning.to_string(),
            "trip lengthened from 1 to 4 days (36.5h of driving)"
        );
    }
}
