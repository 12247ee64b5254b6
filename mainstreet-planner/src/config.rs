//! Tunables for [`ItineraryPlanner`](crate::ItineraryPlanner).

use mainstreet_core::{DriveTimeModel, MAX_TRIP_DAYS};

/// Configuration for the itinerary planner.
///
/// # Examples
/// ```
/// use mainstreet_planner::PlannerConfig;
///
/// let config = PlannerConfig::default()
///     .with_max_daily_drive_hours(8.0)
///     .with_rebalance(false);
/// assert_eq!(config.max_daily_drive_hours, 8.0);
/// assert!(!config.rebalance);
/// ```
#[derive(Debug, Clone, PartialEq)]
pub struct PlannerConfig {
    /// Converts leg distance into drive time.
    pub drive_model: DriveTimeModel,
    /// Hard ceiling on a single day's driving.
    pub max_daily_drive_hours: f64,
    /// Largest detour ratio an admissible candidate may add.
    pub detour_allowance: f64,
    /// Gap between consecutive candidates, as a multiple of the median gap,
    /// that is reported as a large gap.
    pub large_gap_multiple: f64,
    /// Relative deviation from the daily target at which pacing scores reach 0.
    pub pacing_tolerance: f64,
    /// Heritage score at or above which a waypoint is mandatory.
    pub heritage_threshold: u8,
    /// Detour ratio a mandatory heritage waypoint must stay below.
    pub heritage_detour_allowance: f64,
    /// Raise the day count when the request cannot be driven under the ceiling.
    pub auto_adjust_days: bool,
    /// Upper bound for automatic day adjustment.
    pub max_trip_days: u16,
    /// Multiple of the ceiling beyond which a single-day trip triggers the
    /// emergency fallback.
    pub emergency_margin: f64,
    /// Run the variance-reducing rebalancer.
    pub rebalance: bool,
    /// Maximum rebalancer passes.
    pub rebalance_iterations: usize,
}

impl Default for PlannerConfig {
    fn default() -> Self {
        Self {
            drive_model: DriveTimeModel::default(),
            max_daily_drive_hours: 10.0,
            detour_allowance: 0.30,
            large_gap_multiple: 3.0,
            pacing_tolerance: 0.30,
            heritage_threshold: 85,
            heritage_detour_allowance: 0.30,
            auto_adjust_days: true,
            max_trip_days: MAX_TRIP_DAYS,
            emergency_margin: 1.5,
            rebalance: true,
            rebalance_iterations: 3,
        }
    }
}

impl PlannerConfig {
    /// Set the drive-time model.
    #[must_use]
    pub const fn with_drive_model(mut self, model: DriveTimeModel) -> Self {
        self.drive_model = model;
        self
    }

    /// Set the daily drive-time ceiling in hours.
    #[must_use]
    pub const fn with_max_daily_drive_hours(mut self, hours: f64) -> Self {
        self.max_daily_drive_hours = hours;
        self
    }

    /// Set the admissible detour ratio.
    #[must_use]
    pub const fn with_detour_allowance(mut self, allowance: f64) -> Self {
        self.detour_allowance = allowance;
        self
    }

    /// Set the heritage threshold for mandatory stops.
    #[must_use]
    pub const fn with_heritage_threshold(mut self, threshold: u8) -> Self {
        self.heritage_threshold = threshold;
        self
    }

    /// Enable or disable automatic day adjustment.
    #[must_use]
    pub const fn with_auto_adjust_days(mut self, enabled: bool) -> Self {
        self.auto_adjust_days = enabled;
        self
    }

    /// Set the upper bound for automatic day adjustment.
    #[must_use]
    pub const fn with_max_trip_days(mut self, days: u16) -> Self {
        self.max_trip_days = days;
        self
    }

    /// Enable or disable the rebalancer.
    #[must_use]
    pub const fn with_rebalance(mut self, enabled: bool) -> Self {
        self.rebalance = enabled;
        self
    }

    /// Set the maximum number of rebalancer passes.
    #[must_use]
    pub const fn with_rebalance_iterations(mut self, iterations: usize) -> Self {
        self.rebalance_iterations = iterations;
        self
    }

    /// Ceiling clamped to a usable positive value.
    pub(crate) fn ceiling(&self) -> f64 {
        if self.max_daily_drive_hours.is_finite() && self.max_daily_drive_hours > 0.0 {
            self.max_daily_drive_hours
        } else {
            Self::default().max_daily_drive_hours
        }
    }
}
