//! `plan` command implementation.

use std::io::Write;

use camino::Utf8PathBuf;
use clap::Parser;
use mainstreet_core::{MAX_TRIP_DAYS, PlanningStyle, TripPlan, TripPlanner, TripRequest};
use mainstreet_planner::{ItineraryPlanner, PlannerConfig};
use ortho_config::{OrthoConfig, SubcmdConfigMerge};
use serde::{Deserialize, Serialize};

use crate::catalog::{CatalogBuilder, CatalogSource, DefaultCatalogBuilder, load_waypoints};
use crate::{
    ARG_CATALOG, ARG_CATALOG_API_KEY, ARG_CATALOG_URL, ARG_DAYS, ARG_MAX_DAILY_HOURS,
    ARG_NO_REBALANCE, ARG_STYLE, CliError, ENV_PLAN_CATALOG, ENV_PLAN_DAYS, ENV_PLAN_END,
    ENV_PLAN_START, write_json,
};

/// Longest daily drive the CLI accepts.
const MAX_DAILY_HOURS_LIMIT: f64 = 24.0;

/// CLI arguments for the `plan` subcommand.
#[derive(Debug, Clone, Parser, Deserialize, Serialize, OrthoConfig, Default)]
#[command(
    long_about = "Split a road trip along the historic route into daily \
                 driving segments. The waypoint catalog comes from a JSON \
                 file or a catalog service; options can also be set through \
                 configuration files or MAINSTREET_ environment variables.",
    about = "Plan a multi-day trip between two places"
)]
#[ortho_config(prefix = "MAINSTREET")]
pub(crate) struct PlanArgs {
    /// Where the trip starts, e.g. "Chicago, IL".
    #[arg(value_name = "start")]
    #[serde(default)]
    pub(crate) start: Option<String>,
    /// Where the trip ends, e.g. "Santa Monica".
    #[arg(value_name = "end")]
    #[serde(default)]
    pub(crate) end: Option<String>,
    /// Number of travel days.
    #[arg(long = ARG_DAYS, value_name = "n")]
    #[serde(default)]
    pub(crate) days: Option<u16>,
    /// Stop selection strategy: balanced, even-pacing, or heritage.
    #[arg(long = ARG_STYLE, value_name = "style")]
    #[serde(default)]
    pub(crate) style: Option<PlanningStyle>,
    /// Path to a JSON catalog file.
    #[arg(long = ARG_CATALOG, value_name = "path")]
    #[serde(default)]
    pub(crate) catalog: Option<Utf8PathBuf>,
    /// Base URL of a catalog service.
    #[arg(long = ARG_CATALOG_URL, value_name = "url")]
    #[serde(default)]
    pub(crate) catalog_url: Option<String>,
    /// API key for the catalog service.
    #[arg(long = ARG_CATALOG_API_KEY, value_name = "key")]
    #[serde(default)]
    pub(crate) catalog_api_key: Option<String>,
    /// Daily drive-time ceiling in hours.
    #[arg(long = ARG_MAX_DAILY_HOURS, value_name = "hours")]
    #[serde(default)]
    pub(crate) max_daily_hours: Option<f64>,
    /// Skip the drive-time rebalancing pass.
    #[arg(
        long = ARG_NO_REBALANCE,
        num_args = 0..=1,
        require_equals = true,
        default_missing_value = "true"
    )]
    #[serde(default)]
    pub(crate) no_rebalance: Option<bool>,
}

impl PlanArgs {
    pub(crate) fn into_config(self) -> Result<PlanConfig, CliError> {
        let merged = self.load_and_merge().map_err(CliError::Configuration)?;
        PlanConfig::try_from(merged)
    }
}

/// Resolved `plan` command configuration.
#[derive(Debug, Clone, PartialEq)]
pub(crate) struct PlanConfig {
    pub(crate) request: TripRequest,
    pub(crate) source: CatalogSource,
    pub(crate) planner: PlannerConfig,
}

impl TryFrom<PlanArgs> for PlanConfig {
    type Error = CliError;

    fn try_from(args: PlanArgs) -> Result<Self, Self::Error> {
        let start = args.start.ok_or(CliError::MissingArgument {
            field: "start",
            env: ENV_PLAN_START,
        })?;
        let end = args.end.ok_or(CliError::MissingArgument {
            field: "end",
            env: ENV_PLAN_END,
        })?;
        let days = args.days.ok_or(CliError::MissingArgument {
            field: ARG_DAYS,
            env: ENV_PLAN_DAYS,
        })?;
        if days == 0 || days > MAX_TRIP_DAYS {
            return Err(CliError::InvalidOption {
                field: ARG_DAYS,
                reason: format!("expected 1 to {MAX_TRIP_DAYS} days, got {days}"),
            });
        }

        let mut planner = PlannerConfig::default();
        if let Some(hours) = args.max_daily_hours {
            if !(hours.is_finite() && hours > 0.0 && hours <= MAX_DAILY_HOURS_LIMIT) {
                return Err(CliError::InvalidOption {
                    field: ARG_MAX_DAILY_HOURS,
                    reason: format!("expected hours in (0, {MAX_DAILY_HOURS_LIMIT}], got {hours}"),
                });
            }
            planner = planner.with_max_daily_drive_hours(hours);
        }
        if args.no_rebalance.unwrap_or(false) {
            planner = planner.with_rebalance(false);
        }

        let source = CatalogSource::resolve(
            args.catalog,
            args.catalog_url,
            args.catalog_api_key,
            ENV_PLAN_CATALOG,
        )?;
        let request = TripRequest::new(start, end, days).with_style(args.style.unwrap_or_default());
        Ok(Self {
            request,
            source,
            planner,
        })
    }
}

pub(crate) fn run_plan(args: PlanArgs) -> Result<(), CliError> {
    let mut stdout = std::io::stdout().lock();
    run_plan_with(args, &DefaultCatalogBuilder, &mut stdout)
}

pub(crate) fn run_plan_with(
    args: PlanArgs,
    builder: &dyn CatalogBuilder,
    writer: &mut dyn Write,
) -> Result<(), CliError> {
    let config = args.into_config()?;
    let plan = execute_plan(&config, builder)?;
    write_json(writer, &plan)
}

fn execute_plan(config: &PlanConfig, builder: &dyn CatalogBuilder) -> Result<TripPlan, CliError> {
    let waypoints = load_waypoints(builder, &config.source)?;
    let planner = ItineraryPlanner::new().with_config(config.planner.clone());
    let plan = planner.plan(&config.request, &waypoints)?;
    for warning in &plan.warnings {
        log::info!("{warning}");
    }
    Ok(plan)
}

#[cfg(test)]
pub(crate) fn config_from_layers_for_test(
    layers: Vec<ortho_config::MergeLayer<'static>>,
) -> Result<PlanConfig, CliError> {
    let merged = PlanArgs::merge_from_layers(layers).map_err(CliError::from)?;
    PlanConfig::try_from(merged)
}
