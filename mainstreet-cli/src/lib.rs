//! Command-line interface for the mainstreet itinerary engine.
//!
//! - `mainstreet plan <start> <end> --days N` prints a [`TripPlan`] as JSON.
//! - `mainstreet waypoints` prints the catalog in route order.
//!
//! Options layer CLI flags over `MAINSTREET_` environment variables over
//! configuration files.
//!
//! [`TripPlan`]: mainstreet_core::TripPlan
#![forbid(unsafe_code)]

use std::io::Write;

use clap::error::ErrorKind;
use clap::{Parser, Subcommand};
use serde::Serialize;

mod catalog;
mod error;
mod plan;
mod waypoints;

pub use error::CliError;

use plan::PlanArgs;
use waypoints::WaypointsArgs;

const ARG_DAYS: &str = "days";
const ARG_STYLE: &str = "style";
const ARG_CATALOG: &str = "catalog";
const ARG_CATALOG_URL: &str = "catalog-url";
const ARG_CATALOG_API_KEY: &str = "catalog-api-key";
const ARG_MAX_DAILY_HOURS: &str = "max-daily-hours";
const ARG_NO_REBALANCE: &str = "no-rebalance";
const ENV_PLAN_START: &str = "MAINSTREET_CMDS_PLAN_START";
const ENV_PLAN_END: &str = "MAINSTREET_CMDS_PLAN_END";
const ENV_PLAN_DAYS: &str = "MAINSTREET_CMDS_PLAN_DAYS";
const ENV_PLAN_CATALOG: &str = "MAINSTREET_CMDS_PLAN_CATALOG";
const ENV_WAYPOINTS_CATALOG: &str = "MAINSTREET_CMDS_WAYPOINTS_CATALOG";

/// Run the mainstreet CLI with the current process arguments and environment.
///
/// # Errors
/// Returns [`CliError`] when arguments, configuration, the catalog, or
/// planning fail.
pub fn run() -> Result<(), CliError> {
    let cli = match Cli::try_parse() {
        Ok(cli) => cli,
        Err(err) if matches!(err.kind(), ErrorKind::DisplayHelp | ErrorKind::DisplayVersion) => {
            return err.print().map_err(CliError::WriteOutput);
        }
        Err(err) => return Err(CliError::ArgumentParsing(err)),
    };
    match cli.command {
        Command::Plan(args) => plan::run_plan(args),
        Command::Waypoints(args) => waypoints::run_waypoints(args),
    }
}

#[derive(Debug, Parser)]
#[command(
    name = "mainstreet",
    about = "Plan multi-day road trips along a historic highway",
    version
)]
struct Cli {
    #[command(subcommand)]
    command: Command,
}

#[derive(Debug, Subcommand)]
enum Command {
    /// Split a trip into daily driving segments.
    Plan(PlanArgs),
    /// List the waypoint catalog in route order.
    Waypoints(WaypointsArgs),
}

fn write_json<T: Serialize + ?Sized>(writer: &mut dyn Write, value: &T) -> Result<(), CliError> {
    let payload = serde_json::to_string_pretty(value).map_err(CliError::SerializeOutput)?;
    writer
        .write_all(payload.as_bytes())
        .map_err(CliError::WriteOutput)?;
    writer.write_all(b"\n").map_err(CliError::WriteOutput)?;
    Ok(())
}

#[cfg(test)]
mod tests;
