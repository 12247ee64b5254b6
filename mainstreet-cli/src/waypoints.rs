//! `waypoints` command implementation.

use std::io::Write;

use camino::Utf8PathBuf;
use clap::Parser;
use mainstreet_core::sort_for_display;
use ortho_config::{OrthoConfig, SubcmdConfigMerge};
use serde::{Deserialize, Serialize};

use crate::catalog::{CatalogBuilder, CatalogSource, DefaultCatalogBuilder, load_waypoints};
use crate::{
    ARG_CATALOG, ARG_CATALOG_API_KEY, ARG_CATALOG_URL, CliError, ENV_WAYPOINTS_CATALOG,
    write_json,
};

/// CLI arguments for the `waypoints` subcommand.
#[derive(Debug, Clone, Parser, Deserialize, Serialize, OrthoConfig, Default)]
#[command(about = "List the catalog in route order")]
#[ortho_config(prefix = "MAINSTREET")]
pub(crate) struct WaypointsArgs {
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
}

impl WaypointsArgs {
    fn into_source(self) -> Result<CatalogSource, CliError> {
        let merged = self.load_and_merge().map_err(CliError::Configuration)?;
        CatalogSource::resolve(
            merged.catalog,
            merged.catalog_url,
            merged.catalog_api_key,
            ENV_WAYPOINTS_CATALOG,
        )
    }
}

pub(crate) fn run_waypoints(args: WaypointsArgs) -> Result<(), CliError> {
    let mut stdout = std::io::stdout().lock();
    run_waypoints_with(args, &DefaultCatalogBuilder, &mut stdout)
}

pub(crate) fn run_waypoints_with(
    args: WaypointsArgs,
    builder: &dyn CatalogBuilder,
    writer: &mut dyn Write,
) -> Result<(), CliError> {
    let source = args.into_source()?;
    let mut waypoints = load_waypoints(builder, &source)?;
    sort_for_display(&mut waypoints);
    write_json(writer, &waypoints)
}
