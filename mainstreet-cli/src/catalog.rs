//! Catalog source selection shared by the `plan` and `waypoints` commands.

use camino::Utf8PathBuf;
use mainstreet_core::{Waypoint, WaypointCatalog};
use mainstreet_data::{HttpCatalogConfig, HttpWaypointCatalog, JsonFileCatalog};

use crate::{ARG_CATALOG, CliError};

/// Where the waypoint catalog comes from.
#[derive(Debug, Clone, PartialEq, Eq)]
pub(crate) enum CatalogSource {
    /// A JSON file of catalog rows.
    File(Utf8PathBuf),
    /// A catalog service.
    Http {
        /// Service base URL.
        base_url: String,
        /// Optional API key.
        api_key: Option<String>,
    },
}

impl CatalogSource {
    /// Pick exactly one source from the merged options.
    pub(crate) fn resolve(
        path: Option<Utf8PathBuf>,
        url: Option<String>,
        api_key: Option<String>,
        env: &'static str,
    ) -> Result<Self, CliError> {
        match (path, url) {
            (Some(_), Some(_)) => Err(CliError::ConflictingCatalogSources),
            (Some(file), None) => Ok(Self::File(file)),
            (None, Some(base_url)) => Ok(Self::Http { base_url, api_key }),
            (None, None) => Err(CliError::MissingArgument {
                field: ARG_CATALOG,
                env,
            }),
        }
    }
}

/// Builds the catalog for the current invocation.
pub(crate) trait CatalogBuilder {
    fn build(&self, source: &CatalogSource) -> Result<Box<dyn WaypointCatalog>, CliError>;
}

/// Builds file and HTTP catalogs from `mainstreet-data`.
pub(crate) struct DefaultCatalogBuilder;

impl CatalogBuilder for DefaultCatalogBuilder {
    fn build(&self, source: &CatalogSource) -> Result<Box<dyn WaypointCatalog>, CliError> {
        match source {
            CatalogSource::File(path) => Ok(Box::new(JsonFileCatalog::new(path.clone()))),
            CatalogSource::Http { base_url, api_key } => {
                let mut config = HttpCatalogConfig::new(base_url.clone());
                if let Some(key) = api_key {
                    config = config.with_api_key(key.clone());
                }
                let catalog = HttpWaypointCatalog::with_config(config).map_err(|source| {
                    CliError::BuildCatalog {
                        base_url: base_url.clone(),
                        source,
                    }
                })?;
                Ok(Box::new(catalog))
            }
        }
    }
}

/// Build the catalog and take one snapshot of it.
pub(crate) fn load_waypoints(
    builder: &dyn CatalogBuilder,
    source: &CatalogSource,
) -> Result<Vec<Waypoint>, CliError> {
    let catalog = builder.build(source)?;
    let waypoints = catalog.fetch_all()?;
    log::debug!("catalog snapshot holds {} waypoint(s)", waypoints.len());
    Ok(waypoints)
}
