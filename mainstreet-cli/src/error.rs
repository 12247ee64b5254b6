//! Error types emitted by the mainstreet CLI.
//!
//! Keep this error type reasonably small, as every command helper returns
//! `Result<_, CliError>` and the workspace enables `clippy::result_large_err`.

use std::sync::Arc;

use mainstreet_core::{CatalogError, PlanningError};
use mainstreet_data::CatalogBuildError;
use thiserror::Error;

/// Errors emitted by the mainstreet CLI.
#[derive(Debug, Error)]
pub enum CliError {
    /// Provided arguments failed Clap validation.
    #[error(transparent)]
    ArgumentParsing(#[from] clap::Error),
    /// Configuration layering failed (files, env, CLI).
    #[error("failed to load configuration: {0}")]
    Configuration(#[from] Arc<ortho_config::OrthoError>),
    /// A required option is missing after configuration merging.
    #[error("missing {field} (set --{field} or {env})")]
    MissingArgument {
        /// Option name.
        field: &'static str,
        /// Environment variable that also supplies it.
        env: &'static str,
    },
    /// Both a catalog file and a catalog URL were supplied.
    #[error("set only one of --catalog and --catalog-url")]
    ConflictingCatalogSources,
    /// An option carried a value outside its accepted range.
    #[error("invalid --{field}: {reason}")]
    InvalidOption {
        /// Option name.
        field: &'static str,
        /// What was wrong with the value.
        reason: String,
    },
    /// Constructing the HTTP catalog failed.
    #[error("failed to build catalog client for {base_url:?}: {source}")]
    BuildCatalog {
        /// Configured base URL.
        base_url: String,
        /// Construction failure.
        #[source]
        source: CatalogBuildError,
    },
    /// Fetching the waypoint catalog failed.
    #[error(transparent)]
    Catalog(#[from] CatalogError),
    /// The planner rejected the trip.
    #[error(transparent)]
    Planning(#[from] PlanningError),
    /// Serializing the output failed.
    #[error("failed to serialize output: {0}")]
    SerializeOutput(#[source] serde_json::Error),
    /// Writing the output failed.
    #[error("failed to write output: {0}")]
    WriteOutput(#[source] std::io::Error),
}
