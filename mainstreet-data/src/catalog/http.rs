//! HTTP-backed [`WaypointCatalog`].
//!
//! [`HttpWaypointCatalog`] fetches the full catalog table from a REST
//! endpoint (for example a PostgREST-style `/rest/v1/route66_waypoints`)
//! and decodes it through the catalog wire format.
//!
//! The [`WaypointCatalog`] trait is synchronous so the planner stays
//! embeddable in synchronous callers. The catalog bridges to async `reqwest`
//! by blocking on a Tokio runtime it owns.
//!
//! # Example
//!
//! ```no_run
//! use std::time::Duration;
//! use mainstreet_core::WaypointCatalog;
//! use mainstreet_data::{HttpCatalogConfig, HttpWaypointCatalog};
//!
//! let config = HttpCatalogConfig::new("https://catalog.example.com")
//!     .with_endpoint_path("rest/v1/route66_waypoints?select=*")
//!     .with_timeout(Duration::from_secs(10))
//!     .with_api_key("public-anon-key");
//! let catalog = HttpWaypointCatalog::with_config(config)?;
//! let waypoints = catalog.fetch_all()?;
//! # Ok::<(), Box<dyn std::error::Error>>(())
//! ```

use std::time::Duration;

use mainstreet_core::{CatalogError, Waypoint, WaypointCatalog};
use reqwest::Client;
use reqwest::header::{AUTHORIZATION, HeaderMap, HeaderValue, InvalidHeaderValue};
use thiserror::Error;
use tokio::runtime::{Handle, Runtime, RuntimeFlavor};
use url::Url;

use super::wire::{WaypointRecord, decode_records};

/// Errors raised while building an [`HttpWaypointCatalog`].
#[derive(Debug, Error)]
pub enum CatalogBuildError {
    /// The base URL or endpoint path did not form a valid URL.
    #[error("invalid catalog URL '{url}': {source}")]
    InvalidUrl {
        /// URL as configured.
        url: String,
        /// Parser error.
        #[source]
        source: url::ParseError,
    },
    /// The API key contained characters not allowed in a header.
    #[error("catalog API key is not a valid header value")]
    InvalidApiKey(#[source] InvalidHeaderValue),
    /// Failed to build the HTTP client.
    #[error("failed to build HTTP client: {0}")]
    HttpClient(#[source] reqwest::Error),
    /// Failed to build the Tokio runtime.
    #[error("failed to build Tokio runtime: {0}")]
    Runtime(#[source] std::io::Error),
}

/// Default user agent for catalog requests.
pub const DEFAULT_USER_AGENT: &str = "mainstreet-catalog/0.1";

/// Default path of the waypoint table below the base URL.
pub const DEFAULT_ENDPOINT_PATH: &str = "rest/v1/route66_waypoints?select=*";

const DEFAULT_TIMEOUT_SECS: u64 = 30;

/// Configuration for [`HttpWaypointCatalog`].
#[derive(Clone)]
pub struct HttpCatalogConfig {
    /// Base URL of the catalog service.
    pub base_url: String,
    /// Path (and optional query) of the waypoint listing below `base_url`.
    pub endpoint_path: String,
    /// Connect and request timeout.
    pub timeout: Duration,
    /// User agent sent with every request.
    pub user_agent: String,
    /// Key sent as both `apikey` and bearer token, when set.
    pub api_key: Option<String>,
}

impl std::fmt::Debug for HttpCatalogConfig {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("HttpCatalogConfig")
            .field("base_url", &self.base_url)
            .field("endpoint_path", &self.endpoint_path)
            .field("timeout", &self.timeout)
            .field("user_agent", &self.user_agent)
            .field("api_key", &self.api_key.as_ref().map(|_| "<redacted>"))
            .finish()
    }
}

impl Default for HttpCatalogConfig {
    fn default() -> Self {
        Self {
            base_url: "http://localhost:54321".to_owned(),
            endpoint_path: DEFAULT_ENDPOINT_PATH.to_owned(),
            timeout: Duration::from_secs(DEFAULT_TIMEOUT_SECS),
            user_agent: DEFAULT_USER_AGENT.to_owned(),
            api_key: None,
        }
    }
}

impl HttpCatalogConfig {
    /// Create a configuration for the given base URL.
    #[must_use]
    pub fn new(base_url: impl Into<String>) -> Self {
        Self {
            base_url: base_url.into(),
            ..Default::default()
        }
    }

    /// Set the listing path below the base URL.
    #[must_use]
    pub fn with_endpoint_path(mut self, path: impl Into<String>) -> Self {
        self.endpoint_path = path.into();
        self
    }

    /// Set the request timeout.
    #[must_use]
    pub const fn with_timeout(mut self, timeout: Duration) -> Self {
        self.timeout = timeout;
        self
    }

    /// Set the user agent string.
    #[must_use]
    pub fn with_user_agent(mut self, user_agent: impl Into<String>) -> Self {
        self.user_agent = user_agent.into();
        self
    }

    /// Authenticate with an API key.
    #[must_use]
    pub fn with_api_key(mut self, api_key: impl Into<String>) -> Self {
        self.api_key = Some(api_key.into());
        self
    }

    /// Join the base URL and endpoint path.
    ///
    /// # Errors
    /// Returns [`CatalogBuildError::InvalidUrl`] when either part is malformed.
    ///
    /// ```
    /// use mainstreet_data::HttpCatalogConfig;
    ///
    /// let url = HttpCatalogConfig::new("https://example.com/api/")
    ///     .with_endpoint_path("/waypoints?select=*")
    ///     .endpoint_url()
    ///     .unwrap();
    /// assert_eq!(url.as_str(), "https://example.com/api/waypoints?select=*");
    /// ```
    pub fn endpoint_url(&self) -> Result<Url, CatalogBuildError> {
        let invalid = |source| CatalogBuildError::InvalidUrl {
            url: format!("{}/{}", self.base_url, self.endpoint_path),
            source,
        };
        let base = Url::parse(&format!("{}/", self.base_url.trim_end_matches('/'))).map_err(invalid)?;
        base.join(self.endpoint_path.trim_start_matches('/'))
            .map_err(invalid)
    }

    fn default_headers(&self) -> Result<HeaderMap, CatalogBuildError> {
        let mut headers = HeaderMap::new();
        if let Some(key) = &self.api_key {
            let apikey = HeaderValue::from_str(key).map_err(CatalogBuildError::InvalidApiKey)?;
            let mut bearer = HeaderValue::from_str(&format!("Bearer {key}"))
                .map_err(CatalogBuildError::InvalidApiKey)?;
            bearer.set_sensitive(true);
            headers.insert("apikey", apikey);
            headers.insert(AUTHORIZATION, bearer);
        }
        Ok(headers)
    }
}

/// Waypoint catalog served over HTTP.
///
/// The catalog owns a current-thread Tokio runtime that is reused across
/// fetches. When called from inside a multi-threaded Tokio runtime it uses
/// that runtime's handle with [`tokio::task::block_in_place`] instead, which
/// avoids nested-runtime panics. Inside a `current_thread` runtime it falls
/// back to its own runtime, which can deadlock if the caller's runtime is
/// driving IO this request depends on.
pub struct HttpWaypointCatalog {
    client: Client,
    config: HttpCatalogConfig,
    url: Url,
    runtime: Runtime,
}

impl std::fmt::Debug for HttpWaypointCatalog {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("HttpWaypointCatalog")
            .field("client", &self.client)
            .field("config", &self.config)
            .field("url", &self.url.as_str())
            .field("runtime", &"<tokio::runtime::Runtime>")
            .finish()
    }
}

impl HttpWaypointCatalog {
    /// Create a catalog with default settings for `base_url`.
    ///
    /// # Errors
    ///
    /// Returns an error if the URL is invalid or the HTTP client or Tokio
    /// runtime fails to build.
    pub fn new(base_url: impl Into<String>) -> Result<Self, CatalogBuildError> {
        Self::with_config(HttpCatalogConfig::new(base_url))
    }

    /// Create a catalog with explicit configuration.
    ///
    /// # Errors
    ///
    /// Returns an error if the URL or API key is invalid or the HTTP client
    /// or Tokio runtime fails to build.
    pub fn with_config(config: HttpCatalogConfig) -> Result<Self, CatalogBuildError> {
        let url = config.endpoint_url()?;
        let client = Client::builder()
            .user_agent(&config.user_agent)
            .default_headers(config.default_headers()?)
            .connect_timeout(config.timeout)
            .timeout(config.timeout)
            .build()
            .map_err(CatalogBuildError::HttpClient)?;
        let runtime = tokio::runtime::Builder::new_current_thread()
            .enable_all()
            .build()
            .map_err(CatalogBuildError::Runtime)?;
        Ok(Self {
            client,
            config,
            url,
            runtime,
        })
    }

    /// The resolved listing URL.
    pub const fn url(&self) -> &Url {
        &self.url
    }

    async fn fetch_async(&self) -> Result<Vec<Waypoint>, CatalogError> {
        log::debug!("fetching waypoint catalog from {}", self.url);
        let response = self
            .client
            .get(self.url.clone())
            .send()
            .await
            .map_err(|err| self.convert_reqwest_error(&err))?
            .error_for_status()
            .map_err(|err| self.convert_reqwest_error(&err))?;

        let records: Vec<WaypointRecord> =
            response.json().await.map_err(|err| CatalogError::Parse {
                message: err.to_string(),
            })?;
        let decoded = decode_records(records);
        log::info!(
            "fetched {} waypoint(s) from {} ({} skipped)",
            decoded.waypoints.len(),
            self.url,
            decoded.skipped
        );
        Ok(decoded.waypoints)
    }

    fn convert_reqwest_error(&self, error: &reqwest::Error) -> CatalogError {
        let url = self.url.to_string();
        if error.is_timeout() {
            return CatalogError::Timeout {
                url,
                timeout_secs: self.config.timeout.as_secs(),
            };
        }
        if let Some(status) = error.status() {
            return CatalogError::Http {
                url,
                status: status.as_u16(),
                message: error.to_string(),
            };
        }
        CatalogError::Network {
            url,
            message: error.to_string(),
        }
    }
}

impl WaypointCatalog for HttpWaypointCatalog {
    fn fetch_all(&self) -> Result<Vec<Waypoint>, CatalogError> {
        let future = self.fetch_async();
        match Handle::try_current() {
            Ok(handle) if handle.runtime_flavor() == RuntimeFlavor::MultiThread => {
                tokio::task::block_in_place(|| handle.block_on(future))
            }
            _ => self.runtime.block_on(future),
        }
    }
}
