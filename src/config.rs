//! Service configuration
//!
//! All knobs of a deployment live here: bind address, source query
//! parameters, rate-limit spacing, and the injected sector catalog. The
//! only environment-driven values are the bind host and port; everything
//! else is fixed server-side.

use serde::{Deserialize, Serialize};
use std::net::SocketAddr;

use crate::catalog::SectorCatalog;

/// Configuration for the veille service
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Config {
    /// Server bind address
    pub bind_address: SocketAddr,

    /// Source query window, e.g. `now 7-d`
    pub window: String,

    /// Source region code, e.g. `FR`
    pub region: String,

    /// Source interface locale, e.g. `fr-FR`
    pub locale: String,

    /// Source timezone offset in minutes
    pub tz_offset: i32,

    /// Minimum delay between successive sector fetches, in seconds
    pub pause_secs: u64,

    /// Outbound request quota (requests per second)
    pub requests_per_second: u32,

    /// Outbound request timeout in seconds
    pub request_timeout_secs: u64,

    /// Enable CORS for the API
    pub enable_cors: bool,

    /// Enable request logging
    pub enable_request_logging: bool,

    /// Sector catalog queried on each run
    pub catalog: SectorCatalog,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            bind_address: "0.0.0.0:8000".parse().unwrap(),
            window: "now 7-d".to_string(),
            region: "FR".to_string(),
            locale: "fr-FR".to_string(),
            tz_offset: 360,
            pause_secs: 2,
            requests_per_second: 1,
            request_timeout_secs: 30,
            enable_cors: true,
            enable_request_logging: true,
            catalog: SectorCatalog::default(),
        }
    }
}

impl Config {
    /// Create a new config builder
    pub fn builder() -> ConfigBuilder {
        ConfigBuilder::default()
    }

    /// Defaults with the bind address taken from `VEILLE_HOST` and
    /// `VEILLE_PORT` when set. Host/port is the whole env surface.
    pub fn from_env() -> Result<Self, ConfigError> {
        let host = std::env::var("VEILLE_HOST").unwrap_or_else(|_| "0.0.0.0".to_string());
        let port = std::env::var("VEILLE_PORT")
            .ok()
            .map(|v| {
                v.parse::<u16>().map_err(|_| ConfigError::InvalidValue {
                    field: "VEILLE_PORT".to_string(),
                    reason: format!("not a port number: {v}"),
                })
            })
            .transpose()?
            .unwrap_or(8000);

        let bind_address = format!("{host}:{port}")
            .parse()
            .map_err(|_| ConfigError::InvalidValue {
                field: "VEILLE_HOST".to_string(),
                reason: format!("invalid bind address: {host}:{port}"),
            })?;

        Ok(Self {
            bind_address,
            ..Self::default()
        })
    }

    /// Validate the configuration
    pub fn validate(&self) -> Result<(), ConfigError> {
        if self.catalog.is_empty() {
            return Err(ConfigError::InvalidValue {
                field: "catalog".to_string(),
                reason: "At least one sector is required".to_string(),
            });
        }

        if self.window.is_empty() {
            return Err(ConfigError::InvalidValue {
                field: "window".to_string(),
                reason: "Query window must not be empty".to_string(),
            });
        }

        if self.requests_per_second == 0 {
            return Err(ConfigError::InvalidValue {
                field: "requests_per_second".to_string(),
                reason: "Quota must allow at least 1 request per second".to_string(),
            });
        }

        Ok(())
    }
}

/// Builder for [`Config`]
#[derive(Debug, Default)]
pub struct ConfigBuilder {
    bind_address: Option<SocketAddr>,
    window: Option<String>,
    region: Option<String>,
    locale: Option<String>,
    tz_offset: Option<i32>,
    pause_secs: Option<u64>,
    requests_per_second: Option<u32>,
    request_timeout_secs: Option<u64>,
    enable_cors: Option<bool>,
    enable_request_logging: Option<bool>,
    catalog: Option<SectorCatalog>,
}

impl ConfigBuilder {
    /// Set bind address
    pub fn bind_address(mut self, addr: SocketAddr) -> Self {
        self.bind_address = Some(addr);
        self
    }

    /// Set bind address from string
    pub fn bind_address_str(mut self, addr: &str) -> Result<Self, ConfigError> {
        self.bind_address = Some(addr.parse().map_err(|_| ConfigError::InvalidValue {
            field: "bind_address".to_string(),
            reason: format!("Invalid address: {addr}"),
        })?);
        Ok(self)
    }

    /// Set the source query window
    pub fn window(mut self, window: impl Into<String>) -> Self {
        self.window = Some(window.into());
        self
    }

    /// Set the source region
    pub fn region(mut self, region: impl Into<String>) -> Self {
        self.region = Some(region.into());
        self
    }

    /// Set the source locale
    pub fn locale(mut self, locale: impl Into<String>) -> Self {
        self.locale = Some(locale.into());
        self
    }

    /// Set the timezone offset in minutes
    pub fn tz_offset(mut self, minutes: i32) -> Self {
        self.tz_offset = Some(minutes);
        self
    }

    /// Set the inter-fetch pause in seconds
    pub fn pause_secs(mut self, secs: u64) -> Self {
        self.pause_secs = Some(secs);
        self
    }

    /// Set the outbound request quota
    pub fn requests_per_second(mut self, rps: u32) -> Self {
        self.requests_per_second = Some(rps);
        self
    }

    /// Set the outbound request timeout
    pub fn request_timeout_secs(mut self, secs: u64) -> Self {
        self.request_timeout_secs = Some(secs);
        self
    }

    /// Enable/disable CORS
    pub fn enable_cors(mut self, enable: bool) -> Self {
        self.enable_cors = Some(enable);
        self
    }

    /// Enable/disable request logging
    pub fn enable_request_logging(mut self, enable: bool) -> Self {
        self.enable_request_logging = Some(enable);
        self
    }

    /// Inject a sector catalog
    pub fn catalog(mut self, catalog: SectorCatalog) -> Self {
        self.catalog = Some(catalog);
        self
    }

    /// Build the config
    pub fn build(self) -> Result<Config, ConfigError> {
        let defaults = Config::default();
        let config = Config {
            bind_address: self.bind_address.unwrap_or(defaults.bind_address),
            window: self.window.unwrap_or(defaults.window),
            region: self.region.unwrap_or(defaults.region),
            locale: self.locale.unwrap_or(defaults.locale),
            tz_offset: self.tz_offset.unwrap_or(defaults.tz_offset),
            pause_secs: self.pause_secs.unwrap_or(defaults.pause_secs),
            requests_per_second: self
                .requests_per_second
                .unwrap_or(defaults.requests_per_second),
            request_timeout_secs: self
                .request_timeout_secs
                .unwrap_or(defaults.request_timeout_secs),
            enable_cors: self.enable_cors.unwrap_or(defaults.enable_cors),
            enable_request_logging: self
                .enable_request_logging
                .unwrap_or(defaults.enable_request_logging),
            catalog: self.catalog.unwrap_or(defaults.catalog),
        };

        config.validate()?;
        Ok(config)
    }
}

/// Configuration errors
#[derive(Debug, Clone)]
pub enum ConfigError {
    InvalidValue { field: String, reason: String },
}

impl std::fmt::Display for ConfigError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::InvalidValue { field, reason } => {
                write!(f, "Invalid value for '{field}': {reason}")
            }
        }
    }
}

impl std::error::Error for ConfigError {}
