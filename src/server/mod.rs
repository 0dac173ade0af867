//! HTTP service
//!
//! This module provides the server that exposes the report pipeline
//! over two endpoints plus a health check.

pub mod api;

use std::net::SocketAddr;
use std::sync::Arc;
use std::time::{Duration, Instant};

use axum::Router;
use tower_http::cors::{Any, CorsLayer};
use tower_http::trace::TraceLayer;

use crate::config::Config;
use crate::pipeline::{FixedPause, ReportPipeline};
use crate::trends::TrendsClient;

use api::create_router;

// ============================================================================
// App State
// ============================================================================

/// Shared application state
#[derive(Clone)]
pub struct AppState {
    /// The report pipeline, shared by all requests so concurrent runs go
    /// through one rate-limited client
    pub pipeline: Arc<ReportPipeline>,

    /// Server start time
    pub start_time: Instant,
}

// ============================================================================
// Report Server
// ============================================================================

/// Main veille server
pub struct ReportServer {
    config: Config,
    state: AppState,
}

impl ReportServer {
    /// Create a new server from configuration
    pub fn new(config: Config) -> Result<Self, ServerError> {
        config
            .validate()
            .map_err(|e| ServerError::ConfigError(e.to_string()))?;

        let client = TrendsClient::with_config(
            config.requests_per_second,
            Duration::from_secs(config.request_timeout_secs),
        )
        .map_err(|e| ServerError::InitError(e.to_string()))?
        .with_locale(config.locale.clone(), config.tz_offset);

        let pipeline = Arc::new(ReportPipeline::new(
            Arc::new(client),
            config.catalog.clone(),
            config.window.clone(),
            config.region.clone(),
            Arc::new(FixedPause(Duration::from_secs(config.pause_secs))),
        ));

        let state = AppState {
            pipeline,
            start_time: Instant::now(),
        };

        Ok(Self { config, state })
    }

    /// Get the application state
    pub fn state(&self) -> AppState {
        self.state.clone()
    }

    /// Build the router with all routes
    pub fn build_router(&self) -> Router {
        let mut router = create_router(self.state.clone());

        if self.config.enable_cors {
            router = router.layer(
                CorsLayer::new()
                    .allow_origin(Any)
                    .allow_methods(Any)
                    .allow_headers(Any),
            );
        }

        if self.config.enable_request_logging {
            router = router.layer(TraceLayer::new_for_http());
        }

        router
    }

    /// Start the server
    pub async fn start(&self) -> Result<(), ServerError> {
        let router = self.build_router();
        let addr = self.config.bind_address;

        tracing::info!("Starting veille server on {}", addr);

        let listener = tokio::net::TcpListener::bind(addr)
            .await
            .map_err(|e| ServerError::BindError(e.to_string()))?;

        axum::serve(listener, router)
            .await
            .map_err(|e| ServerError::ServeError(e.to_string()))?;

        Ok(())
    }

    /// Start with graceful shutdown
    pub async fn start_with_shutdown(
        &self,
        shutdown_signal: impl std::future::Future<Output = ()> + Send + 'static,
    ) -> Result<(), ServerError> {
        let router = self.build_router();
        let addr = self.config.bind_address;

        tracing::info!("Starting veille server on {} (with graceful shutdown)", addr);

        let listener = tokio::net::TcpListener::bind(addr)
            .await
            .map_err(|e| ServerError::BindError(e.to_string()))?;

        axum::serve(listener, router)
            .with_graceful_shutdown(shutdown_signal)
            .await
            .map_err(|e| ServerError::ServeError(e.to_string()))?;

        tracing::info!("veille server shutdown complete");
        Ok(())
    }

    /// Get server info
    pub fn info(&self) -> ServerInfo {
        ServerInfo {
            bind_address: self.config.bind_address,
            sectors: self.config.catalog.len(),
            window: self.config.window.clone(),
            region: self.config.region.clone(),
            pause_secs: self.config.pause_secs,
            cors_enabled: self.config.enable_cors,
            request_logging_enabled: self.config.enable_request_logging,
        }
    }
}

/// Server information
#[derive(Debug, Clone)]
pub struct ServerInfo {
    pub bind_address: SocketAddr,
    pub sectors: usize,
    pub window: String,
    pub region: String,
    pub pause_secs: u64,
    pub cors_enabled: bool,
    pub request_logging_enabled: bool,
}

impl ServerInfo {
    /// Format as display string
    pub fn display(&self) -> String {
        format!(
            "veille Server\n\
             {:-<40}\n\
             Bind Address: {}\n\
             Sectors: {}\n\
             Window: {}\n\
             Region: {}\n\
             Inter-fetch Pause: {}s\n\
             CORS: {}\n\
             Request Logging: {}",
            "",
            self.bind_address,
            self.sectors,
            self.window,
            self.region,
            self.pause_secs,
            if self.cors_enabled { "enabled" } else { "disabled" },
            if self.request_logging_enabled {
                "enabled"
            } else {
                "disabled"
            }
        )
    }
}

// ============================================================================
// Server Errors
// ============================================================================

/// Server errors
#[derive(Debug, Clone)]
pub enum ServerError {
    /// Configuration error
    ConfigError(String),

    /// Initialization error
    InitError(String),

    /// Failed to bind to address
    BindError(String),

    /// Server error
    ServeError(String),
}

impl std::fmt::Display for ServerError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::ConfigError(msg) => write!(f, "Configuration error: {msg}"),
            Self::InitError(msg) => write!(f, "Initialization error: {msg}"),
            Self::BindError(msg) => write!(f, "Failed to bind: {msg}"),
            Self::ServeError(msg) => write!(f, "Server error: {msg}"),
        }
    }
}

impl std::error::Error for ServerError {}
