//! REST API handlers for the veille server
//!
//! This module defines the API routes and handlers. The generate endpoints
//! take no parameters: catalog, window and region are fixed server-side,
//! and the two output modes live on two routes.

use axum::{
    extract::State,
    http::{header, StatusCode},
    response::IntoResponse,
    routing::get,
    Json, Router,
};
use serde::Serialize;

use crate::error::PipelineError;
use crate::report::excel;

use super::AppState;

// ============================================================================
// API Response Types
// ============================================================================

/// Simple error response
#[derive(Debug, Serialize)]
pub struct ErrorResponse {
    pub success: bool,
    pub error: String,
}

impl ErrorResponse {
    pub fn new(message: impl Into<String>) -> Self {
        Self {
            success: false,
            error: message.into(),
        }
    }
}

/// Root status response
#[derive(Debug, Serialize)]
pub struct StatusResponse {
    pub status: String,
    pub message: String,
}

/// Health check response
#[derive(Debug, Serialize)]
pub struct HealthResponse {
    pub status: String,
    pub version: String,
    pub uptime_secs: u64,
}

// ============================================================================
// API Routes
// ============================================================================

/// Create the API router
pub fn create_router(state: AppState) -> Router {
    Router::new()
        .route("/", get(root))
        .route("/health", get(health_check))
        .route("/generate", get(generate_json))
        .route("/generate/xlsx", get(generate_xlsx))
        .with_state(state)
}

// ============================================================================
// Handlers
// ============================================================================

/// Static status payload
async fn root() -> impl IntoResponse {
    Json(StatusResponse {
        status: "OK".to_string(),
        message: "API d'analyse comportementale opérationnelle".to_string(),
    })
}

/// Health check endpoint
async fn health_check(State(state): State<AppState>) -> impl IntoResponse {
    let uptime = state.start_time.elapsed().as_secs();

    Json(HealthResponse {
        status: "healthy".to_string(),
        version: env!("CARGO_PKG_VERSION").to_string(),
        uptime_secs: uptime,
    })
}

/// Run the pipeline and return the tabular report as JSON
async fn generate_json(State(state): State<AppState>) -> axum::response::Response {
    match state.pipeline.run().await {
        Ok(report) => (StatusCode::OK, Json(report.tabular())).into_response(),
        Err(PipelineError::NoData) => no_data_response(),
    }
}

/// Run the pipeline and return the report as a downloadable spreadsheet
async fn generate_xlsx(State(state): State<AppState>) -> axum::response::Response {
    let report = match state.pipeline.run().await {
        Ok(report) => report,
        Err(PipelineError::NoData) => return no_data_response(),
    };

    match excel::render(&report.sheet()) {
        Ok(bytes) => {
            let headers = [
                (
                    header::CONTENT_TYPE,
                    "application/vnd.openxmlformats-officedocument.spreadsheetml.sheet"
                        .to_string(),
                ),
                (
                    header::CONTENT_DISPOSITION,
                    format!(
                        "attachment; filename=\"{}\"",
                        excel::filename(report.generated_on)
                    ),
                ),
            ];
            (StatusCode::OK, headers, bytes).into_response()
        }
        Err(e) => {
            tracing::error!(error = %e, "Spreadsheet rendering failed");
            (
                StatusCode::INTERNAL_SERVER_ERROR,
                Json(ErrorResponse::new(format!("Report rendering failed: {e}"))),
            )
                .into_response()
        }
    }
}

/// 503 for the run-level "nothing to report" condition. Distinct from a
/// rendering defect so callers can tell the two apart.
fn no_data_response() -> axum::response::Response {
    (
        StatusCode::SERVICE_UNAVAILABLE,
        Json(ErrorResponse::new(
            "No sector produced any usable data; try again later",
        )),
    )
        .into_response()
}

// ============================================================================
// Tests
// ============================================================================
