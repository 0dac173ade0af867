//! In-process tests for the HTTP API
//!
//! The router is exercised with `tower::ServiceExt::oneshot` over a
//! pipeline wired to a scripted fetcher, so no network or real source is
//! involved.

mod common;

use std::sync::Arc;
use std::time::Instant;

use axum::body::Body;
use axum::http::{header, Request, StatusCode};
use tower::ServiceExt;

use common::StubFetcher;
use veille::catalog::SectorCatalog;
use veille::pipeline::{NoPause, ReportPipeline};
use veille::server::api::create_router;
use veille::server::AppState;
use veille::trends::SeriesFetcher;

fn state_with(fetcher: StubFetcher) -> AppState {
    let mut catalog = SectorCatalog::new();
    catalog.add_sector("A", ["k1", "k2"]);
    catalog.add_sector("B", ["k3"]);

    let fetcher: Arc<dyn SeriesFetcher> = Arc::new(fetcher);
    AppState {
        pipeline: Arc::new(ReportPipeline::new(
            fetcher,
            catalog,
            "now 7-d",
            "FR",
            Arc::new(NoPause),
        )),
        start_time: Instant::now(),
    }
}

fn scripted_fetcher() -> StubFetcher {
    StubFetcher::new()
        .with_series(
            "k1",
            vec![
                ("k1", vec![10.0, 10.0, 10.0, 10.0]),
                ("k2", vec![10.0, 15.0, 15.0, 25.0]),
            ],
        )
        .with_failure("k3")
}

async fn body_json(response: axum::response::Response) -> serde_json::Value {
    let bytes = axum::body::to_bytes(response.into_body(), usize::MAX)
        .await
        .unwrap();
    serde_json::from_slice(&bytes).unwrap()
}

#[tokio::test]
async fn test_root_status() {
    let router = create_router(state_with(StubFetcher::new()));

    let response = router
        .oneshot(Request::builder().uri("/").body(Body::empty()).unwrap())
        .await
        .unwrap();

    assert_eq!(response.status(), StatusCode::OK);
    let json = body_json(response).await;
    assert_eq!(json["status"], "OK");
    assert_eq!(json["message"], "API d'analyse comportementale opérationnelle");
}

#[tokio::test]
async fn test_health_check() {
    let router = create_router(state_with(StubFetcher::new()));

    let response = router
        .oneshot(
            Request::builder()
                .uri("/health")
                .body(Body::empty())
                .unwrap(),
        )
        .await
        .unwrap();

    assert_eq!(response.status(), StatusCode::OK);
    let json = body_json(response).await;
    assert_eq!(json["status"], "healthy");
    assert!(json["version"].is_string());
}

#[tokio::test]
async fn test_generate_returns_tabular_report() {
    let router = create_router(state_with(scripted_fetcher()));

    let response = router
        .oneshot(
            Request::builder()
                .uri("/generate")
                .body(Body::empty())
                .unwrap(),
        )
        .await
        .unwrap();

    assert_eq!(response.status(), StatusCode::OK);
    let json = body_json(response).await;

    assert_eq!(json["rows"].as_array().unwrap().len(), 2);
    assert_eq!(json["rows"][1]["variation_pct"], 150.0);
    assert_eq!(json["rows"][1]["interpretation"], "Rising");
    assert_eq!(json["sectors"]["A"]["sentiment_score"], 75.0);
    assert_eq!(json["sectors"]["A"]["label"], "Positive");
    // Failed sector B never appears
    assert!(json["sectors"].get("B").is_none());
    assert_eq!(json["global"]["sentiment_score"], 75.0);
    assert_eq!(json["global"]["label"], "Positive");
}

#[tokio::test]
async fn test_generate_with_no_data_is_503() {
    let fetcher = StubFetcher::new()
        .with_failure("k1")
        .with_failure("k3");
    let router = create_router(state_with(fetcher));

    let response = router
        .oneshot(
            Request::builder()
                .uri("/generate")
                .body(Body::empty())
                .unwrap(),
        )
        .await
        .unwrap();

    assert_eq!(response.status(), StatusCode::SERVICE_UNAVAILABLE);
    let json = body_json(response).await;
    assert_eq!(json["success"], false);
    assert!(json["error"].as_str().unwrap().contains("usable data"));
}

#[tokio::test]
async fn test_generate_xlsx_download() {
    let router = create_router(state_with(scripted_fetcher()));

    let response = router
        .oneshot(
            Request::builder()
                .uri("/generate/xlsx")
                .body(Body::empty())
                .unwrap(),
        )
        .await
        .unwrap();

    assert_eq!(response.status(), StatusCode::OK);
    assert_eq!(
        response.headers().get(header::CONTENT_TYPE).unwrap(),
        "application/vnd.openxmlformats-officedocument.spreadsheetml.sheet"
    );

    let disposition = response
        .headers()
        .get(header::CONTENT_DISPOSITION)
        .unwrap()
        .to_str()
        .unwrap()
        .to_string();
    assert!(disposition.starts_with("attachment; filename=\"Analyse_Secteurs_Comportement_"));
    assert!(disposition.ends_with(".xlsx\""));

    let bytes = axum::body::to_bytes(response.into_body(), usize::MAX)
        .await
        .unwrap();
    // xlsx files are zip archives
    assert_eq!(&bytes[..2], b"PK");
}
