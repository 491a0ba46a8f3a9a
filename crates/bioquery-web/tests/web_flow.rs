//! End-to-end router tests driven through tower's oneshot, with no
//! upstream backend. State is seeded directly where a test needs held
//! results.

use axum::body::Body;
use axum::http::{header, Request, StatusCode};
use axum::Router;
use serde_json::json;
use tower::ServiceExt;

use bioquery_common::models::QueryResult;
use bioquery_web::config::AppConfig;
use bioquery_web::router::build_router;
use bioquery_web::state::AppState;

fn test_config() -> AppConfig {
    AppConfig {
        bind_addr: "127.0.0.1:0".parse().unwrap(),
        // Unroutable port: any accidental upstream call fails fast.
        upstream_base: "http://127.0.0.1:1".to_string(),
    }
}

fn sample_results() -> QueryResult {
    serde_json::from_value(json!({
        "orchestration_method": "direct",
        "results": {
            "pubmed": [{"pmid": "12345", "title": "CRISPR screens in PDAC"}],
            "uniprot": {"error": "upstream timeout"},
        },
        "ai_analysis": "## Key Findings\n- One hit"
    }))
    .unwrap()
}

async fn router_with_results(results: Option<QueryResult>) -> Router {
    let state = AppState::new(&test_config()).unwrap();
    *state.results.write().await = results;
    build_router(state)
}

async fn body_bytes(response: axum::response::Response) -> Vec<u8> {
    axum::body::to_bytes(response.into_body(), usize::MAX)
        .await
        .unwrap()
        .to_vec()
}

#[tokio::test]
async fn home_page_renders_the_query_form() {
    let app = router_with_results(None).await;
    let response = app
        .oneshot(Request::builder().uri("/").body(Body::empty()).unwrap())
        .await
        .unwrap();
    assert_eq!(response.status(), StatusCode::OK);

    let html = String::from_utf8(body_bytes(response).await).unwrap();
    assert!(html.contains("Biomedical Research Platform"));
    assert!(html.contains("Ready"));
    assert!(!html.contains("/export/pdf"));
}

#[tokio::test]
async fn home_page_shows_results_and_export_menu_when_loaded() {
    let app = router_with_results(Some(sample_results())).await;
    let response = app
        .oneshot(Request::builder().uri("/").body(Body::empty()).unwrap())
        .await
        .unwrap();
    let html = String::from_utf8(body_bytes(response).await).unwrap();
    assert!(html.contains("/export/pdf"));
    assert!(html.contains("CRISPR screens in PDAC"));
    assert!(html.contains("Error: upstream timeout"));
}

#[tokio::test]
async fn json_export_round_trips_through_the_download() {
    let original = sample_results();
    let app = router_with_results(Some(original.clone())).await;
    let response = app
        .oneshot(
            Request::builder()
                .uri("/export/json")
                .body(Body::empty())
                .unwrap(),
        )
        .await
        .unwrap();
    assert_eq!(response.status(), StatusCode::OK);
    assert_eq!(
        response.headers()[header::CONTENT_TYPE],
        "application/json"
    );
    assert_eq!(
        response.headers()[header::CONTENT_DISPOSITION],
        "attachment; filename=\"biomedical-research-results.json\""
    );

    let bytes = body_bytes(response).await;
    let reparsed: QueryResult = serde_json::from_slice(&bytes).unwrap();
    assert_eq!(reparsed, original);
}

#[tokio::test]
async fn pdf_export_sends_a_pdf_attachment() {
    let app = router_with_results(Some(sample_results())).await;
    let response = app
        .oneshot(
            Request::builder()
                .uri("/export/pdf")
                .body(Body::empty())
                .unwrap(),
        )
        .await
        .unwrap();
    assert_eq!(response.status(), StatusCode::OK);
    assert_eq!(response.headers()[header::CONTENT_TYPE], "application/pdf");

    let bytes = body_bytes(response).await;
    assert!(bytes.starts_with(b"%PDF-1.5"));
}

#[tokio::test]
async fn export_without_results_is_an_error_page() {
    let app = router_with_results(None).await;
    let response = app
        .oneshot(
            Request::builder()
                .uri("/export/csv")
                .body(Body::empty())
                .unwrap(),
        )
        .await
        .unwrap();
    assert_eq!(response.status(), StatusCode::INTERNAL_SERVER_ERROR);

    let html = String::from_utf8(body_bytes(response).await).unwrap();
    assert!(html.contains("no results available to export"));
}

#[tokio::test]
async fn unsupported_export_format_is_rejected() {
    let app = router_with_results(Some(sample_results())).await;
    let response = app
        .oneshot(
            Request::builder()
                .uri("/export/docx")
                .body(Body::empty())
                .unwrap(),
        )
        .await
        .unwrap();
    assert_eq!(response.status(), StatusCode::INTERNAL_SERVER_ERROR);
}

#[tokio::test]
async fn invalid_query_form_reports_validation_on_the_page() {
    let app = router_with_results(None).await;
    let response = app
        .oneshot(
            Request::builder()
                .method("POST")
                .uri("/query")
                .header(header::CONTENT_TYPE, "application/x-www-form-urlencoded")
                .body(Body::from("query=&sources=pubmed"))
                .unwrap(),
        )
        .await
        .unwrap();
    assert_eq!(response.status(), StatusCode::OK);

    let html = String::from_utf8(body_bytes(response).await).unwrap();
    assert!(html.contains("query must not be empty"));
}
