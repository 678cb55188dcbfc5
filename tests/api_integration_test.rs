// API integration tests that verify HTTP endpoints
// Tests the Axum router with in-memory requests

use axum::body::Body;
use axum::http::{Request, StatusCode};
use axum::Router;
use coastal_forecast_service::api::{create_router, AppState};
use coastal_forecast_service::extractor::DEFAULT_CONTENT_SELECTOR;
use coastal_forecast_service::services::ForecastService;
use http_body_util::BodyExt; // For `.collect()`
use serde_json::Value;
use tower::ServiceExt; // For `oneshot`

const SAMPLE_TEXT: &str = include_str!("../sample-data-files/cwf_okx.txt");
const SAMPLE_HTML: &str = include_str!("../sample-data-files/cwf_okx.html");

fn test_router() -> (Router, ForecastService) {
    let forecast_service = ForecastService::new(DEFAULT_CONTENT_SELECTOR.to_string());
    let router = create_router(AppState {
        forecast_service: forecast_service.clone(),
    });
    (router, forecast_service)
}

async fn send(router: &Router, request: Request<Body>) -> (StatusCode, Value) {
    let response = router.clone().oneshot(request).await.unwrap();
    let status = response.status();
    let bytes = response.into_body().collect().await.unwrap().to_bytes();
    let json = if bytes.is_empty() {
        Value::Null
    } else {
        serde_json::from_slice(&bytes).unwrap_or(Value::Null)
    };
    (status, json)
}

fn get(uri: &str) -> Request<Body> {
    Request::builder().uri(uri).body(Body::empty()).unwrap()
}

fn post_bulletin(uri: &str, body: &str) -> Request<Body> {
    Request::builder()
        .method("POST")
        .uri(uri)
        .header("content-type", "text/plain")
        .body(Body::from(body.to_string()))
        .unwrap()
}

#[tokio::test]
async fn test_health_endpoint() {
    let (router, _) = test_router();
    let (status, json) = send(&router, get("/api/v1/health")).await;

    assert_eq!(status, StatusCode::OK);
    assert_eq!(json["status"], "healthy");
}

#[tokio::test]
async fn test_zones_before_ingest_is_not_found() {
    let (router, _) = test_router();

    let (status, _) = send(&router, get("/api/v1/zones")).await;
    assert_eq!(status, StatusCode::NOT_FOUND);

    let (status, _) = send(&router, get("/api/v1/zones/0")).await;
    assert_eq!(status, StatusCode::NOT_FOUND);
}

#[tokio::test]
async fn test_ingest_text_bulletin() {
    let (router, service) = test_router();

    let (status, json) = send(&router, post_bulletin("/api/v1/bulletin", SAMPLE_TEXT)).await;
    assert_eq!(status, StatusCode::CREATED);
    assert_eq!(json["zone_count"], 4);

    let skipped = json["skipped_segments"].as_array().unwrap();
    assert_eq!(skipped.len(), 2);
    assert_eq!(skipped[1]["index"], 4);
    assert_eq!(skipped[1]["first_line"], "ANZ330-340-021800-");

    assert_eq!(service.latest().await.unwrap().zones.len(), 4);
}

#[tokio::test]
async fn test_ingest_product_page() {
    let (router, _) = test_router();

    let (status, json) = send(
        &router,
        post_bulletin("/api/v1/bulletin?format=html", SAMPLE_HTML),
    )
    .await;
    assert_eq!(status, StatusCode::CREATED);
    assert_eq!(json["zone_count"], 4);
}

#[tokio::test]
async fn test_ingest_page_without_product_is_bad_request() {
    let (router, _) = test_router();

    let (status, _) = send(
        &router,
        post_bulletin(
            "/api/v1/bulletin?format=html",
            "<html><body><p>Product unavailable</p></body></html>",
        ),
    )
    .await;
    assert_eq!(status, StatusCode::BAD_REQUEST);
}

#[tokio::test]
async fn test_ingest_without_zones_is_unprocessable() {
    let (router, service) = test_router();
    send(&router, post_bulletin("/api/v1/bulletin", SAMPLE_TEXT)).await;

    let (status, _) = send(&router, post_bulletin("/api/v1/bulletin?format=text", " $$ \n $$ ")).await;
    assert_eq!(status, StatusCode::UNPROCESSABLE_ENTITY);

    // Previous bulletin is still served
    assert_eq!(service.latest().await.unwrap().zones.len(), 4);
}

#[tokio::test]
async fn test_zone_navigation_and_detail() {
    let (router, _) = test_router();
    send(&router, post_bulletin("/api/v1/bulletin", SAMPLE_TEXT)).await;

    let (status, json) = send(&router, get("/api/v1/zones")).await;
    assert_eq!(status, StatusCode::OK);
    assert!(json["received_at"].is_string());
    let zones = json["zones"].as_array().unwrap();
    assert_eq!(zones.len(), 4);
    assert_eq!(zones[2]["index"], 2);
    assert_eq!(zones[2]["id"], "ANZ338-021800-");
    assert_eq!(zones[2]["name"], "New York Harbor-");
    assert_eq!(zones[2]["has_advisory"], false);
    assert_eq!(zones[1]["has_advisory"], true);
    assert_eq!(zones[3]["has_advisory"], true);

    let (status, json) = send(&router, get("/api/v1/zones/1")).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(json["id"], "ANZ335-021800-");
    assert_eq!(json["updateTime"], "1000 AM EDT Sun Jun 2 2024");
    assert_eq!(json["forecast"][0]["day"], "TODAY");
    assert_eq!(json["forecast"].as_array().unwrap().len(), 5);

    let (status, json) = send(&router, get("/api/v1/zones/2")).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(json["advisory"], "");

    let (status, _) = send(&router, get("/api/v1/zones/9")).await;
    assert_eq!(status, StatusCode::NOT_FOUND);
}

#[tokio::test]
async fn test_zone_by_id() {
    let (router, _) = test_router();
    send(&router, post_bulletin("/api/v1/bulletin", SAMPLE_TEXT)).await;

    let (status, json) = send(&router, get("/api/v1/zones/by-id/ANZ355-021800-")).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(json["name"], "Sandy Hook NJ to Fire Island Inlet NY out 20 nm-");

    let (status, _) = send(&router, get("/api/v1/zones/by-id/ANZ999-021800-")).await;
    assert_eq!(status, StatusCode::NOT_FOUND);
}

#[tokio::test]
async fn test_zone_index_must_be_numeric() {
    let (router, _) = test_router();
    send(&router, post_bulletin("/api/v1/bulletin", SAMPLE_TEXT)).await;

    let (status, _) = send(&router, get("/api/v1/zones/first")).await;
    assert_eq!(status, StatusCode::BAD_REQUEST);
}
