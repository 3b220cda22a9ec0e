//! HTTP contract tests over the full router.
//!
//! These run against a lazily-initialized pool and only exercise paths
//! that are answered before any database query: health, entity type
//! listing, tenant validation, and request validation.

use std::sync::Arc;

use axum::Router;
use axum::body::{Body, to_bytes};
use axum::http::{Request, StatusCode};
use serde_json::{Value, json};
use tower::ServiceExt;

use skinspire_api::router::build_router;
use skinspire_api::state::AppState;
use skinspire_cache::provider::CacheManager;
use skinspire_core::config::AppConfig;
use skinspire_entity::EntityRegistry;
use skinspire_service::ServiceRegistry;

fn test_router() -> Router {
    let config = AppConfig::load("development").expect("Failed to load config");

    // Never connects; these tests stay on the pre-database paths.
    let db_pool = sqlx::postgres::PgPoolOptions::new()
        .connect_lazy(&config.database.url)
        .expect("Failed to build lazy pool");

    let cache = Some(CacheManager::new(&config.cache).expect("Failed to init cache"));
    let registry = Arc::new(EntityRegistry::builtin());
    let services = Arc::new(
        ServiceRegistry::build(&registry, db_pool.clone(), cache.clone())
            .expect("Failed to wire services"),
    );

    build_router(AppState {
        config: Arc::new(config),
        db_pool,
        cache,
        registry,
        services,
    })
}

async fn send(router: Router, request: Request<Body>) -> (StatusCode, Value) {
    let response = router.oneshot(request).await.expect("Request failed");
    let status = response.status();
    let bytes = to_bytes(response.into_body(), usize::MAX)
        .await
        .expect("Failed to read body");
    let body = if bytes.is_empty() {
        Value::Null
    } else {
        serde_json::from_slice(&bytes).expect("Body is not JSON")
    };
    (status, body)
}

fn get(uri: &str) -> Request<Body> {
    Request::builder()
        .method("GET")
        .uri(uri)
        .body(Body::empty())
        .unwrap()
}

#[tokio::test]
async fn test_health_endpoint() {
    let (status, body) = send(test_router(), get("/api/health")).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["success"], json!(true));
    assert_eq!(body["data"]["status"], json!("ok"));
}

#[tokio::test]
async fn test_entity_types_listing() {
    let (status, body) = send(test_router(), get("/api/entities")).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(
        body["data"]["entity_types"],
        json!(["medicines", "supplier_invoices", "supplier_payments", "suppliers"])
    );
}

#[tokio::test]
async fn test_search_without_hospital_returns_failure_envelope() {
    let (status, body) = send(test_router(), get("/api/entities/suppliers?status=active")).await;
    // Tenant failures come back in the uniform envelope, not as an HTTP error.
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["success"], json!(false));
    assert_eq!(body["error"], json!("Hospital ID required"));
    assert_eq!(body["entity_type"], json!("suppliers"));
    assert_eq!(body["total"], json!(0));
    assert_eq!(body["total_pages"], json!(1));
    assert_eq!(body["items"], json!([]));
}

#[tokio::test]
async fn test_unknown_entity_type_is_404() {
    let (status, body) = send(test_router(), get("/api/entities/patients")).await;
    assert_eq!(status, StatusCode::NOT_FOUND);
    assert_eq!(body["error"], json!("NOT_FOUND"));
}

#[tokio::test]
async fn test_malformed_hospital_header_is_rejected() {
    let request = Request::builder()
        .method("GET")
        .uri("/api/entities/suppliers")
        .header("X-Hospital-Id", "not-a-uuid")
        .body(Body::empty())
        .unwrap();
    let (status, body) = send(test_router(), request).await;
    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert_eq!(body["error"], json!("VALIDATION_ERROR"));
}

#[tokio::test]
async fn test_create_supplier_validates_body() {
    let request = Request::builder()
        .method("POST")
        .uri("/api/suppliers")
        .header("Content-Type", "application/json")
        .header("X-Hospital-Id", "00000000-0000-0000-0000-000000000001")
        .body(Body::from(json!({ "supplier_name": "" }).to_string()))
        .unwrap();
    let (status, body) = send(test_router(), request).await;
    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert_eq!(body["error"], json!("VALIDATION_ERROR"));
}

#[tokio::test]
async fn test_create_supplier_without_tenant_is_rejected() {
    let request = Request::builder()
        .method("POST")
        .uri("/api/suppliers")
        .header("Content-Type", "application/json")
        .body(Body::from(json!({ "supplier_name": "Acme Pharma" }).to_string()))
        .unwrap();
    let (status, body) = send(test_router(), request).await;
    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert_eq!(body["message"], json!("Hospital ID required"));
}
