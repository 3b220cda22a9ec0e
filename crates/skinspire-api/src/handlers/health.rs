//! Health check handlers.

use axum::Json;
use axum::extract::State;

use skinspire_cache::provider::CacheProvider;
use skinspire_core::types::response::ApiResponse;

use crate::dto::response::{DetailedHealthResponse, HealthResponse};
use crate::state::AppState;

/// GET /api/health
pub async fn health() -> Json<ApiResponse<HealthResponse>> {
    Json(ApiResponse::ok(HealthResponse {
        status: "ok".to_string(),
        version: env!("CARGO_PKG_VERSION").to_string(),
    }))
}

/// GET /api/health/detailed
pub async fn health_detailed(State(state): State<AppState>) -> Json<ApiResponse<DetailedHealthResponse>> {
    let database = match sqlx::query("SELECT 1").execute(&state.db_pool).await {
        Ok(_) => "connected",
        Err(_) => "unavailable",
    };

    let cache = match &state.cache {
        Some(cache) => match cache.health_check().await {
            Ok(true) => "connected",
            _ => "unavailable",
        },
        None => "disabled",
    };

    let entities = state
        .services
        .entity_types()
        .into_iter()
        .map(str::to_string)
        .collect();

    Json(ApiResponse::ok(DetailedHealthResponse {
        status: "ok".to_string(),
        database: database.to_string(),
        cache: cache.to_string(),
        entities,
    }))
}
