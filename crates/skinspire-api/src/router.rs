//! Route definitions for the SkinSpire HTTP API.
//!
//! All routes are organized by domain and mounted under `/api`. The
//! router receives `AppState` and passes it to all handlers via Axum's
//! `State` extractor.

use axum::{
    Router,
    middleware as axum_middleware,
    routing::{delete, get, post},
};
use tower_http::compression::CompressionLayer;
use tower_http::trace::TraceLayer;

use crate::handlers;
use crate::middleware;
use crate::state::AppState;

/// Build the complete Axum router with all routes and middleware.
pub fn build_router(state: AppState) -> Router {
    let api_routes = Router::new()
        .merge(entity_routes())
        .merge(supplier_routes())
        .merge(medicine_routes())
        .merge(payment_routes())
        .merge(health_routes());

    let cors = middleware::cors::build_cors_layer(&state.config.server.cors);

    Router::new()
        .nest("/api", api_routes)
        .layer(CompressionLayer::new())
        .layer(TraceLayer::new_for_http())
        .layer(cors)
        .layer(axum_middleware::from_fn(middleware::logging::request_logging))
        .with_state(state)
}

/// Universal entity endpoints
fn entity_routes() -> Router<AppState> {
    Router::new()
        .route("/entities", get(handlers::entity::list_entity_types))
        .route("/entities/{entity_type}", get(handlers::entity::search))
        .route("/entities/{entity_type}/{id}", get(handlers::entity::detail))
}

/// Supplier write paths
fn supplier_routes() -> Router<AppState> {
    Router::new()
        .route("/suppliers", post(handlers::supplier::create))
        .route("/suppliers/{id}", delete(handlers::supplier::delete))
        .route("/suppliers/{id}/restore", post(handlers::supplier::restore))
}

/// Medicine write paths
fn medicine_routes() -> Router<AppState> {
    Router::new()
        .route("/medicines", post(handlers::medicine::create))
        .route("/medicines/{id}", delete(handlers::medicine::delete))
}

/// Payment write paths
fn payment_routes() -> Router<AppState> {
    Router::new().route("/payments", post(handlers::payment::record))
}

/// Health endpoints
fn health_routes() -> Router<AppState> {
    Router::new()
        .route("/health", get(handlers::health::health))
        .route("/health/detailed", get(handlers::health::health_detailed))
}
