//! Application state shared across all handlers and middleware.

use std::sync::Arc;

use sqlx::PgPool;

use skinspire_cache::provider::CacheManager;
use skinspire_core::config::AppConfig;
use skinspire_entity::EntityRegistry;
use skinspire_service::ServiceRegistry;

/// Application state containing all shared dependencies.
///
/// Passed to every Axum handler via `State<AppState>`. All fields are
/// cheap to clone.
#[derive(Clone)]
pub struct AppState {
    /// Application configuration.
    pub config: Arc<AppConfig>,
    /// PostgreSQL connection pool.
    pub db_pool: PgPool,
    /// Cache manager, absent when caching is disabled.
    pub cache: Option<CacheManager>,
    /// Entity descriptor registry, built once at startup.
    pub registry: Arc<EntityRegistry>,
    /// All wired services.
    pub services: Arc<ServiceRegistry>,
}
