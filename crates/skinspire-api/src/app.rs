//! Application builder: wires cache, registry, and services into an
//! Axum app and runs the HTTP server.

use std::sync::Arc;

use sqlx::PgPool;
use tracing::info;

use skinspire_cache::provider::CacheManager;
use skinspire_core::config::AppConfig;
use skinspire_core::error::AppError;
use skinspire_core::result::AppResult;
use skinspire_entity::EntityRegistry;
use skinspire_service::ServiceRegistry;

use crate::router::build_router;
use crate::state::AppState;

/// Runs the SkinSpire server with the given configuration and database pool.
pub async fn run_server(config: AppConfig, db_pool: PgPool) -> AppResult<()> {
    info!("Starting SkinSpire server...");

    let cache = if config.cache.enabled {
        info!(provider = %config.cache.provider, "Initializing cache");
        Some(CacheManager::new(&config.cache)?)
    } else {
        info!("Caching disabled");
        None
    };

    let registry = Arc::new(EntityRegistry::builtin());
    info!(entities = ?registry.entity_types(), "Entity registry built");

    let services = Arc::new(ServiceRegistry::build(&registry, db_pool.clone(), cache.clone())?);

    let state = AppState {
        config: Arc::new(config.clone()),
        db_pool,
        cache,
        registry,
        services,
    };

    let app = build_router(state);
    let addr = format!("{}:{}", config.server.host, config.server.port);
    let listener = tokio::net::TcpListener::bind(&addr)
        .await
        .map_err(|e| AppError::internal(format!("Failed to bind {addr}: {e}")))?;

    info!("SkinSpire server listening on {addr}");

    axum::serve(listener, app)
        .with_graceful_shutdown(shutdown_signal())
        .await
        .map_err(|e| AppError::internal(format!("Server error: {e}")))?;

    info!("Server stopped");
    Ok(())
}

async fn shutdown_signal() {
    let ctrl_c = async {
        if let Err(e) = tokio::signal::ctrl_c().await {
            tracing::error!(error = %e, "Failed to install Ctrl+C handler");
        }
    };

    #[cfg(unix)]
    let terminate = async {
        match tokio::signal::unix::signal(tokio::signal::unix::SignalKind::terminate()) {
            Ok(mut signal) => {
                signal.recv().await;
            }
            Err(e) => tracing::error!(error = %e, "Failed to install SIGTERM handler"),
        }
    };

    #[cfg(not(unix))]
    let terminate = std::future::pending::<()>();

    tokio::select! {
        _ = ctrl_c => info!("Received Ctrl+C, shutting down"),
        _ = terminate => info!("Received SIGTERM, shutting down"),
    }
}
