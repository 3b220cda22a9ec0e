//! Universal entity endpoints: list entity types, search, and detail.

use axum::Json;
use axum::extract::{Path, Query, State};
use serde_json::{Map, Value};
use uuid::Uuid;

use skinspire_core::error::AppError;
use skinspire_core::types::response::ApiResponse;
use skinspire_service::entity::envelope::SearchEnvelope;

use crate::dto::response::EntityTypesResponse;
use crate::error::ApiError;
use crate::extractors::{SearchParams, Tenant};
use crate::state::AppState;

/// GET /api/entities
pub async fn list_entity_types(State(state): State<AppState>) -> Json<ApiResponse<EntityTypesResponse>> {
    let entity_types = state
        .services
        .entity_types()
        .into_iter()
        .map(str::to_string)
        .collect();
    Json(ApiResponse::ok(EntityTypesResponse { entity_types }))
}

/// GET /api/entities/{entity_type}
pub async fn search(
    State(state): State<AppState>,
    Path(entity_type): Path<String>,
    Tenant(ctx): Tenant,
    Query(params): Query<SearchParams>,
) -> Result<Json<SearchEnvelope>, ApiError> {
    let service = state
        .services
        .entity(&entity_type)
        .ok_or_else(|| ApiError(AppError::not_found(format!("Unknown entity type: {entity_type}"))))?;

    let query = params.into_query();
    Ok(Json(service.search_data(&ctx, &query).await))
}

/// GET /api/entities/{entity_type}/{id}
pub async fn detail(
    State(state): State<AppState>,
    Path((entity_type, id)): Path<(String, Uuid)>,
    Tenant(ctx): Tenant,
) -> Result<Json<ApiResponse<Map<String, Value>>>, ApiError> {
    let service = state
        .services
        .entity(&entity_type)
        .ok_or_else(|| ApiError(AppError::not_found(format!("Unknown entity type: {entity_type}"))))?;

    let item = service
        .get_by_id(&ctx, id)
        .await?
        .ok_or_else(|| ApiError(AppError::not_found(format!("{entity_type} {id} not found"))))?;
    Ok(Json(ApiResponse::ok(item)))
}
