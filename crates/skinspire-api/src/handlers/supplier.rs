//! Supplier write endpoints.

use axum::Json;
use axum::extract::{Path, State};
use axum::http::StatusCode;
use uuid::Uuid;

use skinspire_core::types::response::ApiResponse;
use skinspire_entity::supplier::Supplier;

use crate::dto::request::CreateSupplierRequest;
use crate::error::ApiError;
use crate::extractors::Tenant;
use crate::handlers::validate;
use crate::state::AppState;

/// POST /api/suppliers
pub async fn create(
    State(state): State<AppState>,
    Tenant(ctx): Tenant,
    Json(request): Json<CreateSupplierRequest>,
) -> Result<(StatusCode, Json<ApiResponse<Supplier>>), ApiError> {
    validate(&request)?;
    let supplier = state.services.suppliers.create(&ctx, request.into_create()).await?;
    Ok((StatusCode::CREATED, Json(ApiResponse::ok(supplier))))
}

/// DELETE /api/suppliers/{id}
pub async fn delete(
    State(state): State<AppState>,
    Path(id): Path<Uuid>,
    Tenant(ctx): Tenant,
) -> Result<StatusCode, ApiError> {
    state.services.suppliers.delete(&ctx, id).await?;
    Ok(StatusCode::NO_CONTENT)
}

/// POST /api/suppliers/{id}/restore
pub async fn restore(
    State(state): State<AppState>,
    Path(id): Path<Uuid>,
    Tenant(ctx): Tenant,
) -> Result<StatusCode, ApiError> {
    state.services.suppliers.restore(&ctx, id).await?;
    Ok(StatusCode::NO_CONTENT)
}
