//! Medicine write endpoints.

use axum::Json;
use axum::extract::{Path, State};
use axum::http::StatusCode;
use uuid::Uuid;

use skinspire_core::types::response::ApiResponse;
use skinspire_entity::medicine::Medicine;

use crate::dto::request::CreateMedicineRequest;
use crate::error::ApiError;
use crate::extractors::Tenant;
use crate::handlers::validate;
use crate::state::AppState;

/// POST /api/medicines
pub async fn create(
    State(state): State<AppState>,
    Tenant(ctx): Tenant,
    Json(request): Json<CreateMedicineRequest>,
) -> Result<(StatusCode, Json<ApiResponse<Medicine>>), ApiError> {
    validate(&request)?;
    let medicine = state.services.medicines.create(&ctx, request.into_create()).await?;
    Ok((StatusCode::CREATED, Json(ApiResponse::ok(medicine))))
}

/// DELETE /api/medicines/{id}
pub async fn delete(
    State(state): State<AppState>,
    Path(id): Path<Uuid>,
    Tenant(ctx): Tenant,
) -> Result<StatusCode, ApiError> {
    state.services.medicines.delete(&ctx, id).await?;
    Ok(StatusCode::NO_CONTENT)
}
