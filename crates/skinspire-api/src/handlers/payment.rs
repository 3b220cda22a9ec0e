//! Payment write endpoints.

use axum::Json;
use axum::extract::State;
use axum::http::StatusCode;

use skinspire_core::types::response::ApiResponse;
use skinspire_entity::payment::SupplierPayment;

use crate::dto::request::RecordPaymentRequest;
use crate::error::ApiError;
use crate::extractors::Tenant;
use crate::handlers::validate;
use crate::state::AppState;

/// POST /api/payments
pub async fn record(
    State(state): State<AppState>,
    Tenant(ctx): Tenant,
    Json(request): Json<RecordPaymentRequest>,
) -> Result<(StatusCode, Json<ApiResponse<SupplierPayment>>), ApiError> {
    validate(&request)?;
    let payment = state.services.payments.record(&ctx, request.into_record()).await?;
    Ok((StatusCode::CREATED, Json(ApiResponse::ok(payment))))
}
