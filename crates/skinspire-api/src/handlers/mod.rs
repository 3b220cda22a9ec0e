//! HTTP request handlers.

pub mod entity;
pub mod health;
pub mod medicine;
pub mod payment;
pub mod supplier;

use validator::Validate;

use skinspire_core::error::AppError;

use crate::error::ApiError;

/// Run derive-based validation, mapping failures to a 400 response.
pub(crate) fn validate(request: &impl Validate) -> Result<(), ApiError> {
    request.validate().map_err(|errors| {
        let mut messages: Vec<String> = errors
            .field_errors()
            .iter()
            .flat_map(|(field, errs)| {
                errs.iter().map(move |e| match &e.message {
                    Some(message) => format!("{field}: {message}"),
                    None => format!("{field}: invalid value"),
                })
            })
            .collect();
        messages.sort();
        ApiError(AppError::validation(messages.join("; ")))
    })
}
