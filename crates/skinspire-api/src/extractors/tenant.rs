//! Tenant context extraction from request headers.
//!
//! Every request carries its tenant in `X-Hospital-Id` (and optionally
//! `X-Branch-Id` and `X-User-Id`). A missing hospital header is not a
//! rejection here: list endpoints answer it with the uniform failure
//! envelope, write endpoints with a validation error, both downstream.

use axum::extract::FromRequestParts;
use axum::http::HeaderMap;
use axum::http::request::Parts;
use uuid::Uuid;

use skinspire_core::error::AppError;
use skinspire_service::TenantContext;

use crate::error::ApiError;

/// Header naming the acting tenant.
pub const HOSPITAL_HEADER: &str = "x-hospital-id";
/// Header narrowing the query to one branch.
pub const BRANCH_HEADER: &str = "x-branch-id";
/// Header naming the acting user.
pub const USER_HEADER: &str = "x-user-id";

/// Extractor wrapping [`TenantContext`].
#[derive(Debug, Clone, Copy)]
pub struct Tenant(pub TenantContext);

impl<S: Send + Sync> FromRequestParts<S> for Tenant {
    type Rejection = ApiError;

    async fn from_request_parts(parts: &mut Parts, _state: &S) -> Result<Self, Self::Rejection> {
        let hospital_id = parse_uuid_header(&parts.headers, HOSPITAL_HEADER)?;
        let branch_id = parse_uuid_header(&parts.headers, BRANCH_HEADER)?;
        let user_id = parse_uuid_header(&parts.headers, USER_HEADER)?;
        let include_deleted = query_flag(parts.uri.query(), "include_deleted");

        Ok(Self(TenantContext {
            user_id,
            hospital_id,
            branch_id,
            include_deleted,
        }))
    }
}

/// Parse an optional UUID header; a present-but-malformed value is rejected.
fn parse_uuid_header(headers: &HeaderMap, name: &str) -> Result<Option<Uuid>, ApiError> {
    let Some(raw) = headers.get(name) else {
        return Ok(None);
    };
    let raw = raw
        .to_str()
        .map_err(|_| ApiError(AppError::validation(format!("Header {name} is not valid text"))))?;
    Uuid::parse_str(raw)
        .map(Some)
        .map_err(|_| ApiError(AppError::validation(format!("Header {name} is not a valid UUID"))))
}

/// Whether a boolean query flag is set.
fn query_flag(query: Option<&str>, name: &str) -> bool {
    let Some(query) = query else {
        return false;
    };
    query.split('&').any(|pair| {
        let mut parts = pair.splitn(2, '=');
        parts.next() == Some(name)
            && matches!(parts.next(), None | Some("true") | Some("1") | Some("yes"))
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use axum::http::HeaderValue;

    #[test]
    fn test_parse_uuid_header_rejects_garbage() {
        let mut headers = HeaderMap::new();
        headers.insert(HOSPITAL_HEADER, HeaderValue::from_static("not-a-uuid"));
        assert!(parse_uuid_header(&headers, HOSPITAL_HEADER).is_err());
    }

    #[test]
    fn test_parse_uuid_header_absent_is_none() {
        let headers = HeaderMap::new();
        assert_eq!(parse_uuid_header(&headers, HOSPITAL_HEADER).unwrap(), None);
    }

    #[test]
    fn test_query_flag() {
        assert!(query_flag(Some("page=2&include_deleted=true"), "include_deleted"));
        assert!(query_flag(Some("include_deleted"), "include_deleted"));
        assert!(!query_flag(Some("include_deleted=false"), "include_deleted"));
        assert!(!query_flag(None, "include_deleted"));
    }
}
