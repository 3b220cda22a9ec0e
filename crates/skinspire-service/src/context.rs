//! Request context carrying the acting user and tenant scope.

use uuid::Uuid;

use skinspire_core::error::AppError;
use skinspire_core::result::AppResult;
use skinspire_database::query::QueryScope;

/// Context for the current request, extracted by the HTTP layer and
/// passed into service methods so that every operation knows *who* is
/// acting and under *which* tenant.
///
/// `hospital_id` stays optional here so the service can reject its
/// absence with the uniform error envelope instead of a transport error.
#[derive(Debug, Clone, Copy, Default)]
pub struct TenantContext {
    /// The acting user, when known.
    pub user_id: Option<Uuid>,
    /// Tenant key. Mandatory for every query; validated by [`Self::scope`].
    pub hospital_id: Option<Uuid>,
    /// Branch filter, when the caller narrows to one branch.
    pub branch_id: Option<Uuid>,
    /// The caller's show-deleted preference (defaults to false).
    pub include_deleted: bool,
}

impl TenantContext {
    /// Context for a hospital with default visibility.
    pub fn for_hospital(hospital_id: Uuid) -> Self {
        Self {
            hospital_id: Some(hospital_id),
            ..Self::default()
        }
    }

    /// Validate the tenant key and derive the query scope.
    pub fn scope(&self) -> AppResult<QueryScope> {
        let hospital_id = self
            .hospital_id
            .ok_or_else(|| AppError::validation("Hospital ID required"))?;
        Ok(QueryScope {
            hospital_id,
            branch_id: self.branch_id,
            include_deleted: self.include_deleted,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_missing_hospital_is_a_validation_error() {
        let ctx = TenantContext::default();
        let err = ctx.scope().unwrap_err();
        assert_eq!(err.message, "Hospital ID required");
    }

    #[test]
    fn test_scope_carries_branch_and_visibility() {
        let hospital = Uuid::new_v4();
        let branch = Uuid::new_v4();
        let ctx = TenantContext {
            user_id: None,
            hospital_id: Some(hospital),
            branch_id: Some(branch),
            include_deleted: true,
        };
        let scope = ctx.scope().unwrap();
        assert_eq!(scope.hospital_id, hospital);
        assert_eq!(scope.branch_id, Some(branch));
        assert!(scope.include_deleted);
    }
}
