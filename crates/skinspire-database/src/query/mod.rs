//! Dynamic, descriptor-driven query construction.
//!
//! Everything the universal entity service runs against PostgreSQL is
//! assembled here: tenant/branch scoping, soft-delete visibility,
//! free-text search, structured filter conditions, sorting, pagination,
//! and descriptor-driven row decoding. Column names are only ever taken
//! from entity descriptors, so no request input reaches SQL text.

pub mod builder;
pub mod decode;

use uuid::Uuid;

/// Tenant scope derived per call.
///
/// `hospital_id` is mandatory by the time a query is built; callers with
/// an absent tenant are rejected before reaching this layer.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct QueryScope {
    /// Tenant key; an equality filter on it is applied to every query.
    pub hospital_id: Uuid,
    /// Branch filter, applied only when the descriptor declares a branch column.
    pub branch_id: Option<Uuid>,
    /// Whether soft-deleted rows are visible.
    pub include_deleted: bool,
}

impl QueryScope {
    /// Scope for a tenant with default visibility.
    pub fn for_hospital(hospital_id: Uuid) -> Self {
        Self {
            hospital_id,
            branch_id: None,
            include_deleted: false,
        }
    }

    /// The widened scope used by the get-by-id fallback: tenant only,
    /// deleted rows included.
    pub fn widened(&self) -> Self {
        Self {
            hospital_id: self.hospital_id,
            branch_id: None,
            include_deleted: true,
        }
    }
}
