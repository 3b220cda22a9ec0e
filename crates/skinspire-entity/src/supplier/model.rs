//! Supplier entity model.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use sqlx::FromRow;
use uuid::Uuid;

/// A medicine supplier registered under a hospital.
#[derive(Debug, Clone, Serialize, Deserialize, FromRow)]
pub struct Supplier {
    /// Unique supplier identifier.
    pub supplier_id: Uuid,
    /// Owning hospital (tenant).
    pub hospital_id: Uuid,
    /// Branch the supplier is attached to, if any.
    pub branch_id: Option<Uuid>,
    /// Legal/trading name.
    pub supplier_name: String,
    /// Category, e.g. `"distributor"` or `"manufacturer"`.
    pub supplier_category: Option<String>,
    /// GSTIN registration number.
    pub gst_number: Option<String>,
    /// Contact details (email, phone, address) as JSONB.
    pub contact_info: Option<serde_json::Value>,
    /// Lifecycle status: `active`, `inactive`, `blacklisted`.
    pub status: String,
    /// Soft-delete flag.
    pub is_deleted: bool,
    /// When the supplier was soft-deleted.
    pub deleted_at: Option<DateTime<Utc>>,
    /// Who soft-deleted the supplier.
    pub deleted_by: Option<Uuid>,
    /// When the row was created.
    pub created_at: DateTime<Utc>,
    /// When the row was last updated.
    pub updated_at: DateTime<Utc>,
}

impl Supplier {
    /// Whether the supplier is visible in default (non-deleted) listings.
    pub fn is_visible(&self) -> bool {
        !self.is_deleted
    }
}

/// Data required to register a new supplier.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CreateSupplier {
    /// Owning hospital.
    pub hospital_id: Uuid,
    /// Branch, if branch-scoped.
    pub branch_id: Option<Uuid>,
    /// Legal/trading name.
    pub supplier_name: String,
    /// Category.
    pub supplier_category: Option<String>,
    /// GSTIN registration number.
    pub gst_number: Option<String>,
    /// Contact details as JSON.
    pub contact_info: Option<serde_json::Value>,
}
