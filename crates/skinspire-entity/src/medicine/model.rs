//! Medicine entity model.

use chrono::{DateTime, Utc};
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use sqlx::FromRow;
use uuid::Uuid;

/// A stocked medicine in a hospital's inventory.
#[derive(Debug, Clone, Serialize, Deserialize, FromRow)]
pub struct Medicine {
    /// Unique medicine identifier.
    pub medicine_id: Uuid,
    /// Owning hospital (tenant).
    pub hospital_id: Uuid,
    /// Branch the stock belongs to, if any.
    pub branch_id: Option<Uuid>,
    /// Brand/trade name.
    pub medicine_name: String,
    /// Generic (chemical) name.
    pub generic_name: Option<String>,
    /// Category, e.g. `"tablet"`, `"injection"`.
    pub category: Option<String>,
    /// HSN code for GST classification.
    pub hsn_code: Option<String>,
    /// GST rate as a percentage.
    pub gst_rate: Option<Decimal>,
    /// Maximum retail price.
    pub mrp: Option<Decimal>,
    /// Units in stock.
    pub stock_quantity: i32,
    /// Stock level at which reordering is flagged.
    pub reorder_level: i32,
    /// Lifecycle status: `active`, `discontinued`.
    pub status: String,
    /// Soft-delete flag.
    pub is_deleted: bool,
    /// When the medicine was soft-deleted.
    pub deleted_at: Option<DateTime<Utc>>,
    /// Who soft-deleted the medicine.
    pub deleted_by: Option<Uuid>,
    /// When the row was created.
    pub created_at: DateTime<Utc>,
    /// When the row was last updated.
    pub updated_at: DateTime<Utc>,
}

impl Medicine {
    /// Whether stock has fallen to or below the reorder level.
    pub fn needs_reorder(&self) -> bool {
        self.stock_quantity <= self.reorder_level
    }
}

/// Data required to add a medicine to inventory.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CreateMedicine {
    /// Owning hospital.
    pub hospital_id: Uuid,
    /// Branch, if branch-scoped.
    pub branch_id: Option<Uuid>,
    /// Brand/trade name.
    pub medicine_name: String,
    /// Generic name.
    pub generic_name: Option<String>,
    /// Category.
    pub category: Option<String>,
    /// HSN code.
    pub hsn_code: Option<String>,
    /// GST rate percentage.
    pub gst_rate: Option<Decimal>,
    /// Maximum retail price.
    pub mrp: Option<Decimal>,
    /// Opening stock.
    pub stock_quantity: i32,
    /// Reorder threshold.
    pub reorder_level: i32,
}
