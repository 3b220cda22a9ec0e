//! Supplier payment entity model.

use chrono::{DateTime, NaiveDate, Utc};
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use sqlx::FromRow;
use uuid::Uuid;

/// A payment made against a supplier invoice.
#[derive(Debug, Clone, Serialize, Deserialize, FromRow)]
pub struct SupplierPayment {
    /// Unique payment identifier.
    pub payment_id: Uuid,
    /// Owning hospital (tenant).
    pub hospital_id: Uuid,
    /// Branch the payment belongs to, if any.
    pub branch_id: Option<Uuid>,
    /// Supplier being paid.
    pub supplier_id: Uuid,
    /// Invoice the payment settles.
    pub invoice_id: Uuid,
    /// Date the payment was made.
    pub payment_date: NaiveDate,
    /// Amount paid.
    pub amount: Decimal,
    /// Instrument: `cash`, `cheque`, `bank_transfer`, `upi`.
    pub payment_method: String,
    /// Cheque/UTR/transaction reference.
    pub reference_no: Option<String>,
    /// Workflow status: `pending`, `approved`, `reversed`.
    pub status: String,
    /// Free-form notes.
    pub notes: Option<String>,
    /// Soft-delete flag.
    pub is_deleted: bool,
    /// When the payment was soft-deleted.
    pub deleted_at: Option<DateTime<Utc>>,
    /// Who soft-deleted the payment.
    pub deleted_by: Option<Uuid>,
    /// When the row was created.
    pub created_at: DateTime<Utc>,
    /// When the row was last updated.
    pub updated_at: DateTime<Utc>,
}

/// Data required to record a payment against an invoice.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct RecordPayment {
    /// Owning hospital.
    pub hospital_id: Uuid,
    /// Branch, if branch-scoped.
    pub branch_id: Option<Uuid>,
    /// Invoice being settled.
    pub invoice_id: Uuid,
    /// Date the payment was made.
    pub payment_date: NaiveDate,
    /// Amount paid.
    pub amount: Decimal,
    /// Instrument used.
    pub payment_method: String,
    /// Cheque/UTR/transaction reference.
    pub reference_no: Option<String>,
    /// Free-form notes.
    pub notes: Option<String>,
}
