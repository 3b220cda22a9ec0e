//! Supplier invoice entity model.

use chrono::{DateTime, NaiveDate, Utc};
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use sqlx::FromRow;
use uuid::Uuid;

/// A purchase invoice received from a supplier, with GST breakup.
#[derive(Debug, Clone, Serialize, Deserialize, FromRow)]
pub struct SupplierInvoice {
    /// Unique invoice identifier.
    pub invoice_id: Uuid,
    /// Owning hospital (tenant).
    pub hospital_id: Uuid,
    /// Branch the purchase belongs to, if any.
    pub branch_id: Option<Uuid>,
    /// Issuing supplier.
    pub supplier_id: Uuid,
    /// Supplier's invoice number.
    pub invoice_number: String,
    /// Invoice date.
    pub invoice_date: NaiveDate,
    /// Gross total including tax.
    pub total_amount: Decimal,
    /// Central GST component.
    pub cgst_amount: Decimal,
    /// State GST component.
    pub sgst_amount: Decimal,
    /// Integrated GST component (inter-state purchases).
    pub igst_amount: Decimal,
    /// Amount paid so far.
    pub paid_amount: Decimal,
    /// Outstanding balance.
    pub balance_amount: Decimal,
    /// Settlement status: `unpaid`, `partial`, `paid`, `cancelled`.
    pub status: String,
    /// Soft-delete flag.
    pub is_deleted: bool,
    /// When the invoice was soft-deleted.
    pub deleted_at: Option<DateTime<Utc>>,
    /// Who soft-deleted the invoice.
    pub deleted_by: Option<Uuid>,
    /// When the row was created.
    pub created_at: DateTime<Utc>,
    /// When the row was last updated.
    pub updated_at: DateTime<Utc>,
}

impl SupplierInvoice {
    /// Total GST across all components.
    pub fn gst_total(&self) -> Decimal {
        self.cgst_amount + self.sgst_amount + self.igst_amount
    }

    /// Settlement status implied by a paid amount against the total.
    pub fn status_for_paid(total: Decimal, paid: Decimal) -> &'static str {
        if paid >= total {
            "paid"
        } else if paid > Decimal::ZERO {
            "partial"
        } else {
            "unpaid"
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_status_for_paid() {
        let total = Decimal::new(10_000, 2);
        assert_eq!(SupplierInvoice::status_for_paid(total, Decimal::ZERO), "unpaid");
        assert_eq!(
            SupplierInvoice::status_for_paid(total, Decimal::new(4_000, 2)),
            "partial"
        );
        assert_eq!(SupplierInvoice::status_for_paid(total, total), "paid");
    }
}
