//! Supplier payment repository implementation.
//!
//! Recording a payment is the one multi-statement write in the system:
//! the payment row is inserted and the invoice's paid/balance amounts and
//! settlement status are updated in the same transaction. Concurrent
//! payments against one invoice are serialized by the row lock taken by
//! `SELECT ... FOR UPDATE`.

use rust_decimal::Decimal;
use sqlx::PgPool;

use skinspire_core::error::{AppError, ErrorKind};
use skinspire_core::result::AppResult;
use skinspire_entity::invoice::SupplierInvoice;
use skinspire_entity::payment::{RecordPayment, SupplierPayment};

/// Repository for payment write operations.
#[derive(Debug, Clone)]
pub struct PaymentRepository {
    pool: PgPool,
}

impl PaymentRepository {
    /// Create a new payment repository.
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }

    /// Record a payment against an invoice.
    pub async fn record(&self, data: &RecordPayment) -> AppResult<SupplierPayment> {
        let mut tx = self.pool.begin().await.map_err(|e| {
            AppError::with_source(ErrorKind::Database, "Failed to start transaction", e)
        })?;

        let invoice = sqlx::query_as::<_, SupplierInvoice>(
            "SELECT * FROM supplier_invoices \
             WHERE hospital_id = $1 AND invoice_id = $2 AND NOT is_deleted \
             FOR UPDATE",
        )
        .bind(data.hospital_id)
        .bind(data.invoice_id)
        .fetch_optional(&mut *tx)
        .await
        .map_err(|e| AppError::with_source(ErrorKind::Database, "Failed to load invoice", e))?
        .ok_or_else(|| AppError::not_found(format!("Invoice {} not found", data.invoice_id)))?;

        if invoice.status == "cancelled" {
            return Err(AppError::conflict("Cannot pay a cancelled invoice"));
        }
        if data.amount <= Decimal::ZERO {
            return Err(AppError::validation("Payment amount must be positive"));
        }
        if data.amount > invoice.balance_amount {
            return Err(AppError::validation(format!(
                "Payment {} exceeds outstanding balance {}",
                data.amount, invoice.balance_amount
            )));
        }

        let payment = sqlx::query_as::<_, SupplierPayment>(
            "INSERT INTO supplier_payments \
               (hospital_id, branch_id, supplier_id, invoice_id, payment_date, amount, \
                payment_method, reference_no, status, notes) \
             VALUES ($1, $2, $3, $4, $5, $6, $7, $8, 'approved', $9) \
             RETURNING *",
        )
        .bind(data.hospital_id)
        .bind(data.branch_id)
        .bind(invoice.supplier_id)
        .bind(data.invoice_id)
        .bind(data.payment_date)
        .bind(data.amount)
        .bind(&data.payment_method)
        .bind(&data.reference_no)
        .bind(&data.notes)
        .fetch_one(&mut *tx)
        .await
        .map_err(|e| AppError::with_source(ErrorKind::Database, "Failed to insert payment", e))?;

        let new_paid = invoice.paid_amount + data.amount;
        let new_status = SupplierInvoice::status_for_paid(invoice.total_amount, new_paid);

        sqlx::query(
            "UPDATE supplier_invoices \
             SET paid_amount = $3, balance_amount = total_amount - $3, status = $4, \
                 updated_at = NOW() \
             WHERE hospital_id = $1 AND invoice_id = $2",
        )
        .bind(data.hospital_id)
        .bind(data.invoice_id)
        .bind(new_paid)
        .bind(new_status)
        .execute(&mut *tx)
        .await
        .map_err(|e| AppError::with_source(ErrorKind::Database, "Failed to update invoice", e))?;

        tx.commit().await.map_err(|e| {
            AppError::with_source(ErrorKind::Database, "Failed to commit payment", e)
        })?;

        Ok(payment)
    }
}
