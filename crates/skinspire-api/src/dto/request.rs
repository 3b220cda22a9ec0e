//! Request DTOs with validation.
//!
//! Tenant fields never appear in request bodies; the services take the
//! hospital and branch from the request context.

use chrono::NaiveDate;
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use uuid::Uuid;
use validator::Validate;

use skinspire_entity::medicine::CreateMedicine;
use skinspire_entity::payment::RecordPayment;
use skinspire_entity::supplier::CreateSupplier;

/// Create supplier request body.
#[derive(Debug, Clone, Serialize, Deserialize, Validate)]
pub struct CreateSupplierRequest {
    /// Legal/trading name.
    #[validate(length(min = 1, max = 200, message = "Supplier name is required"))]
    pub supplier_name: String,
    /// Category.
    pub supplier_category: Option<String>,
    /// GSTIN registration number.
    #[validate(length(min = 15, max = 15, message = "GST number must be 15 characters"))]
    pub gst_number: Option<String>,
    /// Contact details as JSON.
    pub contact_info: Option<serde_json::Value>,
}

impl CreateSupplierRequest {
    pub fn into_create(self) -> CreateSupplier {
        CreateSupplier {
            hospital_id: Uuid::nil(),
            branch_id: None,
            supplier_name: self.supplier_name,
            supplier_category: self.supplier_category,
            gst_number: self.gst_number,
            contact_info: self.contact_info,
        }
    }
}

/// Create medicine request body.
#[derive(Debug, Clone, Serialize, Deserialize, Validate)]
pub struct CreateMedicineRequest {
    /// Brand/trade name.
    #[validate(length(min = 1, max = 200, message = "Medicine name is required"))]
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
    #[serde(default)]
    pub stock_quantity: i32,
    /// Reorder threshold.
    #[serde(default)]
    pub reorder_level: i32,
}

impl CreateMedicineRequest {
    pub fn into_create(self) -> CreateMedicine {
        CreateMedicine {
            hospital_id: Uuid::nil(),
            branch_id: None,
            medicine_name: self.medicine_name,
            generic_name: self.generic_name,
            category: self.category,
            hsn_code: self.hsn_code,
            gst_rate: self.gst_rate,
            mrp: self.mrp,
            stock_quantity: self.stock_quantity,
            reorder_level: self.reorder_level,
        }
    }
}

/// Record payment request body.
#[derive(Debug, Clone, Serialize, Deserialize, Validate)]
pub struct RecordPaymentRequest {
    /// Invoice being settled.
    pub invoice_id: Uuid,
    /// Date the payment was made.
    pub payment_date: NaiveDate,
    /// Amount paid. The service checks it against the invoice balance.
    pub amount: Decimal,
    /// Instrument used.
    #[validate(length(min = 1, message = "Payment method is required"))]
    pub payment_method: String,
    /// Cheque/UTR/transaction reference.
    pub reference_no: Option<String>,
    /// Free-form notes.
    pub notes: Option<String>,
}

impl RecordPaymentRequest {
    pub fn into_record(self) -> RecordPayment {
        RecordPayment {
            hospital_id: Uuid::nil(),
            branch_id: None,
            invoice_id: self.invoice_id,
            payment_date: self.payment_date,
            amount: self.amount,
            payment_method: self.payment_method,
            reference_no: self.reference_no,
            notes: self.notes,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_blank_supplier_name_fails_validation() {
        let req = CreateSupplierRequest {
            supplier_name: String::new(),
            supplier_category: None,
            gst_number: None,
            contact_info: None,
        };
        assert!(req.validate().is_err());
    }

    #[test]
    fn test_gst_number_length_is_enforced() {
        let req = CreateSupplierRequest {
            supplier_name: "Acme Pharma".to_string(),
            supplier_category: None,
            gst_number: Some("too-short".to_string()),
            contact_info: None,
        };
        assert!(req.validate().is_err());

        let req = CreateSupplierRequest {
            gst_number: Some("27AAPFU0939F1ZV".to_string()),
            ..req
        };
        assert!(req.validate().is_ok());
    }
}
