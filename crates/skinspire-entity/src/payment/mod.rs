//! Supplier payment entity.

pub mod model;

pub use model::{RecordPayment, SupplierPayment};
