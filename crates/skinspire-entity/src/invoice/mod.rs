//! Supplier invoice entity.

pub mod model;

pub use model::SupplierInvoice;
