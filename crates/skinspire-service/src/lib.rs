//! # skinspire-service
//!
//! The universal entity query service: declarative search, filter, sort,
//! paginate, and serialize behavior over tenant-scoped entities, plus the
//! concrete per-entity services (suppliers, medicines, invoices,
//! payments) that hang domain summaries and write paths off it.

pub mod context;
pub mod entity;
pub mod medicines;
pub mod payments;
pub mod registry;
pub mod suppliers;

pub use context::TenantContext;
pub use entity::service::EntityService;
pub use registry::ServiceRegistry;
