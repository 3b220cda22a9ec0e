//! Declarative entity configuration.
//!
//! Every entity type the universal query service can serve is described by
//! an [`descriptor::EntityDescriptor`]: its table, primary key, tenant and
//! branch columns, soft-delete capability, field catalog, and virtual
//! fields. Descriptors are built once at startup into an immutable
//! [`registry::EntityRegistry`] and shared by reference from then on.

pub mod descriptor;
pub mod field;
pub mod registry;
