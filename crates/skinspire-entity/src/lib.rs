//! # skinspire-entity
//!
//! Declarative entity configuration (field catalog, per-entity descriptors,
//! the startup-built registry) and typed row models for the entities that
//! have dedicated write paths.

pub mod catalog;
pub mod invoice;
pub mod medicine;
pub mod payment;
pub mod supplier;

pub use catalog::descriptor::EntityDescriptor;
pub use catalog::registry::EntityRegistry;
