//! The universal entity query service.
//!
//! One [`service::EntityService`] instance per entity type, all sharing
//! the same pipeline: tenant-scoped base query, free-text search,
//! categorized filters, sort, pagination, descriptor-driven row
//! serialization with display-name hydration, and a summary hook.

pub mod envelope;
pub mod filters;
pub mod serialize;
pub mod service;
pub mod summary;
