//! # skinspire-database
//!
//! PostgreSQL connection management, the dynamic tenant-scoped query
//! builder that powers the universal entity service, descriptor-driven
//! row decoding, and concrete repositories for the write paths.

pub mod connection;
pub mod migration;
pub mod query;
pub mod repositories;

pub use connection::DatabasePool;
