//! # skinspire-core
//!
//! Core crate for the SkinSpire clinic platform. Contains configuration
//! schemas, shared query types (pagination, sorting, filter values), and
//! the unified error system.
//!
//! This crate has **no** internal dependencies on other SkinSpire crates.

pub mod config;
pub mod error;
pub mod result;
pub mod types;

pub use error::AppError;
pub use result::AppResult;
