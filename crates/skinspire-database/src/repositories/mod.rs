//! Concrete repositories for entities with dedicated write paths.

pub mod medicine;
pub mod payment;
pub mod supplier;
