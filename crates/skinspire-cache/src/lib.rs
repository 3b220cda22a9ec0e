//! # skinspire-cache
//!
//! Best-effort result caching for list queries. A cache miss or failure
//! always falls through to the database path; correctness never depends
//! on this crate. Invalidation is explicit, triggered after writes.

pub mod keys;
pub mod memory;
pub mod provider;

pub use provider::{CacheManager, CacheProvider};
