//! Shared query and response types.

pub mod filter;
pub mod pagination;
pub mod response;
pub mod sorting;
