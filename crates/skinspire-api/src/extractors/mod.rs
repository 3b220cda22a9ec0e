//! Custom Axum extractors.

pub mod search;
pub mod tenant;

pub use search::SearchParams;
pub use tenant::Tenant;
