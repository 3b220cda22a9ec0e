//! Supplier entity.

pub mod model;

pub use model::{CreateSupplier, Supplier};
