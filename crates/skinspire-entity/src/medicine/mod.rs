//! Medicine (inventory item) entity.

pub mod model;

pub use model::{CreateMedicine, Medicine};
