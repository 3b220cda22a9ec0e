//! Response DTOs.

use serde::{Deserialize, Serialize};

/// Basic health response.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct HealthResponse {
    /// Service status.
    pub status: String,
    /// Crate version.
    pub version: String,
}

/// Detailed health response including dependency states.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct DetailedHealthResponse {
    /// Service status.
    pub status: String,
    /// Database connectivity.
    pub database: String,
    /// Cache connectivity.
    pub cache: String,
    /// Registered entity types.
    pub entities: Vec<String>,
}

/// Registered entity types.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct EntityTypesResponse {
    /// Entity type names, sorted.
    pub entity_types: Vec<String>,
}
