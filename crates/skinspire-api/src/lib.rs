//! # skinspire-api
//!
//! HTTP API layer for SkinSpire built on Axum.
//!
//! Exposes the universal entity endpoints (list, detail), the write
//! paths for suppliers, medicines, and payments, health checks,
//! middleware (CORS, compression, logging), extractors, DTOs, and error
//! mapping.

pub mod app;
pub mod dto;
pub mod error;
pub mod extractors;
pub mod handlers;
pub mod middleware;
pub mod router;
pub mod state;

pub use app::run_server;
pub use state::AppState;
