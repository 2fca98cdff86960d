//! # docvault-api
//!
//! HTTP API layer for DocVault: the Axum router, request handlers, the
//! authenticated-principal extractor, DTOs, and the error-to-status
//! mapping.

pub mod dto;
pub mod error;
pub mod extractors;
pub mod handlers;
pub mod router;
pub mod state;

pub use error::ApiError;
pub use state::AppState;
