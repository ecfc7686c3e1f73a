//! # Copion API
//!
//! HTTP application layer - handlers, routing and main entry point.
//!
//! This crate contains:
//! - Command handlers for the `/api` routes
//! - Application context (dependency injection)
//! - Error-to-response mapping
//! - Logging bootstrap and health reporting
//!
//! ## Architecture
//! - Depends on `domain`, `core`, and `infra`
//! - Wires up the hexagonal architecture
//! - Serves the profile service over axum

pub mod commands;
pub mod context;
pub mod error;
pub mod router;
pub mod utils;

// Re-export for convenience
pub use context::AppContext;
pub use error::ApiError;
pub use router::router;
