//! # Copion Infrastructure
//!
//! Infrastructure implementations of core domain ports.
//!
//! This crate contains:
//! - Persistence gateways (JSON document, SQLite, in-memory)
//! - SQLite connection pooling and schema management
//! - Configuration loading from the environment and files
//! - Conversions from external error types into `CopionError`
//!
//! ## Architecture
//! - Implements traits defined in `copion-core`
//! - Contains all "impure" code (file and database I/O)

pub mod config;
pub mod database;
pub mod errors;
pub mod snapshot;

// Re-export commonly used items
pub use database::DbManager;
pub use errors::InfraError;
pub use snapshot::{
    build_gateway, JsonSnapshotGateway, MemoryGateway, OfflineGateway, SqliteSnapshotGateway,
};
