//! # Copion Core
//!
//! Pure business logic layer - no infrastructure dependencies.
//!
//! This crate contains:
//! - The in-memory profile store (the unit of mutation and lookup)
//! - The stats engine that applies a match result to a profile
//! - The leaderboard builder
//! - The persistence port and the service that drives it
//!
//! ## Architecture Principles
//! - Only depends on `copion-domain`
//! - No file, database, or HTTP code
//! - All external dependencies via traits
//! - Pure, testable business logic

pub mod leaderboard;
pub mod profile;
pub mod stats;

// Re-export specific items to avoid ambiguity
pub use profile::ports::PersistenceGateway;
pub use profile::service::ProfileService;
pub use profile::store::ProfileStore;
