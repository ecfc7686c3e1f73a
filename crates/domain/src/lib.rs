//! # Copion Domain
//!
//! Business domain types for the Copion profile service.
//!
//! This crate contains:
//! - Player profiles, preferences, statistics and match history records
//! - Partial-update payloads used by the profile store
//! - Domain error types and Result definitions
//! - Configuration structures
//! - Domain constants (history bound, creation defaults, field limits)
//!
//! ## Architecture
//! - No dependencies on other Copion crates
//! - Only external dependencies allowed
//! - Pure domain models and data structures

pub mod config;
pub mod constants;
pub mod errors;
pub mod macros;
pub mod types;

// Re-export commonly used items
pub use config::*;
pub use errors::*;
pub use types::*;
