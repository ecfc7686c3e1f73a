//! Port interfaces for profile persistence
//!
//! The engine persists whole collections, never single records, so the
//! gateway only has to load and save a [`Snapshot`]. How the snapshot is
//! encoded (a JSON document, relational tables) is the adapter's business.

use async_trait::async_trait;
use copion_domain::{Result, Snapshot};

/// Trait for loading and saving the full profile collection
#[async_trait]
pub trait PersistenceGateway: Send + Sync {
    /// Load the collection once at startup.
    ///
    /// Fail-open: a missing, empty, or undecodable backing store yields an
    /// empty snapshot instead of an error.
    async fn load(&self) -> Snapshot;

    /// Replace the persisted collection with `snapshot`.
    async fn save(&self, snapshot: &Snapshot) -> Result<()>;

    /// Probe the backing store without touching the collection.
    async fn health_check(&self) -> Result<()> {
        Ok(())
    }

    /// Short backend label for logs and health reports
    fn describe(&self) -> String;
}
