//! Stand-in for a backend that could not be opened at startup.

use async_trait::async_trait;
use copion_core::PersistenceGateway;
use copion_domain::{CopionError, Result, Snapshot};
use tracing::warn;

/// Loads an empty collection and rejects every save with the open error,
/// so the service runs in memory and reports itself unhealthy.
pub struct OfflineGateway {
    label: String,
    reason: String,
}

impl OfflineGateway {
    pub fn new(label: impl Into<String>, reason: impl Into<String>) -> Self {
        Self { label: label.into(), reason: reason.into() }
    }
}

#[async_trait]
impl PersistenceGateway for OfflineGateway {
    async fn load(&self) -> Snapshot {
        warn!(backend = %self.label, reason = %self.reason, "storage offline, starting empty");
        Snapshot::default()
    }

    async fn save(&self, _snapshot: &Snapshot) -> Result<()> {
        Err(CopionError::Database(format!("{} is offline: {}", self.label, self.reason)))
    }

    async fn health_check(&self) -> Result<()> {
        Err(CopionError::Database(self.reason.clone()))
    }

    fn describe(&self) -> String {
        format!("offline:{}", self.label)
    }
}
