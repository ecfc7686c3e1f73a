//! Volatile gateway: state lives only as long as the process.

use async_trait::async_trait;
use copion_core::PersistenceGateway;
use copion_domain::{Result, Snapshot};
use tokio::sync::Mutex;

/// In-memory implementation of `PersistenceGateway`
#[derive(Default)]
pub struct MemoryGateway {
    snapshot: Mutex<Snapshot>,
}

impl MemoryGateway {
    /// Seed the collection `load` will return.
    pub fn with_snapshot(snapshot: Snapshot) -> Self {
        Self { snapshot: Mutex::new(snapshot) }
    }

    /// The last saved collection.
    pub async fn current(&self) -> Snapshot {
        self.snapshot.lock().await.clone()
    }
}

#[async_trait]
impl PersistenceGateway for MemoryGateway {
    async fn load(&self) -> Snapshot {
        self.current().await
    }

    async fn save(&self, snapshot: &Snapshot) -> Result<()> {
        *self.snapshot.lock().await = snapshot.clone();
        Ok(())
    }

    fn describe(&self) -> String {
        "memory".to_string()
    }
}
