//! Persistence gateway adapters
//!
//! Each adapter implements [`PersistenceGateway`] for one storage backend.
//! [`build_gateway`] picks the adapter named by the storage configuration.

pub mod json_gateway;
pub mod memory_gateway;
pub mod offline_gateway;
pub mod sqlite_gateway;

use std::sync::Arc;

use copion_core::PersistenceGateway;
use copion_domain::{StorageBackend, StorageConfig};
use tracing::{debug, error};

pub use json_gateway::JsonSnapshotGateway;
pub use memory_gateway::MemoryGateway;
pub use offline_gateway::OfflineGateway;
pub use sqlite_gateway::SqliteSnapshotGateway;

/// Build the gateway for the configured backend.
///
/// Never fails: a sqlite location that cannot be opened yields an
/// [`OfflineGateway`], so the service starts empty and every save reports
/// the open error.
pub fn build_gateway(config: &StorageConfig) -> Arc<dyn PersistenceGateway> {
    let gateway: Arc<dyn PersistenceGateway> = match config.backend {
        StorageBackend::Json => Arc::new(JsonSnapshotGateway::new(&config.path)),
        StorageBackend::Sqlite => match SqliteSnapshotGateway::open(&config.path, config.pool_size)
        {
            Ok(gateway) => Arc::new(gateway),
            Err(err) => {
                error!(db_path = %config.path, error = %err, "sqlite backend unavailable");
                Arc::new(OfflineGateway::new(format!("sqlite:{}", config.path), err.to_string()))
            }
        },
        StorageBackend::Memory => Arc::new(MemoryGateway::default()),
    };

    debug!(backend = %gateway.describe(), "persistence gateway ready");
    gateway
}

#[cfg(test)]
mod tests {
    use tempfile::TempDir;

    use super::*;

    #[test]
    fn builds_each_backend() {
        let dir = TempDir::new().unwrap();

        for (backend, file) in [
            (StorageBackend::Json, "perfiles.json"),
            (StorageBackend::Sqlite, "perfiles.db"),
            (StorageBackend::Memory, ""),
        ] {
            let config = StorageConfig {
                backend,
                path: dir.path().join(file).display().to_string(),
                pool_size: 1,
            };
            let gateway = build_gateway(&config);
            assert!(gateway.describe().starts_with(backend.as_str()));
        }
    }

    #[tokio::test]
    async fn unopenable_sqlite_location_goes_offline() {
        let dir = TempDir::new().unwrap();
        let blocker = dir.path().join("file");
        std::fs::write(&blocker, "not a directory").unwrap();
        let config = StorageConfig {
            backend: StorageBackend::Sqlite,
            path: blocker.join("perfiles.db").display().to_string(),
            pool_size: 1,
        };

        let gateway = build_gateway(&config);

        assert!(gateway.describe().starts_with("offline:"));
        assert!(gateway.load().await.is_empty());
        assert!(gateway.save(&copion_domain::Snapshot::default()).await.is_err());
        assert!(gateway.health_check().await.is_err());
    }
}
