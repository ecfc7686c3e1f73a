//! Application context - dependency injection container

use std::sync::Arc;

use copion_core::{PersistenceGateway, ProfileService};
use copion_domain::{Config, Result};
use copion_infra::{build_gateway, config};
use tracing::info;

/// Application context - holds all services and dependencies
pub struct AppContext {
    pub config: Config,
    pub profiles: Arc<ProfileService>,
}

impl AppContext {
    /// Load configuration and build the context from it.
    ///
    /// # Errors
    /// `CopionError::Config` for malformed configuration.
    pub async fn new() -> Result<Self> {
        let config = config::load()?;
        Ok(Self::new_with_config(config).await)
    }

    /// Build the context for an already-loaded configuration.
    ///
    /// An unusable storage backend is not fatal: the service starts empty
    /// and reports the backend through `/api/health`.
    pub async fn new_with_config(config: Config) -> Self {
        let gateway = build_gateway(&config.storage);
        Self::with_gateway(config, gateway).await
    }

    /// Build the context around a caller-supplied gateway.
    pub async fn with_gateway(config: Config, gateway: Arc<dyn PersistenceGateway>) -> Self {
        let profiles = Arc::new(ProfileService::load(gateway, config.persistence.clone()).await);

        info!(
            backend = %profiles.backend(),
            profiles = profiles.len().await,
            "application context ready"
        );

        Self { config, profiles }
    }

    /// Persist the final state before exit.
    ///
    /// # Errors
    /// `CopionError::Io` if the final save failed.
    pub async fn shutdown(&self) -> Result<()> {
        self.profiles.shutdown().await
    }
}
