//! Profile service - the owned store instance and its persistence
//!
//! Lifecycle: [`ProfileService::load`] (init) → reads and mutations (serve)
//! → [`ProfileService::shutdown`] (final save).
//!
//! Every mutation runs under the store's write guard, so create, update,
//! delete and apply-result are atomic with respect to one another, and
//! readers always observe whole profiles. After a mutation the full
//! collection is cloned and handed to the [`PersistenceGateway`]; how those
//! saves are ordered is governed by [`SaveOrdering`].

use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::Arc;

use chrono::Utc;
use copion_domain::{
    CopionError, LeaderboardEntry, MatchRecord, MatchReport, NewProfile, PersistenceConfig,
    Profile, ProfilePatch, Result, SaveOrdering, Snapshot,
};
use tokio::sync::{Mutex, RwLock};
use tracing::{debug, error, info, warn};

use super::ports::PersistenceGateway;
use super::store::ProfileStore;
use crate::leaderboard;

/// Owns the profile store and persists it after every mutation
pub struct ProfileService {
    store: RwLock<ProfileStore>,
    gateway: Arc<dyn PersistenceGateway>,
    save_lock: Mutex<()>,
    config: PersistenceConfig,
    dirty: AtomicBool,
}

impl ProfileService {
    /// Load the persisted collection and take ownership of it.
    pub async fn load(gateway: Arc<dyn PersistenceGateway>, config: PersistenceConfig) -> Self {
        let snapshot = gateway.load().await;
        let store = ProfileStore::from_snapshot(snapshot);

        info!(
            backend = %gateway.describe(),
            profiles = store.len(),
            save_ordering = %config.save_ordering,
            "profile store loaded"
        );

        Self::with_store(store, gateway, config)
    }

    /// Wrap an already-built store (used by tests and tooling).
    pub fn with_store(
        store: ProfileStore,
        gateway: Arc<dyn PersistenceGateway>,
        config: PersistenceConfig,
    ) -> Self {
        Self {
            store: RwLock::new(store),
            gateway,
            save_lock: Mutex::new(()),
            config,
            dirty: AtomicBool::new(false),
        }
    }

    // ------------------------------------------------------------------
    // Reads
    // ------------------------------------------------------------------

    pub async fn list(&self) -> Vec<Profile> {
        self.store.read().await.list().to_vec()
    }

    /// # Errors
    /// `CopionError::NotFound` for an unknown id.
    pub async fn get(&self, id: &str) -> Result<Profile> {
        self.store.read().await.get(id).cloned()
    }

    /// Retained match history, oldest first.
    ///
    /// # Errors
    /// `CopionError::NotFound` for an unknown id.
    pub async fn history(&self, id: &str) -> Result<Vec<MatchRecord>> {
        Ok(self.store.read().await.get(id)?.history.clone())
    }

    /// Ranked top-`limit` view of the current profiles.
    pub async fn leaderboard(&self, limit: usize) -> Vec<LeaderboardEntry> {
        leaderboard::build(self.store.read().await.list(), limit)
    }

    pub async fn len(&self) -> usize {
        self.store.read().await.len()
    }

    pub async fn is_empty(&self) -> bool {
        self.store.read().await.is_empty()
    }

    /// Whether the in-memory state holds mutations the backend has not
    /// accepted yet.
    pub fn is_dirty(&self) -> bool {
        self.dirty.load(Ordering::SeqCst)
    }

    pub fn backend(&self) -> String {
        self.gateway.describe()
    }

    /// Ask the backend whether it is reachable.
    ///
    /// # Errors
    /// Whatever the backend reports.
    pub async fn check_backend(&self) -> Result<()> {
        self.gateway.health_check().await
    }

    // ------------------------------------------------------------------
    // Mutations
    // ------------------------------------------------------------------

    /// # Errors
    /// `InvalidInput` for a malformed request; `Io` if the new state could
    /// not be persisted (the profile still exists in memory).
    pub async fn create(&self, request: NewProfile) -> Result<Profile> {
        self.mutate("create", |store| store.create(request)).await
    }

    /// # Errors
    /// `NotFound`, `InvalidInput`, or `Io` as for [`Self::create`].
    pub async fn update(&self, id: &str, patch: ProfilePatch) -> Result<Profile> {
        self.mutate("update", |store| store.update(id, &patch)).await
    }

    /// # Errors
    /// `NotFound` for an unknown id; `Io` if persisting failed.
    pub async fn delete(&self, id: &str) -> Result<Profile> {
        self.mutate("delete", |store| store.delete(id)).await
    }

    /// Record one match for the profile with `id`.
    ///
    /// Not idempotent: every call records a new match.
    ///
    /// # Errors
    /// `NotFound`, `InvalidInput` (score overflow), or `Io`.
    pub async fn apply_result(&self, id: &str, report: MatchReport) -> Result<Profile> {
        let (profile, _record) = self
            .mutate("apply_result", |store| store.apply_result(id, &report, Utc::now()))
            .await?;
        Ok(profile)
    }

    /// Persist the current state unconditionally.
    ///
    /// # Errors
    /// `Io` if every attempt failed.
    pub async fn flush(&self) -> Result<()> {
        // Same order as `mutate`: store guard first, then the save slot.
        let store = self.store.read().await;
        let _save_guard = self.save_lock.lock().await;
        let snapshot = store.snapshot();
        drop(store);
        self.persist("flush", &snapshot).await
    }

    /// Final save before the process exits.
    ///
    /// # Errors
    /// `Io` if the final save failed.
    pub async fn shutdown(&self) -> Result<()> {
        info!(dirty = self.is_dirty(), "profile service shutting down");
        self.flush().await
    }

    async fn mutate<T, F>(&self, operation: &'static str, apply: F) -> Result<T>
    where
        F: FnOnce(&mut ProfileStore) -> Result<T>,
    {
        let mut store = self.store.write().await;
        let value = apply(&mut store)?;
        let snapshot = store.snapshot();

        match self.config.save_ordering {
            SaveOrdering::Serialized => {
                // Queue for the save slot before other writers can mutate,
                // so snapshots reach the backend in mutation order.
                let _save_guard = self.save_lock.lock().await;
                drop(store);
                self.persist(operation, &snapshot).await?;
            }
            SaveOrdering::Unordered => {
                drop(store);
                self.persist(operation, &snapshot).await?;
            }
        }

        Ok(value)
    }

    async fn persist(&self, operation: &'static str, snapshot: &Snapshot) -> Result<()> {
        let attempts = self.config.save_retries.saturating_add(1);
        let mut last_error = None;

        for attempt in 1..=attempts {
            match self.gateway.save(snapshot).await {
                Ok(()) => {
                    self.dirty.store(false, Ordering::SeqCst);
                    debug!(operation, attempt, profiles = snapshot.len(), "snapshot saved");
                    return Ok(());
                }
                Err(err) => {
                    warn!(operation, attempt, attempts, error = %err, "snapshot save failed");
                    last_error = Some(err);
                }
            }
        }

        self.dirty.store(true, Ordering::SeqCst);
        let reason = last_error.map_or_else(|| "no save attempted".to_string(), |e| e.to_string());
        error!(operation, error = %reason, "giving up on snapshot save; state kept in memory");

        Err(CopionError::Io(format!("failed to persist profiles after {operation}: {reason}")))
    }
}
