use std::sync::{Arc, Mutex};
use std::time::Duration;

use async_trait::async_trait;
use copion_core::PersistenceGateway;
use copion_domain::{CopionError, Profile, Result as DomainResult, Snapshot};

/// In-memory mock for `PersistenceGateway`.
///
/// Serves a fixed snapshot on load and records every saved snapshot. Saves
/// can be made to fail, and can be slowed down so that concurrent saves
/// overlap.
#[derive(Default, Clone)]
pub struct RecordingGateway {
    initial: Snapshot,
    saved: Arc<Mutex<Vec<Snapshot>>>,
    failures_left: Arc<Mutex<u32>>,
    delay: Option<Duration>,
}

impl RecordingGateway {
    pub fn new() -> Self {
        Self::default()
    }

    /// Seed the snapshot returned by `load`.
    pub fn with_profiles(mut self, profiles: Vec<Profile>) -> Self {
        self.initial = Snapshot::new(profiles);
        self
    }

    /// Fail the next `count` saves.
    pub fn failing(self, count: u32) -> Self {
        *self.failures_left.lock().unwrap() = count;
        self
    }

    pub fn with_delay(mut self, delay: Duration) -> Self {
        self.delay = Some(delay);
        self
    }

    pub fn saves(&self) -> Vec<Snapshot> {
        self.saved.lock().unwrap().clone()
    }

    pub fn last_saved(&self) -> Option<Snapshot> {
        self.saved.lock().unwrap().last().cloned()
    }
}

#[async_trait]
impl PersistenceGateway for RecordingGateway {
    async fn load(&self) -> Snapshot {
        self.initial.clone()
    }

    async fn save(&self, snapshot: &Snapshot) -> DomainResult<()> {
        if let Some(delay) = self.delay {
            tokio::time::sleep(delay).await;
        }

        {
            let mut failures = self.failures_left.lock().unwrap();
            if *failures > 0 {
                *failures -= 1;
                return Err(CopionError::Io("simulated write failure".into()));
            }
        }

        self.saved.lock().unwrap().push(snapshot.clone());
        Ok(())
    }

    fn describe(&self) -> String {
        "recording".into()
    }
}
