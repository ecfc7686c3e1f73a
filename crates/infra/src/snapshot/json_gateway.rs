//! JSON document gateway
//!
//! Persists the collection as `{ "perfiles": [...] }`. Every save writes a
//! fresh sibling temp file and renames it into place, so neither a crash
//! nor an overlapping save can leave a torn document behind.

use std::fs;
use std::io::{ErrorKind, Write};
use std::path::{Path, PathBuf};

use async_trait::async_trait;
use copion_core::PersistenceGateway;
use copion_domain::{Result, Snapshot};
use tempfile::NamedTempFile;
use tokio::task;
use tracing::{debug, warn};

use crate::errors::conversions::to_domain;

/// File-backed implementation of `PersistenceGateway`
pub struct JsonSnapshotGateway {
    path: PathBuf,
}

impl JsonSnapshotGateway {
    pub fn new(path: impl AsRef<Path>) -> Self {
        Self { path: path.as_ref().to_path_buf() }
    }

    pub fn path(&self) -> &Path {
        &self.path
    }
}

#[async_trait]
impl PersistenceGateway for JsonSnapshotGateway {
    async fn load(&self) -> Snapshot {
        let path = self.path.clone();
        let result = task::spawn_blocking(move || read_snapshot(&path))
            .await
            .map_err(to_domain)
            .and_then(|inner| inner);

        match result {
            Ok(snapshot) => {
                debug!(path = %self.path.display(), profiles = snapshot.len(), "snapshot read");
                snapshot
            }
            Err(err) => {
                warn!(path = %self.path.display(), error = %err, "unreadable snapshot, starting empty");
                Snapshot::default()
            }
        }
    }

    async fn save(&self, snapshot: &Snapshot) -> Result<()> {
        let path = self.path.clone();
        let encoded = serde_json::to_vec_pretty(snapshot).map_err(to_domain)?;

        task::spawn_blocking(move || write_atomically(&path, &encoded))
            .await
            .map_err(to_domain)?
    }

    fn describe(&self) -> String {
        format!("json:{}", self.path.display())
    }
}

/// A missing or blank file is an empty collection.
fn read_snapshot(path: &Path) -> Result<Snapshot> {
    let contents = match fs::read_to_string(path) {
        Ok(contents) => contents,
        Err(err) if err.kind() == ErrorKind::NotFound => return Ok(Snapshot::default()),
        Err(err) => return Err(to_domain(err)),
    };

    if contents.trim().is_empty() {
        return Ok(Snapshot::default());
    }

    serde_json::from_str(&contents).map_err(to_domain)
}

/// Each call writes its own uniquely named sibling and renames it into
/// place, so concurrent saves never share a partially written file.
fn write_atomically(path: &Path, contents: &[u8]) -> Result<()> {
    let dir = match path.parent().filter(|p| !p.as_os_str().is_empty()) {
        Some(parent) => {
            fs::create_dir_all(parent).map_err(to_domain)?;
            parent
        }
        None => Path::new("."),
    };

    let mut tmp = NamedTempFile::new_in(dir).map_err(to_domain)?;
    tmp.write_all(contents).map_err(to_domain)?;
    tmp.as_file().sync_all().map_err(to_domain)?;
    tmp.persist(path).map_err(|err| to_domain(err.error))?;
    Ok(())
}
