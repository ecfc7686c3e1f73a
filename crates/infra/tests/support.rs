//! Shared fixtures for `copion-infra` integration tests.

use std::path::PathBuf;
use std::sync::Once;

use chrono::Utc;
use copion_domain::{Difficulty, MatchRecord, MatchResult, Profile, Snapshot};
use tempfile::TempDir;

static TRACING: Once = Once::new();

/// Route `tracing` output through the test harness so failures show logs.
pub fn init_test_tracing() {
    TRACING.call_once(|| {
        let _ = tracing_subscriber::fmt()
            .with_env_filter("copion_infra=debug")
            .with_test_writer()
            .try_init();
    });
}

/// Temporary directory that lives for the duration of a test.
pub struct TestDir {
    dir: TempDir,
}

impl TestDir {
    pub fn new() -> Self {
        Self { dir: TempDir::new().expect("temp dir should be created") }
    }

    pub fn file(&self, name: &str) -> PathBuf {
        self.dir.path().join(name)
    }
}

/// Profile with a few matches already recorded.
pub fn sample_profile(id: &str, scores: &[i64]) -> Profile {
    let mut profile = Profile::new(id);
    profile.username = format!("jugador {id}");
    profile.preferences.difficulty = Difficulty::Easy;

    for (i, score) in scores.iter().copied().enumerate() {
        let result = MatchResult::from_score(score);
        profile.history.push(MatchRecord {
            id: format!("{id}-m{i}"),
            timestamp: Utc::now(),
            score,
            result,
            difficulty: Some(Difficulty::Easy),
            level: None,
            duration_sec: Some(30),
            rows: None,
            cols: None,
        });
        profile.stats.games_played += 1;
        profile.stats.total_score += score;
        if result.is_win() {
            profile.stats.wins += 1;
        } else {
            profile.stats.losses += 1;
        }
    }

    profile
}

pub fn sample_snapshot() -> Snapshot {
    Snapshot::new(vec![sample_profile("p1", &[5, 0, 9]), sample_profile("p2", &[])])
}
