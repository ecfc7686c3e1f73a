//! Integration tests for the persistence gateways.
//!
//! Every backend must return exactly what it was last given.

mod support;

use std::sync::Arc;

use copion_core::{PersistenceGateway, ProfileService};
use copion_domain::{
    MatchReport, NewProfile, PersistenceConfig, Snapshot, StorageBackend, StorageConfig,
};
use copion_infra::snapshot::build_gateway;
use copion_infra::{JsonSnapshotGateway, MemoryGateway, SqliteSnapshotGateway};
use support::{init_test_tracing, sample_profile, sample_snapshot, TestDir};

async fn assert_round_trip(gateway: &dyn PersistenceGateway) {
    let snapshot = sample_snapshot();

    gateway.save(&snapshot).await.expect("save should succeed");
    let loaded = gateway.load().await;

    assert_eq!(loaded.len(), snapshot.len());
    for (loaded, saved) in loaded.profiles.iter().zip(&snapshot.profiles) {
        assert_eq!(loaded.id, saved.id);
        assert_eq!(loaded.stats, saved.stats);
        assert_eq!(loaded.preferences, saved.preferences);
        let scores: Vec<i64> = loaded.history.iter().map(|r| r.score).collect();
        let expected: Vec<i64> = saved.history.iter().map(|r| r.score).collect();
        assert_eq!(scores, expected);
    }
}

#[tokio::test]
async fn json_gateway_returns_last_saved_snapshot() {
    init_test_tracing();
    let dir = TestDir::new();
    assert_round_trip(&JsonSnapshotGateway::new(dir.file("perfiles.json"))).await;
}

#[tokio::test]
async fn sqlite_gateway_returns_last_saved_snapshot() {
    init_test_tracing();
    let dir = TestDir::new();
    let gateway = SqliteSnapshotGateway::open(dir.file("perfiles.db"), 2).unwrap();
    assert_round_trip(&gateway).await;
}

#[tokio::test]
async fn memory_gateway_returns_last_saved_snapshot() {
    assert_round_trip(&MemoryGateway::default()).await;
}

#[tokio::test]
async fn json_document_uses_perfiles_key_and_camel_case() {
    let dir = TestDir::new();
    let path = dir.file("perfiles.json");
    let gateway = JsonSnapshotGateway::new(&path);

    gateway.save(&sample_snapshot()).await.unwrap();

    let raw: serde_json::Value =
        serde_json::from_str(&std::fs::read_to_string(&path).unwrap()).unwrap();
    let first = &raw["perfiles"][0];
    assert_eq!(first["stats"]["gamesPlayed"], 3);
    assert_eq!(first["stats"]["totalScore"], 14);
    assert_eq!(first["history"][1]["result"], "loss");
    assert_eq!(first["preferences"]["difficulty"], "easy");
}

#[tokio::test]
async fn json_gateway_reads_hand_written_documents() {
    let dir = TestDir::new();
    let path = dir.file("perfiles.json");
    std::fs::write(
        &path,
        r#"{ "perfiles": [ { "id": "legacy", "username": "Anónimo",
             "stats": { "gamesPlayed": 1, "wins": 1, "totalScore": 4, "bestStreak": 1 },
             "history": [ { "timestamp": "2024-05-01T10:00:00Z", "score": 4, "result": "win" } ] } ] }"#,
    )
    .unwrap();

    let loaded = JsonSnapshotGateway::new(&path).load().await;

    let profile = &loaded.profiles[0];
    assert_eq!(profile.id, "legacy");
    assert_eq!(profile.stats.losses, 0);
    assert_eq!(profile.preferences.rows, 6);
    assert_eq!(profile.history[0].score, 4);
}

#[tokio::test]
async fn service_state_survives_restart_on_each_durable_backend() {
    init_test_tracing();
    let dir = TestDir::new();

    for (backend, file) in [(StorageBackend::Json, "perfiles.json"), (StorageBackend::Sqlite, "perfiles.db")] {
        let config =
            StorageConfig { backend, path: dir.file(file).display().to_string(), pool_size: 1 };

        let id = {
            let gateway = build_gateway(&config);
            let service = ProfileService::load(gateway, PersistenceConfig::default()).await;
            let id = service.create(NewProfile::with_username("ana")).await.unwrap().id;
            service.apply_result(&id, MatchReport::new(12)).await.unwrap();
            service.shutdown().await.unwrap();
            id
        };

        let gateway = build_gateway(&config);
        let service = ProfileService::load(Arc::clone(&gateway), PersistenceConfig::default()).await;
        let profile = service.get(&id).await.unwrap();

        assert_eq!(profile.username, "ana", "backend {backend}");
        assert_eq!(profile.stats.total_score, 12, "backend {backend}");
        assert_eq!(profile.history.len(), 1, "backend {backend}");
    }
}

#[tokio::test]
async fn memory_gateway_seed_is_loaded() {
    let gateway = MemoryGateway::with_snapshot(Snapshot::new(sample_snapshot().profiles));
    assert_eq!(gateway.load().await.len(), 2);
}

#[tokio::test(flavor = "multi_thread", worker_threads = 4)]
async fn overlapping_json_saves_leave_a_whole_document() {
    init_test_tracing();
    let dir = TestDir::new();
    let path = dir.file("perfiles.json");
    let gateway = Arc::new(JsonSnapshotGateway::new(&path));
    let sizes: Vec<usize> = (1..=8).map(|n| n * 25).collect();

    for round in 0..50 {
        let saves: Vec<_> = sizes
            .iter()
            .map(|&size| {
                let gateway = Arc::clone(&gateway);
                let profiles =
                    (0..size).map(|i| sample_profile(&format!("p{i}"), &[1, 2, 3])).collect();
                tokio::spawn(async move { gateway.save(&Snapshot::new(profiles)).await })
            })
            .collect();
        for save in saves {
            save.await.unwrap().expect("every overlapping save should succeed");
        }

        let raw = std::fs::read_to_string(&path).unwrap();
        let decoded: Snapshot = serde_json::from_str(&raw)
            .unwrap_or_else(|err| panic!("round {round}: torn document: {err}"));
        assert!(sizes.contains(&decoded.len()), "round {round}: {} profiles", decoded.len());
    }

    let leftovers = std::fs::read_dir(path.parent().unwrap()).unwrap().count();
    assert_eq!(leftovers, 1, "temp files should not accumulate");
}

#[tokio::test]
async fn corrupt_sqlite_file_starts_an_empty_service() {
    init_test_tracing();
    let dir = TestDir::new();
    let path = dir.file("perfiles.db");
    std::fs::write(&path, "{\"perfiles\": []} is not sqlite\n".repeat(128)).unwrap();
    let config =
        StorageConfig { backend: StorageBackend::Sqlite, path: path.display().to_string(), pool_size: 1 };

    let gateway = build_gateway(&config);
    let service = ProfileService::load(gateway, PersistenceConfig::default()).await;

    assert!(service.is_empty().await);
    assert!(service.backend().starts_with("sqlite:"));
    service.check_backend().await.unwrap();

    // the fresh database accepts writes
    service.create(NewProfile::with_username("ana")).await.unwrap();
    assert!(!service.is_dirty());
}
