//! Wire-format tests for the types shared by the HTTP layer and the
//! snapshot document.

use copion_domain::{
    CopionError, Difficulty, MatchResult, MatchSubmission, NewProfile, Profile, ProfilePatch,
    Snapshot,
};
use serde_json::json;

#[test]
fn legacy_snapshot_document_decodes() {
    let document = json!({
        "perfiles": [{
            "id": "1700000000000",
            "username": "Lucía",
            "email": "",
            "avatar": "🐱",
            "preferences": { "difficulty": "hard", "rows": 4, "cols": 4, "time": 60, "sound": false },
            "stats": { "gamesPlayed": 2, "wins": 1, "losses": 1, "totalScore": 8, "bestStreak": 1 },
            "history": [
                { "id": "m1", "timestamp": "2024-01-02T10:00:00Z", "score": 10, "result": "win" },
                { "id": "m2", "timestamp": "2024-01-02T10:05:00.123Z", "score": -2, "result": "loss", "difficulty": "hard" }
            ]
        }]
    });

    let snapshot: Snapshot = serde_json::from_value(document).unwrap();

    let profile = &snapshot.profiles[0];
    assert_eq!(profile.preferences.difficulty, Difficulty::Hard);
    assert!(!profile.preferences.sound);
    assert_eq!(profile.history[1].result, MatchResult::Loss);
    assert_eq!(profile.high_score(), 10);
    assert!(profile.is_consistent());
}

#[test]
fn optional_record_fields_are_omitted_when_absent() {
    let mut profile = Profile::new("p1");
    let report = MatchSubmission {
        score: Some(4.into()),
        ..Default::default()
    }
    .into_report()
    .unwrap();
    assert_eq!(report.resolved_result(), MatchResult::Win);

    profile.history.push(copion_domain::MatchRecord {
        id: "m1".into(),
        timestamp: chrono::Utc::now(),
        score: report.score,
        result: report.resolved_result(),
        difficulty: None,
        level: None,
        duration_sec: None,
        rows: None,
        cols: None,
    });

    let value = serde_json::to_value(&profile).unwrap();
    let record = value["history"][0].as_object().unwrap();
    assert!(!record.contains_key("durationSec"));
    assert!(!record.contains_key("difficulty"));
    assert_eq!(record["result"], "win");
}

#[test]
fn creation_request_accepts_prefs_alias() {
    let request: NewProfile = serde_json::from_value(json!({
        "username": "bob",
        "prefs": { "difficulty": "easy", "time": 45 }
    }))
    .unwrap();

    let profile = request.into_profile("p2".into());

    assert_eq!(profile.preferences.difficulty, Difficulty::Easy);
    assert_eq!(profile.preferences.time, 45);
    assert_eq!(profile.preferences.rows, 6);
}

#[test]
fn empty_patch_changes_nothing() {
    let patch: ProfilePatch = serde_json::from_value(json!({})).unwrap();
    let mut profile = Profile::new("p1");
    let before = profile.clone();

    assert_eq!(patch, ProfilePatch::default());
    patch.apply_to(&mut profile);

    assert_eq!(profile, before);
}

#[test]
fn errors_serialize_with_type_tag() {
    let value = serde_json::to_value(CopionError::profile_not_found("p9")).unwrap();

    assert_eq!(value["type"], "NotFound");
    assert!(value["message"].as_str().unwrap().contains("p9"));
}
