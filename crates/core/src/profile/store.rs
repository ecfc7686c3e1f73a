//! In-memory profile collection
//!
//! [`ProfileStore`] keeps profiles in insertion order and is the unit of
//! lookup and mutation. It knows nothing about persistence or locking; the
//! [`ProfileService`](super::service::ProfileService) owns one instance and
//! wraps both concerns around it.

use std::collections::HashSet;

use chrono::{DateTime, Utc};
use copion_domain::{
    CopionError, MatchRecord, MatchReport, NewProfile, Profile, ProfilePatch, Result, Snapshot,
};
use tracing::{info, warn};
use uuid::Uuid;

use crate::stats;

/// Insertion-ordered collection of profiles
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ProfileStore {
    profiles: Vec<Profile>,
}

impl ProfileStore {
    pub fn new() -> Self {
        Self::default()
    }

    /// Build a store from a loaded snapshot.
    ///
    /// Later duplicates of an id are dropped so lookups stay unambiguous.
    /// Profiles whose stats disagree with their history are kept verbatim.
    pub fn from_snapshot(snapshot: Snapshot) -> Self {
        let mut seen = HashSet::new();
        let mut profiles = Vec::with_capacity(snapshot.profiles.len());

        for profile in snapshot.profiles {
            if seen.insert(profile.id.clone()) {
                if !profile.is_consistent() {
                    warn!(
                        profile_id = %profile.id,
                        games_played = profile.stats.games_played,
                        history = profile.history.len(),
                        "loaded profile has inconsistent stats; keeping it as stored"
                    );
                }
                profiles.push(profile);
            } else {
                warn!(profile_id = %profile.id, "dropping duplicate profile id from snapshot");
            }
        }

        Self { profiles }
    }

    /// Create a profile, assigning a fresh id when none is supplied.
    ///
    /// # Errors
    /// `CopionError::InvalidInput` if a field is structurally malformed or
    /// the supplied id is already taken.
    pub fn create(&mut self, request: NewProfile) -> Result<Profile> {
        request.validate()?;

        let id = match &request.id {
            Some(id) if self.position(id).is_some() => {
                return Err(CopionError::InvalidInput(format!("profile id '{id}' already exists")));
            }
            Some(id) => id.clone(),
            None => self.fresh_id(),
        };

        let profile = request.into_profile(id);
        info!(profile_id = %profile.id, username = %profile.username, "profile created");
        self.profiles.push(profile.clone());
        Ok(profile)
    }

    /// # Errors
    /// `CopionError::NotFound` for an unknown id.
    pub fn get(&self, id: &str) -> Result<&Profile> {
        self.profiles
            .iter()
            .find(|profile| profile.id == id)
            .ok_or_else(|| CopionError::profile_not_found(id))
    }

    /// Merge `patch` into the profile: display fields are replaced,
    /// preferences merged key by key. Stats and history are never touched.
    ///
    /// # Errors
    /// `CopionError::NotFound` for an unknown id, `InvalidInput` for a
    /// malformed patch (checked before anything is changed).
    pub fn update(&mut self, id: &str, patch: &ProfilePatch) -> Result<Profile> {
        let profile = self.get_mut(id)?;
        patch.validate()?;
        patch.apply_to(profile);
        info!(profile_id = %id, "profile updated");
        Ok(profile.clone())
    }

    /// Remove a profile together with its history.
    ///
    /// # Errors
    /// `CopionError::NotFound` for an unknown id.
    pub fn delete(&mut self, id: &str) -> Result<Profile> {
        let index = self.position(id).ok_or_else(|| CopionError::profile_not_found(id))?;
        let removed = self.profiles.remove(index);
        info!(profile_id = %id, matches = removed.history.len(), "profile deleted");
        Ok(removed)
    }

    /// Apply a match report to the profile with `id`.
    ///
    /// # Errors
    /// `CopionError::NotFound` for an unknown id, or whatever the stats
    /// engine rejects.
    pub fn apply_result(
        &mut self,
        id: &str,
        report: &MatchReport,
        recorded_at: DateTime<Utc>,
    ) -> Result<(Profile, MatchRecord)> {
        let profile = self.get_mut(id)?;
        let record = stats::apply_result(profile, report, recorded_at)?;
        Ok((profile.clone(), record))
    }

    /// Profiles in insertion order.
    pub fn list(&self) -> &[Profile] {
        &self.profiles
    }

    pub fn len(&self) -> usize {
        self.profiles.len()
    }

    pub fn is_empty(&self) -> bool {
        self.profiles.is_empty()
    }

    /// Clone the whole collection for persistence.
    pub fn snapshot(&self) -> Snapshot {
        Snapshot::new(self.profiles.clone())
    }

    fn get_mut(&mut self, id: &str) -> Result<&mut Profile> {
        self.profiles
            .iter_mut()
            .find(|profile| profile.id == id)
            .ok_or_else(|| CopionError::profile_not_found(id))
    }

    fn position(&self, id: &str) -> Option<usize> {
        self.profiles.iter().position(|profile| profile.id == id)
    }

    fn fresh_id(&self) -> String {
        loop {
            let id = Uuid::new_v4().to_string();
            if self.position(&id).is_none() {
                return id;
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use copion_domain::{Difficulty, MatchResult, PreferencesPatch};

    use super::*;

    fn store_with(usernames: &[&str]) -> ProfileStore {
        let mut store = ProfileStore::new();
        for name in usernames {
            store.create(NewProfile::with_username(*name)).unwrap();
        }
        store
    }

    #[test]
    fn create_assigns_unique_ids_and_defaults() {
        let store = store_with(&["ana", "bob"]);
        let [a, b] = store.list() else { panic!("expected two profiles") };

        assert_ne!(a.id, b.id);
        assert!(Uuid::parse_str(&a.id).is_ok());
        assert_eq!(a.preferences.rows, 6);
        assert_eq!(a.stats.games_played, 0);
    }

    #[test]
    fn create_keeps_client_supplied_id() {
        let mut store = ProfileStore::new();
        let request = NewProfile { id: Some("player-1".into()), ..Default::default() };

        let profile = store.create(request).unwrap();

        assert_eq!(profile.id, "player-1");
        assert_eq!(profile.username, "Anónimo");
    }

    #[test]
    fn create_rejects_duplicate_id() {
        let mut store = ProfileStore::new();
        let request = NewProfile { id: Some("dup".into()), ..Default::default() };
        store.create(request.clone()).unwrap();

        let err = store.create(request).unwrap_err();

        assert!(matches!(err, CopionError::InvalidInput(_)));
        assert_eq!(store.len(), 1);
    }

    #[test]
    fn get_unknown_id_is_not_found() {
        let store = ProfileStore::new();
        assert!(matches!(store.get("nope"), Err(CopionError::NotFound(_))));
    }

    #[test]
    fn update_merges_preferences_key_by_key() {
        let mut store = store_with(&["ana"]);
        let id = store.list()[0].id.clone();
        let patch = ProfilePatch {
            preferences: Some(PreferencesPatch {
                difficulty: Some(Difficulty::Hard),
                ..Default::default()
            }),
            ..Default::default()
        };

        let updated = store.update(&id, &patch).unwrap();

        assert_eq!(updated.preferences.difficulty, Difficulty::Hard);
        assert_eq!(
            (updated.preferences.rows, updated.preferences.cols, updated.preferences.time),
            (6, 8, 30)
        );
        assert_eq!(updated.username, "ana");
    }

    #[test]
    fn invalid_update_changes_nothing() {
        let mut store = store_with(&["ana"]);
        let id = store.list()[0].id.clone();
        let before = store.clone();
        let patch = ProfilePatch {
            username: Some("renamed".into()),
            preferences: Some(PreferencesPatch { rows: Some(0), ..Default::default() }),
            ..Default::default()
        };

        assert!(store.update(&id, &patch).is_err());
        assert_eq!(store, before);
    }

    #[test]
    fn delete_removes_profile_and_history() {
        let mut store = store_with(&["ana", "bob"]);
        let id = store.list()[0].id.clone();
        store.apply_result(&id, &MatchReport::new(4), Utc::now()).unwrap();

        let removed = store.delete(&id).unwrap();

        assert_eq!(removed.history.len(), 1);
        assert_eq!(store.len(), 1);
        assert!(store.get(&id).is_err());
        assert!(matches!(store.delete(&id), Err(CopionError::NotFound(_))));
    }

    #[test]
    fn list_preserves_insertion_order() {
        let store = store_with(&["c", "a", "b"]);
        let names: Vec<&str> = store.list().iter().map(|p| p.username.as_str()).collect();
        assert_eq!(names, ["c", "a", "b"]);
    }

    #[test]
    fn apply_result_returns_updated_profile_and_record() {
        let mut store = store_with(&["ana"]);
        let id = store.list()[0].id.clone();

        let (profile, record) = store.apply_result(&id, &MatchReport::new(0), Utc::now()).unwrap();

        assert_eq!(record.result, MatchResult::Loss);
        assert_eq!(profile.stats.losses, 1);
        assert_eq!(store.get(&id).unwrap(), &profile);
    }

    #[test]
    fn from_snapshot_drops_duplicate_ids() {
        let snapshot =
            Snapshot::new(vec![Profile::new("x"), Profile::new("y"), Profile::new("x")]);

        let store = ProfileStore::from_snapshot(snapshot);

        assert_eq!(store.len(), 2);
    }

    #[test]
    fn from_snapshot_keeps_inconsistent_profiles() {
        let mut edited = Profile::new("edited");
        edited.stats.games_played = 3;

        let store = ProfileStore::from_snapshot(Snapshot::new(vec![edited.clone()]));

        assert_eq!(store.get("edited").unwrap(), &edited);
    }
}
