//! Persisted snapshot shape: `{ "perfiles": [ Profile, ... ] }`

use serde::{Deserialize, Serialize};

use super::profile::Profile;

/// Full profile collection as exchanged with a persistence gateway
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Snapshot {
    #[serde(rename = "perfiles", default)]
    pub profiles: Vec<Profile>,
}

impl Snapshot {
    pub fn new(profiles: Vec<Profile>) -> Self {
        Self { profiles }
    }

    pub fn len(&self) -> usize {
        self.profiles.len()
    }

    pub fn is_empty(&self) -> bool {
        self.profiles.is_empty()
    }
}

impl From<Vec<Profile>> for Snapshot {
    fn from(profiles: Vec<Profile>) -> Self {
        Self::new(profiles)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn snapshot_uses_perfiles_key() {
        let snapshot = Snapshot::new(vec![Profile::new("p1")]);
        let value = serde_json::to_value(&snapshot).unwrap();
        assert_eq!(value["perfiles"][0]["id"], "p1");
    }

    #[test]
    fn empty_object_decodes_to_empty_snapshot() {
        let snapshot: Snapshot = serde_json::from_str("{}").unwrap();
        assert!(snapshot.is_empty());
    }
}
