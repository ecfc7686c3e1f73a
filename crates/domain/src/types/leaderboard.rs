//! Leaderboard projection

use serde::{Deserialize, Serialize};

use super::profile::{Difficulty, Profile};

/// One ranked row, derived fresh from the current profiles on every request
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct LeaderboardEntry {
    pub id: String,
    pub username: String,
    pub total_score: i64,
    /// Best single score within the retained history window
    pub high_score: i64,
    pub difficulty: Difficulty,
    pub games_played: u64,
}

impl From<&Profile> for LeaderboardEntry {
    fn from(profile: &Profile) -> Self {
        Self {
            id: profile.id.clone(),
            username: profile.username.clone(),
            total_score: profile.stats.total_score,
            high_score: profile.high_score(),
            difficulty: profile.preferences.difficulty.clone(),
            games_played: profile.stats.games_played,
        }
    }
}
