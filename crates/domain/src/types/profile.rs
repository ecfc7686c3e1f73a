//! Player profile types
//!
//! A [`Profile`] owns its preferences, its cumulative [`Stats`] and a bounded
//! history of [`MatchRecord`]s. Stats are the unbounded ledger; history is a
//! view over the most recent [`HISTORY_LIMIT`] matches only, so once more
//! matches than that have been played `stats.games_played` exceeds
//! `history.len()`.

use std::fmt;

use serde::{Deserialize, Serialize};

use super::matches::MatchRecord;
use crate::constants::{
    DEFAULT_AVATAR, DEFAULT_COLS, DEFAULT_EMAIL, DEFAULT_ROWS, DEFAULT_SOUND, DEFAULT_TIME_SECS,
    DEFAULT_USERNAME, HISTORY_LIMIT,
};

/// Difficulty tag.
///
/// The three known levels are parsed case-insensitively. Any other string is
/// kept verbatim in [`Difficulty::Other`]: match submissions may tag a match
/// with an arbitrary difficulty and that tag is stored as-is.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(from = "String", into = "String")]
pub enum Difficulty {
    Easy,
    #[default]
    Medium,
    Hard,
    Other(String),
}

impl Difficulty {
    pub fn as_str(&self) -> &str {
        match self {
            Self::Easy => "easy",
            Self::Medium => "medium",
            Self::Hard => "hard",
            Self::Other(tag) => tag,
        }
    }
}

impl From<String> for Difficulty {
    fn from(value: String) -> Self {
        match value.trim().to_ascii_lowercase().as_str() {
            "easy" => Self::Easy,
            "medium" => Self::Medium,
            "hard" => Self::Hard,
            _ => Self::Other(value),
        }
    }
}

impl From<&str> for Difficulty {
    fn from(value: &str) -> Self {
        Self::from(value.to_string())
    }
}

impl From<Difficulty> for String {
    fn from(value: Difficulty) -> Self {
        match value {
            Difficulty::Other(tag) => tag,
            known => known.as_str().to_string(),
        }
    }
}

impl fmt::Display for Difficulty {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Per-player game preferences
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct Preferences {
    pub difficulty: Difficulty,
    pub rows: u32,
    pub cols: u32,
    pub time: u32,
    pub sound: bool,
}

impl Default for Preferences {
    fn default() -> Self {
        Self {
            difficulty: Difficulty::Medium,
            rows: DEFAULT_ROWS,
            cols: DEFAULT_COLS,
            time: DEFAULT_TIME_SECS,
            sound: DEFAULT_SOUND,
        }
    }
}

/// Cumulative statistics, owned exclusively by the stats engine
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct Stats {
    pub games_played: u64,
    pub wins: u64,
    pub losses: u64,
    /// Sum of all reported scores; negative scores accumulate unclamped
    pub total_score: i64,
    pub best_streak: u64,
}

/// A player's persistent record
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Profile {
    pub id: String,
    pub username: String,
    #[serde(default)]
    pub email: String,
    #[serde(default)]
    pub avatar: String,
    #[serde(default)]
    pub preferences: Preferences,
    #[serde(default)]
    pub stats: Stats,
    /// Chronological, oldest first, at most [`HISTORY_LIMIT`] entries
    #[serde(default)]
    pub history: Vec<MatchRecord>,
}

impl Profile {
    /// Create a profile with every optional field at its documented default.
    pub fn new(id: impl Into<String>) -> Self {
        Self {
            id: id.into(),
            username: DEFAULT_USERNAME.to_string(),
            email: DEFAULT_EMAIL.to_string(),
            avatar: DEFAULT_AVATAR.to_string(),
            preferences: Preferences::default(),
            stats: Stats::default(),
            history: Vec::new(),
        }
    }

    /// Best single-match score within the retained history window, 0 when
    /// the history is empty.
    pub fn high_score(&self) -> i64 {
        self.history.iter().map(|record| record.score).max().unwrap_or(0)
    }

    /// Check the stats/history invariants.
    ///
    /// `games_played == wins + losses` always holds; the history never
    /// exceeds its bound and never holds more entries than matches played.
    pub fn is_consistent(&self) -> bool {
        let stats = &self.stats;
        stats.games_played == stats.wins + stats.losses
            && self.history.len() <= HISTORY_LIMIT
            && self.history.len() as u64 <= stats.games_played
    }
}
