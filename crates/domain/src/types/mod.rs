//! Domain types and models

pub mod leaderboard;
pub mod matches;
pub mod patch;
pub mod profile;
pub mod snapshot;

pub use leaderboard::LeaderboardEntry;
pub use matches::{MatchRecord, MatchReport, MatchResult, MatchSubmission, ScoreInput};
pub use patch::{NewProfile, PreferencesPatch, ProfilePatch};
pub use profile::{Difficulty, Preferences, Profile, Stats};
pub use snapshot::Snapshot;
