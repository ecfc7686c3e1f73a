//! Leaderboard builder
//!
//! A read-only projection of the profile set, ranked by cumulative score.
//! Ties keep the store's insertion order (the sort is stable).

use copion_domain::constants::DEFAULT_LEADERBOARD_LIMIT;
use copion_domain::{LeaderboardEntry, Profile};

/// Rank `profiles` by `total_score`, highest first, and keep the top `limit`.
pub fn build(profiles: &[Profile], limit: usize) -> Vec<LeaderboardEntry> {
    let mut entries: Vec<LeaderboardEntry> = profiles.iter().map(LeaderboardEntry::from).collect();
    entries.sort_by(|a, b| b.total_score.cmp(&a.total_score));
    entries.truncate(limit);
    entries
}

/// [`build`] with the default limit of ten.
pub fn build_default(profiles: &[Profile]) -> Vec<LeaderboardEntry> {
    build(profiles, DEFAULT_LEADERBOARD_LIMIT)
}
