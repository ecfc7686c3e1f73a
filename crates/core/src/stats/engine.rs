//! Applying a match result to a profile
//!
//! [`apply_result`] is the only code path that mutates `Profile::stats` and
//! `Profile::history`. It is not idempotent: applying the same report twice
//! records two matches.

use chrono::{DateTime, Utc};
use copion_domain::constants::HISTORY_LIMIT;
use copion_domain::{CopionError, MatchRecord, MatchReport, Profile, Result};
use tracing::debug;
use uuid::Uuid;

/// Apply one match report to `profile` and return the recorded match.
///
/// 1. Resolve the result (caller-supplied, else `win` iff `score > 0`).
/// 2. Append a [`MatchRecord`] stamped with `recorded_at`.
/// 3. Bump `games_played`, `total_score` and `wins` or `losses`.
/// 4. Raise `best_streak` to the win run ending at the newest match.
/// 5. Evict the oldest history entries beyond [`HISTORY_LIMIT`].
/// 6. Adopt the match's difficulty tag as the profile difficulty, if given.
///
/// The streak is measured before eviction, so a run that fills the whole
/// retained window is still counted in full.
///
/// # Errors
/// `CopionError::InvalidInput` if adding the score would overflow the
/// cumulative total, or a match counter is already at its maximum. The
/// profile is left untouched in either case.
pub fn apply_result(
    profile: &mut Profile,
    report: &MatchReport,
    recorded_at: DateTime<Utc>,
) -> Result<MatchRecord> {
    let total_score = profile.stats.total_score.checked_add(report.score).ok_or_else(|| {
        CopionError::InvalidInput(format!(
            "score {} would overflow the total score of profile '{}'",
            report.score, profile.id
        ))
    })?;

    let result = report.resolved_result();
    let games_played = bump(profile.stats.games_played, "games played", &profile.id)?;
    let (wins, losses) = if result.is_win() {
        (bump(profile.stats.wins, "wins", &profile.id)?, profile.stats.losses)
    } else {
        (profile.stats.wins, bump(profile.stats.losses, "losses", &profile.id)?)
    };

    let record = MatchRecord {
        id: Uuid::new_v4().to_string(),
        timestamp: recorded_at,
        score: report.score,
        result,
        difficulty: Some(
            report.difficulty.clone().unwrap_or_else(|| profile.preferences.difficulty.clone()),
        ),
        level: report.level,
        duration_sec: report.duration_sec,
        rows: report.rows,
        cols: report.cols,
    };
    profile.history.push(record.clone());

    let stats = &mut profile.stats;
    stats.games_played = games_played;
    stats.total_score = total_score;
    stats.wins = wins;
    stats.losses = losses;

    let run = current_streak(&profile.history);
    stats.best_streak = stats.best_streak.max(run);

    truncate_history(&mut profile.history);

    if let Some(difficulty) = &report.difficulty {
        profile.preferences.difficulty = difficulty.clone();
    }

    debug!(
        profile_id = %profile.id,
        score = record.score,
        result = %result,
        games_played = profile.stats.games_played,
        current_streak = run,
        best_streak = profile.stats.best_streak,
        "match applied"
    );

    Ok(record)
}

fn bump(counter: u64, name: &str, profile_id: &str) -> Result<u64> {
    counter.checked_add(1).ok_or_else(|| {
        CopionError::InvalidInput(format!("{name} counter of profile '{profile_id}' is saturated"))
    })
}

/// Length of the run of consecutive wins ending at the newest entry.
pub fn current_streak(history: &[MatchRecord]) -> u64 {
    history.iter().rev().take_while(|record| record.result.is_win()).count() as u64
}

fn truncate_history(history: &mut Vec<MatchRecord>) {
    if history.len() > HISTORY_LIMIT {
        let overflow = history.len() - HISTORY_LIMIT;
        history.drain(..overflow);
    }
}
