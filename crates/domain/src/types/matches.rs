//! Match result types
//!
//! [`MatchSubmission`] is the raw, loosely typed payload a client reports.
//! [`MatchSubmission::into_report`] validates it into a [`MatchReport`], the
//! input the stats engine consumes, and the engine records each applied
//! report as a [`MatchRecord`] in the profile's history.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use super::profile::Difficulty;
use crate::errors::{CopionError, Result};

/// Outcome of a single match
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum MatchResult {
    Win,
    Loss,
}

crate::impl_domain_enum_conversions!(MatchResult {
    Win => "win",
    Loss => "loss",
});

impl MatchResult {
    /// Derive the outcome from a score: a win iff the score is positive.
    pub fn from_score(score: i64) -> Self {
        if score > 0 {
            Self::Win
        } else {
            Self::Loss
        }
    }

    pub fn is_win(self) -> bool {
        self == Self::Win
    }
}

/// One reported match, owned by the profile whose history holds it
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct MatchRecord {
    #[serde(default)]
    pub id: String,
    /// Server-assigned
    pub timestamp: DateTime<Utc>,
    pub score: i64,
    pub result: MatchResult,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub difficulty: Option<Difficulty>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub level: Option<i64>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub duration_sec: Option<i64>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub rows: Option<u32>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub cols: Option<u32>,
}

/// A score as reported by a client.
///
/// Clients send integers, floats or numeric strings; [`ScoreInput::coerce`]
/// turns any of them into an integer or rejects the value.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum ScoreInput {
    Integer(i64),
    Float(f64),
    Text(String),
}

impl ScoreInput {
    /// Coerce to an integer score.
    ///
    /// Finite floats are truncated toward zero. Strings must hold a decimal
    /// integer, surrounding whitespace ignored.
    ///
    /// # Errors
    /// `CopionError::InvalidInput` if the value is not an integer, is not
    /// finite, or does not fit in an `i64`.
    pub fn coerce(&self) -> Result<i64> {
        match self {
            Self::Integer(value) => Ok(*value),
            Self::Float(value) => {
                let truncated = value.trunc();
                // i64::MAX as f64 rounds up to 2^63, which is out of range
                if !truncated.is_finite() || truncated < -(2f64.powi(63)) || truncated >= 2f64.powi(63)
                {
                    return Err(CopionError::InvalidInput(format!(
                        "score {value} is not a representable integer"
                    )));
                }
                #[allow(clippy::cast_possible_truncation)]
                Ok(truncated as i64)
            }
            Self::Text(text) => text.trim().parse::<i64>().map_err(|_| {
                CopionError::InvalidInput(format!("score '{text}' is not an integer"))
            }),
        }
    }
}

impl From<i64> for ScoreInput {
    fn from(value: i64) -> Self {
        Self::Integer(value)
    }
}

/// Raw match submission payload.
///
/// `profile_id` is only read by the route that does not carry the id in its
/// path. `time` is accepted as an alias for `durationSec`.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct MatchSubmission {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub profile_id: Option<String>,
    #[serde(default)]
    pub score: Option<ScoreInput>,
    #[serde(default)]
    pub result: Option<MatchResult>,
    #[serde(default)]
    pub difficulty: Option<Difficulty>,
    #[serde(default)]
    pub level: Option<i64>,
    #[serde(default, alias = "time")]
    pub duration_sec: Option<i64>,
    #[serde(default)]
    pub rows: Option<u32>,
    #[serde(default)]
    pub cols: Option<u32>,
}

impl MatchSubmission {
    /// Validate into a [`MatchReport`].
    ///
    /// # Errors
    /// `CopionError::InvalidInput` if the score is missing or cannot be
    /// coerced to an integer.
    pub fn into_report(self) -> Result<MatchReport> {
        let score = self
            .score
            .as_ref()
            .ok_or_else(|| CopionError::InvalidInput("score is required".into()))?
            .coerce()?;

        Ok(MatchReport {
            score,
            result: self.result,
            difficulty: self.difficulty,
            level: self.level,
            duration_sec: self.duration_sec,
            rows: self.rows,
            cols: self.cols,
        })
    }
}

/// Validated match input for the stats engine
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct MatchReport {
    pub score: i64,
    /// Authoritative when present; derived from the score sign otherwise
    pub result: Option<MatchResult>,
    pub difficulty: Option<Difficulty>,
    pub level: Option<i64>,
    pub duration_sec: Option<i64>,
    pub rows: Option<u32>,
    pub cols: Option<u32>,
}

impl MatchReport {
    pub fn new(score: i64) -> Self {
        Self { score, ..Self::default() }
    }

    #[must_use]
    pub fn with_result(mut self, result: MatchResult) -> Self {
        self.result = Some(result);
        self
    }

    #[must_use]
    pub fn with_difficulty(mut self, difficulty: impl Into<Difficulty>) -> Self {
        self.difficulty = Some(difficulty.into());
        self
    }

    /// The caller-supplied result, or the one derived from the score.
    pub fn resolved_result(&self) -> MatchResult {
        self.result.unwrap_or_else(|| MatchResult::from_score(self.score))
    }
}
