//! Partial-update payloads
//!
//! Every field is optional and carries "apply if present" semantics.
//! Neither payload has a `stats` or `history` field: those are owned by the
//! stats engine, and unknown JSON keys are ignored on decode.

use serde::{Deserialize, Serialize};

use super::profile::{Difficulty, Preferences, Profile};
use crate::constants::{MAX_AVATAR_LENGTH, MAX_EMAIL_LENGTH, MAX_ID_LENGTH, MAX_USERNAME_LENGTH};
use crate::errors::{CopionError, Result};

/// Field-by-field preference update
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct PreferencesPatch {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub difficulty: Option<Difficulty>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub rows: Option<u32>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub cols: Option<u32>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub time: Option<u32>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub sound: Option<bool>,
}

impl PreferencesPatch {
    /// Merge present fields into `preferences`, leaving the rest untouched.
    pub fn apply_to(&self, preferences: &mut Preferences) {
        if let Some(difficulty) = &self.difficulty {
            preferences.difficulty = difficulty.clone();
        }
        if let Some(rows) = self.rows {
            preferences.rows = rows;
        }
        if let Some(cols) = self.cols {
            preferences.cols = cols;
        }
        if let Some(time) = self.time {
            preferences.time = time;
        }
        if let Some(sound) = self.sound {
            preferences.sound = sound;
        }
    }

    /// # Errors
    /// `CopionError::InvalidInput` if `rows`, `cols` or `time` is zero.
    pub fn validate(&self) -> Result<()> {
        for (name, value) in [("rows", self.rows), ("cols", self.cols), ("time", self.time)] {
            if value == Some(0) {
                return Err(CopionError::InvalidInput(format!(
                    "preferences.{name} must be greater than zero"
                )));
            }
        }
        Ok(())
    }
}

/// Profile creation request; omitted fields take their documented defaults
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct NewProfile {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub id: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub username: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub email: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub avatar: Option<String>,
    #[serde(default, alias = "prefs", skip_serializing_if = "Option::is_none")]
    pub preferences: Option<PreferencesPatch>,
}

impl NewProfile {
    pub fn with_username(username: impl Into<String>) -> Self {
        Self { username: Some(username.into()), ..Self::default() }
    }

    /// Structural checks only; missing fields are never an error.
    ///
    /// # Errors
    /// `CopionError::InvalidInput` on a blank or oversized id, any invalid
    /// display field, or invalid preferences.
    pub fn validate(&self) -> Result<()> {
        if let Some(id) = &self.id {
            validate_id(id)?;
        }
        validate_display_fields(
            self.username.as_deref(),
            self.email.as_deref(),
            self.avatar.as_deref(),
        )?;
        if let Some(preferences) = &self.preferences {
            preferences.validate()?;
        }
        Ok(())
    }

    /// Build the profile, filling every omitted field with its default.
    pub fn into_profile(self, id: String) -> Profile {
        let mut profile = Profile::new(id);
        if let Some(username) = self.username {
            profile.username = username;
        }
        if let Some(email) = self.email {
            profile.email = email;
        }
        if let Some(avatar) = self.avatar {
            profile.avatar = avatar;
        }
        if let Some(preferences) = &self.preferences {
            preferences.apply_to(&mut profile.preferences);
        }
        profile
    }
}

/// Profile update request (PUT and PATCH share it)
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ProfilePatch {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub username: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub email: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub avatar: Option<String>,
    #[serde(default, alias = "prefs", skip_serializing_if = "Option::is_none")]
    pub preferences: Option<PreferencesPatch>,
}

impl ProfilePatch {
    /// # Errors
    /// `CopionError::InvalidInput` on any invalid field.
    pub fn validate(&self) -> Result<()> {
        validate_display_fields(
            self.username.as_deref(),
            self.email.as_deref(),
            self.avatar.as_deref(),
        )?;
        if let Some(preferences) = &self.preferences {
            preferences.validate()?;
        }
        Ok(())
    }

    /// Replace display fields and merge preferences key by key.
    pub fn apply_to(&self, profile: &mut Profile) {
        if let Some(username) = &self.username {
            profile.username.clone_from(username);
        }
        if let Some(email) = &self.email {
            profile.email.clone_from(email);
        }
        if let Some(avatar) = &self.avatar {
            profile.avatar.clone_from(avatar);
        }
        if let Some(preferences) = &self.preferences {
            preferences.apply_to(&mut profile.preferences);
        }
    }
}

fn validate_id(id: &str) -> Result<()> {
    if id.trim().is_empty() {
        return Err(CopionError::InvalidInput("id must not be blank".into()));
    }
    if id.chars().any(char::is_whitespace) {
        return Err(CopionError::InvalidInput("id must not contain whitespace".into()));
    }
    check_length("id", id, MAX_ID_LENGTH)
}

fn validate_display_fields(
    username: Option<&str>,
    email: Option<&str>,
    avatar: Option<&str>,
) -> Result<()> {
    if let Some(username) = username {
        if username.trim().is_empty() {
            return Err(CopionError::InvalidInput("username must not be blank".into()));
        }
        check_length("username", username, MAX_USERNAME_LENGTH)?;
    }
    if let Some(email) = email {
        check_length("email", email, MAX_EMAIL_LENGTH)?;
    }
    if let Some(avatar) = avatar {
        check_length("avatar", avatar, MAX_AVATAR_LENGTH)?;
    }
    Ok(())
}

fn check_length(field: &str, value: &str, max: usize) -> Result<()> {
    if value.chars().count() > max {
        return Err(CopionError::InvalidInput(format!(
            "{field} exceeds {max} characters"
        )));
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use serde_json::json;

    use super::*;

    #[test]
    fn difficulty_only_patch_keeps_board_settings() {
        let mut preferences = Preferences::default();
        let patch = PreferencesPatch { difficulty: Some(Difficulty::Hard), ..Default::default() };

        patch.apply_to(&mut preferences);

        assert_eq!(preferences.difficulty, Difficulty::Hard);
        assert_eq!((preferences.rows, preferences.cols, preferences.time), (6, 8, 30));
    }

    #[test]
    fn new_profile_fills_defaults() {
        let profile = NewProfile::with_username("ana").into_profile("p1".into());
        assert_eq!(profile.username, "ana");
        assert_eq!(profile.avatar, "🙂");
        assert_eq!(profile.preferences, Preferences::default());
    }

    #[test]
    fn new_profile_validation_rejects_malformed_identity() {
        let blank_id = NewProfile { id: Some("  ".into()), ..Default::default() };
        assert!(blank_id.validate().is_err());

        let spaced_id = NewProfile { id: Some("a b".into()), ..Default::default() };
        assert!(spaced_id.validate().is_err());

        let long_name = NewProfile::with_username("x".repeat(MAX_USERNAME_LENGTH + 1));
        assert!(long_name.validate().is_err());

        let blank_name = NewProfile::with_username("   ");
        assert!(blank_name.validate().is_err());

        assert!(NewProfile::default().validate().is_ok());
    }

    #[test]
    fn zero_board_size_is_rejected() {
        let patch = PreferencesPatch { rows: Some(0), ..Default::default() };
        assert!(patch.validate().is_err());
    }

    #[test]
    fn patch_ignores_stats_and_history_keys() {
        let patch: ProfilePatch = serde_json::from_value(json!({
            "username": "bob",
            "stats": { "gamesPlayed": 99 },
            "history": []
        }))
        .unwrap();

        let mut profile = Profile::new("p1");
        patch.apply_to(&mut profile);

        assert_eq!(profile.username, "bob");
        assert_eq!(profile.stats.games_played, 0);
    }

    #[test]
    fn prefs_alias_is_accepted() {
        let patch: ProfilePatch =
            serde_json::from_value(json!({ "prefs": { "rows": 10 } })).unwrap();
        assert_eq!(patch.preferences.and_then(|p| p.rows), Some(10));
    }
}
