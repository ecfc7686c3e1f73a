//! Application constants
//!
//! Centralized location for all domain-level constants used throughout the
//! application.

// History and ranking bounds
pub const HISTORY_LIMIT: usize = 50;
pub const DEFAULT_LEADERBOARD_LIMIT: usize = 10;

// Creation defaults
pub const DEFAULT_USERNAME: &str = "Anónimo";
pub const DEFAULT_EMAIL: &str = "";
pub const DEFAULT_AVATAR: &str = "🙂";
pub const DEFAULT_ROWS: u32 = 6;
pub const DEFAULT_COLS: u32 = 8;
pub const DEFAULT_TIME_SECS: u32 = 30;
pub const DEFAULT_SOUND: bool = true;

// Structural limits (column widths of the relational store)
pub const MAX_ID_LENGTH: usize = 64;
pub const MAX_USERNAME_LENGTH: usize = 100;
pub const MAX_EMAIL_LENGTH: usize = 120;
pub const MAX_AVATAR_LENGTH: usize = 255;

// Snapshot file
pub const DEFAULT_SNAPSHOT_PATH: &str = "perfiles.json";
