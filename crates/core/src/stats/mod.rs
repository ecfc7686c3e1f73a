//! Stats engine
//!
//! Pure functions that apply one reported match to a profile.

pub mod engine;

pub use engine::{apply_result, current_streak};
