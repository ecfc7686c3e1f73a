//! HTTP command handlers
//!
//! Every handler times itself and reports its outcome through
//! [`log_command_execution`] before the response is built.

pub mod health;
pub mod leaderboard;
pub mod matches;
pub mod profiles;

use std::time::Instant;

use serde::de::DeserializeOwned;
use tracing::{debug, warn};

use crate::error::ApiError;
use crate::utils::logging::log_command_execution;

pub use health::health;
pub use leaderboard::get_leaderboard;
pub use matches::{get_history, submit_match, submit_match_for};
pub use profiles::{create_profile, delete_profile, get_profile, list_profiles, update_profile};

/// Log the outcome of `command` and pass the result through.
fn finish<T>(command: &'static str, start: Instant, result: Result<T, ApiError>) -> Result<T, ApiError> {
    log_command_execution(command, start.elapsed(), result.is_ok());
    match &result {
        Err(err) if err.is_client_error() => {
            debug!(command, label = err.label(), error = %err, "command rejected");
        }
        Err(err) => warn!(command, label = err.label(), error = %err, "command failed"),
        Ok(_) => {}
    }
    result
}

/// Decode a JSON body; an empty body is the payload's default.
fn parse_body<T>(body: &[u8]) -> Result<T, ApiError>
where
    T: DeserializeOwned + Default,
{
    if body.iter().all(u8::is_ascii_whitespace) {
        return Ok(T::default());
    }
    serde_json::from_slice(body).map_err(|e| ApiError::BadRequest(e.to_string()))
}
