//! Leaderboard command

use std::sync::Arc;
use std::time::Instant;

use axum::extract::rejection::QueryRejection;
use axum::extract::{Query, State};
use axum::Json;
use copion_domain::constants::DEFAULT_LEADERBOARD_LIMIT;
use copion_domain::LeaderboardEntry;
use serde::Deserialize;

use super::finish;
use crate::context::AppContext;
use crate::error::ApiError;

#[derive(Debug, Default, Deserialize)]
pub struct LeaderboardQuery {
    pub limit: Option<usize>,
}

/// `GET /api/leaderboard?limit=N`
pub async fn get_leaderboard(
    State(ctx): State<Arc<AppContext>>,
    query: Result<Query<LeaderboardQuery>, QueryRejection>,
) -> Result<Json<Vec<LeaderboardEntry>>, ApiError> {
    let start = Instant::now();
    let result = match query {
        Ok(Query(query)) => {
            let limit = query.limit.unwrap_or(DEFAULT_LEADERBOARD_LIMIT);
            Ok(ctx.profiles.leaderboard(limit).await)
        }
        Err(rejection) => Err(ApiError::BadRequest(rejection.body_text())),
    };

    finish("leaderboard::get", start, result).map(Json)
}
