//! Match submission and history commands

use std::sync::Arc;
use std::time::Instant;

use axum::body::Bytes;
use axum::extract::{Path, State};
use axum::http::StatusCode;
use axum::Json;
use copion_domain::{CopionError, MatchRecord, MatchSubmission, Profile};

use super::{finish, parse_body};
use crate::context::AppContext;
use crate::error::ApiError;

type Created = (StatusCode, Json<Profile>);

/// `POST /api/perfiles/{id}/partidas` and `POST /api/scores/{id}`
///
/// A `profileId` in the body is ignored; the path wins.
pub async fn submit_match_for(
    State(ctx): State<Arc<AppContext>>,
    Path(id): Path<String>,
    body: Bytes,
) -> Result<Created, ApiError> {
    let start = Instant::now();
    let result = async {
        let submission: MatchSubmission = parse_body(&body)?;
        record(&ctx, &id, submission).await
    }
    .await;

    finish("matches::submit", start, result).map(|profile| (StatusCode::CREATED, Json(profile)))
}

/// `POST /api/partidas` with the profile id in the body
pub async fn submit_match(
    State(ctx): State<Arc<AppContext>>,
    body: Bytes,
) -> Result<Created, ApiError> {
    let start = Instant::now();
    let result = async {
        let mut submission: MatchSubmission = parse_body(&body)?;
        let id = submission
            .profile_id
            .take()
            .filter(|id| !id.trim().is_empty())
            .ok_or_else(|| CopionError::InvalidInput("profileId is required".into()))?;
        record(&ctx, &id, submission).await
    }
    .await;

    finish("matches::submit", start, result).map(|profile| (StatusCode::CREATED, Json(profile)))
}

/// `GET /api/scores/{id}` and `GET /api/historial/{id}`
pub async fn get_history(
    State(ctx): State<Arc<AppContext>>,
    Path(id): Path<String>,
) -> Result<Json<Vec<MatchRecord>>, ApiError> {
    let start = Instant::now();
    let result = ctx.profiles.history(&id).await.map_err(ApiError::from);
    finish("matches::history", start, result).map(Json)
}

/// Unknown profiles are reported before the score is looked at.
async fn record(
    ctx: &AppContext,
    id: &str,
    submission: MatchSubmission,
) -> Result<Profile, ApiError> {
    ctx.profiles.get(id).await?;
    let report = submission.into_report()?;
    Ok(ctx.profiles.apply_result(id, report).await?)
}
