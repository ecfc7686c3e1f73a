//! Profile CRUD commands

use std::sync::Arc;
use std::time::Instant;

use axum::body::Bytes;
use axum::extract::{Path, State};
use axum::http::StatusCode;
use axum::Json;
use copion_domain::{NewProfile, Profile, ProfilePatch};
use serde::Serialize;

use super::{finish, parse_body};
use crate::context::AppContext;
use crate::error::ApiError;
use crate::utils::logging::log_command_execution;

/// Body returned by a successful delete
#[derive(Debug, Serialize)]
pub struct Deleted {
    pub message: &'static str,
    pub id: String,
}

/// `GET /api/perfiles`
pub async fn list_profiles(State(ctx): State<Arc<AppContext>>) -> Json<Vec<Profile>> {
    let start = Instant::now();
    let profiles = ctx.profiles.list().await;
    log_command_execution("profiles::list", start.elapsed(), true);
    Json(profiles)
}

/// `POST /api/perfiles`
pub async fn create_profile(
    State(ctx): State<Arc<AppContext>>,
    body: Bytes,
) -> Result<(StatusCode, Json<Profile>), ApiError> {
    let start = Instant::now();
    let result = async {
        let request: NewProfile = parse_body(&body)?;
        Ok::<_, ApiError>(ctx.profiles.create(request).await?)
    }
    .await;

    finish("profiles::create", start, result).map(|profile| (StatusCode::CREATED, Json(profile)))
}

/// `GET /api/perfiles/{id}`
pub async fn get_profile(
    State(ctx): State<Arc<AppContext>>,
    Path(id): Path<String>,
) -> Result<Json<Profile>, ApiError> {
    let start = Instant::now();
    let result = ctx.profiles.get(&id).await.map_err(ApiError::from);
    finish("profiles::get", start, result).map(Json)
}

/// `PUT|PATCH /api/perfiles/{id}`
pub async fn update_profile(
    State(ctx): State<Arc<AppContext>>,
    Path(id): Path<String>,
    body: Bytes,
) -> Result<Json<Profile>, ApiError> {
    let start = Instant::now();
    let result = async {
        let patch: ProfilePatch = parse_body(&body)?;
        Ok::<_, ApiError>(ctx.profiles.update(&id, patch).await?)
    }
    .await;

    finish("profiles::update", start, result).map(Json)
}

/// `DELETE /api/perfiles/{id}`
pub async fn delete_profile(
    State(ctx): State<Arc<AppContext>>,
    Path(id): Path<String>,
) -> Result<Json<Deleted>, ApiError> {
    let start = Instant::now();
    let result = ctx.profiles.delete(&id).await.map_err(ApiError::from);
    finish("profiles::delete", start, result)
        .map(|removed| Json(Deleted { message: "Perfil eliminado", id: removed.id }))
}
