//! Route table

use std::sync::Arc;

use axum::routing::{get, post};
use axum::Router;

use crate::commands::{
    create_profile, delete_profile, get_history, get_leaderboard, get_profile, health,
    list_profiles, submit_match, submit_match_for, update_profile,
};
use crate::context::AppContext;

/// Build the HTTP router over a shared context.
pub fn router(ctx: Arc<AppContext>) -> Router {
    Router::new()
        .route("/api/perfiles", get(list_profiles).post(create_profile))
        .route(
            "/api/perfiles/{id}",
            get(get_profile).put(update_profile).patch(update_profile).delete(delete_profile),
        )
        .route("/api/perfiles/{id}/partidas", post(submit_match_for))
        .route("/api/partidas", post(submit_match))
        .route("/api/scores/{id}", get(get_history).post(submit_match_for))
        .route("/api/historial/{id}", get(get_history))
        .route("/api/leaderboard", get(get_leaderboard))
        .route("/api/health", get(health))
        .with_state(ctx)
}
