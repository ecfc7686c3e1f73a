//! Health command

use std::sync::Arc;

use axum::extract::State;
use axum::http::StatusCode;
use axum::Json;

use crate::context::AppContext;
use crate::utils::health::{ComponentHealth, HealthStatus};

/// `GET /api/health`
///
/// 200 while healthy, 503 while the store holds changes the backend has
/// not accepted or the backend fails its own health check.
pub async fn health(State(ctx): State<Arc<AppContext>>) -> (StatusCode, Json<HealthStatus>) {
    let profiles = ctx.profiles.len().await;
    let backend = ctx.profiles.backend();

    let persistence = if ctx.profiles.is_dirty() {
        ComponentHealth::unhealthy("persistence", format!("unsaved changes ({backend})"))
    } else {
        ComponentHealth::healthy("persistence").with_message(backend)
    };

    let storage = match ctx.profiles.check_backend().await {
        Ok(()) => ComponentHealth::healthy("storage"),
        Err(err) => ComponentHealth::unhealthy("storage", err.to_string()),
    };

    let mut status = HealthStatus::new()
        .add_component(
            ComponentHealth::healthy("profile_store").with_message(format!("{profiles} profiles")),
        )
        .add_component(persistence)
        .add_component(storage);
    status.calculate_score();

    let code = if status.is_healthy { StatusCode::OK } else { StatusCode::SERVICE_UNAVAILABLE };
    (code, Json(status))
}
