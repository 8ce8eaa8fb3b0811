//! Liveness endpoint reporting service identity and directory size.

use crate::state::AppState;
use axum::{Json, Router, extract::State, routing::get};
use axum_helpers::{HealthResponse, errors::responses::InternalServerErrorResponse};
use domain_users::UserResult;
use serde::Serialize;

pub const TAG: &str = "health";

#[derive(Debug, Serialize)]
pub struct UsersHealth {
    users_count: usize,
}

pub fn router(state: AppState) -> Router {
    Router::new()
        .route("/health", get(health_handler))
        .with_state(state)
}

/// Service health
///
/// GET /health
#[utoipa::path(
    get,
    path = "/health",
    tag = TAG,
    responses(
        (status = 200, description = "Service is up with the number of stored users"),
        (status = 500, response = InternalServerErrorResponse)
    )
)]
pub async fn health_handler(
    State(state): State<AppState>,
) -> UserResult<Json<HealthResponse<UsersHealth>>> {
    let users_count = state.users.count_users().await?;
    Ok(Json(HealthResponse::healthy(
        state.config.app,
        UsersHealth { users_count },
    )))
}
