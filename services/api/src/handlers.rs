//! Axum Handlers for the REST API
//!
//! This module contains the logic for handling HTTP requests for problems.
//! It uses `utoipa` doc comments to generate OpenAPI documentation.

use axum::{extract::State, response::Json};
use std::sync::Arc;
use tracing::info;

use crate::{
    auth::CurrentUser,
    db,
    error::ApiError,
    extract::{ApiJson, DbSession},
    models::{CreateProblemPayload, ErrorResponse, Problem, Solution},
    state::AppState,
};

/// Submit a new problem for the authenticated user.
#[utoipa::path(
    post,
    path = "/problems",
    request_body = CreateProblemPayload,
    responses(
        (status = 200, description = "Problem stored", body = Problem),
        (status = 401, description = "Not authenticated", body = ErrorResponse),
        (status = 422, description = "Invalid request body", body = ErrorResponse),
        (status = 500, description = "Internal server error", body = ErrorResponse)
    ),
    security(("bearer" = []))
)]
pub async fn submit_problem(
    CurrentUser(user): CurrentUser,
    mut session: DbSession,
    ApiJson(payload): ApiJson<CreateProblemPayload>,
) -> Result<Json<Problem>, ApiError> {
    let problem = db::create_problem(&mut session, &payload, user.id).await?;
    info!(user_id = user.id, problem_id = problem.id, "Problem submitted");
    Ok(Json(problem))
}

/// List all problems owned by the authenticated user.
#[utoipa::path(
    get,
    path = "/problems",
    responses(
        (status = 200, description = "Problems owned by the caller", body = [Problem]),
        (status = 401, description = "Not authenticated", body = ErrorResponse),
        (status = 500, description = "Internal server error", body = ErrorResponse)
    ),
    security(("bearer" = []))
)]
pub async fn list_problems(
    CurrentUser(user): CurrentUser,
    mut session: DbSession,
) -> Result<Json<Vec<Problem>>, ApiError> {
    let problems = db::list_problems(&mut session, user.id).await?;
    Ok(Json(problems))
}

/// Generate a step-by-step solution without storing the problem.
#[utoipa::path(
    post,
    path = "/problems/solve",
    request_body = CreateProblemPayload,
    responses(
        (status = 200, description = "Generated solution", body = Solution),
        (status = 401, description = "Not authenticated", body = ErrorResponse),
        (status = 422, description = "Invalid request body", body = ErrorResponse),
        (status = 500, description = "Failed to get solution", body = ErrorResponse)
    ),
    security(("bearer" = []))
)]
pub async fn solve_problem(
    State(state): State<Arc<AppState>>,
    CurrentUser(user): CurrentUser,
    ApiJson(payload): ApiJson<CreateProblemPayload>,
) -> Result<Json<Solution>, ApiError> {
    info!(user_id = user.id, "Solving problem");
    let solution = state
        .solution_service
        .solve(&payload.problem_text)
        .await
        .map_err(ApiError::SolutionFailed)?;
    Ok(Json(Solution { solution }))
}
