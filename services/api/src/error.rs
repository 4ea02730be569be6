//! HTTP error mapping shared by handlers and extractors.

use axum::{
    http::StatusCode,
    response::{IntoResponse, Json, Response},
};
use tracing::error;

use crate::models::ErrorResponse;

pub enum ApiError {
    /// No credential, or one that does not resolve to a user.
    Unauthorized,
    /// The request was refused before reaching a handler body.
    Rejected(StatusCode, String),
    /// The solution service failed. The cause is logged, never returned.
    SolutionFailed(anyhow::Error),
    InternalServerError(anyhow::Error),
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        match self {
            ApiError::Unauthorized => (
                StatusCode::UNAUTHORIZED,
                Json(ErrorResponse {
                    detail: "Not authenticated".to_string(),
                }),
            )
                .into_response(),
            ApiError::Rejected(status, detail) => {
                (status, Json(ErrorResponse { detail })).into_response()
            }
            ApiError::SolutionFailed(err) => {
                error!("Error processing problem: {:?}", err);
                let detail = "Failed to get solution".to_string();
                (
                    StatusCode::INTERNAL_SERVER_ERROR,
                    Json(ErrorResponse { detail }),
                )
                    .into_response()
            }
            ApiError::InternalServerError(err) => {
                error!("Internal Server Error: {:?}", err);
                let detail = "An internal server error occurred.".to_string();
                (
                    StatusCode::INTERNAL_SERVER_ERROR,
                    Json(ErrorResponse { detail }),
                )
                    .into_response()
            }
        }
    }
}

impl<E> From<E> for ApiError
where
    E: Into<anyhow::Error>,
{
    fn from(err: E) -> Self {
        Self::InternalServerError(err.into())
    }
}
