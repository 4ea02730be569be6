//! Request-scoped extractors that are not about identity.

use axum::{
    Json,
    extract::{FromRequest, FromRequestParts, Request, rejection::JsonRejection},
    http::request::Parts,
};
use sqlx::{Sqlite, pool::PoolConnection};
use std::{
    ops::{Deref, DerefMut},
    sync::Arc,
};

use crate::{error::ApiError, state::AppState};

/// A pooled connection checked out for the lifetime of one request.
pub struct DbSession(pub PoolConnection<Sqlite>);

impl FromRequestParts<Arc<AppState>> for DbSession {
    type Rejection = ApiError;

    async fn from_request_parts(
        _parts: &mut Parts,
        state: &Arc<AppState>,
    ) -> Result<Self, Self::Rejection> {
        Ok(DbSession(state.db.acquire().await?))
    }
}

impl Deref for DbSession {
    type Target = PoolConnection<Sqlite>;

    fn deref(&self) -> &Self::Target {
        &self.0
    }
}

impl DerefMut for DbSession {
    fn deref_mut(&mut self) -> &mut Self::Target {
        &mut self.0
    }
}

/// `Json<T>` whose rejections use the API's JSON error body.
pub struct ApiJson<T>(pub T);

impl<S, T> FromRequest<S> for ApiJson<T>
where
    Json<T>: FromRequest<S, Rejection = JsonRejection>,
    S: Send + Sync,
{
    type Rejection = ApiError;

    async fn from_request(req: Request, state: &S) -> Result<Self, Self::Rejection> {
        let Json(value) = Json::<T>::from_request(req, state)
            .await
            .map_err(|rejection| ApiError::Rejected(rejection.status(), rejection.body_text()))?;
        Ok(ApiJson(value))
    }
}
