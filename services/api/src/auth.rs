//! Request Authentication
//!
//! Resolves the `Authorization: Bearer <token>` header into a `User`. The
//! resolution strategy sits behind the `Authenticator` trait so handlers only
//! ever see the `CurrentUser` extractor.

use anyhow::Result;
use async_trait::async_trait;
use axum::{
    extract::FromRequestParts,
    http::{header::AUTHORIZATION, request::Parts},
};
use std::sync::Arc;
use tracing::debug;

use crate::{db::Db, error::ApiError, models::User, state::AppState};

/// Turns a bearer credential into a user identity.
#[async_trait]
pub trait Authenticator: Send + Sync {
    /// Returns `None` when the credential does not identify a user.
    async fn authenticate(&self, credential: &str) -> Result<Option<User>>;
}

/// Accepts the numeric user id itself as the bearer token.
///
/// This carries no secret and is only suitable for development and tests.
pub struct BearerUserIdAuthenticator {
    db: Arc<Db>,
}

impl BearerUserIdAuthenticator {
    pub fn new(db: Arc<Db>) -> Self {
        Self { db }
    }
}

#[async_trait]
impl Authenticator for BearerUserIdAuthenticator {
    async fn authenticate(&self, credential: &str) -> Result<Option<User>> {
        let Ok(user_id) = credential.parse::<i64>() else {
            return Ok(None);
        };
        self.db.find_user(user_id).await
    }
}

/// Pulls the token out of an `Authorization` value. The scheme name is
/// case-insensitive.
fn bearer_token(header: &str) -> Option<&str> {
    let (scheme, token) = header.trim_start().split_once(' ')?;
    let token = token.trim();
    (scheme.eq_ignore_ascii_case("bearer") && !token.is_empty()).then_some(token)
}

/// The authenticated caller. Extraction fails with `401` before any body is read.
#[derive(Debug, Clone)]
pub struct CurrentUser(pub User);

impl FromRequestParts<Arc<AppState>> for CurrentUser {
    type Rejection = ApiError;

    async fn from_request_parts(
        parts: &mut Parts,
        state: &Arc<AppState>,
    ) -> Result<Self, Self::Rejection> {
        let token = parts
            .headers
            .get(AUTHORIZATION)
            .and_then(|v| v.to_str().ok())
            .and_then(bearer_token)
            .ok_or(ApiError::Unauthorized)?;

        match state.authenticator.authenticate(token).await? {
            Some(user) => Ok(CurrentUser(user)),
            None => {
                debug!("Rejected unknown bearer credential");
                Err(ApiError::Unauthorized)
            }
        }
    }
}
