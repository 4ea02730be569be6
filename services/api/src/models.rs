//! API and Database Models
//!
//! This module defines the core data structures used for both database mapping
//! with `sqlx` and for generating OpenAPI documentation with `utoipa`.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use sqlx::FromRow;
use std::fmt;
use utoipa::ToSchema;

/// Lifecycle of a submitted problem. Only `Pending` is produced today.
#[derive(sqlx::Type, Debug, Serialize, Deserialize, ToSchema, Clone, Copy, PartialEq, Eq, Default)]
#[sqlx(rename_all = "lowercase")]
#[serde(rename_all = "lowercase")]
pub enum ProblemStatus {
    #[default]
    Pending,
    Solved,
    Failed,
}

impl fmt::Display for ProblemStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ProblemStatus::Pending => write!(f, "pending"),
            ProblemStatus::Solved => write!(f, "solved"),
            ProblemStatus::Failed => write!(f, "failed"),
        }
    }
}

#[derive(Serialize, FromRow, Debug, Clone)]
pub struct User {
    pub id: i64,
    pub username: String,
    #[serde(skip_serializing)]
    pub hashed_password: String,
}

#[derive(Serialize, Deserialize, ToSchema, FromRow, Debug, Clone)]
pub struct Problem {
    pub id: i64,
    pub user_id: i64,
    pub problem_text: String,
    pub known_answer: Option<String>,
    pub status: ProblemStatus,
    pub created_at: DateTime<Utc>,
}

/// Body accepted by both the submit and the solve endpoints.
#[derive(Deserialize, ToSchema, Debug, Clone)]
pub struct CreateProblemPayload {
    #[schema(example = "A train travels 120 km in 2 hours. What is its average speed?")]
    pub problem_text: String,
    #[serde(default)]
    #[schema(example = "60 km/h")]
    pub known_answer: Option<String>,
}

#[derive(Serialize, Deserialize, ToSchema, Debug, Clone)]
pub struct Solution {
    pub solution: String,
}

/// Error body. The `detail` key is what existing clients read.
#[derive(Serialize, ToSchema)]
pub struct ErrorResponse {
    pub detail: String,
}
