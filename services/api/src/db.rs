//! Data Access Layer
//!
//! This module contains all the functions for interacting with the SQLite database.
//! `Db` owns the connection pool and the schema; the problem queries run on a
//! single connection that the caller checks out for the duration of a request.

use anyhow::Result;
use chrono::Utc;
use sqlx::{
    Sqlite, SqliteConnection, SqlitePool,
    migrate::Migrator,
    pool::PoolConnection,
    sqlite::{SqliteConnectOptions, SqlitePoolOptions},
};
use std::str::FromStr;

use crate::models::{CreateProblemPayload, Problem, ProblemStatus, User};

static MIGRATOR: Migrator = sqlx::migrate!("./migrations");

/// A wrapper around the `SqlitePool` to provide a clear data access interface.
#[derive(Clone)]
pub struct Db {
    pool: SqlitePool,
}

impl Db {
    /// Creates a new `Db` instance.
    pub fn new(pool: SqlitePool) -> Self {
        Self { pool }
    }

    /// Opens a pool for `database_url`, creating the database file if needed.
    pub async fn connect(database_url: &str) -> Result<Self> {
        let options = SqliteConnectOptions::from_str(database_url)?
            .create_if_missing(true)
            .foreign_keys(true);
        let pool = SqlitePoolOptions::new().connect_with(options).await?;
        Ok(Self::new(pool))
    }

    /// Opens a private in-memory database.
    ///
    /// Every SQLite connection to `:memory:` sees its own database, so the pool
    /// is pinned to a single connection that is never recycled.
    pub async fn in_memory() -> Result<Self> {
        let options = SqliteConnectOptions::from_str("sqlite::memory:")?.foreign_keys(true);
        let pool = SqlitePoolOptions::new()
            .max_connections(1)
            .min_connections(1)
            .idle_timeout(None)
            .max_lifetime(None)
            .connect_with(options)
            .await?;
        Ok(Self::new(pool))
    }

    /// Runs all pending `sqlx` migrations.
    pub async fn run_migrations(&self) -> Result<()> {
        MIGRATOR.run(&self.pool).await?;
        Ok(())
    }

    /// Reverts every migration, dropping the `problems` and `users` tables.
    pub async fn reset_schema(&self) -> Result<()> {
        MIGRATOR.undo(&self.pool, 0).await?;
        Ok(())
    }

    /// Checks out a connection to use as a request-scoped session.
    /// It goes back to the pool when dropped.
    pub async fn acquire(&self) -> Result<PoolConnection<Sqlite>> {
        Ok(self.pool.acquire().await?)
    }

    /// Registers a user. Usernames are unique.
    pub async fn create_user(&self, username: &str, hashed_password: &str) -> Result<User> {
        let user = sqlx::query_as::<_, User>(
            r#"
            INSERT INTO users (username, hashed_password)
            VALUES (?1, ?2)
            RETURNING id, username, hashed_password
            "#,
        )
        .bind(username)
        .bind(hashed_password)
        .fetch_one(&self.pool)
        .await?;
        Ok(user)
    }

    /// Retrieves a single user by ID.
    pub async fn find_user(&self, user_id: i64) -> Result<Option<User>> {
        let user = sqlx::query_as::<_, User>(
            "SELECT id, username, hashed_password FROM users WHERE id = ?1",
        )
        .bind(user_id)
        .fetch_optional(&self.pool)
        .await?;
        Ok(user)
    }
}

/// Stores a new problem for `user_id` with status `pending`.
pub async fn create_problem(
    conn: &mut SqliteConnection,
    payload: &CreateProblemPayload,
    user_id: i64,
) -> Result<Problem> {
    let problem = sqlx::query_as::<_, Problem>(
        r#"
        INSERT INTO problems (user_id, problem_text, known_answer, status, created_at)
        VALUES (?1, ?2, ?3, ?4, ?5)
        RETURNING id, user_id, problem_text, known_answer, status, created_at
        "#,
    )
    .bind(user_id)
    .bind(&payload.problem_text)
    .bind(&payload.known_answer)
    .bind(ProblemStatus::Pending)
    .bind(Utc::now())
    .fetch_one(&mut *conn)
    .await?;
    Ok(problem)
}

/// Lists every problem owned by `user_id`, oldest first.
pub async fn list_problems(conn: &mut SqliteConnection, user_id: i64) -> Result<Vec<Problem>> {
    let problems = sqlx::query_as::<_, Problem>(
        r#"
        SELECT id, user_id, problem_text, known_answer, status, created_at
        FROM problems
        WHERE user_id = ?1
        ORDER BY id ASC
        "#,
    )
    .bind(user_id)
    .fetch_all(&mut *conn)
    .await?;
    Ok(problems)
}

#[cfg(test)]
mod tests {
    use super::*;

    async fn setup() -> Db {
        let db = Db::in_memory().await.unwrap();
        db.run_migrations().await.unwrap();
        db
    }

    fn payload(text: &str, answer: Option<&str>) -> CreateProblemPayload {
        CreateProblemPayload {
            problem_text: text.to_string(),
            known_answer: answer.map(str::to_string),
        }
    }

    #[tokio::test]
    async fn test_create_user_and_find() {
        let db = setup().await;
        let user = db.create_user("testuser", "hash").await.unwrap();

        let found = db.find_user(user.id).await.unwrap().unwrap();
        assert_eq!(found.username, "testuser");
        assert_eq!(found.hashed_password, "hash");

        assert!(db.find_user(user.id + 100).await.unwrap().is_none());
    }

    #[tokio::test]
    async fn test_duplicate_username_is_rejected() {
        let db = setup().await;
        db.create_user("testuser", "hash").await.unwrap();
        assert!(db.create_user("testuser", "other").await.is_err());
    }

    #[tokio::test]
    async fn test_create_problem_defaults_to_pending() {
        let db = setup().await;
        let user = db.create_user("testuser", "hash").await.unwrap();
        let mut conn = db.acquire().await.unwrap();

        let problem = create_problem(&mut conn, &payload("Test problem", None), user.id)
            .await
            .unwrap();

        assert!(problem.id > 0);
        assert_eq!(problem.user_id, user.id);
        assert_eq!(problem.problem_text, "Test problem");
        assert_eq!(problem.known_answer, None);
        assert_eq!(problem.status, ProblemStatus::Pending);
    }

    #[tokio::test]
    async fn test_create_problem_for_unknown_user_fails() {
        let db = setup().await;
        let mut conn = db.acquire().await.unwrap();

        let result = create_problem(&mut conn, &payload("Orphan", None), 42).await;
        assert!(result.is_err());
    }

    #[tokio::test]
    async fn test_list_problems_is_scoped_to_owner() {
        let db = setup().await;
        let alice = db.create_user("alice", "hash").await.unwrap();
        let bob = db.create_user("bob", "hash").await.unwrap();
        let mut conn = db.acquire().await.unwrap();

        create_problem(&mut conn, &payload("first", Some("1")), alice.id)
            .await
            .unwrap();
        create_problem(&mut conn, &payload("bob's", None), bob.id)
            .await
            .unwrap();
        create_problem(&mut conn, &payload("second", None), alice.id)
            .await
            .unwrap();

        let problems = list_problems(&mut conn, alice.id).await.unwrap();
        let texts: Vec<_> = problems.iter().map(|p| p.problem_text.as_str()).collect();
        assert_eq!(texts, vec!["first", "second"]);
        assert!(problems.iter().all(|p| p.user_id == alice.id));
        assert_eq!(problems[0].known_answer.as_deref(), Some("1"));

        let problems = list_problems(&mut conn, bob.id).await.unwrap();
        assert_eq!(problems.len(), 1);
        assert_eq!(problems[0].problem_text, "bob's");
    }

    #[tokio::test]
    async fn test_list_problems_empty() {
        let db = setup().await;
        let user = db.create_user("lonely", "hash").await.unwrap();
        let mut conn = db.acquire().await.unwrap();

        let problems = list_problems(&mut conn, user.id).await.unwrap();
        assert!(problems.is_empty());
    }

    #[tokio::test]
    async fn test_reset_schema_drops_tables() {
        let db = setup().await;
        db.create_user("testuser", "hash").await.unwrap();

        db.reset_schema().await.unwrap();
        assert!(db.find_user(1).await.is_err());

        db.run_migrations().await.unwrap();
        assert!(db.find_user(1).await.unwrap().is_none());
    }
}
