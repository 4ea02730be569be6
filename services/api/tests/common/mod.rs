//! Shared fixtures for router-level tests.

use anyhow::{Result, anyhow};
use async_trait::async_trait;
use axum::{
    Router,
    body::{Body, to_bytes},
    http::{Request, StatusCode, header},
};
use serde_json::Value;
use solver_api::{
    auth::BearerUserIdAuthenticator, db::Db, models::User, router::create_router, state::AppState,
};
use solver_core::solution::SolutionService;
use std::{
    io,
    sync::{Arc, Mutex},
};
use tower::ServiceExt;
use tracing::subscriber::DefaultGuard;
use tracing_subscriber::fmt::MakeWriter;

/// Answers every problem with the same text.
pub struct CannedSolutionService(pub &'static str);

#[async_trait]
impl SolutionService for CannedSolutionService {
    async fn solve(&self, _problem_text: &str) -> Result<String> {
        Ok(self.0.to_string())
    }
}

/// Behaves like a provider that cannot be reached.
pub struct UnavailableSolutionService;

#[async_trait]
impl SolutionService for UnavailableSolutionService {
    async fn solve(&self, _problem_text: &str) -> Result<String> {
        Err(anyhow!("connection refused: api.openai.com:443"))
    }
}

/// Remembers every problem text it is asked to solve.
#[derive(Default)]
pub struct RecordingSolutionService {
    pub received: Mutex<Vec<String>>,
}

#[async_trait]
impl SolutionService for RecordingSolutionService {
    async fn solve(&self, problem_text: &str) -> Result<String> {
        self.received
            .lock()
            .expect("lock")
            .push(problem_text.to_string());
        Ok("recorded".to_string())
    }
}

/// Collects formatted log lines emitted on the current thread.
#[derive(Clone, Default)]
pub struct LogCapture {
    buffer: Arc<Mutex<Vec<u8>>>,
}

impl LogCapture {
    /// Installs a subscriber writing into this capture until the guard drops.
    pub fn install(&self) -> DefaultGuard {
        let subscriber = tracing_subscriber::fmt()
            .with_writer(self.clone())
            .with_ansi(false)
            .with_max_level(tracing::Level::DEBUG)
            .finish();
        tracing::subscriber::set_default(subscriber)
    }

    pub fn contents(&self) -> String {
        String::from_utf8_lossy(&self.buffer.lock().expect("lock")).into_owned()
    }
}

impl io::Write for LogCapture {
    fn write(&mut self, buf: &[u8]) -> io::Result<usize> {
        self.buffer.lock().expect("lock").extend_from_slice(buf);
        Ok(buf.len())
    }

    fn flush(&mut self) -> io::Result<()> {
        Ok(())
    }
}

impl<'a> MakeWriter<'a> for LogCapture {
    type Writer = LogCapture;

    fn make_writer(&'a self) -> Self::Writer {
        self.clone()
    }
}

pub struct TestApp {
    pub db: Arc<Db>,
    pub router: Router,
}

impl TestApp {
    pub async fn new(solution_service: Arc<dyn SolutionService>) -> Self {
        let db = Arc::new(Db::in_memory().await.expect("in-memory database"));
        db.run_migrations().await.expect("migrations");

        let state = Arc::new(AppState {
            db: db.clone(),
            authenticator: Arc::new(BearerUserIdAuthenticator::new(db.clone())),
            solution_service,
        });

        Self {
            db,
            router: create_router(state),
        }
    }

    pub async fn create_user(&self, username: &str) -> User {
        self.db
            .create_user(username, "not-a-real-hash")
            .await
            .expect("user")
    }

    /// Sends a request and returns the status with the JSON body (or `Null`).
    pub async fn send(
        &self,
        method: &str,
        uri: &str,
        user: Option<&User>,
        body: Option<Value>,
    ) -> (StatusCode, Value) {
        let mut builder = Request::builder().method(method).uri(uri);
        if let Some(user) = user {
            builder = builder.header(header::AUTHORIZATION, format!("Bearer {}", user.id));
        }
        let request = match body {
            Some(json) => builder
                .header(header::CONTENT_TYPE, "application/json")
                .body(Body::from(json.to_string())),
            None => builder.body(Body::empty()),
        }
        .expect("request");

        let response = self.router.clone().oneshot(request).await.expect("response");
        let status = response.status();
        let bytes = to_bytes(response.into_body(), usize::MAX)
            .await
            .expect("body");
        let value = serde_json::from_slice(&bytes).unwrap_or(Value::Null);
        (status, value)
    }
}
