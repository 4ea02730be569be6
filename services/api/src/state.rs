//! Shared Application State
//!
//! This module defines the `AppState` struct, which holds all shared,
//! clonable resources like the database pool and service clients.

use crate::{auth::Authenticator, db::Db};
use solver_core::solution::SolutionService;
use std::sync::Arc;

/// The shared application state, created once at startup and passed to all handlers.
/// All fields are public to be accessible from other modules.
#[derive(Clone)]
pub struct AppState {
    pub db: Arc<Db>,
    pub authenticator: Arc<dyn Authenticator>,
    pub solution_service: Arc<dyn SolutionService>,
}
