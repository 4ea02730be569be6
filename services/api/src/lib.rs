//! Problem Solver API Library Crate
//!
//! This library contains all the core logic for the problem solver web service,
//! including the application state, database access, authentication, API
//! handlers, and routing. The binaries under `bin/` are thin wrappers around it.

pub mod auth;
pub mod config;
pub mod db;
pub mod error;
pub mod extract;
pub mod handlers;
pub mod models;
pub mod password;
pub mod router;
pub mod state;
