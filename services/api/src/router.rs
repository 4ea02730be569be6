//! Axum Router Configuration
//!
//! This module defines the complete HTTP routing for the application,
//! including the REST API and OpenAPI documentation.

use crate::{
    handlers,
    models::{CreateProblemPayload, ErrorResponse, Problem, ProblemStatus, Solution},
    state::AppState,
};

use axum::{
    Router,
    routing::{get, post},
};
use std::sync::Arc;
use utoipa::{
    Modify, OpenApi,
    openapi::security::{HttpAuthScheme, HttpBuilder, SecurityScheme},
};
use utoipa_swagger_ui::SwaggerUi;

#[derive(OpenApi)]
#[openapi(
    paths(
        handlers::submit_problem,
        handlers::list_problems,
        handlers::solve_problem,
    ),
    components(
        schemas(Problem, ProblemStatus, CreateProblemPayload, Solution, ErrorResponse)
    ),
    modifiers(&BearerAuth),
    tags(
        (name = "Problem Solver API", description = "Problem submission and LLM-generated solutions")
    )
)]
pub struct ApiDoc;

struct BearerAuth;

impl Modify for BearerAuth {
    fn modify(&self, openapi: &mut utoipa::openapi::OpenApi) {
        if let Some(components) = openapi.components.as_mut() {
            components.add_security_scheme(
                "bearer",
                SecurityScheme::Http(HttpBuilder::new().scheme(HttpAuthScheme::Bearer).build()),
            );
        }
    }
}

/// Creates the main Axum router for the application.
pub fn create_router(app_state: Arc<AppState>) -> Router {
    // The trailing-slash forms are what existing clients call.
    let api_router = Router::new()
        .route(
            "/problems",
            get(handlers::list_problems).post(handlers::submit_problem),
        )
        .route(
            "/problems/",
            get(handlers::list_problems).post(handlers::submit_problem),
        )
        .route("/problems/solve", post(handlers::solve_problem))
        .with_state(app_state);

    Router::new()
        .merge(SwaggerUi::new("/swagger-ui").url("/api-docs/openapi.json", ApiDoc::openapi()))
        .merge(api_router)
}
