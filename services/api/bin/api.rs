//! Main Entrypoint for the Problem Solver API Service
//!
//! This binary is responsible for:
//! 1. Loading configuration from the environment.
//! 2. Initializing the database connection pool and running migrations.
//! 3. Initializing shared services (the LLM client and the solution service).
//! 4. Constructing the Axum router and applying middleware.
//! 5. Starting the web server and handling graceful shutdown.

use anyhow::Context;
use async_openai::config::OpenAIConfig;
use solver_api::{
    auth::{Authenticator, BearerUserIdAuthenticator},
    config::Config,
    db::Db,
    router::create_router,
    state::AppState,
};
use solver_core::{
    llm_client::{LLMClient, OpenAICompatibleClient},
    prompt::PromptTemplate,
    solution::{PromptedSolutionService, SolutionService},
};
use std::{collections::HashMap, fs, net::SocketAddr, sync::Arc};
use tower_http::{
    cors::{Any, CorsLayer},
    trace::TraceLayer,
};
use tracing::info;

/// Listens for the `Ctrl+C` signal to gracefully shut down the server.
async fn shutdown_signal() {
    tokio::signal::ctrl_c()
        .await
        .expect("Failed to install Ctrl+C handler");
    info!("Received shutdown signal. Shutting down gracefully...");
}

/// A helper function to load prompts from a directory.
fn load_prompts(prompts_path: &std::path::Path) -> anyhow::Result<HashMap<String, String>> {
    let mut prompts = HashMap::new();
    for entry in std::fs::read_dir(prompts_path)
        .with_context(|| format!("Could not read prompts directory {}", prompts_path.display()))?
    {
        let entry = entry?;
        let path = entry.path();
        if path.is_file() && path.extension().and_then(|s| s.to_str()) == Some("md") {
            let prompt_key = path
                .file_stem()
                .and_then(|s| s.to_str())
                .context("Could not get file stem")?
                .to_string();
            let content = fs::read_to_string(&path)?;
            prompts.insert(prompt_key, content);
        }
    }
    Ok(prompts)
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    // --- 1. Load Configuration ---
    let config = Config::from_env().context("Failed to load configuration")?;

    // --- 2. Initialize Logging ---
    tracing_subscriber::fmt()
        .with_max_level(config.log_level)
        .with_timer(tracing_subscriber::fmt::time::ChronoLocal::rfc_3339())
        .init();
    info!("Configuration loaded. Initializing application state...");

    // --- 3. Initialize Database ---
    let db = Arc::new(
        Db::connect(&config.database_url)
            .await
            .context("Failed to connect to database")?,
    );
    db.run_migrations().await?;
    info!("Database connection established and migrations are up-to-date.");

    // --- 4. Initialize Shared Services ---
    let prompts = load_prompts(&config.prompts_path)?;
    let template = PromptTemplate::new(
        prompts
            .get("solve_problem")
            .context("solve_problem.md not found in prompts directory")?
            .clone(),
    )?;

    let openai_config = OpenAIConfig::new()
        .with_api_key(&config.api_key)
        .with_api_base(config.provider.api_base());
    let llm_client: Arc<dyn LLMClient> = Arc::new(OpenAICompatibleClient::new(
        openai_config,
        config.chat_model.clone(),
        config.temperature,
    ));
    let solution_service: Arc<dyn SolutionService> =
        Arc::new(PromptedSolutionService::new(llm_client, template));
    let authenticator: Arc<dyn Authenticator> =
        Arc::new(BearerUserIdAuthenticator::new(db.clone()));

    let app_state = Arc::new(AppState {
        db,
        authenticator,
        solution_service,
    });

    // --- 5. Create Router and Apply Middleware ---
    let cors = CorsLayer::new()
        .allow_origin(Any)
        .allow_methods(Any)
        .allow_headers(Any);

    let app = create_router(app_state)
        .layer(cors)
        .layer(TraceLayer::new_for_http());

    // --- 6. Start Server ---
    info!(
        provider = ?config.provider,
        model = %config.chat_model,
        bind_address = %config.bind_address,
        "Service configured. Starting server..."
    );
    let listener = tokio::net::TcpListener::bind(config.bind_address).await?;

    axum::serve(
        listener,
        app.into_make_service_with_connect_info::<SocketAddr>(),
    )
    .with_graceful_shutdown(shutdown_signal())
    .await?;

    info!("Server has shut down.");
    Ok(())
}
