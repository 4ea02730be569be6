//! Registers a user account so it can call the API.
//!
//! The printed id is the bearer token accepted by the development
//! authenticator.

use anyhow::Context;
use clap::Parser;
use solver_api::{db::Db, password::hash_password};
use tracing::info;

/// Create a user for the problem solver API
#[derive(Parser)]
#[command(name = "create-user", version, about, long_about = None)]
struct Cli {
    /// Unique login name
    #[arg(long)]
    username: String,

    /// Plaintext password; stored only as an Argon2id hash
    #[arg(long, env = "SOLVER_USER_PASSWORD", hide_env_values = true)]
    password: String,

    /// Database to write to
    #[arg(long, env = "DATABASE_URL", default_value = "sqlite://solver.db")]
    database_url: String,
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    dotenvy::dotenv().ok();
    tracing_subscriber::fmt()
        .with_timer(tracing_subscriber::fmt::time::ChronoLocal::rfc_3339())
        .init();

    let cli = Cli::parse();

    let db = Db::connect(&cli.database_url)
        .await
        .context("Failed to connect to database")?;
    db.run_migrations().await?;

    let hashed_password = hash_password(&cli.password)?;
    let user = db
        .create_user(&cli.username, &hashed_password)
        .await
        .with_context(|| format!("Failed to create user '{}'", cli.username))?;

    info!(user_id = user.id, username = %user.username, "User created");
    println!("{}", user.id);
    Ok(())
}
