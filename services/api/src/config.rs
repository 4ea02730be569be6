use std::net::SocketAddr;
use std::path::PathBuf;
use tracing::Level;

/// A custom error type for configuration loading failures.
#[derive(Debug, thiserror::Error)]
pub enum ConfigError {
    #[error("Missing environment variable: {0}")]
    MissingVar(String),
    #[error("Invalid value for environment variable {0}: {1}")]
    InvalidValue(String, String),
}

/// Defines the supported OpenAI-compatible backends for solution generation.
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum Provider {
    OpenAI,
    Gemini,
}

impl Provider {
    /// Base URL of the provider's OpenAI-compatible API.
    pub fn api_base(&self) -> &'static str {
        match self {
            Provider::OpenAI => "https://api.openai.com/v1",
            Provider::Gemini => "https://generativelanguage.googleapis.com/v1beta/openai",
        }
    }
}

/// Holds all configuration loaded from the environment at startup.
#[derive(Clone, Debug)]
pub struct Config {
    pub bind_address: SocketAddr,
    pub database_url: String,
    pub provider: Provider,
    pub api_key: String,
    pub chat_model: String,
    pub temperature: f32,
    pub log_level: Level,
    pub prompts_path: PathBuf,
}

impl Config {
    /// Loads configuration from environment variables.
    pub fn from_env() -> Result<Self, ConfigError> {
        // Only load from .env in non-test mode to avoid contamination
        if !cfg!(test) {
            dotenvy::dotenv().ok();
        }

        let bind_address_str =
            std::env::var("BIND_ADDRESS").unwrap_or_else(|_| "0.0.0.0:8000".to_string());
        let bind_address = bind_address_str
            .parse::<SocketAddr>()
            .map_err(|e| ConfigError::InvalidValue("BIND_ADDRESS".to_string(), e.to_string()))?;

        let database_url =
            std::env::var("DATABASE_URL").unwrap_or_else(|_| "sqlite://solver.db".to_string());

        let provider_str = std::env::var("LLM_PROVIDER").unwrap_or_else(|_| "openai".to_string());
        let provider = match provider_str.to_lowercase().as_str() {
            "openai" => Provider::OpenAI,
            "gemini" => Provider::Gemini,
            other => {
                return Err(ConfigError::InvalidValue(
                    "LLM_PROVIDER".to_string(),
                    format!("'{}' is not a supported provider", other),
                ));
            }
        };

        let key_var = match provider {
            Provider::OpenAI => "OPENAI_API_KEY",
            Provider::Gemini => "GEMINI_API_KEY",
        };
        let api_key = std::env::var(key_var)
            .ok()
            .filter(|key| !key.trim().is_empty())
            .ok_or_else(|| {
                ConfigError::MissingVar(format!(
                    "{} must be set for '{}' provider",
                    key_var,
                    provider_str.to_lowercase()
                ))
            })?;

        let chat_model = std::env::var("CHAT_MODEL").unwrap_or_else(|_| "gpt-4o".to_string());

        let temperature_str = std::env::var("LLM_TEMPERATURE").unwrap_or_else(|_| "0.0".to_string());
        let temperature = temperature_str
            .parse::<f32>()
            .ok()
            .filter(|t| (0.0..=2.0).contains(t))
            .ok_or_else(|| {
                ConfigError::InvalidValue(
                    "LLM_TEMPERATURE".to_string(),
                    format!("'{}' is not a number between 0 and 2", temperature_str),
                )
            })?;

        let log_level_str = std::env::var("RUST_LOG").unwrap_or_else(|_| "INFO".to_string());
        let log_level = log_level_str.parse::<Level>().map_err(|_| {
            ConfigError::InvalidValue(
                "RUST_LOG".to_string(),
                format!("'{}' is not a valid log level", log_level_str),
            )
        })?;

        let prompts_path = std::env::var("PROMPTS_PATH")
            .map(PathBuf::from)
            .unwrap_or_else(|_| PathBuf::from("./prompts"));

        Ok(Self {
            bind_address,
            database_url,
            provider,
            api_key,
            chat_model,
            temperature,
            log_level,
            prompts_path,
        })
    }
}
