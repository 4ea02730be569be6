//! Solution Generation Service
//!
//! Turns raw problem text into a worked, step-by-step solution by wrapping it
//! in an instruction template and handing it to an LLM.

use anyhow::Result;
use async_trait::async_trait;
use std::sync::Arc;
use tracing::{info, instrument};

use crate::{llm_client::LLMClient, prompt::PromptTemplate};

/// Defines the contract for any service that can solve a problem.
///
/// Callers treat every failure the same way, so implementations are free to
/// return any error without classifying it.
#[async_trait]
pub trait SolutionService: Send + Sync {
    /// Produces solution text for the given problem text.
    async fn solve(&self, problem_text: &str) -> Result<String>;
}

/// A `SolutionService` that renders a fixed instruction template and asks an
/// `LLMClient` to complete it.
pub struct PromptedSolutionService {
    client: Arc<dyn LLMClient>,
    template: PromptTemplate,
}

impl PromptedSolutionService {
    pub fn new(client: Arc<dyn LLMClient>, template: PromptTemplate) -> Self {
        Self { client, template }
    }
}

#[async_trait]
impl SolutionService for PromptedSolutionService {
    #[instrument(skip_all, fields(problem_len = problem_text.len()))]
    async fn solve(&self, problem_text: &str) -> Result<String> {
        let prompt = self.template.render(problem_text);
        let solution = self.client.complete(prompt).await?;
        info!(solution_len = solution.len(), "Generated solution");
        Ok(solution)
    }
}
