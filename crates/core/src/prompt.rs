//! Prompt Templates
//!
//! A tiny wrapper around the instruction text sent to the LLM. Templates are
//! plain strings with a `{problem}` placeholder that is substituted with the
//! user's raw problem text.

/// The placeholder every solution template must contain.
pub const PROBLEM_PLACEHOLDER: &str = "{problem}";

#[derive(Debug, thiserror::Error, PartialEq, Eq)]
pub enum PromptError {
    #[error("Prompt template is missing the {{problem}} placeholder")]
    MissingPlaceholder,
}

/// A validated instruction template.
#[derive(Debug, Clone)]
pub struct PromptTemplate {
    template: String,
}

impl PromptTemplate {
    /// Creates a template, rejecting text that has nowhere to put the problem.
    pub fn new(template: impl Into<String>) -> Result<Self, PromptError> {
        let template = template.into();
        if !template.contains(PROBLEM_PLACEHOLDER) {
            return Err(PromptError::MissingPlaceholder);
        }
        Ok(Self { template })
    }

    /// Substitutes every occurrence of the placeholder with `problem`.
    pub fn render(&self, problem: &str) -> String {
        self.template.replace(PROBLEM_PLACEHOLDER, problem)
    }
}
