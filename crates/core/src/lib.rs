//! LLM-facing building blocks for the problem solver: prompt templates, a
//! chat-completion client, and the solution service built on top of them.

pub mod llm_client;
pub mod prompt;
pub mod solution;
