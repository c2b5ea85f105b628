//! Feedback generation — pluggable text generator behind the interview flow.
//!
//! Default: `LlmFeedbackGenerator` (Claude via `llm_client`).
//! Tests swap in scripted generators through the same trait.

use std::time::Duration;

use async_trait::async_trait;
use thiserror::Error;

use crate::llm_client::prompts::{FEEDBACK_PROMPT_TEMPLATE, INTERVIEWER_SYSTEM_TEMPLATE};
use crate::llm_client::{LlmClient, LlmError};

#[derive(Debug, Error)]
pub enum GenerationError {
    #[error(transparent)]
    Llm(#[from] LlmError),

    #[error("text generation timed out after {0:?}")]
    Timeout(Duration),
}

/// Produces raw, unvalidated feedback text for a prompt.
///
/// Carried in `Interviewer` as `Arc<dyn TextGenerator>`.
#[async_trait]
pub trait TextGenerator: Send + Sync {
    async fn generate(&self, prompt: &str, role: &str) -> Result<String, GenerationError>;
}

pub struct LlmFeedbackGenerator(pub LlmClient);

#[async_trait]
impl TextGenerator for LlmFeedbackGenerator {
    async fn generate(&self, prompt: &str, role: &str) -> Result<String, GenerationError> {
        let system = INTERVIEWER_SYSTEM_TEMPLATE.replace("{job_role}", role);
        Ok(self.0.complete(prompt, &system).await?)
    }
}

/// Fills the feedback prompt with the role, the question and the candidate's answer.
pub fn build_feedback_prompt(job_role: &str, question: &str, answer: &str) -> String {
    FEEDBACK_PROMPT_TEMPLATE
        .replace("{job_role}", job_role)
        .replace("{question}", question)
        .replace("{answer}", answer)
}
