// Interview engine: question bank, per-candidate session state machine,
// feedback generation and the submission flow that ties them to the safety gate.
// All LLM calls go through llm_client via feedback::LlmFeedbackGenerator.

pub mod feedback;
pub mod handlers;
pub mod interviewer;
pub mod questions;
pub mod session;
pub mod store;
