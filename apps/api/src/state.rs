use std::sync::Arc;

use crate::interview::interviewer::Interviewer;
use crate::interview::questions::QuestionBank;
use crate::interview::store::SessionStore;

/// Shared application state injected into all route handlers via Axum extractors.
#[derive(Clone)]
pub struct AppState {
    /// Static role → questions reference data, loaded once at startup.
    pub question_bank: Arc<QuestionBank>,
    /// Submission flow: text generator, safety gate and monitoring sink.
    pub interviewer: Arc<Interviewer>,
    pub sessions: SessionStore,
}
