//! Runs one answer submission end to end:
//! validate input → generate feedback → safety gate → record turn → report.
//!
//! Fail-soft: a generation failure or timeout becomes candidate-visible feedback
//! (`"An error occurred: ..."`) and the interview still advances.

use std::sync::Arc;
use std::time::Duration;

use serde_json::json;
use tracing::{info, warn};

use crate::interview::feedback::{build_feedback_prompt, GenerationError, TextGenerator};
use crate::interview::session::{InterviewTurn, Session, SessionError};
use crate::monitoring::{MonitoringSink, Trace};
use crate::safety::{SafetyGate, SafetyVerdict};

/// Monitoring user id when the candidate did not give a name.
pub const ANONYMOUS_CANDIDATE: &str = "anonymous_candidate";

/// Prefix of feedback produced when generation fails.
pub const ERROR_FEEDBACK_PREFIX: &str = "An error occurred: ";

pub struct Interviewer {
    generator: Arc<dyn TextGenerator>,
    gate: Arc<dyn SafetyGate>,
    monitor: Arc<dyn MonitoringSink>,
    generation_timeout: Duration,
}

impl Interviewer {
    pub fn new(
        generator: Arc<dyn TextGenerator>,
        gate: Arc<dyn SafetyGate>,
        monitor: Arc<dyn MonitoringSink>,
        generation_timeout: Duration,
    ) -> Self {
        Self {
            generator,
            gate,
            monitor,
            generation_timeout,
        }
    }

    /// Records the candidate's answer to the current question and advances the session.
    ///
    /// Rejects blank answers with `InvalidInput` and completed sessions with
    /// `InterviewComplete`; in both cases the session is left untouched.
    pub async fn submit_answer(
        &self,
        session: &mut Session,
        candidate_name: Option<&str>,
        answer: &str,
    ) -> Result<InterviewTurn, SessionError> {
        if answer.trim().is_empty() {
            return Err(SessionError::InvalidInput(
                "Please provide an answer before submitting.".to_string(),
            ));
        }
        if session.is_complete() {
            return Err(SessionError::InterviewComplete);
        }
        let question = session.current_question().unwrap_or_default().to_string();
        let role = session.role().name.clone();
        let question_index = session.cursor();

        let trace = Trace::start(
            self.monitor.clone(),
            candidate_name.unwrap_or(ANONYMOUS_CANDIDATE),
            json!({ "job_role": role, "question_index": question_index }),
        );
        trace.log_event(
            "submitted_answer",
            json!({ "question": question, "answer_length": answer.chars().count() }),
        );

        let (feedback, status) = match self.generate(&role, &question, answer).await {
            Ok(raw) => (self.screen(&trace, raw), "completed"),
            Err(e) => {
                warn!(
                    "Feedback generation failed for '{role}' question {}: {e}",
                    question_index + 1
                );
                trace.log_event("error", json!({ "error_message": e.to_string() }));
                (format!("{ERROR_FEEDBACK_PREFIX}{e}"), "error")
            }
        };

        let turn = session.record_turn(answer, feedback)?;
        info!(
            trace_id = %trace.trace_id(),
            "Recorded answer for '{role}' question {}/{}",
            session.cursor(),
            session.role().question_count()
        );
        trace.end(status);

        Ok(turn)
    }

    async fn generate(
        &self,
        role: &str,
        question: &str,
        answer: &str,
    ) -> Result<String, GenerationError> {
        let prompt = build_feedback_prompt(role, question, answer);
        match tokio::time::timeout(
            self.generation_timeout,
            self.generator.generate(&prompt, role),
        )
        .await
        {
            Ok(result) => result,
            Err(_) => Err(GenerationError::Timeout(self.generation_timeout)),
        }
    }

    /// Runs the gate and reports the verdict; returns the text to show.
    fn screen(&self, trace: &Trace, raw: String) -> String {
        let verdict = self.gate.check(&raw);
        match &verdict {
            SafetyVerdict::Accepted(_) => {
                trace.log_event("response_validated", json!({ "validation_status": "passed" }));
            }
            SafetyVerdict::Rejected(reason) => {
                let detail = self.gate.rejection_detail(&raw);
                warn!(
                    detail = detail.as_deref().unwrap_or("none"),
                    "Generated feedback rejected: {reason}"
                );
                trace.log_event(
                    "response_validation_failed",
                    json!({
                        "validation_status": "failed",
                        "reason": reason.code(),
                        "detail": detail,
                        "response_length": raw.chars().count(),
                    }),
                );
            }
        }
        verdict.into_display_text()
    }
}
