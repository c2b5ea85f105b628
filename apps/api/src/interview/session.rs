//! Interview session state machine.
//!
//! A `Session` walks one candidate through a role's questions in order:
//!
//! ```text
//! InProgress(cursor = 0) --submit--> ... --submit--> Completed(cursor = len)
//!        ^                                                   |
//!        +------------------------- reset -------------------+
//! ```
//!
//! Invariants: `cursor <= questions.len()` and `history.len() == cursor`.
//! Only `record_turn`, `reset` and `switch_role` mutate a session.

use serde::{Deserialize, Serialize};
use thiserror::Error;

use crate::interview::questions::JobRole;

/// One completed question/answer/feedback cycle. Immutable once recorded.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct InterviewTurn {
    pub question: String,
    pub candidate_answer: String,
    pub feedback: String,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum SessionStatus {
    InProgress,
    Completed,
}

#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum SessionError {
    #[error("Invalid input: {0}")]
    InvalidInput(String),

    #[error("Interview already completed; reset to start again")]
    InterviewComplete,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Session {
    role: JobRole,
    cursor: usize,
    history: Vec<InterviewTurn>,
}

impl Session {
    pub fn new(role: JobRole) -> Self {
        Self {
            role,
            cursor: 0,
            history: Vec::new(),
        }
    }

    pub fn role(&self) -> &JobRole {
        &self.role
    }

    pub fn cursor(&self) -> usize {
        self.cursor
    }

    pub fn history(&self) -> &[InterviewTurn] {
        &self.history
    }

    /// The question awaiting an answer, or `None` once the interview is complete.
    pub fn current_question(&self) -> Option<&str> {
        self.role.questions.get(self.cursor).map(String::as_str)
    }

    pub fn status(&self) -> SessionStatus {
        if self.cursor < self.role.question_count() {
            SessionStatus::InProgress
        } else {
            SessionStatus::Completed
        }
    }

    pub fn is_complete(&self) -> bool {
        self.status() == SessionStatus::Completed
    }

    /// 1-based number of the current question, for "Question 2/3" displays.
    pub fn question_number(&self) -> Option<usize> {
        self.current_question().map(|_| self.cursor + 1)
    }

    /// Fraction of questions answered, in `0.0..=1.0`.
    pub fn progress(&self) -> f64 {
        let total = self.role.question_count();
        if total == 0 {
            return 1.0;
        }
        (self.cursor as f64 / total as f64).min(1.0)
    }

    /// Appends a turn for the current question and advances the cursor by one.
    pub(crate) fn record_turn(
        &mut self,
        candidate_answer: &str,
        feedback: String,
    ) -> Result<InterviewTurn, SessionError> {
        let question = self
            .current_question()
            .ok_or(SessionError::InterviewComplete)?
            .to_string();

        let turn = InterviewTurn {
            question,
            candidate_answer: candidate_answer.to_string(),
            feedback,
        };
        self.history.push(turn.clone());
        self.cursor += 1;
        Ok(turn)
    }

    /// Back to the first question with an empty history.
    pub fn reset(&mut self) {
        self.cursor = 0;
        self.history.clear();
    }

    /// Replaces this session with a fresh one for `role`, discarding progress.
    pub fn switch_role(&mut self, role: JobRole) {
        *self = Session::new(role);
    }
}
