//! Safety Gate — decides whether generated feedback may be shown to a candidate.
//!
//! Checks run in a fixed order and stop at the first failure:
//! 1. PII detection (`pii`)
//! 2. Blocklist match (`blocklist`)
//! 3. Shape validation (non-empty text)
//!
//! The gate is accept-or-reject only: accepted text is returned unmodified.
//! It never fails and never logs; callers report verdicts to monitoring.

pub mod blocklist;
pub mod config;
pub mod pii;

use std::fmt;

use serde::{Deserialize, Serialize};

use crate::safety::blocklist::BlocklistMatcher;
use crate::safety::config::GuardConfig;
use crate::safety::pii::PiiDetector;

/// Shown to the candidate in place of feedback that failed the gate.
pub const REJECTION_MESSAGE: &str =
    "The response did not meet our safety guidelines. Please rephrase or try another question.";

/// Why the gate refused a piece of text.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum RejectionReason {
    ContainsPii,
    ContainsBlockedTerm,
    SchemaInvalid,
}

impl RejectionReason {
    pub fn code(&self) -> &'static str {
        match self {
            RejectionReason::ContainsPii => "contains_pii",
            RejectionReason::ContainsBlockedTerm => "contains_blocked_term",
            RejectionReason::SchemaInvalid => "schema_invalid",
        }
    }
}

impl fmt::Display for RejectionReason {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.code())
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum SafetyVerdict {
    Accepted(String),
    Rejected(RejectionReason),
}

impl SafetyVerdict {
    /// The text to display: the accepted text, or [`REJECTION_MESSAGE`].
    pub fn into_display_text(self) -> String {
        match self {
            SafetyVerdict::Accepted(text) => text,
            SafetyVerdict::Rejected(_) => REJECTION_MESSAGE.to_string(),
        }
    }
}

/// Classifies text as accepted or rejected with a reason.
///
/// Implement this to swap in a different checker (e.g. a model-backed PII
/// detector) without touching the interview flow. Held as `Arc<dyn SafetyGate>`.
pub trait SafetyGate: Send + Sync {
    fn check(&self, text: &str) -> SafetyVerdict;

    /// A log-safe label for what tripped the gate on `text`: the PII kind or
    /// the blocklist term, never the matched text itself.
    fn rejection_detail(&self, _text: &str) -> Option<String> {
        None
    }
}

/// Text must contain something other than whitespace.
pub fn is_valid_shape(text: &str) -> bool {
    !text.trim().is_empty()
}

/// Default gate: PII → blocklist → shape, short-circuiting on the first failure.
#[derive(Debug, Clone, Default)]
pub struct GuardPipeline {
    pii: PiiDetector,
    blocklist: BlocklistMatcher,
}

impl GuardPipeline {
    pub fn from_config(config: &GuardConfig) -> Result<Self, regex::Error> {
        Ok(Self {
            pii: PiiDetector::new(config.pii_types.clone(), config.card_pattern),
            blocklist: BlocklistMatcher::new(&config.blocklist)?,
        })
    }
}

impl SafetyGate for GuardPipeline {
    fn check(&self, text: &str) -> SafetyVerdict {
        if self.pii.contains_pii(text) {
            return SafetyVerdict::Rejected(RejectionReason::ContainsPii);
        }
        if self.blocklist.is_blocked(text) {
            return SafetyVerdict::Rejected(RejectionReason::ContainsBlockedTerm);
        }
        if !is_valid_shape(text) {
            return SafetyVerdict::Rejected(RejectionReason::SchemaInvalid);
        }
        SafetyVerdict::Accepted(text.to_string())
    }

    fn rejection_detail(&self, text: &str) -> Option<String> {
        if let Some(kind) = self.pii.find(text) {
            return Some(kind.as_str().to_string());
        }
        self.blocklist.find(text)
    }
}

#[cfg(test)]
mod proptests;
