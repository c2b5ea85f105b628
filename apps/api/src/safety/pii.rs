//! PII detection over generated feedback text.
//!
//! Patterns are compiled once per process. A pattern that fails to compile is
//! treated as a match so the gate fails closed.

use std::fmt;
use std::sync::LazyLock;

use regex::Regex;
use serde::{Deserialize, Serialize};

macro_rules! pii_pattern {
    ($name:ident, $regex_str:expr) => {
        static $name: LazyLock<Option<Regex>> = LazyLock::new(|| Regex::new($regex_str).ok());
    };
}

// Numeric patterns are bounded by `(?:^|\D)` / `(?:\D|$)` rather than `\b`, so a
// number glued to letters ("SSN123-45-6789") still matches while a longer digit
// run does not.

// ── National ID (US SSN) ───────────────────────────────────────────────────
pii_pattern!(RE_SSN, r"(?:^|\D)\d{3}-\d{2}-\d{4}(?:\D|$)");

// ── Payment cards ──────────────────────────────────────────────────────────
pii_pattern!(
    RE_CARD_GROUPED_16,
    r"(?:^|\D)\d{4}[- ]?\d{4}[- ]?\d{4}[- ]?\d{4}(?:\D|$)"
);
pii_pattern!(RE_CARD_CONTIGUOUS_16, r"(?:^|\D)\d{16}(?:\D|$)");
pii_pattern!(
    RE_CARD_LOOSE_13_TO_16,
    r"(?:^|\D)(?:\d[- ]?){12,15}\d(?:\D|$)"
);

// ── Phone (10 digits; optional +1, parenthesised area code, '-' '.' or space) ──
pii_pattern!(
    RE_PHONE,
    r"(?:^|\D)(?:\+?1[-.\s]?)?\(?\d{3}\)?[-.\s]?\d{3}[-.\s]?\d{4}(?:\D|$)"
);

// ── Email ──────────────────────────────────────────────────────────────────
pii_pattern!(
    RE_EMAIL,
    r"(?i)[a-z0-9._%+\-]+@[a-z0-9.\-]+\.[a-z]{2,}"
);

/// A class of personally identifiable information the detector can look for.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum PiiKind {
    UsSsn,
    CreditCard,
    PhoneNumber,
    EmailAddress,
}

impl PiiKind {
    pub const ALL: [PiiKind; 4] = [
        PiiKind::UsSsn,
        PiiKind::CreditCard,
        PiiKind::PhoneNumber,
        PiiKind::EmailAddress,
    ];

    pub fn as_str(&self) -> &'static str {
        match self {
            PiiKind::UsSsn => "us_ssn",
            PiiKind::CreditCard => "credit_card",
            PiiKind::PhoneNumber => "phone_number",
            PiiKind::EmailAddress => "email_address",
        }
    }
}

impl fmt::Display for PiiKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Which payment-card shape counts as a card number.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum CardPattern {
    /// 16 digits, optionally split into groups of four by '-' or ' '.
    #[default]
    Grouped16,
    /// Exactly 16 digits with no separators.
    Contiguous16,
    /// 13 to 16 digits with optional '-' or ' ' between any two digits.
    #[serde(rename = "loose13to16")]
    Loose13To16,
}

impl CardPattern {
    fn regex(&self) -> &'static LazyLock<Option<Regex>> {
        match self {
            CardPattern::Grouped16 => &RE_CARD_GROUPED_16,
            CardPattern::Contiguous16 => &RE_CARD_CONTIGUOUS_16,
            CardPattern::Loose13To16 => &RE_CARD_LOOSE_13_TO_16,
        }
    }
}

/// Substring-anywhere PII scanner. Checks classes in the order they were configured.
#[derive(Debug, Clone)]
pub struct PiiDetector {
    kinds: Vec<PiiKind>,
    card_pattern: CardPattern,
}

impl PiiDetector {
    pub fn new(kinds: Vec<PiiKind>, card_pattern: CardPattern) -> Self {
        Self {
            kinds,
            card_pattern,
        }
    }

    /// Returns the first PII class found in `text`, if any.
    pub fn find(&self, text: &str) -> Option<PiiKind> {
        self.kinds
            .iter()
            .copied()
            .find(|kind| matches_kind(self.regex_for(*kind), text))
    }

    pub fn contains_pii(&self, text: &str) -> bool {
        self.find(text).is_some()
    }

    fn regex_for(&self, kind: PiiKind) -> &'static LazyLock<Option<Regex>> {
        match kind {
            PiiKind::UsSsn => &RE_SSN,
            PiiKind::CreditCard => self.card_pattern.regex(),
            PiiKind::PhoneNumber => &RE_PHONE,
            PiiKind::EmailAddress => &RE_EMAIL,
        }
    }
}

impl Default for PiiDetector {
    fn default() -> Self {
        Self::new(PiiKind::ALL.to_vec(), CardPattern::default())
    }
}

fn matches_kind(regex: &LazyLock<Option<Regex>>, text: &str) -> bool {
    match regex.as_ref() {
        Some(re) => re.is_match(text),
        None => true,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn detector() -> PiiDetector {
        PiiDetector::default()
    }

    #[test]
    fn test_all_patterns_compile() {
        for re in [
            &RE_SSN,
            &RE_CARD_GROUPED_16,
            &RE_CARD_CONTIGUOUS_16,
            &RE_CARD_LOOSE_13_TO_16,
            &RE_PHONE,
            &RE_EMAIL,
        ] {
            assert!(re.is_some());
        }
    }

    #[test]
    fn test_detects_ssn_mid_sentence() {
        assert_eq!(
            detector().find("My number is 123-45-6789, keep it safe."),
            Some(PiiKind::UsSsn)
        );
    }

    #[test]
    fn test_detects_email_any_case() {
        assert_eq!(
            detector().find("Reach out to Jane.Doe@Example.ORG for details"),
            Some(PiiKind::EmailAddress)
        );
        assert!(detector().contains_pii("Contact me at a@b.com"));
    }

    #[test]
    fn test_email_requires_two_letter_tld() {
        assert!(!detector().contains_pii("user@host.c is not an address"));
    }

    #[test]
    fn test_detects_plain_ten_digit_phone() {
        assert_eq!(detector().find("call 5551234567 today"), Some(PiiKind::PhoneNumber));
    }

    #[test]
    fn test_detects_dashed_phone() {
        assert_eq!(detector().find("call 555-123-4567"), Some(PiiKind::PhoneNumber));
    }

    #[test]
    fn test_detects_common_phone_shapes() {
        for text in [
            "Call me at (415) 555-0123 tomorrow",
            "Call me at 415 555 0123 tomorrow",
            "Call me at +14155550123 tomorrow",
            "Call me at 14155550123 tomorrow",
            "Call me at +1 415-555-0123 tomorrow",
            "Call me at 415.555.0123",
            "(415)555-0123",
        ] {
            assert_eq!(detector().find(text), Some(PiiKind::PhoneNumber), "{text}");
        }
    }

    #[test]
    fn test_phone_not_matched_inside_longer_digit_run() {
        let d = PiiDetector::new(vec![PiiKind::PhoneNumber], CardPattern::default());
        assert!(!d.contains_pii("order 123456789012345"));
        assert!(!d.contains_pii("build 41555501"));
    }

    #[test]
    fn test_detects_ssn_glued_to_letters() {
        assert_eq!(detector().find("SSN123-45-6789"), Some(PiiKind::UsSsn));
        assert_eq!(detector().find("123-45-6789"), Some(PiiKind::UsSsn));
    }

    #[test]
    fn test_ssn_not_matched_inside_longer_digit_run() {
        let d = PiiDetector::new(vec![PiiKind::UsSsn], CardPattern::default());
        assert!(!d.contains_pii("1123-45-67890"));
    }

    #[test]
    fn test_detects_grouped_card() {
        assert_eq!(
            detector().find("card 4111 1111 1111 1111 on file"),
            Some(PiiKind::CreditCard)
        );
        assert_eq!(
            detector().find("card 4111-1111-1111-1111"),
            Some(PiiKind::CreditCard)
        );
        assert_eq!(detector().find("4111111111111111"), Some(PiiKind::CreditCard));
        assert_eq!(
            detector().find("card4111111111111111"),
            Some(PiiKind::CreditCard)
        );
    }

    #[test]
    fn test_contiguous_card_pattern_ignores_separators() {
        let d = PiiDetector::new(vec![PiiKind::CreditCard], CardPattern::Contiguous16);
        assert!(d.contains_pii("4111111111111111"));
        assert!(!d.contains_pii("4111-1111-1111-1111"));
        assert!(!d.contains_pii("411111111111111"));
    }

    #[test]
    fn test_loose_card_pattern_accepts_thirteen_digits() {
        let d = PiiDetector::new(vec![PiiKind::CreditCard], CardPattern::Loose13To16);
        assert!(d.contains_pii("4222222222222"));
        assert!(d.contains_pii("3782 822463 10005"));
        assert!(!d.contains_pii("only 123456 here"));
    }

    #[test]
    fn test_short_numbers_are_not_pii() {
        assert!(!detector().contains_pii("Reduced latency by 40% across 3 services in 2023."));
    }

    #[test]
    fn test_disabled_kind_is_not_reported() {
        let d = PiiDetector::new(vec![PiiKind::UsSsn], CardPattern::default());
        assert!(!d.contains_pii("mail a@b.com"));
        assert!(d.contains_pii("123-45-6789"));
    }

    #[test]
    fn test_kind_serde_names() {
        let kind: PiiKind = serde_json::from_str(r#""email_address""#).unwrap();
        assert_eq!(kind, PiiKind::EmailAddress);
        assert_eq!(PiiKind::UsSsn.to_string(), "us_ssn");
    }
}
