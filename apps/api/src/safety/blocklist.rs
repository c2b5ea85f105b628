//! Standalone-term, case-insensitive blocklist matching.

use regex::{Regex, RegexBuilder};

/// Seed terms applied when no guard config overrides them.
pub const DEFAULT_BLOCKLIST: &[&str] = &["offensive", "discriminatory", "inappropriate"];

/// Matches blocklisted terms only when they stand alone: each side must be the
/// start/end of the text or a non-word character. A term embedded in a longer
/// word ("inoffensive") does not trigger, and terms that begin or end with
/// punctuation ("c++") still match.
#[derive(Debug, Clone)]
pub struct BlocklistMatcher {
    regex: Option<Regex>,
}

impl BlocklistMatcher {
    /// Builds a matcher from `terms`. Blank terms are dropped; an empty list
    /// never matches.
    pub fn new<I, S>(terms: I) -> Result<Self, regex::Error>
    where
        I: IntoIterator<Item = S>,
        S: AsRef<str>,
    {
        let terms: Vec<String> = terms
            .into_iter()
            .map(|t| t.as_ref().trim().to_lowercase())
            .filter(|t| !t.is_empty())
            .collect();

        if terms.is_empty() {
            return Ok(Self { regex: None });
        }

        let alternation = terms
            .iter()
            .map(|t| regex::escape(t))
            .collect::<Vec<_>>()
            .join("|");
        let regex = RegexBuilder::new(&format!(r"(?:^|\W)({alternation})(?:\W|$)"))
            .case_insensitive(true)
            .build()?;

        Ok(Self { regex: Some(regex) })
    }

    /// Returns the first blocklisted term found in `text`, lowercased.
    pub fn find(&self, text: &str) -> Option<String> {
        let caps = self.regex.as_ref()?.captures(text)?;
        caps.get(1).map(|term| term.as_str().to_lowercase())
    }

    pub fn is_blocked(&self, text: &str) -> bool {
        self.regex.as_ref().is_some_and(|re| re.is_match(text))
    }
}

impl Default for BlocklistMatcher {
    fn default() -> Self {
        Self::new(DEFAULT_BLOCKLIST).unwrap_or(Self { regex: None })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_terms_loaded() {
        let m = BlocklistMatcher::default();
        for term in DEFAULT_BLOCKLIST {
            assert!(m.is_blocked(term));
        }
    }

    #[test]
    fn test_matches_whole_word_any_case() {
        let m = BlocklistMatcher::default();
        assert!(m.is_blocked("That remark was OFFENSIVE."));
        assert!(m.is_blocked("Avoid Discriminatory language"));
        assert!(m.is_blocked("This is Inappropriate, frankly"));
    }

    #[test]
    fn test_embedded_term_does_not_match() {
        let m = BlocklistMatcher::default();
        assert!(!m.is_blocked("A perfectly inoffensive answer"));
        assert!(!m.is_blocked("nondiscriminatoryish phrasing"));
    }

    #[test]
    fn test_clean_text_passes() {
        let m = BlocklistMatcher::default();
        assert!(!m.is_blocked("Great use of composition over inheritance."));
    }

    #[test]
    fn test_custom_terms_are_escaped() {
        let m = BlocklistMatcher::new(["c++ hater", "rude"]).unwrap();
        assert!(m.is_blocked("what a c++ hater"));
        assert!(!m.is_blocked("c hater"));
        assert!(m.is_blocked("Rude!"));
    }

    #[test]
    fn test_terms_with_punctuation_edges_match_standalone() {
        let m = BlocklistMatcher::new(["c++", "#fail"]).unwrap();
        assert!(m.is_blocked("c++"));
        assert!(m.is_blocked("I only write C++!"));
        assert!(m.is_blocked("that was a #fail, honestly"));
        assert!(!m.is_blocked("abc++ is not a language"));
        assert!(!m.is_blocked("c++x"));
    }

    #[test]
    fn test_find_reports_matched_term() {
        let m = BlocklistMatcher::default();
        assert_eq!(
            m.find("This is INAPPROPRIATE, frankly"),
            Some("inappropriate".to_string())
        );
        assert_eq!(m.find("Great answer"), None);

        let m = BlocklistMatcher::new(["c++"]).unwrap();
        assert_eq!(m.find("Sure, C++."), Some("c++".to_string()));
    }

    #[test]
    fn test_empty_blocklist_never_matches() {
        let m = BlocklistMatcher::new(["", "  "]).unwrap();
        assert!(!m.is_blocked("offensive"));
        assert!(!m.is_blocked(""));
    }
}
