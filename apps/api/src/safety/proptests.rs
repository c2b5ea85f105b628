use proptest::prelude::*;

use super::blocklist::{BlocklistMatcher, DEFAULT_BLOCKLIST};
use super::{GuardPipeline, RejectionReason, SafetyGate, SafetyVerdict};

fn pii_fragment() -> impl Strategy<Value = String> {
    prop_oneof![
        "[0-9]{3}-[0-9]{2}-[0-9]{4}",
        "[a-z0-9]{1,10}@[a-z]{1,10}\\.[a-z]{2,4}",
        "\\([0-9]{3}\\) [0-9]{3}-[0-9]{4}",
        "[0-9]{3} [0-9]{3} [0-9]{4}",
        "\\+1[0-9]{10}",
        "[0-9]{3}\\.[0-9]{3}\\.[0-9]{4}",
    ]
}

fn mixed_case_term() -> impl Strategy<Value = String> {
    (
        0..DEFAULT_BLOCKLIST.len(),
        proptest::collection::vec(any::<bool>(), 32),
    )
        .prop_map(|(idx, mask)| {
            DEFAULT_BLOCKLIST[idx]
                .chars()
                .zip(mask)
                .map(|(c, upper)| if upper { c.to_ascii_uppercase() } else { c })
                .collect()
        })
}

proptest! {
    #[test]
    fn embedded_pii_is_always_rejected(
        prefix in "[a-z ,.]{0,20}",
        pii in pii_fragment(),
        suffix in "[a-z ,.]{0,20}",
    ) {
        let text = format!("{prefix}{pii}{suffix}");
        prop_assert_eq!(
            GuardPipeline::default().check(&text),
            SafetyVerdict::Rejected(RejectionReason::ContainsPii)
        );
    }

    #[test]
    fn standalone_blocked_term_is_rejected_in_any_case(
        before in "[a-z]{0,10}",
        left in "[ ,.!?;:()]{1,5}",
        term in mixed_case_term(),
        right in "[ ,.!?;:()]{1,5}",
        after in "[a-z]{0,10}",
    ) {
        let text = format!("{before}{left}{term}{right}{after}");
        prop_assert_eq!(
            GuardPipeline::default().check(&text),
            SafetyVerdict::Rejected(RejectionReason::ContainsBlockedTerm)
        );
    }

    #[test]
    fn term_inside_a_longer_word_is_accepted(
        before in "[a-z]{1,5}",
        term in mixed_case_term(),
        after in "[a-z]{1,5}",
    ) {
        let text = format!("{before}{term}{after}");
        prop_assert_eq!(
            GuardPipeline::default().check(&text),
            SafetyVerdict::Accepted(text.clone())
        );
    }

    #[test]
    fn clean_text_is_accepted_unchanged(text in "[a-zA-Z][a-zA-Z ,.!?']{0,80}") {
        prop_assume!(!BlocklistMatcher::default().is_blocked(&text));
        prop_assert_eq!(
            GuardPipeline::default().check(&text),
            SafetyVerdict::Accepted(text.clone())
        );
    }
}
