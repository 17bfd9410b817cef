//! Property tests for the scrubber

use hanzo_privacy::{prepare_text, PrivacyGuard};
use proptest::prelude::*;

/// Text shaped like each category the scrubber redacts
fn pii_fragment() -> impl Strategy<Value = String> {
    prop_oneof![
        "[2-9][0-9]{2}-[2-9][0-9]{2}-[0-9]{4}",
        "\\([2-9][0-9]{2}\\) [2-9][0-9]{2}-[0-9]{4}",
        "[0-9]{4} [0-9]{4} [0-9]{4} [0-9]{4}",
        "[0-9]{3}-[0-9]{2}-[0-9]{4}",
        "[0-9]{1,2}/[0-9]{1,2}/[0-9]{4}",
        "[0-9]{1,4} [A-Z][a-z]{2,8} (Street|Ave|Road|Lane)",
        "(my name is|call me|I'm|signed,) [A-Z][a-z]{2,8}",
        "[a-z]{1,8}@[a-z]{2,8}\\.(com|org)",
        "https://[a-z]{2,8}\\.com/[a-z0-9]{0,8}",
    ]
}

/// PII fragments separated by lowercase prose
fn journal_entry() -> impl Strategy<Value = String> {
    prop::collection::vec((pii_fragment(), "[a-z ,.]{0,20}"), 1..6).prop_map(|parts| {
        parts
            .into_iter()
            .map(|(pii, prose)| format!("{pii} {prose} "))
            .collect::<String>()
    })
}

proptest! {
    #[test]
    fn clean_prose_is_unchanged(text in "[a-z ,.!?]{0,200}") {
        let result = prepare_text(&text);
        prop_assert_eq!(&result.scrubbed, &text);
        prop_assert!(!result.pii_detected);
        prop_assert!(result.pii_types.is_empty());
    }

    #[test]
    fn scrub_is_idempotent(text in ".{0,200}") {
        let guard = PrivacyGuard::standard();
        let first = guard.scrub(&text);
        let second = guard.scrub(&first);
        prop_assert_eq!(first, second);
    }

    #[test]
    fn scrub_is_idempotent_on_redacted_entries(text in journal_entry()) {
        let guard = PrivacyGuard::standard();
        let first = guard.prepare_text(&text);
        prop_assert!(first.pii_detected);

        let second = guard.prepare_text(&first.scrubbed);
        prop_assert_eq!(&second.scrubbed, &first.scrubbed);
        prop_assert!(!second.pii_detected);
    }

    #[test]
    fn prepare_is_deterministic(text in ".{0,200}") {
        prop_assert_eq!(prepare_text(&text), prepare_text(&text));
    }

    #[test]
    fn emails_never_survive(
        user in "[a-z]{1,8}(\\.[a-z]{1,8})?",
        domain in "[a-z]{2,10}",
        tld in "(com|org|net|io)",
        before in "[a-z ]{0,40}",
        after in "[a-z ]{0,40}",
    ) {
        let email = format!("{user}@{domain}.{tld}");
        let text = format!("{before} {email} {after}");
        let guard = PrivacyGuard::standard();
        let result = guard.prepare_text(&text);

        prop_assert!(!result.scrubbed.contains(&email));
        prop_assert!(result.scrubbed.contains("[EMAIL]"));
        prop_assert_eq!(guard.scrub(&result.scrubbed), result.scrubbed.clone());
    }

    #[test]
    fn phones_never_survive(
        area in "[2-9][0-9]{2}",
        exchange in "[2-9][0-9]{2}",
        line in "[0-9]{4}",
        sep in "(-| |\\.)",
    ) {
        let phone = format!("{area}{sep}{exchange}{sep}{line}");
        let text = format!("please call {phone} after lunch");
        let result = prepare_text(&text);

        prop_assert_eq!(result.scrubbed, "please call [PHONE] after lunch");
    }
}
