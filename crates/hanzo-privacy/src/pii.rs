//! PII (Personally Identifiable Information) detection and redaction

use crate::rules::RuleSet;
use crate::types::{DetectionResult, Finding, PiiCategory};
use std::borrow::Cow;
use std::sync::Arc;

/// PII detector for identifying and redacting sensitive information
///
/// Stateless between calls: the rule table is shared read-only and no input
/// is cached or retained.
#[derive(Debug, Clone)]
pub struct PiiDetector {
    rules: Arc<RuleSet>,
}

impl PiiDetector {
    /// Create a detector over the given rule table
    pub fn new(rules: Arc<RuleSet>) -> Self {
        Self { rules }
    }

    /// The rule table in use
    pub fn rules(&self) -> &RuleSet {
        &self.rules
    }

    /// Report which categories are present, without modifying the text
    ///
    /// Structural categories come in table order; `Name` is appended once if
    /// any contextual rule matches.
    pub fn detect(&self, text: &str) -> DetectionResult {
        let mut types = Vec::new();

        for rule in self.rules.iter() {
            let category = rule.category();
            if !types.contains(&category) && rule.is_match(text) {
                types.push(category);
            }
        }

        DetectionResult {
            has_pii: !types.is_empty(),
            types,
        }
    }

    /// Redacted copy of `text`
    pub fn scrub(&self, text: &str) -> String {
        self.scrub_with_report(text).0
    }

    /// Redacted copy of `text` plus the categories that replaced something
    ///
    /// Each rule runs against the output of the previous one, so a span
    /// consumed by a higher-precedence rule is never reported twice.
    pub fn scrub_with_report(&self, text: &str) -> (String, Vec<PiiCategory>) {
        let mut current = Cow::Borrowed(text);
        let mut fired = Vec::new();

        for rule in self.rules.iter() {
            let next = match rule.redact(&current) {
                Cow::Borrowed(_) => continue,
                Cow::Owned(next) => next,
            };
            if !fired.contains(&rule.category()) {
                fired.push(rule.category());
            }
            current = Cow::Owned(next);
        }

        (current.into_owned(), fired)
    }

    /// Locations of detected spans in the original text
    ///
    /// Overlapping spans are resolved in favor of the one starting first;
    /// ties go to the rule evaluated first.
    pub fn findings(&self, text: &str) -> Vec<Finding> {
        let mut candidates: Vec<(usize, Finding)> = Vec::new();

        for (precedence, rule) in self.rules.iter().enumerate() {
            for span in rule.spans(text) {
                candidates.push((
                    precedence,
                    Finding {
                        category: rule.category(),
                        start: span.start,
                        end: span.end,
                    },
                ));
            }
        }

        candidates.sort_by_key(|(precedence, f)| (f.start, *precedence));

        let mut findings: Vec<Finding> = Vec::with_capacity(candidates.len());
        for (_, finding) in candidates {
            if findings
                .last()
                .is_none_or(|last| finding.start >= last.end)
            {
                findings.push(finding);
            }
        }
        findings
    }

    /// Rough privacy risk in `0.0..=1.0`, growing with PII density
    pub fn privacy_score(&self, text: &str) -> f32 {
        let word_count = text.split_whitespace().count();
        if word_count == 0 {
            return 0.0;
        }

        let findings = self.findings(text).len();
        if findings == 0 {
            return 0.0;
        }

        let density = findings as f32 / word_count as f32;
        (density * 10.0).min(1.0)
    }
}

/// Luhn algorithm for credit card validation
pub fn luhn_check(number: &str) -> bool {
    let digits: Vec<u32> = number.chars().filter_map(|c| c.to_digit(10)).collect();

    if digits.len() < 13 {
        return false;
    }

    let mut sum = 0;
    let mut double = false;

    for &digit in digits.iter().rev() {
        let mut d = digit;
        if double {
            d *= 2;
            if d > 9 {
                d -= 9;
            }
        }
        sum += d;
        double = !double;
    }

    sum % 10 == 0
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::rules::standard_rules;

    fn detector() -> PiiDetector {
        PiiDetector::new(standard_rules())
    }

    #[test]
    fn test_detect_empty() {
        let result = detector().detect("");
        assert!(!result.has_pii);
        assert!(result.types.is_empty());
    }

    #[test]
    fn test_detect_order_and_dedup() {
        let text = "Call me Dana, or 555-123-4567, or mail dana@example.com or d2@example.org";
        let result = detector().detect(text);

        assert!(result.has_pii);
        assert_eq!(
            result.types,
            vec![PiiCategory::Email, PiiCategory::Phone, PiiCategory::Name]
        );
    }

    #[test]
    fn test_detect_does_not_modify() {
        let text = String::from("ssn 123-45-6789");
        let before = text.clone();
        let _ = detector().detect(&text);
        assert_eq!(text, before);
    }

    #[test]
    fn test_scrub_multiple_occurrences() {
        let scrubbed = detector().scrub("a@b.io and c@d.io");
        assert_eq!(scrubbed, "[EMAIL] and [EMAIL]");
    }

    #[test]
    fn test_url_swallows_embedded_email() {
        let (scrubbed, fired) =
            detector().scrub_with_report("profile: https://example.com/u/jane@example.com ok");
        assert_eq!(scrubbed, "profile: [URL] ok");
        assert_eq!(fired, vec![PiiCategory::Url]);
    }

    #[test]
    fn test_card_beats_phone_and_ssn() {
        let (scrubbed, fired) = detector().scrub_with_report("card 4111-1111-1111-1111 thanks");
        assert_eq!(scrubbed, "card [CARD] thanks");
        assert_eq!(fired, vec![PiiCategory::CreditCard]);
    }

    #[test]
    fn test_ssn_and_phone_distinct() {
        let (scrubbed, fired) = detector().scrub_with_report("123-45-6789 vs 555-123-4567");
        assert_eq!(scrubbed, "[SSN] vs [PHONE]");
        assert_eq!(fired, vec![PiiCategory::Ssn, PiiCategory::Phone]);
    }

    #[test]
    fn test_regex_special_characters() {
        let text = r"(.*)+ [a-z]{2,} \d $1 ^$ | \\";
        assert_eq!(detector().scrub(text), text);
        assert!(!detector().detect(text).has_pii);
    }

    #[test]
    fn test_unicode_text() {
        let text = "Ich heiße Jürgen, 東京に住んでいます 😊";
        assert_eq!(detector().scrub(text), text);
    }

    #[test]
    fn test_findings_spans() {
        let text = "mail jane@example.com, call 555-123-4567";
        let findings = detector().findings(text);

        assert_eq!(findings.len(), 2);
        assert_eq!(findings[0].category, PiiCategory::Email);
        assert_eq!(&text[findings[0].start..findings[0].end], "jane@example.com");
        assert_eq!(findings[1].category, PiiCategory::Phone);
        assert_eq!(findings[1].len(), "555-123-4567".len());
    }

    #[test]
    fn test_findings_overlap_keeps_url() {
        let findings = detector().findings("https://example.com/jane@example.com");
        assert_eq!(findings.len(), 1);
        assert_eq!(findings[0].category, PiiCategory::Url);
    }

    #[test]
    fn test_findings_name_span_only() {
        let text = "my name is Priya";
        let findings = detector().findings(text);
        assert_eq!(findings.len(), 1);
        assert_eq!(&text[findings[0].start..findings[0].end], "Priya");
    }

    #[test]
    fn test_privacy_score() {
        let d = detector();
        assert_eq!(d.privacy_score(""), 0.0);
        assert_eq!(d.privacy_score("   "), 0.0);
        assert_eq!(d.privacy_score("just a calm day"), 0.0);
        assert_eq!(d.privacy_score("me@example.com"), 1.0);

        let score = d.privacy_score(
            "today I wrote a long entry about the park, the weather and the dog, mail me@example.com",
        );
        assert!(score > 0.0 && score < 1.0, "score = {score}");
    }

    #[test]
    fn test_credit_card_luhn() {
        // Valid test card number
        assert!(luhn_check("4532015112830366"));
        assert!(luhn_check("4532-0151-1283-0366"));
        // Invalid number
        assert!(!luhn_check("1234567890123456"));
        assert!(!luhn_check("42"));
    }
}
