//! Redaction rule table
//!
//! Rules are applied as an explicit ordered list: structural rules in table
//! order, then contextual rules. Structural precedence is most-specific-first,
//! so a URL swallows any email-shaped userinfo inside it and a 16-digit card
//! number is never split into phone or SSN fragments.

use crate::config::PiiConfig;
use crate::error::{PrivacyError, Result};
use crate::pii::luhn_check;
use crate::types::PiiCategory;
use once_cell::sync::Lazy;
use regex::Regex;
use std::borrow::Cow;
use std::ops::Range;
use std::sync::Arc;

/// A single independent redaction unit
///
/// Implementations should return non-overlapping spans in ascending order,
/// and must never match the literal text of any placeholder token. Spans that
/// break the ordering are tolerated by [`splice`].
pub trait RedactionRule: Send + Sync {
    /// Category this rule reports and redacts
    fn category(&self) -> PiiCategory;

    /// Contextual rules run after every structural rule
    fn is_contextual(&self) -> bool {
        false
    }

    /// Byte ranges to replace
    fn spans(&self, text: &str) -> Vec<Range<usize>>;

    /// Whether the rule matches anywhere in `text`
    fn is_match(&self, text: &str) -> bool {
        !self.spans(text).is_empty()
    }

    /// Replace every span with the category placeholder
    fn redact<'t>(&self, text: &'t str) -> Cow<'t, str> {
        splice(text, &self.spans(text), self.category().placeholder())
    }
}

/// Replace `spans` of `text` with `placeholder`
///
/// Spans are sorted first and overlapping spans are merged into one
/// replacement. Empty spans, and spans that fall outside `text` or split a
/// character, are ignored.
pub fn splice<'t>(text: &'t str, spans: &[Range<usize>], placeholder: &str) -> Cow<'t, str> {
    let mut spans: Vec<Range<usize>> = spans
        .iter()
        .filter(|span| {
            span.start < span.end
                && span.end <= text.len()
                && text.is_char_boundary(span.start)
                && text.is_char_boundary(span.end)
        })
        .cloned()
        .collect();
    if spans.is_empty() {
        return Cow::Borrowed(text);
    }
    spans.sort_by_key(|span| span.start);

    let mut result = String::with_capacity(text.len());
    let mut last_end = 0;

    for span in spans {
        if span.start < last_end {
            last_end = last_end.max(span.end);
            continue;
        }
        result.push_str(&text[last_end..span.start]);
        result.push_str(placeholder);
        last_end = span.end;
    }
    result.push_str(&text[last_end..]);

    Cow::Owned(result)
}

/// Shape-based rule: every regex match is redacted
pub struct PatternRule {
    category: PiiCategory,
    regex: Regex,
    validator: Option<fn(&str) -> bool>,
}

impl PatternRule {
    /// Compile a structural rule
    pub fn new(category: PiiCategory, pattern: &str) -> Result<Self> {
        Ok(Self {
            category,
            regex: Regex::new(pattern)?,
            validator: None,
        })
    }

    /// Only redact matches accepted by `validator`
    pub fn with_validator(mut self, validator: fn(&str) -> bool) -> Self {
        self.validator = Some(validator);
        self
    }

    /// Source pattern
    pub fn as_str(&self) -> &str {
        self.regex.as_str()
    }
}

impl RedactionRule for PatternRule {
    fn category(&self) -> PiiCategory {
        self.category
    }

    fn spans(&self, text: &str) -> Vec<Range<usize>> {
        self.regex
            .find_iter(text)
            .filter(|m| self.validator.is_none_or(|valid| valid(m.as_str())))
            .map(|m| m.range())
            .collect()
    }

    fn is_match(&self, text: &str) -> bool {
        match self.validator {
            None => self.regex.is_match(text),
            Some(_) => !self.spans(text).is_empty(),
        }
    }
}

/// One or two capitalized ASCII words. The trailing `\b` in the rule keeps
/// accented names from being half-redacted.
const NAME_CAPTURE: &str = r"[A-Z][a-z]+(?:[ \t]+[A-Z][a-z]+)?";

/// Contextual rule: a lead phrase followed by a proper name
///
/// Only the name is replaced; the lead phrase is preserved verbatim.
pub struct ContextRule {
    regex: Regex,
}

impl ContextRule {
    /// Build from a lead-phrase regex fragment, matched case-insensitively
    pub fn new(lead: &str) -> Result<Self> {
        let pattern = format!(r"(?P<lead>(?i:{lead})\s+)(?P<name>{NAME_CAPTURE})\b");
        Ok(Self {
            regex: Regex::new(&pattern)?,
        })
    }

    /// Build from a literal phrase such as `"love,"`
    ///
    /// Whitespace inside the phrase matches any run of whitespace.
    pub fn literal(phrase: &str) -> Result<Self> {
        let body = phrase
            .split_whitespace()
            .map(regex::escape)
            .collect::<Vec<_>>()
            .join(r"\s+");
        if body.is_empty() {
            return Err(PrivacyError::ConfigError(
                "name phrase must not be empty".to_string(),
            ));
        }
        let boundary = match phrase.trim_start().chars().next() {
            Some(c) if c.is_alphanumeric() => r"\b",
            _ => "",
        };
        Self::new(&format!("{boundary}{body}"))
    }
}

impl RedactionRule for ContextRule {
    fn category(&self) -> PiiCategory {
        PiiCategory::Name
    }

    fn is_contextual(&self) -> bool {
        true
    }

    fn spans(&self, text: &str) -> Vec<Range<usize>> {
        let mut spans = Vec::new();
        let mut at = 0;

        while let Some(caps) = self.regex.captures_at(text, at) {
            let Some(name) = caps.name("name") else {
                break;
            };
            let span = drop_trailing_lead(name.as_str(), name.range());
            at = span.end;
            spans.push(span);
        }
        spans
    }

    fn is_match(&self, text: &str) -> bool {
        self.regex.is_match(text)
    }
}

/// Capitalized words that open a built-in lead phrase
const LEAD_OPENERS: [&str; 5] = ["call", "my", "signed", "sincerely", "this"];

/// Shrink a two-word name to its first word when the second word opens
/// another lead phrase, so "Sam Call me Ann" leaves "Call me Ann" to the
/// next rule.
fn drop_trailing_lead(name: &str, range: Range<usize>) -> Range<usize> {
    let Some(gap) = name.find([' ', '\t']) else {
        return range;
    };
    let second = name[gap..].trim_start();
    if LEAD_OPENERS
        .iter()
        .any(|opener| second.eq_ignore_ascii_case(opener))
    {
        range.start..range.start + gap
    } else {
        range
    }
}

/// Structural patterns in evaluation order
const STRUCTURAL_PATTERNS: [(PiiCategory, &str); 7] = [
    (
        PiiCategory::Url,
        r#"(?i)\bhttps?://[^\s<>"']*[^\s<>"'.,;:!?)\]]"#,
    ),
    (
        PiiCategory::Email,
        r"\b[A-Za-z0-9._%+-]+@[A-Za-z0-9.-]+\.[A-Za-z]{2,}\b",
    ),
    (
        PiiCategory::CreditCard,
        r"\b[0-9]{4}(?:[-\s]?[0-9]{4}){3}\b",
    ),
    (
        PiiCategory::Ssn,
        r"\b[0-9]{3}[-\s]?[0-9]{2}[-\s]?[0-9]{4}\b",
    ),
    (
        PiiCategory::Phone,
        r"(?:\+[0-9]{1,3}[-.\s]?)?(?:\([0-9]{3}\)|\b[0-9]{3})[-.\s]?[0-9]{3}[-.\s]?[0-9]{4}\b",
    ),
    (
        PiiCategory::Date,
        r"\b(?:[0-9]{1,2}[-/][0-9]{1,2}[-/][0-9]{2,4}|[0-9]{4}[-/][0-9]{1,2}[-/][0-9]{1,2})\b",
    ),
    (
        PiiCategory::Address,
        r"\b[0-9]{1,6}\s+(?:[A-Z][a-z]+\s+){1,2}(?:Street|St|Avenue|Ave|Road|Rd|Boulevard|Blvd|Drive|Dr|Lane|Ln)\b",
    ),
];

/// Lead phrases that introduce a name
const NAME_LEADS: [&str; 7] = [
    r"\bmy\s+name\s+is",
    r"\bi['’]m\s+called",
    r"\bi['’]m",
    r"\bcall\s+me",
    r"\bthis\s+is",
    r"\bsigned,?",
    r"\bsincerely,?",
];

/// Ordered, immutable set of redaction rules
#[derive(Default)]
pub struct RuleSet {
    structural: Vec<Box<dyn RedactionRule>>,
    contextual: Vec<Box<dyn RedactionRule>>,
}

impl RuleSet {
    /// A rule set with no rules
    pub fn empty() -> Self {
        Self::default()
    }

    /// The built-in table with every category enabled
    pub fn standard() -> Result<Self> {
        Self::from_config(&PiiConfig::default())
    }

    /// Build the built-in table filtered by `config`
    pub fn from_config(config: &PiiConfig) -> Result<Self> {
        let mut rules = Self::empty();

        for (category, pattern) in STRUCTURAL_PATTERNS {
            if !config.detects(category) {
                continue;
            }
            let mut rule = PatternRule::new(category, pattern)?;
            if category == PiiCategory::CreditCard && config.require_luhn {
                rule = rule.with_validator(luhn_check);
            }
            rules.push(Box::new(rule));
        }

        if config.detects(PiiCategory::Name) {
            for lead in NAME_LEADS {
                rules.push(Box::new(ContextRule::new(lead)?));
            }
            for phrase in &config.extra_name_phrases {
                rules.push(Box::new(ContextRule::literal(phrase)?));
            }
        }

        Ok(rules)
    }

    /// Append a rule after the existing rules of the same kind
    pub fn push(&mut self, rule: Box<dyn RedactionRule>) {
        if rule.is_contextual() {
            self.contextual.push(rule);
        } else {
            self.structural.push(rule);
        }
    }

    /// Rules in evaluation order: structural, then contextual
    pub fn iter(&self) -> impl Iterator<Item = &dyn RedactionRule> + '_ {
        self.structural
            .iter()
            .chain(self.contextual.iter())
            .map(|rule| &**rule)
    }

    /// Number of rules
    pub fn len(&self) -> usize {
        self.structural.len() + self.contextual.len()
    }

    /// Whether the set has no rules
    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    /// Distinct categories covered, in evaluation order
    pub fn categories(&self) -> Vec<PiiCategory> {
        let mut categories = Vec::new();
        for rule in self.iter() {
            if !categories.contains(&rule.category()) {
                categories.push(rule.category());
            }
        }
        categories
    }
}

impl std::fmt::Debug for RuleSet {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("RuleSet")
            .field("structural", &self.structural.len())
            .field("contextual", &self.contextual.len())
            .field("categories", &self.categories())
            .finish()
    }
}

static STANDARD_RULES: Lazy<Arc<RuleSet>> = Lazy::new(|| {
    Arc::new(RuleSet::standard().expect("built-in PII rule table failed to compile"))
});

/// Process-wide built-in rule table, compiled on first use
pub fn standard_rules() -> Arc<RuleSet> {
    Arc::clone(&STANDARD_RULES)
}
