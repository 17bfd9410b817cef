//! Main PrivacyGuard implementation

use crate::audit::AuditLogger;
use crate::config::{AuditConfig, PiiConfig, PrivacyConfig};
use crate::error::Result;
use crate::pii::PiiDetector;
use crate::rules::{standard_rules, RedactionRule, RuleSet};
use crate::session::Session;
use crate::types::{DetectionResult, Finding, PreparedText};
use std::sync::Arc;

/// Single entry point for scrubbing user text before it leaves the device
///
/// Detection and redaction share one rule table, so the reported categories
/// always match what was actually removed.
#[derive(Debug, Clone)]
pub struct PrivacyGuard {
    detector: PiiDetector,
    audit_logger: AuditLogger,
}

impl Default for PrivacyGuard {
    fn default() -> Self {
        Self::standard()
    }
}

impl PrivacyGuard {
    /// Create a new guard with the given configuration
    pub fn new(config: PrivacyConfig) -> Result<Self> {
        config.validate()?;
        let rules = RuleSet::from_config(&config.pii)?;
        Ok(Self::with_rules(Arc::new(rules), config.audit))
    }

    /// Guard over the process-wide built-in rule table
    pub fn standard() -> Self {
        Self::with_rules(standard_rules(), AuditConfig::default())
    }

    fn with_rules(rules: Arc<RuleSet>, audit: AuditConfig) -> Self {
        Self {
            detector: PiiDetector::new(rules),
            audit_logger: AuditLogger::new(audit),
        }
    }

    /// Scrub `raw` and report what was removed
    ///
    /// Never fails: text that matches no rule passes through unchanged.
    pub fn prepare_text(&self, raw: &str) -> PreparedText {
        let (scrubbed, pii_types) = self.detector.scrub_with_report(raw);
        let prepared = PreparedText {
            scrubbed,
            pii_detected: !pii_types.is_empty(),
            pii_types,
        };

        self.audit_logger.record(raw.len(), &prepared);
        prepared
    }

    /// Read-only scan of `text`
    pub fn detect(&self, text: &str) -> DetectionResult {
        self.detector.detect(text)
    }

    /// Redacted copy of `text`
    pub fn scrub(&self, text: &str) -> String {
        self.detector.scrub(text)
    }

    /// Span locations of detected PII
    pub fn findings(&self, text: &str) -> Vec<Finding> {
        self.detector.findings(text)
    }

    /// Rough privacy risk score of `text`
    pub fn privacy_score(&self, text: &str) -> f32 {
        self.detector.privacy_score(text)
    }

    /// The underlying detector
    pub fn detector(&self) -> &PiiDetector {
        &self.detector
    }

    /// Begin an anonymous session bound to this guard
    pub fn start_session(&self) -> Result<Session> {
        let session = Session::new(self.clone())?;
        self.audit_logger.session_started();
        Ok(session)
    }

    /// Create a builder for PrivacyGuard
    pub fn builder() -> PrivacyGuardBuilder {
        PrivacyGuardBuilder::new()
    }
}

/// Builder for PrivacyGuard configuration
pub struct PrivacyGuardBuilder {
    config: PrivacyConfig,
    rules: Vec<Box<dyn RedactionRule>>,
}

impl PrivacyGuardBuilder {
    /// Create a new builder
    pub fn new() -> Self {
        Self {
            config: PrivacyConfig::default(),
            rules: vec![],
        }
    }

    /// Start from a full configuration
    pub fn with_config(mut self, config: PrivacyConfig) -> Self {
        self.config = config;
        self
    }

    /// Disable contextual name detection
    pub fn structural_only(mut self) -> Self {
        self.config.pii.detect_name = false;
        self
    }

    /// Configure PII detection
    pub fn with_pii(mut self, config: PiiConfig) -> Self {
        self.config.pii = config;
        self
    }

    /// Configure audit logging
    pub fn with_audit(mut self, config: AuditConfig) -> Self {
        self.config.audit = config;
        self
    }

    /// Add an extra phrase that introduces a name
    pub fn with_name_phrase(mut self, phrase: impl Into<String>) -> Self {
        self.config.pii.extra_name_phrases.push(phrase.into());
        self
    }

    /// Add a custom rule after the built-in rules of the same kind
    pub fn with_rule(mut self, rule: Box<dyn RedactionRule>) -> Self {
        self.rules.push(rule);
        self
    }

    /// Build the PrivacyGuard
    pub fn build(self) -> Result<PrivacyGuard> {
        self.config.validate()?;
        let mut rules = RuleSet::from_config(&self.config.pii)?;
        for rule in self.rules {
            if self.config.pii.detects(rule.category()) {
                rules.push(rule);
            }
        }
        Ok(PrivacyGuard::with_rules(Arc::new(rules), self.config.audit))
    }
}

impl Default for PrivacyGuardBuilder {
    fn default() -> Self {
        Self::new()
    }
}
