//! Configuration for Hanzo Privacy

use crate::error::{PrivacyError, Result};
use crate::types::PiiCategory;
use serde::{Deserialize, Serialize};
use std::path::Path;

/// Main configuration for the privacy layer
#[derive(Debug, Clone, Serialize, Deserialize, Default)]
#[serde(default)]
pub struct PrivacyConfig {
    /// PII detection configuration
    pub pii: PiiConfig,
    /// Audit configuration
    pub audit: AuditConfig,
}

impl PrivacyConfig {
    /// Every detection category enabled
    pub fn full() -> Self {
        Self {
            pii: PiiConfig {
                enabled: true,
                ..Default::default()
            },
            audit: AuditConfig { enabled: true },
        }
    }

    /// Shape-based detection only; contextual names are left alone
    pub fn structural_only() -> Self {
        Self {
            pii: PiiConfig {
                enabled: true,
                detect_name: false,
                ..Default::default()
            },
            ..Default::default()
        }
    }

    /// Parse a TOML document
    pub fn from_toml_str(contents: &str) -> Result<Self> {
        let config: Self = toml::from_str(contents)?;
        config.validate()?;
        Ok(config)
    }

    /// Parse a JSON document
    pub fn from_json_str(contents: &str) -> Result<Self> {
        let config: Self = serde_json::from_str(contents)?;
        config.validate()?;
        Ok(config)
    }

    /// Load from a file; `.json` is read as JSON, anything else as TOML
    pub fn load(path: impl AsRef<Path>) -> Result<Self> {
        let path = path.as_ref();
        let contents = std::fs::read_to_string(path)?;
        let is_json = path
            .extension()
            .and_then(|ext| ext.to_str())
            .is_some_and(|ext| ext.eq_ignore_ascii_case("json"));

        if is_json {
            Self::from_json_str(&contents)
        } else {
            Self::from_toml_str(&contents)
        }
    }

    /// Reject settings that would build a broken rule set
    pub fn validate(&self) -> Result<()> {
        if let Some(idx) = self
            .pii
            .extra_name_phrases
            .iter()
            .position(|p| p.trim().is_empty())
        {
            return Err(PrivacyError::ConfigError(format!(
                "extra_name_phrases[{idx}] is empty"
            )));
        }
        Ok(())
    }
}

/// PII detection configuration
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct PiiConfig {
    /// Enable PII detection
    pub enabled: bool,
    /// Detect emails
    pub detect_email: bool,
    /// Detect phone numbers
    pub detect_phone: bool,
    /// Detect SSNs
    pub detect_ssn: bool,
    /// Detect credit cards
    pub detect_credit_card: bool,
    /// Detect URLs
    pub detect_url: bool,
    /// Detect dates
    pub detect_date: bool,
    /// Detect street addresses
    pub detect_address: bool,
    /// Detect names after introductory phrases
    pub detect_name: bool,
    /// Only redact card numbers that pass the Luhn checksum
    pub require_luhn: bool,
    /// Additional phrases that introduce a name, e.g. "love,"
    pub extra_name_phrases: Vec<String>,
}

impl Default for PiiConfig {
    fn default() -> Self {
        Self {
            enabled: true,
            detect_email: true,
            detect_phone: true,
            detect_ssn: true,
            detect_credit_card: true,
            detect_url: true,
            detect_date: true,
            detect_address: true,
            detect_name: true,
            require_luhn: false,
            extra_name_phrases: vec![],
        }
    }
}

impl PiiConfig {
    /// Whether the given category should be detected
    pub fn detects(&self, category: PiiCategory) -> bool {
        if !self.enabled {
            return false;
        }
        match category {
            PiiCategory::Url => self.detect_url,
            PiiCategory::Email => self.detect_email,
            PiiCategory::CreditCard => self.detect_credit_card,
            PiiCategory::Ssn => self.detect_ssn,
            PiiCategory::Phone => self.detect_phone,
            PiiCategory::Date => self.detect_date,
            PiiCategory::Address => self.detect_address,
            PiiCategory::Name => self.detect_name,
        }
    }
}

/// Audit logging configuration
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct AuditConfig {
    /// Emit structured audit events (counts and categories only)
    pub enabled: bool,
}

impl Default for AuditConfig {
    fn default() -> Self {
        Self { enabled: true }
    }
}
