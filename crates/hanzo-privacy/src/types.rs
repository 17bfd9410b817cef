//! Core types for Hanzo Privacy

use serde::{Deserialize, Serialize};

/// Categories of personally identifiable information
///
/// Variant order is the structural evaluation order; `Name` is contextual and
/// always evaluated last.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum PiiCategory {
    /// `http(s)://` links
    #[serde(rename = "URL")]
    Url,
    /// Email address
    Email,
    /// Credit card number (four groups of four digits)
    #[serde(rename = "Credit Card")]
    CreditCard,
    /// Social Security Number
    #[serde(rename = "SSN")]
    Ssn,
    /// Phone number
    Phone,
    /// Calendar date
    Date,
    /// Street address
    Address,
    /// Proper name introduced by a phrase such as "my name is"
    Name,
}

impl PiiCategory {
    /// Every category, in evaluation order
    pub const ALL: [PiiCategory; 8] = [
        PiiCategory::Url,
        PiiCategory::Email,
        PiiCategory::CreditCard,
        PiiCategory::Ssn,
        PiiCategory::Phone,
        PiiCategory::Date,
        PiiCategory::Address,
        PiiCategory::Name,
    ];

    /// Label reported to callers in `pii_types`
    pub fn label(self) -> &'static str {
        match self {
            PiiCategory::Url => "URL",
            PiiCategory::Email => "Email",
            PiiCategory::CreditCard => "Credit Card",
            PiiCategory::Ssn => "SSN",
            PiiCategory::Phone => "Phone",
            PiiCategory::Date => "Date",
            PiiCategory::Address => "Address",
            PiiCategory::Name => "Name",
        }
    }

    /// Fixed placeholder token substituted for a match
    pub fn placeholder(self) -> &'static str {
        match self {
            PiiCategory::Url => "[URL]",
            PiiCategory::Email => "[EMAIL]",
            PiiCategory::CreditCard => "[CARD]",
            PiiCategory::Ssn => "[SSN]",
            PiiCategory::Phone => "[PHONE]",
            PiiCategory::Date => "[DATE]",
            PiiCategory::Address => "[ADDRESS]",
            PiiCategory::Name => "[NAME]",
        }
    }
}

impl std::fmt::Display for PiiCategory {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.label())
    }
}

/// Outcome of a read-only scan for PII
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct DetectionResult {
    /// Whether any category matched
    pub has_pii: bool,
    /// Distinct categories found, in evaluation order
    pub types: Vec<PiiCategory>,
}

/// Scrubbed text plus the categories removed from it
///
/// This is the only artifact allowed to leave the device. It never carries
/// the raw input.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct PreparedText {
    /// Text with every detected span replaced by its placeholder
    pub scrubbed: String,
    /// Whether anything was redacted
    pub pii_detected: bool,
    /// Categories that were redacted, in evaluation order
    pub pii_types: Vec<PiiCategory>,
}

impl PreparedText {
    /// Labels of the redacted categories, for display badges
    pub fn pii_type_labels(&self) -> Vec<&'static str> {
        self.pii_types.iter().map(|c| c.label()).collect()
    }
}

/// Location of a detected span in the original text
///
/// Only byte offsets are kept; the matched text itself is never stored.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct Finding {
    /// Category of the span
    pub category: PiiCategory,
    /// Start byte offset
    pub start: usize,
    /// End byte offset (exclusive)
    pub end: usize,
}

impl Finding {
    /// Length of the span in bytes
    pub fn len(&self) -> usize {
        self.end - self.start
    }

    /// Whether the span is empty
    pub fn is_empty(&self) -> bool {
        self.start == self.end
    }
}
