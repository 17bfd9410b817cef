//! Audit logging for the privacy layer
//!
//! Events carry lengths and category labels only. Raw text, scrubbed text and
//! hashes of either are never emitted.

use crate::config::AuditConfig;
use crate::types::PreparedText;

#[cfg(feature = "audit")]
use tracing::{debug, info};

/// Audit logger
#[derive(Debug, Clone)]
pub struct AuditLogger {
    config: AuditConfig,
}

impl AuditLogger {
    /// Create a new audit logger
    pub fn new(config: AuditConfig) -> Self {
        Self { config }
    }

    /// Whether events are emitted
    pub fn is_enabled(&self) -> bool {
        self.config.enabled
    }

    /// Record the outcome of one prepare call
    pub fn record(&self, input_len: usize, prepared: &PreparedText) {
        if !self.config.enabled {
            return;
        }

        #[cfg(feature = "audit")]
        {
            if prepared.pii_detected {
                info!(
                    input_len,
                    output_len = prepared.scrubbed.len(),
                    pii_types = %prepared.pii_type_labels().join(","),
                    "PII redacted before transmission"
                );
            } else {
                debug!(input_len, pii_detected = false, "Text passed privacy scrub");
            }
        }

        #[cfg(not(feature = "audit"))]
        let _ = (input_len, prepared);
    }

    /// Record that an anonymous session was created
    pub fn session_started(&self) {
        if !self.config.enabled {
            return;
        }

        #[cfg(feature = "audit")]
        debug!("Anonymous session started");
    }
}
