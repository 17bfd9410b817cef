//! Anonymous session identity
//!
//! A session id correlates requests within one app session and nothing else.
//! It lives only in memory: `SessionId` has no serde impls, and the only way
//! it leaves the process is inside an [`OutboundPayload`] next to scrubbed text.

use crate::error::{PrivacyError, Result};
use crate::guard::PrivacyGuard;
use crate::types::{PiiCategory, PreparedText};
use rand::rngs::OsRng;
use rand::RngCore;
use serde::{Deserialize, Serialize};

/// Random bytes per session id (128 bits)
pub const SESSION_ID_BYTES: usize = 16;

/// Length of the hex-encoded session id
pub const SESSION_ID_LEN: usize = SESSION_ID_BYTES * 2;

/// Opaque, unlinkable per-session token
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct SessionId(String);

impl SessionId {
    /// Draw a fresh id from the OS CSPRNG
    ///
    /// There is no fallback generator: if the OS source fails, so does this.
    pub fn generate() -> Result<Self> {
        let mut bytes = [0u8; SESSION_ID_BYTES];
        let mut csprng = OsRng;
        csprng
            .try_fill_bytes(&mut bytes)
            .map_err(|e| PrivacyError::RandomSource(e.to_string()))?;
        Ok(Self(hex::encode(bytes)))
    }

    /// Lowercase hex form
    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl std::fmt::Display for SessionId {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(&self.0)
    }
}

/// Generate a new anonymous session id
pub fn generate_session_id() -> Result<SessionId> {
    SessionId::generate()
}

/// One anonymous app session
///
/// Held by the caller for the session's lifetime and dropped at the end.
/// Separate sessions never share an id.
#[derive(Debug, Clone)]
pub struct Session {
    id: SessionId,
    guard: PrivacyGuard,
}

impl Session {
    pub(crate) fn new(guard: PrivacyGuard) -> Result<Self> {
        Ok(Self {
            id: SessionId::generate()?,
            guard,
        })
    }

    /// This session's id
    pub fn id(&self) -> &SessionId {
        &self.id
    }

    /// Scrub text with this session's guard
    pub fn prepare_text(&self, raw: &str) -> PreparedText {
        self.guard.prepare_text(raw)
    }

    /// Build the network payload for `raw`; only scrubbed text is included
    pub fn outbound(&self, raw: &str) -> OutboundPayload {
        let prepared = self.guard.prepare_text(raw);
        OutboundPayload {
            session_id: self.id.as_str().to_string(),
            text: prepared.scrubbed,
            pii_detected: prepared.pii_detected,
            pii_types: prepared.pii_types,
        }
    }
}

/// Request body for the chat/analysis API
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct OutboundPayload {
    /// Correlation token
    pub session_id: String,
    /// Scrubbed text
    pub text: String,
    /// Whether anything was redacted
    pub pii_detected: bool,
    /// Categories that were redacted
    pub pii_types: Vec<PiiCategory>,
}

impl OutboundPayload {
    /// Serialize as JSON
    pub fn to_json(&self) -> Result<String> {
        Ok(serde_json::to_string(self)?)
    }
}
