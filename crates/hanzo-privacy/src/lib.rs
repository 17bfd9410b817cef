//! # Hanzo Privacy
//!
//! Client-side PII scrubbing for journaling and chat apps.
//!
//! Every piece of user-authored text passes through [`prepare_text`] before
//! it leaves the device. Emails, phone numbers, SSNs, card numbers, URLs,
//! dates, street addresses and introduced names are replaced with fixed
//! placeholders such as `[EMAIL]` or `[NAME]`. Requests are correlated with an
//! anonymous, memory-only [`SessionId`] instead of a user identity.
//!
//! Detection is regex-based and best-effort: it reduces obvious leakage, it
//! does not guarantee zero leakage.
//!
//! ## Quick Start
//!
//! ```rust
//! use hanzo_privacy::{PiiCategory, PrivacyGuard};
//!
//! fn main() -> Result<(), Box<dyn std::error::Error>> {
//!     let guard = PrivacyGuard::standard();
//!
//!     let prepared = guard.prepare_text("Contact me at jane.doe@example.com");
//!     assert_eq!(prepared.scrubbed, "Contact me at [EMAIL]");
//!     assert_eq!(prepared.pii_types, vec![PiiCategory::Email]);
//!
//!     // One session per app launch, held in memory only
//!     let session = guard.start_session()?;
//!     let payload = session.outbound("My name is Priya and I feel anxious");
//!     assert_eq!(payload.text, "My name is [NAME] and I feel anxious");
//!
//!     Ok(())
//! }
//! ```
//!
//! ## Architecture
//!
//! ```text
//! ┌─────────────┐     ┌────────────────┐     ┌─────────────┐
//! │ Editor / UI │ ──► │ Privacy Guard  │ ──► │ Network API │
//! └─────────────┘     │                │     └─────────────┘
//!                     │ ┌────────────┐ │
//!                     │ │ Rule Table │ │
//!                     │ └────────────┘ │
//!                     │ ┌────────────┐ │
//!                     │ │ Detector / │ │
//!                     │ │ Scrubber   │ │
//!                     │ └────────────┘ │
//!                     │ ┌────────────┐ │
//!                     │ │ Session Id │ │
//!                     │ └────────────┘ │
//!                     │ ┌────────────┐ │
//!                     │ │ Audit      │ │
//!                     │ └────────────┘ │
//!                     └────────────────┘
//! ```

pub mod audit;
pub mod config;
pub mod error;
pub mod guard;
pub mod pii;
pub mod rules;
pub mod session;
pub mod types;

pub use config::PrivacyConfig;
pub use error::{PrivacyError, Result};
pub use guard::PrivacyGuard;
pub use rules::{RedactionRule, RuleSet};
pub use session::{generate_session_id, OutboundPayload, Session, SessionId};
pub use types::*;

/// Scrub `raw` with the built-in rule table
pub fn prepare_text(raw: &str) -> PreparedText {
    PrivacyGuard::standard().prepare_text(raw)
}

/// Prelude for convenient imports
pub mod prelude {
    pub use crate::config::PrivacyConfig;
    pub use crate::error::{PrivacyError, Result};
    pub use crate::guard::PrivacyGuard;
    pub use crate::session::{generate_session_id, Session, SessionId};
    pub use crate::types::*;
}
