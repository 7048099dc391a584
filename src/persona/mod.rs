//! Everything the assistant knows about the portfolio owner.
//!
//! - `prompt` - base persona text and the greeting shown on an empty chat
//! - `triggers` - topic keywords and their deep-dive expansions
//! - `fallback` - canned answers used when no model credential is configured
pub mod fallback;
pub mod prompt;
pub mod triggers;

pub use fallback::{DEFAULT_FALLBACK_REPLY, fallback_reply};
pub use prompt::{GREETING, PERSONA_PROMPT};
pub use triggers::{TRIGGERS, TriggerEntry, TriggerTable, TriggerTableError};
