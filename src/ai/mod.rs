//! AI module for the portfolio chat
//!
//! Turns a visitor's message and the running conversation into a request for
//! a remote model, and turns the outcome into a reply the UI can append.
//!
//! # Architecture
//!
//! - `compose` - builds the request envelope (prompt, trimmed history, budget)
//! - `client` - `FolioAI` dispatcher with offline routing and failure recovery
//! - `providers` - the backend trait and the HTTP implementation
//!
//! # Usage
//!
//! ```rust,no_run
//! use folio::ai::FolioAI;
//!
//! # async fn example() -> anyhow::Result<()> {
//! let ai = FolioAI::from_env()?;
//! if let Some(reply) = ai.respond("Tell me about Ova", &[]).await {
//!     println!("{}", reply.text);
//! }
//! # Ok(())
//! # }
//! ```

mod client;
pub mod compose;
pub mod providers;

// Re-export main types
pub use client::{APOLOGY, ChatError, ChatResult, FolioAI, Reply, ReplySource};
pub use compose::{RequestEnvelope, compose_request};
pub use providers::{LLMBackend, OpenAIBackend};
