//! Conversational engine behind the portfolio chat widget.
//!
//! A visitor's message plus recent history becomes a persona system prompt
//! (with topic deep dives injected by keyword), a trimmed message list and a
//! response budget. The request goes to an OpenAI-compatible endpoint, or to
//! canned offline answers when no API key is configured.
pub mod ai;
pub mod config;
pub mod context;
pub mod persona;
pub mod session;
pub mod types;
