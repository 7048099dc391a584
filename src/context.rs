//! Keyword-driven context injection and the interview-style classifier.
//!
//! The knowledge base is small and fixed, so relevance is decided by plain
//! substring matching instead of semantic search. A short trailing window of
//! history is scanned too, which keeps a follow-up such as "what was the
//! hardest part?" attached to the topic named in the previous turn.

use crate::persona::{TRIGGERS, TriggerTable};
use crate::types::ConversationMessage;
use std::borrow::Borrow;
use std::collections::HashSet;
use tracing::debug;

/// Number of trailing history entries scanned for topic keywords.
pub const CONTINUITY_WINDOW: usize = 2;

const DETAIL_INDICATORS: &[&str] = &[
    "tell me about",
    "walk me through",
    "how did you",
    "what challenges",
    "can you share",
    "explain",
    "describe",
    "elaborate",
    "in detail",
    "what was your role",
];

/// Extra system-prompt text for `user_message`, using the builtin topic table.
pub fn compute_additional_context<M>(user_message: &str, recent_history: &[M]) -> String
where
    M: Borrow<ConversationMessage>,
{
    compute_additional_context_with(&TRIGGERS, user_message, recent_history)
}

/// Returns the expansions of every topic mentioned in `user_message` or in the
/// last [`CONTINUITY_WINDOW`] entries of `recent_history`, joined by blank
/// lines and prefixed with one so the result appends directly to the persona
/// prompt. Empty when nothing matched.
pub fn compute_additional_context_with<M>(
    table: &TriggerTable,
    user_message: &str,
    recent_history: &[M],
) -> String
where
    M: Borrow<ConversationMessage>,
{
    let mut triggered: HashSet<&'static str> = HashSet::new();

    let lowered = user_message.to_lowercase();
    triggered.extend(table.matching_keys(&lowered));

    let window_start = recent_history.len().saturating_sub(CONTINUITY_WINDOW);
    for message in &recent_history[window_start..] {
        let message: &ConversationMessage = message.borrow();
        if let Some(content) = message.content() {
            let lowered = content.to_lowercase();
            triggered.extend(table.matching_keys(&lowered));
        }
    }

    if triggered.is_empty() {
        return String::new();
    }

    let expansions: Vec<&str> = table
        .iter()
        .filter(|entry| triggered.contains(entry.key))
        .map(|entry| entry.expansion)
        .collect();

    debug!(topics = ?triggered, "injecting topic context");

    format!("\n\n{}", expansions.join("\n\n"))
}

/// True when the message reads like an interview question that deserves a
/// longer answer.
pub fn is_detailed_question(message: &str) -> bool {
    let text = message.to_lowercase();
    DETAIL_INDICATORS
        .iter()
        .any(|indicator| text.contains(indicator))
}
