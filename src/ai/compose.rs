use crate::config::Settings;
use crate::context::{compute_additional_context, is_detailed_question};
use crate::persona::PERSONA_PROMPT;
use crate::types::{ChatMessage, ConversationMessage, Role};
use tracing::debug;

/// Everything needed for one outbound completion call. Built per send and
/// dropped afterwards.
#[derive(Debug, Clone, PartialEq)]
pub struct RequestEnvelope {
    pub system_prompt: String,
    pub history: Vec<ChatMessage>,
    pub user_turn: String,
    pub max_response_tokens: u32,
}

impl RequestEnvelope {
    /// System prompt first, then history oldest to newest, then the new turn.
    pub fn messages(&self) -> Vec<ChatMessage> {
        let mut messages = Vec::with_capacity(self.history.len() + 2);
        messages.push(ChatMessage::new(Role::System, self.system_prompt.clone()));
        messages.extend(self.history.iter().cloned());
        messages.push(ChatMessage::new(Role::User, self.user_turn.clone()));
        messages
    }
}

/// The last `limit` user/assistant turns that carry text, oldest first.
pub fn recent_turns(history: &[ConversationMessage], limit: usize) -> Vec<&ConversationMessage> {
    let turns: Vec<&ConversationMessage> = history
        .iter()
        .filter(|message| message.is_conversational())
        .collect();
    let start = turns.len().saturating_sub(limit);
    turns[start..].to_vec()
}

pub fn compose_request(
    message: &str,
    history: &[ConversationMessage],
    settings: &Settings,
) -> RequestEnvelope {
    let recent = recent_turns(history, settings.history_limit);
    let additional_context = compute_additional_context(message, &recent);
    let detailed = is_detailed_question(message);
    let max_response_tokens = settings.max_tokens(detailed);

    debug!(
        history_turns = recent.len(),
        detailed,
        max_response_tokens,
        injected_chars = additional_context.len(),
        "composed chat request"
    );

    RequestEnvelope {
        system_prompt: format!("{PERSONA_PROMPT}{additional_context}"),
        history: recent
            .iter()
            .filter_map(|message| message.to_chat_message())
            .collect(),
        user_turn: message.to_string(),
        max_response_tokens,
    }
}
