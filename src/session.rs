//! Caller-owned conversation state.
//!
//! The session is the only place messages are appended. `send` takes
//! `&mut self`, so a second send on the same conversation cannot start while
//! one is awaiting the model.

use crate::ai::FolioAI;
use crate::persona::GREETING;
use crate::types::{CardRef, ConversationMessage};
use tracing::debug;

#[derive(Clone, Debug)]
pub struct ConversationSession {
    messages: Vec<ConversationMessage>,
}

impl Default for ConversationSession {
    fn default() -> Self {
        Self::new()
    }
}

impl ConversationSession {
    pub fn new() -> Self {
        Self {
            messages: vec![ConversationMessage::greeting(GREETING)],
        }
    }

    /// Adopt a sequence loaded by the presentation layer. An empty sequence
    /// starts fresh with the greeting.
    pub fn restore(messages: Vec<ConversationMessage>) -> Self {
        if messages.is_empty() {
            Self::new()
        } else {
            Self { messages }
        }
    }

    pub fn messages(&self) -> &[ConversationMessage] {
        &self.messages
    }

    pub fn len(&self) -> usize {
        self.messages.len()
    }

    pub fn is_empty(&self) -> bool {
        self.messages.is_empty()
    }

    /// Drop everything and start over from the greeting.
    pub fn clear(&mut self) {
        self.messages = vec![ConversationMessage::greeting(GREETING)];
    }

    /// Append `text` as a user turn, wait for the reply and append it.
    ///
    /// Blank input is ignored and returns `None`. Otherwise the returned
    /// message is the assistant reply, which is the apology text if the
    /// remote call failed.
    pub async fn send(&mut self, text: &str, ai: &FolioAI) -> Option<&ConversationMessage> {
        let trimmed = text.trim();
        if trimmed.is_empty() {
            return None;
        }
        self.dispatch(ConversationMessage::user(trimmed), ai).await
    }

    /// Same as [`ConversationSession::send`], for a question asked from a
    /// project card.
    pub async fn ask_about(
        &mut self,
        card: CardRef,
        question: &str,
        ai: &FolioAI,
    ) -> Option<&ConversationMessage> {
        let trimmed = question.trim();
        if trimmed.is_empty() {
            return None;
        }
        self.dispatch(ConversationMessage::card_question(card, trimmed), ai)
            .await
    }

    async fn dispatch(
        &mut self,
        outgoing: ConversationMessage,
        ai: &FolioAI,
    ) -> Option<&ConversationMessage> {
        let text = outgoing.content().unwrap_or_default();
        let reply = ai.respond(text, &self.messages).await?;
        debug!(source = ?reply.source, "appending reply");
        self.messages.push(outgoing);
        self.messages.push(ConversationMessage::assistant(reply.text));
        self.messages.last()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::Settings;
    use crate::persona::fallback_reply;
    use crate::types::{MessageKind, Role};

    fn offline() -> FolioAI {
        FolioAI::from_settings(Settings::default()).unwrap()
    }

    #[test]
    fn starts_with_greeting() {
        let session = ConversationSession::new();
        assert_eq!(session.len(), 1);
        assert_eq!(session.messages()[0].kind(), MessageKind::Greeting);
    }

    #[tokio::test]
    async fn blank_input_is_ignored() {
        let ai = offline();
        let mut session = ConversationSession::new();
        assert!(session.send("   \n", &ai).await.is_none());
        assert_eq!(session.len(), 1);
    }

    #[tokio::test]
    async fn send_appends_user_then_assistant() {
        let ai = offline();
        let mut session = ConversationSession::new();
        let reply = session.send("  what's your process?  ", &ai).await.cloned().unwrap();
        assert_eq!(reply.sender(), Role::Assistant);
        assert_eq!(reply.content(), Some(fallback_reply("what's your process?")));

        let messages = session.messages();
        assert_eq!(messages.len(), 3);
        assert_eq!(messages[1].sender(), Role::User);
        assert_eq!(messages[1].content(), Some("what's your process?"));
    }

    #[tokio::test]
    async fn card_question_is_recorded() {
        let ai = offline();
        let mut session = ConversationSession::new();
        let card = CardRef {
            id: "greex".into(),
            image_url: "/img/greex.png".into(),
            title: "Greex".into(),
        };
        session.ask_about(card.clone(), "Tell me about Greex", &ai).await;
        assert_eq!(session.messages()[1].card(), Some(&card));
        assert_eq!(session.messages()[2].sender(), Role::Assistant);
    }

    #[tokio::test]
    async fn clear_resets_to_single_greeting() {
        let ai = offline();
        let mut session = ConversationSession::new();
        session.send("hello", &ai).await;
        session.send("tell me about ova", &ai).await;
        assert_eq!(session.len(), 5);

        session.clear();
        assert!(!session.is_empty());
        assert_eq!(session.len(), 1);
        assert_eq!(session.messages()[0].kind(), MessageKind::Greeting);
        assert_eq!(session.messages()[0].content(), Some(GREETING));
    }

    #[test]
    fn restore_empty_starts_fresh() {
        let session = ConversationSession::restore(Vec::new());
        assert!(!session.is_empty());
        assert_eq!(session.len(), 1);

        let saved = vec![
            ConversationMessage::greeting(GREETING),
            ConversationMessage::user("hi"),
        ];
        let session = ConversationSession::restore(saved.clone());
        assert_eq!(session.messages(), saved.as_slice());
    }
}
