use serde::{Deserialize, Serialize};
use time::OffsetDateTime;
use uuid::Uuid;

#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Role {
    System,
    User,
    Assistant,
}

/// A single turn as it goes over the wire to the completions endpoint.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct ChatMessage {
    pub role: Role,
    pub content: String,
}

impl ChatMessage {
    pub fn new(role: Role, content: impl Into<String>) -> Self {
        Self {
            role,
            content: content.into(),
        }
    }
}

#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum MessageKind {
    Text,
    CardWithQuestion,
    Greeting,
}

/// Project card a visitor picked from the portfolio grid.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CardRef {
    pub id: String,
    pub image_url: String,
    pub title: String,
}

#[derive(Debug, thiserror::Error, PartialEq, Eq)]
pub enum MessageShapeError {
    #[error("card-with-question message has no card")]
    MissingCard,

    #[error("{0:?} message must not carry a card")]
    UnexpectedCard(MessageKind),
}

/// One entry of the visible conversation.
///
/// Fields are private so the `card` <-> `CardWithQuestion` pairing can only be
/// produced through the constructors below. Deserialization enforces the same
/// pairing.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", try_from = "RawMessage")]
pub struct ConversationMessage {
    id: Uuid,
    kind: MessageKind,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    content: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    card: Option<CardRef>,
    sender: Role,
    #[serde(with = "time::serde::rfc3339")]
    created_at: OffsetDateTime,
}

/// Unchecked wire shape of [`ConversationMessage`].
#[derive(Deserialize)]
#[serde(rename_all = "camelCase")]
struct RawMessage {
    id: Uuid,
    kind: MessageKind,
    #[serde(default)]
    content: Option<String>,
    #[serde(default)]
    card: Option<CardRef>,
    sender: Role,
    #[serde(with = "time::serde::rfc3339")]
    created_at: OffsetDateTime,
}

impl TryFrom<RawMessage> for ConversationMessage {
    type Error = MessageShapeError;

    fn try_from(raw: RawMessage) -> Result<Self, Self::Error> {
        match (raw.kind, raw.card.is_some()) {
            (MessageKind::CardWithQuestion, false) => return Err(MessageShapeError::MissingCard),
            (MessageKind::Text | MessageKind::Greeting, true) => {
                return Err(MessageShapeError::UnexpectedCard(raw.kind));
            }
            _ => {}
        }
        Ok(Self {
            id: raw.id,
            kind: raw.kind,
            content: raw.content,
            card: raw.card,
            sender: raw.sender,
            created_at: raw.created_at,
        })
    }
}

impl ConversationMessage {
    fn build(
        kind: MessageKind,
        sender: Role,
        content: Option<String>,
        card: Option<CardRef>,
    ) -> Self {
        Self {
            id: Uuid::new_v4(),
            kind,
            content,
            card,
            sender,
            created_at: OffsetDateTime::now_utc(),
        }
    }

    pub fn user(content: impl Into<String>) -> Self {
        Self::build(MessageKind::Text, Role::User, Some(content.into()), None)
    }

    pub fn assistant(content: impl Into<String>) -> Self {
        Self::build(MessageKind::Text, Role::Assistant, Some(content.into()), None)
    }

    pub fn system(content: impl Into<String>) -> Self {
        Self::build(MessageKind::Text, Role::System, Some(content.into()), None)
    }

    pub fn greeting(content: impl Into<String>) -> Self {
        Self::build(MessageKind::Greeting, Role::Assistant, Some(content.into()), None)
    }

    pub fn card_question(card: CardRef, question: impl Into<String>) -> Self {
        Self::build(
            MessageKind::CardWithQuestion,
            Role::User,
            Some(question.into()),
            Some(card),
        )
    }

    pub fn id(&self) -> Uuid {
        self.id
    }

    pub fn kind(&self) -> MessageKind {
        self.kind
    }

    pub fn content(&self) -> Option<&str> {
        self.content.as_deref()
    }

    pub fn card(&self) -> Option<&CardRef> {
        self.card.as_ref()
    }

    pub fn sender(&self) -> Role {
        self.sender
    }

    pub fn created_at(&self) -> OffsetDateTime {
        self.created_at
    }

    /// True for user/assistant turns that carry text and belong in a model
    /// request. Greetings and system notices stay on screen only.
    pub fn is_conversational(&self) -> bool {
        matches!(self.sender, Role::User | Role::Assistant)
            && self.kind != MessageKind::Greeting
            && self.content.as_deref().is_some_and(|text| !text.trim().is_empty())
    }

    pub fn to_chat_message(&self) -> Option<ChatMessage> {
        self.content
            .as_ref()
            .map(|content| ChatMessage::new(self.sender, content.clone()))
    }
}
