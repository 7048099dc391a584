use super::compose::compose_request;
use super::providers::{LLMBackend, OpenAIBackend};
use crate::config::Settings;
use crate::persona::fallback_reply;
use crate::types::ConversationMessage;
use tracing::{debug, info, warn};

/// Shown to the visitor whenever the remote call fails for any reason.
pub const APOLOGY: &str = "Sorry, I'm having trouble connecting right now. Please try again in a moment!";

// ============================================
// Error Types
// ============================================

#[derive(Debug, thiserror::Error)]
pub enum ChatError {
    #[error("Request timed out")]
    Timeout,

    #[error("Transport error: {0}")]
    Transport(#[source] reqwest::Error),

    #[error("Chat endpoint error {status}: {body}")]
    Api { status: u16, body: String },

    #[error("Malformed response: {0}")]
    MalformedResponse(String),
}

impl From<reqwest::Error> for ChatError {
    fn from(err: reqwest::Error) -> Self {
        if err.is_timeout() {
            ChatError::Timeout
        } else {
            ChatError::Transport(err)
        }
    }
}

pub type ChatResult<T> = Result<T, ChatError>;

// ============================================
// Replies
// ============================================

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum ReplySource {
    /// Generated by the remote model.
    Model,
    /// Canned answer; no credential is configured.
    Offline,
    /// The remote call failed and the fixed apology was substituted.
    Apology,
}

#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Reply {
    pub text: String,
    pub source: ReplySource,
}

impl Reply {
    fn new(text: impl Into<String>, source: ReplySource) -> Self {
        Self {
            text: text.into(),
            source,
        }
    }

    pub fn is_failure(&self) -> bool {
        self.source == ReplySource::Apology
    }
}

/// Chat dispatcher for the portfolio persona.
///
/// Holds a backend only when a usable credential was configured; without one
/// every message is answered by the offline responder and nothing touches the
/// network.
pub struct FolioAI {
    settings: Settings,
    backend: Option<Box<dyn LLMBackend>>,
}

impl FolioAI {
    pub fn from_settings(settings: Settings) -> ChatResult<Self> {
        let backend: Option<Box<dyn LLMBackend>> = match settings.credential() {
            Some(key) => Some(Box::new(OpenAIBackend::from_settings(&settings, key)?)),
            None => {
                info!("no usable API key configured; answering with offline replies");
                None
            }
        };
        Ok(Self { settings, backend })
    }

    /// Create the dispatcher from environment configuration
    pub fn from_env() -> anyhow::Result<Self> {
        let settings = Settings::from_env()?;
        Ok(Self::from_settings(settings)?)
    }

    pub fn with_backend(settings: Settings, backend: Option<Box<dyn LLMBackend>>) -> Self {
        Self { settings, backend }
    }

    pub fn settings(&self) -> &Settings {
        &self.settings
    }

    pub fn is_online(&self) -> bool {
        self.backend.is_some()
    }

    /// One request/response round trip for `message` given the prior
    /// conversation. Blank input is ignored and yields `Ok(None)` without
    /// composing a request. Errors are returned as-is; see
    /// [`FolioAI::respond`] for the variant that never fails.
    pub async fn send(
        &self,
        message: &str,
        history: &[ConversationMessage],
    ) -> ChatResult<Option<Reply>> {
        let message = message.trim();
        if message.is_empty() {
            debug!("ignoring blank message");
            return Ok(None);
        }

        let Some(backend) = &self.backend else {
            debug!("offline reply");
            return Ok(Some(Reply::new(
                fallback_reply(message),
                ReplySource::Offline,
            )));
        };

        let envelope = compose_request(message, history, &self.settings);
        info!(
            backend = backend.name(),
            max_tokens = envelope.max_response_tokens,
            "sending chat request"
        );
        let text = backend.complete(&envelope).await?;
        Ok(Some(Reply::new(text, ReplySource::Model)))
    }

    /// Like [`FolioAI::send`], but any failure becomes the apology reply.
    pub async fn respond(&self, message: &str, history: &[ConversationMessage]) -> Option<Reply> {
        match self.send(message, history).await {
            Ok(reply) => reply,
            Err(err) => {
                warn!(error = %err, "chat request failed; sending apology");
                Some(Reply::new(APOLOGY, ReplySource::Apology))
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::ai::compose::RequestEnvelope;
    use async_trait::async_trait;
    use std::sync::Arc;
    use std::sync::atomic::{AtomicUsize, Ordering};

    struct FailingBackend;

    #[async_trait]
    impl LLMBackend for FailingBackend {
        async fn complete(&self, _envelope: &RequestEnvelope) -> ChatResult<String> {
            Err(ChatError::Timeout)
        }

        fn name(&self) -> &str {
            "failing"
        }
    }

    #[derive(Clone, Default)]
    struct CountingBackend {
        calls: Arc<AtomicUsize>,
    }

    #[async_trait]
    impl LLMBackend for CountingBackend {
        async fn complete(&self, _envelope: &RequestEnvelope) -> ChatResult<String> {
            self.calls.fetch_add(1, Ordering::SeqCst);
            Ok("counted".to_string())
        }

        fn name(&self) -> &str {
            "counting"
        }
    }

    #[test]
    fn offline_without_credential() {
        let ai = FolioAI::from_settings(Settings::default()).unwrap();
        assert!(!ai.is_online());
    }

    #[tokio::test]
    async fn offline_reply_matches_fallback() {
        let ai = FolioAI::from_settings(Settings::default()).unwrap();
        let reply = ai.send("what's greex?", &[]).await.unwrap().unwrap();
        assert_eq!(reply.source, ReplySource::Offline);
        assert_eq!(reply.text, fallback_reply("what's greex?"));
    }

    #[tokio::test]
    async fn failure_becomes_apology() {
        let ai = FolioAI::with_backend(Settings::default(), Some(Box::new(FailingBackend)));
        assert!(ai.send("hi", &[]).await.is_err());

        let reply = ai.respond("hi", &[]).await.unwrap();
        assert!(reply.is_failure());
        assert_eq!(reply.text, APOLOGY);
    }

    #[tokio::test]
    async fn blank_message_never_reaches_backend() {
        let backend = CountingBackend::default();
        let ai = FolioAI::with_backend(Settings::default(), Some(Box::new(backend.clone())));

        assert!(ai.send("   ", &[]).await.unwrap().is_none());
        assert!(ai.respond(" \n\t", &[]).await.is_none());
        assert_eq!(backend.calls.load(Ordering::SeqCst), 0);

        assert!(ai.respond("hello", &[]).await.is_some());
        assert_eq!(backend.calls.load(Ordering::SeqCst), 1);
    }

    #[tokio::test]
    async fn blank_message_offline_is_ignored() {
        let ai = FolioAI::from_settings(Settings::default()).unwrap();
        assert!(ai.respond("", &[]).await.is_none());
    }
}
