use super::LLMBackend;
use crate::ai::client::{ChatError, ChatResult};
use crate::ai::compose::RequestEnvelope;
use crate::config::Settings;
use crate::types::ChatMessage;
use async_trait::async_trait;
use reqwest::Client;
use serde::{Deserialize, Serialize};
use std::time::Duration;

/// Backend for any OpenAI-compatible `/chat/completions` endpoint.
pub struct OpenAIBackend {
    client: Client,
    endpoint: String,
    model: String,
    temperature: f32,
    api_key: String,
}

impl OpenAIBackend {
    pub fn new(
        endpoint: impl Into<String>,
        model: impl Into<String>,
        temperature: f32,
        api_key: impl Into<String>,
        timeout: Duration,
    ) -> ChatResult<Self> {
        let client = Client::builder().timeout(timeout).build()?;
        Ok(Self {
            client,
            endpoint: endpoint.into(),
            model: model.into(),
            temperature,
            api_key: api_key.into(),
        })
    }

    pub fn from_settings(settings: &Settings, api_key: &str) -> ChatResult<Self> {
        Self::new(
            settings.endpoint.as_str(),
            settings.model.as_str(),
            settings.temperature,
            api_key,
            settings.timeout,
        )
    }
}

#[derive(Serialize)]
struct CompletionRequest<'a> {
    model: &'a str,
    messages: &'a [ChatMessage],
    max_tokens: u32,
    temperature: f32,
    stream: bool,
}

#[derive(Deserialize)]
struct CompletionMessage {
    content: Option<String>,
}

#[derive(Deserialize)]
struct CompletionChoice {
    message: Option<CompletionMessage>,
}

#[derive(Deserialize)]
struct CompletionResponse {
    choices: Vec<CompletionChoice>,
}

/// Pulls the first choice's text out of a completions response body.
pub fn parse_completion(body: &str) -> ChatResult<String> {
    let parsed: CompletionResponse = serde_json::from_str(body)
        .map_err(|err| ChatError::MalformedResponse(err.to_string()))?;

    parsed
        .choices
        .into_iter()
        .next()
        .and_then(|choice| choice.message)
        .and_then(|message| message.content)
        .filter(|content| !content.trim().is_empty())
        .ok_or_else(|| ChatError::MalformedResponse("no completion text in response".into()))
}

#[async_trait]
impl LLMBackend for OpenAIBackend {
    async fn complete(&self, envelope: &RequestEnvelope) -> ChatResult<String> {
        let messages = envelope.messages();
        let response = self
            .client
            .post(&self.endpoint)
            .bearer_auth(&self.api_key)
            .json(&CompletionRequest {
                model: &self.model,
                messages: &messages,
                max_tokens: envelope.max_response_tokens,
                temperature: self.temperature,
                stream: false,
            })
            .send()
            .await?;

        let status = response.status();
        let body = response.text().await?;
        if !status.is_success() {
            return Err(ChatError::Api {
                status: status.as_u16(),
                body,
            });
        }

        parse_completion(&body)
    }

    fn name(&self) -> &str {
        &self.model
    }
}

#[cfg(test)]
mod tests {
    use super::parse_completion;
    use crate::ai::client::ChatError;

    #[test]
    fn parses_first_choice() {
        let body = r#"{"choices":[{"message":{"role":"assistant","content":"hello"}},{"message":{"content":"second"}}]}"#;
        assert_eq!(parse_completion(body).unwrap(), "hello");
    }

    #[test]
    fn empty_choices_is_malformed() {
        assert!(matches!(
            parse_completion(r#"{"choices":[]}"#),
            Err(ChatError::MalformedResponse(_))
        ));
    }

    #[test]
    fn other_shapes_are_malformed() {
        assert!(matches!(
            parse_completion(r#"{"content":"hi"}"#),
            Err(ChatError::MalformedResponse(_))
        ));
        assert!(matches!(
            parse_completion("not json"),
            Err(ChatError::MalformedResponse(_))
        ));
        assert!(matches!(
            parse_completion(r#"{"choices":[{"message":{"content":"  "}}]}"#),
            Err(ChatError::MalformedResponse(_))
        ));
    }
}
