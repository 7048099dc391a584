pub mod openai;

use super::client::ChatResult;
use super::compose::RequestEnvelope;
use async_trait::async_trait;

pub use openai::OpenAIBackend;

/// A remote model that turns a composed request into reply text.
#[async_trait]
pub trait LLMBackend: Send + Sync {
    async fn complete(&self, envelope: &RequestEnvelope) -> ChatResult<String>;

    /// Short label for logs.
    fn name(&self) -> &str;
}
