use crate::LlmResult;
use async_trait::async_trait;

/// A black-box prompt-in, text-out model
#[async_trait]
pub trait TextGenerator: Send + Sync {
    async fn generate(&self, prompt: &str) -> LlmResult<String>;
}
