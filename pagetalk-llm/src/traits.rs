use async_trait::async_trait;

use crate::prompt::ConstrainedPrompt;

#[derive(thiserror::Error, Debug)]
pub enum LlmError {
    /// The backend was unreachable or the call failed in transit.
    #[error("Network error: {0}")]
    Network(String),

    /// The backend answered with a non-success status or an unusable body;
    /// carries the upstream message.
    #[error("Inference backend error: {0}")]
    Backend(String),

    #[error("Configuration error: {0}")]
    Config(String),
}

/// Narrow seam over the inference backend. The prompt carries all
/// constraint enforcement; implementations only forward it and hand back
/// the completion text.
#[async_trait]
pub trait LlmClient: Send + Sync {
    /// Run one constrained prompt to completion.
    async fn complete(&self, prompt: &ConstrainedPrompt) -> Result<String, LlmError>;

    /// The model name requests are issued against.
    fn model_name(&self) -> &str;
}
