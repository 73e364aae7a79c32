//! OpenAI-compatible chat-completions client.

use std::time::Duration;

use async_trait::async_trait;
use pagetalk_http::{HttpClient, HttpError};
use serde::{Deserialize, Serialize};

use crate::prompt::ConstrainedPrompt;
use crate::traits::{LlmClient, LlmError};

/// Bound on one inference call.
const COMPLETION_TIMEOUT: Duration = Duration::from_secs(30);

/// Client for any endpoint speaking the chat-completions wire format.
/// The configured endpoint is the full completions URL.
pub struct ChatCompletionsClient {
    client: HttpClient,
    api_key: String,
    model: String,
}

#[derive(Serialize)]
struct ChatRequest<'a> {
    model: &'a str,
    messages: Vec<ChatMessage<'a>>,
    temperature: f32,
    max_tokens: u32,
    top_p: f32,
}

#[derive(Serialize)]
struct ChatMessage<'a> {
    role: &'static str,
    content: &'a str,
}

#[derive(Debug, Deserialize)]
struct ChatResponse {
    #[serde(default)]
    choices: Vec<ChatChoice>,
    #[serde(default)]
    model: Option<String>,
}

#[derive(Debug, Deserialize)]
struct ChatChoice {
    message: AssistantMessage,
}

#[derive(Debug, Deserialize)]
struct AssistantMessage {
    #[serde(default)]
    content: String,
}

impl ChatCompletionsClient {
    pub fn new(endpoint: &str, api_key: String, model: String) -> Result<Self, LlmError> {
        let client = HttpClient::new(endpoint)
            .map_err(|e| LlmError::Config(format!("HttpClient init failed: {e}")))?
            .with_timeout(COMPLETION_TIMEOUT);

        Ok(Self {
            client,
            api_key,
            model,
        })
    }
}

#[async_trait]
impl LlmClient for ChatCompletionsClient {
    async fn complete(&self, prompt: &ConstrainedPrompt) -> Result<String, LlmError> {
        let request = ChatRequest {
            model: &self.model,
            messages: vec![
                ChatMessage {
                    role: "system",
                    content: &prompt.system,
                },
                ChatMessage {
                    role: "user",
                    content: &prompt.user,
                },
            ],
            temperature: prompt.params.temperature,
            max_tokens: prompt.params.max_tokens,
            top_p: prompt.params.top_p,
        };

        let response: ChatResponse = self
            .client
            .post_json("", Some(&self.api_key), &request)
            .await
            .map_err(http_to_llm)?;

        tracing::debug!(
            model = response.model.as_deref().unwrap_or(&self.model),
            choices = response.choices.len(),
            "llm.completion.received"
        );

        let Some(choice) = response.choices.into_iter().next() else {
            return Err(LlmError::Backend(
                "completion response contained no choices".to_string(),
            ));
        };
        let text = choice.message.content;
        if text.is_empty() {
            return Err(LlmError::Backend(
                "completion response was empty".to_string(),
            ));
        }
        Ok(text)
    }

    fn model_name(&self) -> &str {
        &self.model
    }
}

fn http_to_llm(e: HttpError) -> LlmError {
    match e {
        HttpError::Network(msg) => LlmError::Network(msg),
        HttpError::Api { message, .. } => LlmError::Backend(message),
        other => LlmError::Backend(other.to_string()),
    }
}
