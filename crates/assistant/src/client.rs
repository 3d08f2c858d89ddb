//! Chat-completion HTTP client.
//!
//! The endpoint contract is the OpenAI-style `/chat/completions` shape:
//! JSON `{model, messages}` with bearer auth, `choices[0].message.content`
//! on success, and a possible `error` field in the body that must be
//! treated as a non-exceptional failure path.

use std::time::Duration;

use async_trait::async_trait;
use log::debug;
use serde::{Deserialize, Serialize};

use crate::types::AssistantError;

/// Default endpoint URL.
pub const DEFAULT_API_URL: &str = "https://api.openai.com/v1/chat/completions";

/// Default model id.
pub const DEFAULT_MODEL: &str = "gpt-4o-mini";

const CONNECT_TIMEOUT: Duration = Duration::from_secs(20);
const REQUEST_TIMEOUT: Duration = Duration::from_secs(30);

/// Message role on the wire.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ChatRole {
    System,
    User,
    Assistant,
}

/// A single prompt message.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PromptMessage {
    pub role: ChatRole,
    pub content: String,
}

impl PromptMessage {
    pub fn system(content: &str) -> Self {
        Self {
            role: ChatRole::System,
            content: content.to_string(),
        }
    }

    pub fn user(content: &str) -> Self {
        Self {
            role: ChatRole::User,
            content: content.to_string(),
        }
    }

    pub fn assistant(content: &str) -> Self {
        Self {
            role: ChatRole::Assistant,
            content: content.to_string(),
        }
    }
}

#[derive(Serialize)]
struct ChatCompletionRequest<'a> {
    model: &'a str,
    messages: &'a [PromptMessage],
}

#[derive(Deserialize)]
struct ChatCompletionResponse {
    #[serde(default)]
    choices: Vec<Choice>,
    #[serde(default)]
    error: Option<ApiError>,
}

#[derive(Deserialize)]
struct Choice {
    message: ChoiceMessage,
}

#[derive(Deserialize)]
struct ChoiceMessage {
    #[serde(default)]
    content: String,
}

#[derive(Deserialize)]
struct ApiError {
    #[serde(default)]
    message: String,
}

/// Trait for the chat-completion endpoint (injectable for testing).
#[async_trait]
pub trait ChatCompletionClient: Send + Sync {
    /// Send one completion request. Returns the trimmed assistant content;
    /// an empty string means the endpoint produced nothing usable.
    async fn complete(&self, messages: &[PromptMessage]) -> Result<String, AssistantError>;
}

/// Connection settings for [`OpenAiChatClient`].
#[derive(Debug, Clone)]
pub struct OpenAiConfig {
    pub api_url: String,
    pub api_key: String,
    pub organization: Option<String>,
    pub model: String,
}

impl OpenAiConfig {
    pub fn new(api_key: &str) -> Self {
        Self {
            api_url: DEFAULT_API_URL.to_string(),
            api_key: api_key.to_string(),
            organization: None,
            model: DEFAULT_MODEL.to_string(),
        }
    }
}

/// reqwest-backed chat-completion client with connect/total timeouts.
/// A timeout surfaces as `AssistantError::Transport`, which the
/// conversation layer converts to the fallback answer.
pub struct OpenAiChatClient {
    client: reqwest::Client,
    config: OpenAiConfig,
}

impl OpenAiChatClient {
    pub fn new(config: OpenAiConfig) -> Result<Self, AssistantError> {
        let client = reqwest::Client::builder()
            .connect_timeout(CONNECT_TIMEOUT)
            .timeout(REQUEST_TIMEOUT)
            .build()
            .map_err(|e| AssistantError::Internal(e.to_string()))?;
        Ok(Self { client, config })
    }
}

#[async_trait]
impl ChatCompletionClient for OpenAiChatClient {
    async fn complete(&self, messages: &[PromptMessage]) -> Result<String, AssistantError> {
        debug!(
            "Sending {} prompt messages to {}",
            messages.len(),
            self.config.api_url
        );

        let mut request = self
            .client
            .post(&self.config.api_url)
            .bearer_auth(&self.config.api_key)
            .json(&ChatCompletionRequest {
                model: &self.config.model,
                messages,
            });
        if let Some(organization) = &self.config.organization {
            request = request.header("OpenAI-Organization", organization);
        }

        let response = request.send().await?;
        let body: ChatCompletionResponse = response
            .json()
            .await
            .map_err(|e| AssistantError::MalformedResponse(e.to_string()))?;

        if let Some(error) = body.error {
            return Err(AssistantError::Api(error.message));
        }

        Ok(body
            .choices
            .first()
            .map(|c| c.message.content.trim().to_string())
            .unwrap_or_default())
    }
}

/// Scripted chat client for tests.
///
/// Replies are consumed in order; once the script is exhausted it echoes
/// the last user message, which lets concurrency tests correlate answers
/// with questions.
#[derive(Default)]
pub struct MockChatClient {
    replies: std::sync::Mutex<std::collections::VecDeque<Result<String, AssistantError>>>,
    requests: std::sync::Mutex<Vec<Vec<PromptMessage>>>,
}

impl MockChatClient {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_replies(replies: Vec<Result<String, AssistantError>>) -> Self {
        Self {
            replies: std::sync::Mutex::new(replies.into()),
            requests: std::sync::Mutex::new(Vec::new()),
        }
    }

    /// Prompts received so far, in call order.
    pub fn requests(&self) -> Vec<Vec<PromptMessage>> {
        self.requests.lock().unwrap().clone()
    }
}

#[async_trait]
impl ChatCompletionClient for MockChatClient {
    async fn complete(&self, messages: &[PromptMessage]) -> Result<String, AssistantError> {
        self.requests.lock().unwrap().push(messages.to_vec());
        if let Some(reply) = self.replies.lock().unwrap().pop_front() {
            return reply;
        }
        let last_user = messages
            .iter()
            .rev()
            .find(|m| m.role == ChatRole::User)
            .map(|m| m.content.clone())
            .unwrap_or_default();
        Ok(format!("eco: {}", last_user))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_roles_serialize_lowercase() {
        let message = PromptMessage::system("hola");
        let json = serde_json::to_value(&message).unwrap();
        assert_eq!(json["role"], "system");
        assert_eq!(json["content"], "hola");
    }

    #[test]
    fn test_response_parses_content() {
        let body: ChatCompletionResponse = serde_json::from_str(
            r#"{"choices":[{"message":{"role":"assistant","content":" hola \n"}}]}"#,
        )
        .unwrap();
        assert!(body.error.is_none());
        assert_eq!(body.choices[0].message.content.trim(), "hola");
    }

    #[test]
    fn test_response_tolerates_error_field() {
        let body: ChatCompletionResponse = serde_json::from_str(
            r#"{"error":{"message":"insufficient_quota","type":"billing"}}"#,
        )
        .unwrap();
        assert_eq!(body.error.unwrap().message, "insufficient_quota");
        assert!(body.choices.is_empty());
    }

    #[tokio::test]
    async fn test_mock_client_scripts_then_echoes() {
        let client =
            MockChatClient::with_replies(vec![Ok("primera".into())]);
        let prompt = vec![PromptMessage::user("q1")];
        assert_eq!(client.complete(&prompt).await.unwrap(), "primera");
        assert_eq!(client.complete(&prompt).await.unwrap(), "eco: q1");
        assert_eq!(client.requests().len(), 2);
    }
}
