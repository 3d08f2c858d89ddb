//! Conversation turns, assistant errors, and fixed user-visible strings.

use serde::{Deserialize, Serialize};

/// Placeholder assistant text shown while a request is in flight.
pub const PLACEHOLDER_ANSWER: &str = "...";

/// Fixed fallback shown when the endpoint fails or returns nothing usable.
pub const FALLBACK_ANSWER: &str =
    "Lo siento, no pude responder. ¿Podrías reformular tu pregunta?";

/// Greeting the conversation opens with.
pub const GREETING: &str = "Hola, soy Budget Buddy. ¿En qué puedo ayudarte hoy?";

/// Resolution state of a conversation turn.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub enum TurnState {
    /// The assistant text is still the placeholder.
    Pending,
    /// The assistant text is the real response or the fallback.
    Resolved,
}

/// One question/answer pair in a conversation.
///
/// Turn ids are a per-conversation sequence; resolution always targets a
/// turn by id, never "the last entry", so overlapping submissions cannot
/// misattribute responses.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ChatTurn {
    pub id: u64,
    pub question: String,
    pub answer: String,
    pub state: TurnState,
}

impl ChatTurn {
    pub fn is_pending(&self) -> bool {
        self.state == TurnState::Pending
    }
}

/// Assistant errors. All of these resolve to the fallback answer at the
/// conversation surface; none escalate to the UI layer.
#[derive(Debug, Clone, thiserror::Error)]
pub enum AssistantError {
    /// Network-level failure reaching the endpoint, including timeouts.
    #[error("Chat transport failure: {0}")]
    Transport(String),

    /// The response body could not be parsed.
    #[error("Malformed chat response: {0}")]
    MalformedResponse(String),

    /// The endpoint answered with an `error` field in the body.
    #[error("Chat API error: {0}")]
    Api(String),

    /// Financial data for the context could not be read.
    #[error("Financial data unavailable: {0}")]
    DataUnavailable(String),

    #[error("Internal error: {0}")]
    Internal(String),
}

impl From<reqwest::Error> for AssistantError {
    fn from(err: reqwest::Error) -> Self {
        if err.is_decode() {
            AssistantError::MalformedResponse(err.to_string())
        } else {
            AssistantError::Transport(err.to_string())
        }
    }
}
