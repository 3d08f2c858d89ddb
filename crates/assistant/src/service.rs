//! Conversation state machine and submission orchestration.
//!
//! State lives in one place and is mutated only through the two update
//! functions (`append_pending`, `resolve`); async work returns a result
//! that is applied to state afterwards, never mutating it mid-flight.

use std::sync::{Arc, RwLock};

use log::{debug, warn};

use crate::client::ChatCompletionClient;
use crate::context::build_financial_context;
use crate::data::FinancialDataProvider;
use crate::prompt::build_prompt;
use crate::types::{ChatTurn, TurnState, FALLBACK_ANSWER, GREETING, PLACEHOLDER_ANSWER};

struct Conversation {
    next_turn_id: u64,
    turns: Vec<ChatTurn>,
}

impl Conversation {
    fn new() -> Self {
        // The opening greeting is a resolved turn with an empty question;
        // prompts never replay it.
        Self {
            next_turn_id: 1,
            turns: vec![ChatTurn {
                id: 0,
                question: String::new(),
                answer: GREETING.to_string(),
                state: TurnState::Resolved,
            }],
        }
    }

    fn append_pending(&mut self, question: &str) -> u64 {
        let id = self.next_turn_id;
        self.next_turn_id += 1;
        self.turns.push(ChatTurn {
            id,
            question: question.to_string(),
            answer: PLACEHOLDER_ANSWER.to_string(),
            state: TurnState::Pending,
        });
        id
    }

    fn resolve(&mut self, turn_id: u64, answer: &str) {
        match self.turns.iter_mut().find(|t| t.id == turn_id) {
            Some(turn) => {
                turn.answer = answer.to_string();
                turn.state = TurnState::Resolved;
            }
            None => warn!("Resolution for unknown turn {}", turn_id),
        }
    }
}

/// The LLM-backed financial assistant.
///
/// Each `submit` call appends its own pending turn and resolves exactly
/// that turn when its request finishes; concurrent submissions neither
/// coalesce nor cancel each other.
pub struct AssistantService {
    client: Arc<dyn ChatCompletionClient>,
    data: Arc<dyn FinancialDataProvider>,
    state: RwLock<Conversation>,
}

impl AssistantService {
    pub fn new(client: Arc<dyn ChatCompletionClient>, data: Arc<dyn FinancialDataProvider>) -> Self {
        Self {
            client,
            data,
            state: RwLock::new(Conversation::new()),
        }
    }

    /// Atomic snapshot of the conversation history.
    pub fn history(&self) -> Vec<ChatTurn> {
        self.state.read().unwrap().turns.clone()
    }

    /// Number of turns still awaiting resolution.
    pub fn pending_count(&self) -> usize {
        self.state
            .read()
            .unwrap()
            .turns
            .iter()
            .filter(|t| t.is_pending())
            .count()
    }

    /// Ask a question with a caller-provided context block (may be empty).
    ///
    /// The pending turn is visible in [`history`](Self::history)
    /// immediately; the returned string is the resolved answer - the real
    /// response, or [`FALLBACK_ANSWER`] when the endpoint fails, times
    /// out, or produces blank content.
    pub async fn submit(&self, question: &str, context: &str) -> String {
        let (turn_id, prompt) = {
            let mut conversation = self.state.write().unwrap();
            let turn_id = conversation.append_pending(question);
            let prompt = build_prompt(&conversation.turns, context, question);
            (turn_id, prompt)
        };

        let answer = match self.client.complete(&prompt).await {
            Ok(content) if !content.trim().is_empty() => content,
            Ok(_) => {
                debug!("Endpoint produced blank content for turn {}", turn_id);
                FALLBACK_ANSWER.to_string()
            }
            Err(e) => {
                warn!("Chat completion failed for turn {}: {}", turn_id, e);
                FALLBACK_ANSWER.to_string()
            }
        };

        self.state.write().unwrap().resolve(turn_id, &answer);
        answer
    }

    /// Self-contained variant: read the user's finances, build the context
    /// inline, then proceed as [`submit`](Self::submit). A failed profile
    /// read degrades to an empty context rather than failing the question.
    pub async fn submit_with_full_context(&self, question: &str, user_id: &str) -> String {
        let context = self.gather_context(user_id).await;
        self.submit(question, &context).await
    }

    async fn gather_context(&self, user_id: &str) -> String {
        let profile = match self.data.get_profile(user_id).await {
            Ok(profile) => profile,
            Err(e) => {
                warn!("Profile read failed for {}: {}", user_id, e);
                return String::new();
            }
        };
        let goals = self.data.get_goals(user_id).await;
        let transactions = self.data.get_transactions(user_id).await;
        let categories = self.data.get_categories(user_id).await;
        build_financial_context(&profile, &transactions, &categories, &goals)
    }
}
