//! Budget Buddy Assistant - LLM-backed financial chat.
//!
//! This crate turns a user's live financial data into a bounded textual
//! context, merges it with a fixed persona and a sliding window of
//! conversation history, and manages the request/response cycle against a
//! remote chat-completion endpoint.
//!
//! # Architecture
//!
//! - `context`: pure financial-context summarizer with an explicit budget
//! - `prompt`: persona constant and prompt assembly
//! - `client`: chat-completion HTTP client trait + reqwest implementation
//! - `data`: financial data provider seam over the core services
//! - `service`: conversation state machine and submission orchestration
//! - `types`: turns, errors, and user-visible fixed strings

pub mod client;
pub mod context;
pub mod data;
pub mod prompt;
pub mod service;
pub mod types;

// Re-export main types for convenience
pub use client::{ChatCompletionClient, OpenAiChatClient, OpenAiConfig, PromptMessage};
pub use context::{build_financial_context, ContextLimits};
pub use data::{FinancialDataProvider, LedgerFinancialDataProvider};
pub use service::AssistantService;
pub use types::{AssistantError, ChatTurn, TurnState};
