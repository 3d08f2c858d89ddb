//! Prompt assembly: fixed persona, optional context turn, sliding history
//! window, and the question being asked.

use crate::client::PromptMessage;
use crate::types::{ChatTurn, TurnState};

/// Fixed system persona. Static configuration, not computed.
pub const SYSTEM_PERSONA: &str = "Eres Budget Buddy, un asistente financiero. \
Ya tienes el contexto completo del usuario (datos, transacciones, metas, etc.). \
Siempre responde desde la primera interacción. No pidas más contexto. \
Si el usuario escribe cualquier mensaje, debes interpretar la intención y actuar con precisión. \
No uses emojis, ni saludos, ni repitas. Sé útil, claro y directo.";

/// Header of the synthetic user turn carrying the context block.
pub const CONTEXT_HEADER: &str = "Contexto financiero del usuario:";

/// Sliding window of prior resolved turns replayed per request.
pub const HISTORY_WINDOW_TURNS: usize = 6;

/// Build the message list for one submission.
///
/// Only resolved turns with a non-empty question are replayed - pending
/// placeholders and the opening greeting never reach the endpoint. The
/// question itself is always the final user message.
pub fn build_prompt(history: &[ChatTurn], context: &str, question: &str) -> Vec<PromptMessage> {
    let mut messages = vec![PromptMessage::system(SYSTEM_PERSONA)];

    if !context.trim().is_empty() {
        messages.push(PromptMessage::user(&format!(
            "{}\n{}",
            CONTEXT_HEADER, context
        )));
    }

    let resolved: Vec<&ChatTurn> = history
        .iter()
        .filter(|t| t.state == TurnState::Resolved && !t.question.is_empty())
        .collect();
    let start = resolved.len().saturating_sub(HISTORY_WINDOW_TURNS);
    for turn in &resolved[start..] {
        messages.push(PromptMessage::user(&turn.question));
        messages.push(PromptMessage::assistant(&turn.answer));
    }

    messages.push(PromptMessage::user(question));
    messages
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::client::ChatRole;

    fn resolved(id: u64, question: &str, answer: &str) -> ChatTurn {
        ChatTurn {
            id,
            question: question.into(),
            answer: answer.into(),
            state: TurnState::Resolved,
        }
    }

    #[test]
    fn test_prompt_opens_with_persona_and_ends_with_question() {
        let prompt = build_prompt(&[], "", "¿Cuánto he gastado?");
        assert_eq!(prompt.first().unwrap().role, ChatRole::System);
        assert_eq!(prompt.first().unwrap().content, SYSTEM_PERSONA);
        assert_eq!(prompt.last().unwrap().role, ChatRole::User);
        assert_eq!(prompt.last().unwrap().content, "¿Cuánto he gastado?");
    }

    #[test]
    fn test_context_becomes_one_user_turn_when_present() {
        let prompt = build_prompt(&[], "Usuario: Ana", "hola");
        assert_eq!(prompt.len(), 3);
        assert_eq!(prompt[1].role, ChatRole::User);
        assert!(prompt[1].content.starts_with(CONTEXT_HEADER));
        assert!(prompt[1].content.contains("Usuario: Ana"));

        let without = build_prompt(&[], "  ", "hola");
        assert_eq!(without.len(), 2);
    }

    #[test]
    fn test_history_window_keeps_last_six_resolved_turns() {
        let history: Vec<ChatTurn> = (0..9)
            .map(|i| resolved(i, &format!("q{}", i), &format!("a{}", i)))
            .collect();
        let prompt = build_prompt(&history, "", "final");
        // persona + 6 pairs + question
        assert_eq!(prompt.len(), 1 + 6 * 2 + 1);
        assert_eq!(prompt[1].content, "q3");
        assert_eq!(prompt[2].content, "a3");
        assert_eq!(prompt[12].content, "a8");
        assert_eq!(prompt[13].content, "final");
    }

    #[test]
    fn test_pending_and_greeting_turns_are_not_replayed() {
        let history = vec![
            // Opening greeting: empty question.
            resolved(0, "", "Hola, soy Budget Buddy."),
            resolved(1, "q1", "a1"),
            ChatTurn {
                id: 2,
                question: "q2".into(),
                answer: "...".into(),
                state: TurnState::Pending,
            },
        ];
        let prompt = build_prompt(&history, "", "q2");
        assert_eq!(prompt.len(), 4);
        assert_eq!(prompt[1].content, "q1");
        assert_eq!(prompt[2].content, "a1");
        assert_eq!(prompt[3].content, "q2");
    }
}
