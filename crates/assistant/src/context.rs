//! Financial context summarizer.
//!
//! Produces the deterministic, line-oriented snapshot of a user's finances
//! that gets injected into the chat prompt. Pure - no I/O, recomputed per
//! request, never stored.

use chrono::DateTime;

use budgetbuddy_core::categories::Category;
use budgetbuddy_core::goals::Goal;
use budgetbuddy_core::transactions::Transaction;
use budgetbuddy_core::users::UserProfile;

/// Explicit budget for the context block. The defaults reproduce the
/// historical shape: every goal, the last 10 transactions, no truncation
/// of free-text fields.
#[derive(Debug, Clone)]
pub struct ContextLimits {
    /// Cap on goal lines; `None` keeps all goals.
    pub max_goals: Option<usize>,
    /// Tail window of transaction lines (input order).
    pub max_transactions: usize,
    /// Cap on characters per free-text field; `None` passes text through.
    pub max_field_chars: Option<usize>,
}

impl Default for ContextLimits {
    fn default() -> Self {
        Self {
            max_goals: None,
            max_transactions: 10,
            max_field_chars: None,
        }
    }
}

/// Build the context snapshot with the default limits.
pub fn build_financial_context(
    profile: &UserProfile,
    transactions: &[Transaction],
    categories: &[Category],
    goals: &[Goal],
) -> String {
    build_financial_context_with_limits(
        profile,
        transactions,
        categories,
        goals,
        &ContextLimits::default(),
    )
}

/// Build the context snapshot under an explicit budget.
pub fn build_financial_context_with_limits(
    profile: &UserProfile,
    transactions: &[Transaction],
    categories: &[Category],
    goals: &[Goal],
    limits: &ContextLimits,
) -> String {
    let clip = |text: &str| match limits.max_field_chars {
        Some(max) if text.chars().count() > max => text.chars().take(max).collect::<String>(),
        _ => text.to_string(),
    };

    let mut lines: Vec<String> = Vec::new();
    lines.push(format!("Usuario: {}", clip(&profile.display_name)));
    lines.push(format!("Correo: {}", profile.email));
    lines.push(format!(
        "Dinero disponible: {} €",
        format_amount(profile.total_funds)
    ));
    lines.push(format!(
        "Categorías: {}",
        categories
            .iter()
            .map(|c| clip(&c.name))
            .collect::<Vec<_>>()
            .join(", ")
    ));

    lines.push("Metas:".to_string());
    let goal_count = limits.max_goals.unwrap_or(goals.len()).min(goals.len());
    for goal in &goals[..goal_count] {
        lines.push(format!(
            "- {} {} {}€ hasta {} (estado: {})",
            goal.kind,
            clip(&goal.category),
            format_amount(goal.target_amount),
            format_date(goal.deadline),
            goal.status
        ));
    }

    lines.push("Transacciones recientes:".to_string());
    let tail = transactions.len().saturating_sub(limits.max_transactions);
    for transaction in &transactions[tail..] {
        lines.push(format!(
            "- {}: {}€ en {} ({})",
            clip(&transaction.title),
            format_amount(transaction.amount),
            clip(&transaction.category),
            transaction.kind
        ));
    }

    lines.join("\n")
}

/// Plain decimal rendering: whole amounts print without a fraction.
fn format_amount(amount: f64) -> String {
    format!("{}", amount)
}

fn format_date(epoch_ms: i64) -> String {
    match DateTime::from_timestamp_millis(epoch_ms) {
        Some(date) => date.format("%d/%m/%Y").to_string(),
        None => "fecha inválida".to_string(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use budgetbuddy_core::goals::GoalStatus;
    use budgetbuddy_core::transactions::TransactionKind;

    fn profile() -> UserProfile {
        UserProfile {
            user_id: "u1".into(),
            display_name: "Ana García".into(),
            username: "ana".into(),
            email: "ana@example.com".into(),
            total_funds: 320.5,
            photo_url: None,
        }
    }

    fn transaction(n: usize) -> Transaction {
        Transaction {
            id: format!("t{}", n),
            user_id: "u1".into(),
            kind: TransactionKind::Expense,
            occurred_at: 1_700_000_000_000,
            title: format!("Compra {}", n),
            amount: 10.0,
            description: String::new(),
            category: "Comida".into(),
        }
    }

    fn goal(category: &str) -> Goal {
        Goal {
            id: "g1".into(),
            user_id: "u1".into(),
            category: category.into(),
            kind: TransactionKind::Saving,
            target_amount: 100.0,
            // 2023-11-14 in epoch milliseconds
            deadline: 1_700_000_000_000,
            created_at: 0,
            status: GoalStatus::InProgress,
            progress: 0.0,
        }
    }

    fn category(name: &str) -> Category {
        Category {
            id: "c1".into(),
            user_id: "u1".into(),
            name: name.into(),
            budget: 0.0,
        }
    }

    #[test]
    fn test_header_lines_and_shape() {
        let context = build_financial_context(
            &profile(),
            &[transaction(1)],
            &[category("Comida"), category("Ocio")],
            &[goal("Viaje")],
        );
        let lines: Vec<&str> = context.lines().collect();
        assert_eq!(lines[0], "Usuario: Ana García");
        assert_eq!(lines[1], "Correo: ana@example.com");
        assert_eq!(lines[2], "Dinero disponible: 320.5 €");
        assert_eq!(lines[3], "Categorías: Comida, Ocio");
        assert_eq!(lines[4], "Metas:");
        assert_eq!(
            lines[5],
            "- Ahorro Viaje 100€ hasta 14/11/2023 (estado: Proceso)"
        );
        assert_eq!(lines[6], "Transacciones recientes:");
        assert_eq!(lines[7], "- Compra 1: 10€ en Comida (Gasto)");
        assert_eq!(lines.len(), 8);
    }

    #[test]
    fn test_transactions_limited_to_last_ten_in_input_order() {
        let transactions: Vec<Transaction> = (1..=12).map(transaction).collect();
        let context = build_financial_context(&profile(), &transactions, &[], &[]);
        let transaction_lines: Vec<&str> = context
            .lines()
            .skip_while(|l| *l != "Transacciones recientes:")
            .skip(1)
            .collect();
        assert_eq!(transaction_lines.len(), 10);
        assert!(transaction_lines[0].starts_with("- Compra 3:"));
        assert!(transaction_lines[9].starts_with("- Compra 12:"));
    }

    #[test]
    fn test_one_line_per_goal_in_input_order() {
        let goals = vec![goal("Viaje"), goal("Comida"), goal("Ocio")];
        let context = build_financial_context(&profile(), &[], &[], &goals);
        let goal_lines: Vec<&str> = context
            .lines()
            .skip_while(|l| *l != "Metas:")
            .skip(1)
            .take_while(|l| *l != "Transacciones recientes:")
            .collect();
        assert_eq!(goal_lines.len(), 3);
        assert!(goal_lines[0].contains("Viaje"));
        assert!(goal_lines[1].contains("Comida"));
        assert!(goal_lines[2].contains("Ocio"));
    }

    #[test]
    fn test_explicit_budget_caps_goals_and_clips_fields() {
        let goals = vec![goal("Viaje"), goal("Comida")];
        let long_title: Transaction = Transaction {
            title: "x".repeat(500),
            ..transaction(1)
        };
        let limits = ContextLimits {
            max_goals: Some(1),
            max_transactions: 10,
            max_field_chars: Some(40),
        };
        let context = build_financial_context_with_limits(
            &profile(),
            &[long_title],
            &[],
            &goals,
            &limits,
        );
        let goal_lines = context.lines().filter(|l| l.contains("hasta")).count();
        assert_eq!(goal_lines, 1);
        assert!(!context.contains(&"x".repeat(41)));
        assert!(context.contains(&"x".repeat(40)));
    }

    #[test]
    fn test_deterministic_for_same_input() {
        let goals = vec![goal("Viaje")];
        let transactions = vec![transaction(1), transaction(2)];
        let a = build_financial_context(&profile(), &transactions, &[], &goals);
        let b = build_financial_context(&profile(), &transactions, &[], &goals);
        assert_eq!(a, b);
    }
}
