//! Goal domain models.

use serde::{Deserialize, Serialize};
use std::fmt;

use crate::transactions::TransactionKind;

/// Lifecycle state of a goal.
///
/// Wire values are the Spanish labels the ledger has always stored.
/// A goal is created `InProgress` and is never re-opened once `Completed`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, Default)]
pub enum GoalStatus {
    #[default]
    #[serde(rename = "Proceso")]
    InProgress,
    #[serde(rename = "Completado")]
    Completed,
    #[serde(rename = "Expirado")]
    Expired,
}

impl GoalStatus {
    /// The stored wire label.
    pub fn as_str(&self) -> &'static str {
        match self {
            GoalStatus::InProgress => "Proceso",
            GoalStatus::Completed => "Completado",
            GoalStatus::Expired => "Expirado",
        }
    }
}

impl fmt::Display for GoalStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Domain model representing a savings/spending goal.
///
/// `progress` is a fraction in `[0, 1]`, non-decreasing while the goal is
/// `InProgress` under normal reconciliation (not enforced against manual
/// edits). `progress` and `status` are mutated only by the
/// [`GoalProgressEngine`](super::GoalProgressEngine) or explicit user
/// action.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct Goal {
    #[serde(default)]
    pub id: String,
    pub user_id: String,
    pub category: String,
    pub kind: TransactionKind,
    pub target_amount: f64,
    /// Epoch milliseconds.
    pub deadline: i64,
    /// Epoch milliseconds, stamped at creation.
    pub created_at: i64,
    #[serde(default)]
    pub status: GoalStatus,
    #[serde(default)]
    pub progress: f64,
}

/// Input model for creating a new goal.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct NewGoal {
    pub user_id: String,
    pub category: String,
    pub kind: TransactionKind,
    pub target_amount: f64,
    /// Epoch milliseconds.
    pub deadline: i64,
}
