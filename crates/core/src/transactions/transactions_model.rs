//! Transaction domain models.

use serde::{Deserialize, Serialize};
use std::fmt;

/// Whether a transaction sets money aside or spends it.
///
/// Wire values are the Spanish labels the ledger has always stored.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum TransactionKind {
    #[serde(rename = "Ahorro")]
    Saving,
    #[serde(rename = "Gasto")]
    Expense,
}

impl TransactionKind {
    /// The stored wire label.
    pub fn as_str(&self) -> &'static str {
        match self {
            TransactionKind::Saving => "Ahorro",
            TransactionKind::Expense => "Gasto",
        }
    }

    /// Parse a label, tolerating case and surrounding whitespace.
    /// Stored data written by older clients is not uniformly cased.
    pub fn parse(label: &str) -> Option<Self> {
        match label.trim().to_lowercase().as_str() {
            "ahorro" => Some(TransactionKind::Saving),
            "gasto" => Some(TransactionKind::Expense),
            _ => None,
        }
    }
}

impl fmt::Display for TransactionKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Domain model representing a logged transaction.
///
/// Immutable once created except for deletion. The id is assigned by the
/// ledger store at creation and lives outside the stored fields.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct Transaction {
    #[serde(default)]
    pub id: String,
    pub user_id: String,
    pub kind: TransactionKind,
    /// Epoch milliseconds.
    pub occurred_at: i64,
    pub title: String,
    pub amount: f64,
    #[serde(default)]
    pub description: String,
    pub category: String,
}

/// Input model for logging a new transaction.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct NewTransaction {
    pub user_id: String,
    pub kind: TransactionKind,
    /// Epoch milliseconds.
    pub occurred_at: i64,
    pub title: String,
    pub amount: f64,
    #[serde(default)]
    pub description: String,
    pub category: String,
}

/// Signed change to a user's total funds when a transaction is logged:
/// savings add to the available total, expenses subtract from it.
pub fn funds_delta_on_add(kind: TransactionKind, amount: f64) -> f64 {
    match kind {
        TransactionKind::Saving => amount,
        TransactionKind::Expense => -amount,
    }
}

/// Signed change to a user's total funds when a transaction is deleted:
/// the inverse of [`funds_delta_on_add`] - a deleted expense refunds the
/// amount, a deleted saving takes it back out.
pub fn funds_delta_on_delete(kind: TransactionKind, amount: f64) -> f64 {
    -funds_delta_on_add(kind, amount)
}
