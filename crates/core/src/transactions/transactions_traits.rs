use async_trait::async_trait;

use super::transactions_model::{NewTransaction, Transaction, TransactionKind};
use crate::errors::Result;

/// Trait for transaction repository operations.
#[async_trait]
pub trait TransactionRepositoryTrait: Send + Sync {
    /// Persist a new transaction; the store assigns the id.
    async fn add(&self, new_transaction: NewTransaction) -> Result<Transaction>;

    /// All transactions owned by a user.
    async fn list(&self, user_id: &str) -> Result<Vec<Transaction>>;

    /// Transactions of one kind whose `occurred_at` falls in the inclusive
    /// `[from, to]` window (epoch milliseconds). This is the goal
    /// reconciliation query.
    async fn list_in_window(
        &self,
        user_id: &str,
        kind: TransactionKind,
        from: i64,
        to: i64,
    ) -> Result<Vec<Transaction>>;

    async fn delete(&self, user_id: &str, transaction_id: &str) -> Result<()>;
}

/// Trait for transaction service operations.
#[async_trait]
pub trait TransactionServiceTrait: Send + Sync {
    async fn add_transaction(&self, new_transaction: NewTransaction) -> Result<Transaction>;

    /// All transactions for a user. Degrades to an empty list on store
    /// failure; an empty result is therefore ambiguous.
    async fn get_transactions(&self, user_id: &str) -> Vec<Transaction>;

    /// Transactions filtered by kind label, tolerant of casing and
    /// whitespace in stored data. Degrades to an empty list on failure.
    async fn get_transactions_by_kind(&self, user_id: &str, kind_label: &str)
        -> Vec<Transaction>;

    /// Delete a transaction. Returns the signed change to apply to the
    /// user's total funds.
    async fn delete_transaction(&self, user_id: &str, transaction: &Transaction) -> Result<f64>;
}
