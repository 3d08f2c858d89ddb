//! Transaction service.

use std::sync::Arc;

use async_trait::async_trait;
use log::{debug, warn};

use super::transactions_model::{
    funds_delta_on_delete, NewTransaction, Transaction, TransactionKind,
};
use super::transactions_traits::{TransactionRepositoryTrait, TransactionServiceTrait};
use crate::errors::{Result, ValidationError};

/// Service for logging and listing transactions.
///
/// Mutations here change goal progress; callers are responsible for
/// invoking the goal progress engine afterwards - the store does not
/// trigger recomputation.
pub struct TransactionService {
    repository: Arc<dyn TransactionRepositoryTrait>,
}

impl TransactionService {
    pub fn new(repository: Arc<dyn TransactionRepositoryTrait>) -> Self {
        Self { repository }
    }
}

#[async_trait]
impl TransactionServiceTrait for TransactionService {
    async fn add_transaction(&self, new_transaction: NewTransaction) -> Result<Transaction> {
        if new_transaction.amount <= 0.0 {
            return Err(ValidationError::NonPositiveAmount(new_transaction.amount).into());
        }
        if new_transaction.title.trim().is_empty() {
            return Err(ValidationError::MissingField("title".into()).into());
        }
        debug!(
            "Adding {} transaction of {} in {}",
            new_transaction.kind, new_transaction.amount, new_transaction.category
        );
        self.repository.add(new_transaction).await
    }

    async fn get_transactions(&self, user_id: &str) -> Vec<Transaction> {
        match self.repository.list(user_id).await {
            Ok(transactions) => transactions,
            Err(e) => {
                warn!("Listing transactions for {} failed: {}", user_id, e);
                Vec::new()
            }
        }
    }

    async fn get_transactions_by_kind(
        &self,
        user_id: &str,
        kind_label: &str,
    ) -> Vec<Transaction> {
        let Some(kind) = TransactionKind::parse(kind_label) else {
            warn!("Unknown transaction kind label: {:?}", kind_label);
            return Vec::new();
        };
        self.get_transactions(user_id)
            .await
            .into_iter()
            .filter(|t| t.kind == kind)
            .collect()
    }

    async fn delete_transaction(&self, user_id: &str, transaction: &Transaction) -> Result<f64> {
        self.repository.delete(user_id, &transaction.id).await?;
        Ok(funds_delta_on_delete(transaction.kind, transaction.amount))
    }
}
