//! Ledger-backed transaction repository.

use std::sync::Arc;

use async_trait::async_trait;
use log::warn;

use super::transactions_model::{NewTransaction, Transaction, TransactionKind};
use super::transactions_traits::TransactionRepositoryTrait;
use crate::constants::TRANSACTIONS_COLLECTION;
use crate::errors::{Error, Result, StoreError};
use crate::ledger::{Document, DocumentFields, FieldFilter, LedgerStore};

/// Transaction repository over an injected [`LedgerStore`].
pub struct LedgerTransactionRepository {
    store: Arc<dyn LedgerStore>,
}

impl LedgerTransactionRepository {
    pub fn new(store: Arc<dyn LedgerStore>) -> Self {
        Self { store }
    }
}

fn to_fields(new_transaction: &NewTransaction) -> Result<DocumentFields> {
    match serde_json::to_value(new_transaction)? {
        serde_json::Value::Object(map) => Ok(map),
        other => Err(Error::Store(StoreError::Serialization(format!(
            "expected object, got {}",
            other
        )))),
    }
}

/// Map a stored document back to the domain model. Documents that do not
/// deserialize are skipped; the ledger may hold rows written by older
/// clients.
fn from_document(doc: Document) -> Option<Transaction> {
    let id = doc.id;
    match serde_json::from_value::<Transaction>(serde_json::Value::Object(doc.fields)) {
        Ok(mut transaction) => {
            transaction.id = id;
            Some(transaction)
        }
        Err(e) => {
            warn!("Skipping malformed transaction document {}: {}", id, e);
            None
        }
    }
}

#[async_trait]
impl TransactionRepositoryTrait for LedgerTransactionRepository {
    async fn add(&self, new_transaction: NewTransaction) -> Result<Transaction> {
        let fields = to_fields(&new_transaction)?;
        let id = self
            .store
            .set(&new_transaction.user_id, TRANSACTIONS_COLLECTION, None, fields)
            .await?;
        Ok(Transaction {
            id,
            user_id: new_transaction.user_id,
            kind: new_transaction.kind,
            occurred_at: new_transaction.occurred_at,
            title: new_transaction.title,
            amount: new_transaction.amount,
            description: new_transaction.description,
            category: new_transaction.category,
        })
    }

    async fn list(&self, user_id: &str) -> Result<Vec<Transaction>> {
        let docs = self.store.get(user_id, TRANSACTIONS_COLLECTION).await?;
        Ok(docs.into_iter().filter_map(from_document).collect())
    }

    async fn list_in_window(
        &self,
        user_id: &str,
        kind: TransactionKind,
        from: i64,
        to: i64,
    ) -> Result<Vec<Transaction>> {
        let filters = [
            FieldFilter::eq("kind", kind.as_str()),
            FieldFilter::gte("occurredAt", from),
            FieldFilter::lte("occurredAt", to),
        ];
        let docs = self
            .store
            .query(user_id, TRANSACTIONS_COLLECTION, &filters)
            .await?;
        Ok(docs.into_iter().filter_map(from_document).collect())
    }

    async fn delete(&self, user_id: &str, transaction_id: &str) -> Result<()> {
        self.store
            .delete(user_id, TRANSACTIONS_COLLECTION, transaction_id)
            .await
    }
}
