//! In-memory `LedgerStore` implementation.
//!
//! Backs the test suites and serves as an injectable fake for embedders
//! that want to run the core without a remote database. Semantics mirror
//! the remote store: store-assigned ids, merge-on-update, idempotent
//! delete, last-writer-wins.

use std::collections::HashMap;

use async_trait::async_trait;
use tokio::sync::RwLock;
use uuid::Uuid;

use super::store::{Document, DocumentFields, FieldFilter, FilterOp, LedgerStore};
use crate::errors::{Result, StoreError};

type UserCollections = HashMap<String, Vec<Document>>;

#[derive(Default)]
struct MemoryState {
    /// user id -> collection name -> documents
    collections: HashMap<String, UserCollections>,
    /// user id -> root document fields
    user_docs: HashMap<String, DocumentFields>,
}

/// In-memory ledger store.
#[derive(Default)]
pub struct MemoryLedgerStore {
    state: RwLock<MemoryState>,
}

impl MemoryLedgerStore {
    pub fn new() -> Self {
        Self::default()
    }

    /// Number of documents currently held in a user's collection.
    pub async fn doc_count(&self, user_id: &str, collection: &str) -> usize {
        self.state
            .read()
            .await
            .collections
            .get(user_id)
            .and_then(|c| c.get(collection))
            .map(|docs| docs.len())
            .unwrap_or(0)
    }
}

fn matches(doc: &Document, filter: &FieldFilter) -> bool {
    let Some(value) = doc.fields.get(&filter.field) else {
        return false;
    };
    match filter.op {
        FilterOp::Eq => value == &filter.value,
        FilterOp::Gte | FilterOp::Lte => {
            let (Some(lhs), Some(rhs)) = (value.as_f64(), filter.value.as_f64()) else {
                return false;
            };
            match filter.op {
                FilterOp::Gte => lhs >= rhs,
                _ => lhs <= rhs,
            }
        }
    }
}

#[async_trait]
impl LedgerStore for MemoryLedgerStore {
    async fn get(&self, user_id: &str, collection: &str) -> Result<Vec<Document>> {
        let state = self.state.read().await;
        Ok(state
            .collections
            .get(user_id)
            .and_then(|c| c.get(collection))
            .cloned()
            .unwrap_or_default())
    }

    async fn query(
        &self,
        user_id: &str,
        collection: &str,
        filters: &[FieldFilter],
    ) -> Result<Vec<Document>> {
        let docs = self.get(user_id, collection).await?;
        Ok(docs
            .into_iter()
            .filter(|doc| filters.iter().all(|f| matches(doc, f)))
            .collect())
    }

    async fn set(
        &self,
        user_id: &str,
        collection: &str,
        doc_id: Option<&str>,
        fields: DocumentFields,
    ) -> Result<String> {
        let id = doc_id
            .map(str::to_string)
            .unwrap_or_else(|| Uuid::new_v4().to_string());
        let mut state = self.state.write().await;
        let docs = state
            .collections
            .entry(user_id.to_string())
            .or_default()
            .entry(collection.to_string())
            .or_default();
        match docs.iter_mut().find(|d| d.id == id) {
            Some(existing) => existing.fields = fields,
            None => docs.push(Document {
                id: id.clone(),
                fields,
            }),
        }
        Ok(id)
    }

    async fn update(
        &self,
        user_id: &str,
        collection: &str,
        doc_id: &str,
        fields: DocumentFields,
    ) -> Result<()> {
        let mut state = self.state.write().await;
        let doc = state
            .collections
            .get_mut(user_id)
            .and_then(|c| c.get_mut(collection))
            .and_then(|docs| docs.iter_mut().find(|d| d.id == doc_id))
            .ok_or_else(|| {
                StoreError::NotFound(format!("{}/{}/{}", user_id, collection, doc_id))
            })?;
        for (key, value) in fields {
            doc.fields.insert(key, value);
        }
        Ok(())
    }

    async fn delete(&self, user_id: &str, collection: &str, doc_id: &str) -> Result<()> {
        let mut state = self.state.write().await;
        if let Some(docs) = state
            .collections
            .get_mut(user_id)
            .and_then(|c| c.get_mut(collection))
        {
            docs.retain(|d| d.id != doc_id);
        }
        Ok(())
    }

    async fn get_user_doc(&self, user_id: &str) -> Result<Option<DocumentFields>> {
        let state = self.state.read().await;
        Ok(state.user_docs.get(user_id).cloned())
    }

    async fn update_user_doc(&self, user_id: &str, fields: DocumentFields) -> Result<()> {
        let mut state = self.state.write().await;
        let doc = state.user_docs.entry(user_id.to_string()).or_default();
        for (key, value) in fields {
            doc.insert(key, value);
        }
        Ok(())
    }
}
