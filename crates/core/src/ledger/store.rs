//! The `LedgerStore` trait - minimal query interface over the remote
//! document database.
//!
//! All persistent state lives in per-user collections of documents. The
//! store is an external collaborator: this crate only defines the interface
//! and an in-memory implementation for tests and embedding. Every component
//! that touches persistent state receives an `Arc<dyn LedgerStore>` at
//! construction.

use async_trait::async_trait;
use serde::{Deserialize, Serialize};

use crate::errors::Result;

/// Field map of a stored document. Document ids live outside the fields.
pub type DocumentFields = serde_json::Map<String, serde_json::Value>;

/// A document read back from the store.
#[derive(Debug, Clone, PartialEq)]
pub struct Document {
    /// Store-assigned document id.
    pub id: String,
    /// The document's field map.
    pub fields: DocumentFields,
}

/// Comparison operator for a field filter.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub enum FilterOp {
    Eq,
    Gte,
    Lte,
}

/// A single field predicate for `LedgerStore::query`.
///
/// `Gte`/`Lte` compare numerically; `Eq` compares for exact value equality.
#[derive(Debug, Clone, PartialEq)]
pub struct FieldFilter {
    pub field: String,
    pub op: FilterOp,
    pub value: serde_json::Value,
}

impl FieldFilter {
    pub fn eq(field: &str, value: impl Into<serde_json::Value>) -> Self {
        Self {
            field: field.to_string(),
            op: FilterOp::Eq,
            value: value.into(),
        }
    }

    pub fn gte(field: &str, value: impl Into<serde_json::Value>) -> Self {
        Self {
            field: field.to_string(),
            op: FilterOp::Gte,
            value: value.into(),
        }
    }

    pub fn lte(field: &str, value: impl Into<serde_json::Value>) -> Self {
        Self {
            field: field.to_string(),
            op: FilterOp::Lte,
            value: value.into(),
        }
    }
}

/// Minimal interface over the per-user document database.
///
/// Collections used by this crate are listed in [`crate::constants`].
/// Writes are document-level; there are no cross-document transactions and
/// concurrent writers resolve last-writer-wins.
#[async_trait]
pub trait LedgerStore: Send + Sync {
    /// Read all documents in a user's collection.
    async fn get(&self, user_id: &str, collection: &str) -> Result<Vec<Document>>;

    /// Read the documents in a user's collection matching every filter.
    async fn query(
        &self,
        user_id: &str,
        collection: &str,
        filters: &[FieldFilter],
    ) -> Result<Vec<Document>>;

    /// Write a full document. With `doc_id == None` the store assigns an id.
    /// Returns the id of the written document.
    async fn set(
        &self,
        user_id: &str,
        collection: &str,
        doc_id: Option<&str>,
        fields: DocumentFields,
    ) -> Result<String>;

    /// Merge `fields` into an existing document. Fails with
    /// `StoreError::NotFound` if the document does not exist.
    async fn update(
        &self,
        user_id: &str,
        collection: &str,
        doc_id: &str,
        fields: DocumentFields,
    ) -> Result<()>;

    /// Delete a document. Deleting a missing document is a no-op.
    async fn delete(&self, user_id: &str, collection: &str, doc_id: &str) -> Result<()>;

    /// Read the per-user root document (profile fields). `None` when the
    /// user document has never been written.
    async fn get_user_doc(&self, user_id: &str) -> Result<Option<DocumentFields>>;

    /// Merge `fields` into the per-user root document, creating it if absent.
    async fn update_user_doc(&self, user_id: &str, fields: DocumentFields) -> Result<()>;
}
