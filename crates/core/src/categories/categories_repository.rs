//! Ledger-backed category repository.

use std::sync::Arc;

use async_trait::async_trait;
use log::warn;

use super::categories_model::{Category, NewCategory};
use super::categories_traits::CategoryRepositoryTrait;
use crate::constants::CATEGORIES_COLLECTION;
use crate::errors::{Error, Result, StoreError};
use crate::ledger::{Document, DocumentFields, LedgerStore};

/// Category repository over an injected [`LedgerStore`].
pub struct LedgerCategoryRepository {
    store: Arc<dyn LedgerStore>,
}

impl LedgerCategoryRepository {
    pub fn new(store: Arc<dyn LedgerStore>) -> Self {
        Self { store }
    }
}

fn to_fields(new_category: &NewCategory) -> Result<DocumentFields> {
    match serde_json::to_value(new_category)? {
        serde_json::Value::Object(map) => Ok(map),
        other => Err(Error::Store(StoreError::Serialization(format!(
            "expected object, got {}",
            other
        )))),
    }
}

fn from_document(doc: Document) -> Option<Category> {
    let id = doc.id;
    match serde_json::from_value::<Category>(serde_json::Value::Object(doc.fields)) {
        Ok(mut category) => {
            category.id = id;
            Some(category)
        }
        Err(e) => {
            warn!("Skipping malformed category document {}: {}", id, e);
            None
        }
    }
}

#[async_trait]
impl CategoryRepositoryTrait for LedgerCategoryRepository {
    async fn add(&self, new_category: NewCategory) -> Result<Category> {
        let fields = to_fields(&new_category)?;
        let id = self
            .store
            .set(&new_category.user_id, CATEGORIES_COLLECTION, None, fields)
            .await?;
        Ok(Category {
            id,
            user_id: new_category.user_id,
            name: new_category.name,
            budget: new_category.budget,
        })
    }

    async fn list(&self, user_id: &str) -> Result<Vec<Category>> {
        let docs = self.store.get(user_id, CATEGORIES_COLLECTION).await?;
        Ok(docs.into_iter().filter_map(from_document).collect())
    }

    async fn delete(&self, user_id: &str, category_id: &str) -> Result<()> {
        self.store
            .delete(user_id, CATEGORIES_COLLECTION, category_id)
            .await
    }
}
