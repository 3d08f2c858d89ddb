//! Category service.

use std::sync::Arc;

use async_trait::async_trait;
use log::warn;

use super::categories_model::{Category, NewCategory};
use super::categories_traits::{CategoryRepositoryTrait, CategoryServiceTrait};
use crate::errors::{Result, ValidationError};

/// Service for managing categories.
pub struct CategoryService {
    repository: Arc<dyn CategoryRepositoryTrait>,
}

impl CategoryService {
    pub fn new(repository: Arc<dyn CategoryRepositoryTrait>) -> Self {
        Self { repository }
    }
}

#[async_trait]
impl CategoryServiceTrait for CategoryService {
    async fn add_category(&self, new_category: NewCategory) -> Result<Category> {
        if new_category.name.trim().is_empty() {
            return Err(ValidationError::MissingField("name".into()).into());
        }
        self.repository.add(new_category).await
    }

    async fn get_categories(&self, user_id: &str) -> Vec<Category> {
        match self.repository.list(user_id).await {
            Ok(categories) => categories,
            Err(e) => {
                warn!("Listing categories for {} failed: {}", user_id, e);
                Vec::new()
            }
        }
    }

    async fn delete_category(&self, user_id: &str, category_id: &str) -> Result<()> {
        self.repository.delete(user_id, category_id).await
    }
}
