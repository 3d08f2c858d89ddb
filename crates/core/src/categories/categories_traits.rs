use async_trait::async_trait;

use super::categories_model::{Category, NewCategory};
use crate::errors::Result;

/// Trait for category repository operations.
#[async_trait]
pub trait CategoryRepositoryTrait: Send + Sync {
    async fn add(&self, new_category: NewCategory) -> Result<Category>;
    async fn list(&self, user_id: &str) -> Result<Vec<Category>>;
    async fn delete(&self, user_id: &str, category_id: &str) -> Result<()>;
}

/// Trait for category service operations.
#[async_trait]
pub trait CategoryServiceTrait: Send + Sync {
    async fn add_category(&self, new_category: NewCategory) -> Result<Category>;

    /// All categories for a user. Degrades to an empty list on store
    /// failure; an empty result is therefore ambiguous.
    async fn get_categories(&self, user_id: &str) -> Vec<Category>;

    async fn delete_category(&self, user_id: &str, category_id: &str) -> Result<()>;
}
