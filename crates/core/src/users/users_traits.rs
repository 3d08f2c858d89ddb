use async_trait::async_trait;

use super::users_model::UserProfile;
use crate::errors::Result;

/// Trait for user profile repository operations.
#[async_trait]
pub trait UserProfileRepositoryTrait: Send + Sync {
    /// Read the user's profile document. Fails with `NotFound` when the
    /// document has never been written.
    async fn get(&self, user_id: &str) -> Result<UserProfile>;

    /// Write the full profile document.
    async fn save(&self, profile: &UserProfile) -> Result<()>;

    /// Update only the running total of available funds.
    async fn update_total_funds(&self, user_id: &str, total_funds: f64) -> Result<()>;

    /// Update a single profile display field.
    async fn update_field(&self, user_id: &str, field: &str, value: &str) -> Result<()>;
}
