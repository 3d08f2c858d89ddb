//! Ledger-backed user profile repository.

use std::sync::Arc;

use async_trait::async_trait;
use serde_json::json;

use super::users_model::UserProfile;
use super::users_traits::UserProfileRepositoryTrait;
use crate::errors::{Error, Result, StoreError};
use crate::ledger::{DocumentFields, LedgerStore};

/// Profile repository over the per-user root document of an injected
/// [`LedgerStore`].
pub struct LedgerUserProfileRepository {
    store: Arc<dyn LedgerStore>,
}

impl LedgerUserProfileRepository {
    pub fn new(store: Arc<dyn LedgerStore>) -> Self {
        Self { store }
    }
}

fn partial(pairs: &[(&str, serde_json::Value)]) -> DocumentFields {
    pairs
        .iter()
        .map(|(k, v)| (k.to_string(), v.clone()))
        .collect()
}

#[async_trait]
impl UserProfileRepositoryTrait for LedgerUserProfileRepository {
    async fn get(&self, user_id: &str) -> Result<UserProfile> {
        let fields = self
            .store
            .get_user_doc(user_id)
            .await?
            .ok_or_else(|| StoreError::NotFound(format!("user {}", user_id)))?;
        let mut profile: UserProfile =
            serde_json::from_value(serde_json::Value::Object(fields))?;
        profile.user_id = user_id.to_string();
        Ok(profile)
    }

    async fn save(&self, profile: &UserProfile) -> Result<()> {
        let serde_json::Value::Object(fields) = serde_json::to_value(profile)? else {
            return Err(Error::Store(StoreError::Serialization(
                "expected object".into(),
            )));
        };
        self.store.update_user_doc(&profile.user_id, fields).await
    }

    async fn update_total_funds(&self, user_id: &str, total_funds: f64) -> Result<()> {
        self.store
            .update_user_doc(user_id, partial(&[("totalFunds", json!(total_funds))]))
            .await
    }

    async fn update_field(&self, user_id: &str, field: &str, value: &str) -> Result<()> {
        self.store
            .update_user_doc(user_id, partial(&[(field, json!(value))]))
            .await
    }
}
