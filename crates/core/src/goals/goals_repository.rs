//! Ledger-backed goal repository.

use std::sync::Arc;

use async_trait::async_trait;
use chrono::Utc;
use log::warn;
use serde_json::json;

use super::goals_model::{Goal, GoalStatus, NewGoal};
use super::goals_traits::GoalRepositoryTrait;
use crate::constants::GOALS_COLLECTION;
use crate::errors::{Error, Result, StoreError};
use crate::ledger::{Document, DocumentFields, LedgerStore};

/// Goal repository over an injected [`LedgerStore`].
pub struct LedgerGoalRepository {
    store: Arc<dyn LedgerStore>,
}

impl LedgerGoalRepository {
    pub fn new(store: Arc<dyn LedgerStore>) -> Self {
        Self { store }
    }
}

fn to_fields(goal: &Goal) -> Result<DocumentFields> {
    let serde_json::Value::Object(mut map) = serde_json::to_value(goal)? else {
        return Err(Error::Store(StoreError::Serialization(
            "expected object".into(),
        )));
    };
    // The id is the document id, not a stored field.
    map.remove("id");
    Ok(map)
}

fn from_document(doc: Document) -> Option<Goal> {
    let id = doc.id;
    match serde_json::from_value::<Goal>(serde_json::Value::Object(doc.fields)) {
        Ok(mut goal) => {
            goal.id = id;
            Some(goal)
        }
        Err(e) => {
            warn!("Skipping malformed goal document {}: {}", id, e);
            None
        }
    }
}

fn partial(pairs: &[(&str, serde_json::Value)]) -> DocumentFields {
    pairs
        .iter()
        .map(|(k, v)| (k.to_string(), v.clone()))
        .collect()
}

#[async_trait]
impl GoalRepositoryTrait for LedgerGoalRepository {
    async fn create(&self, new_goal: NewGoal) -> Result<Goal> {
        let goal = Goal {
            id: String::new(),
            user_id: new_goal.user_id,
            category: new_goal.category,
            kind: new_goal.kind,
            target_amount: new_goal.target_amount,
            deadline: new_goal.deadline,
            created_at: Utc::now().timestamp_millis(),
            status: GoalStatus::InProgress,
            progress: 0.0,
        };
        let fields = to_fields(&goal)?;
        let id = self
            .store
            .set(&goal.user_id, GOALS_COLLECTION, None, fields)
            .await?;
        Ok(Goal { id, ..goal })
    }

    async fn list(&self, user_id: &str) -> Result<Vec<Goal>> {
        let docs = self.store.get(user_id, GOALS_COLLECTION).await?;
        Ok(docs.into_iter().filter_map(from_document).collect())
    }

    async fn delete(&self, user_id: &str, goal_id: &str) -> Result<()> {
        self.store.delete(user_id, GOALS_COLLECTION, goal_id).await
    }

    async fn update_status(
        &self,
        user_id: &str,
        goal_id: &str,
        status: GoalStatus,
    ) -> Result<()> {
        self.store
            .update(
                user_id,
                GOALS_COLLECTION,
                goal_id,
                partial(&[("status", json!(status.as_str()))]),
            )
            .await
    }

    async fn update_progress(&self, user_id: &str, goal_id: &str, progress: f64) -> Result<()> {
        self.store
            .update(
                user_id,
                GOALS_COLLECTION,
                goal_id,
                partial(&[("progress", json!(progress))]),
            )
            .await
    }

    async fn complete(&self, user_id: &str, goal_id: &str) -> Result<()> {
        self.store
            .update(
                user_id,
                GOALS_COLLECTION,
                goal_id,
                partial(&[
                    ("status", json!(GoalStatus::Completed.as_str())),
                    ("progress", json!(1.0)),
                ]),
            )
            .await
    }

    async fn expire(&self, user_id: &str, goal_id: &str, progress: f64) -> Result<()> {
        self.store
            .update(
                user_id,
                GOALS_COLLECTION,
                goal_id,
                partial(&[
                    ("status", json!(GoalStatus::Expired.as_str())),
                    ("progress", json!(progress)),
                ]),
            )
            .await
    }
}
