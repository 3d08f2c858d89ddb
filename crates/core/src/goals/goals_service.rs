//! Goal service - CRUD and manual state changes.

use std::sync::Arc;

use async_trait::async_trait;
use log::warn;

use super::goals_model::{Goal, GoalStatus, NewGoal};
use super::goals_traits::{GoalRepositoryTrait, GoalServiceTrait};
use crate::errors::{Result, ValidationError};

/// Service for managing goals.
///
/// Progress recomputation lives in the
/// [`GoalProgressEngine`](super::GoalProgressEngine), not here.
pub struct GoalService {
    repository: Arc<dyn GoalRepositoryTrait>,
}

impl GoalService {
    pub fn new(repository: Arc<dyn GoalRepositoryTrait>) -> Self {
        Self { repository }
    }
}

#[async_trait]
impl GoalServiceTrait for GoalService {
    async fn create_goal(&self, new_goal: NewGoal) -> Result<Goal> {
        // Zero or negative targets would make the progress ratio undefined.
        if new_goal.target_amount <= 0.0 {
            return Err(ValidationError::NonPositiveAmount(new_goal.target_amount).into());
        }
        if new_goal.category.trim().is_empty() {
            return Err(ValidationError::MissingField("category".into()).into());
        }
        self.repository.create(new_goal).await
    }

    async fn get_goals(&self, user_id: &str) -> Vec<Goal> {
        match self.repository.list(user_id).await {
            Ok(goals) => goals,
            Err(e) => {
                warn!("Listing goals for {} failed: {}", user_id, e);
                Vec::new()
            }
        }
    }

    async fn delete_goal(&self, user_id: &str, goal_id: &str) -> Result<()> {
        self.repository.delete(user_id, goal_id).await
    }

    async fn mark_completed(&self, user_id: &str, goal_id: &str) -> Result<()> {
        self.repository
            .update_status(user_id, goal_id, GoalStatus::Completed)
            .await
    }
}
