use async_trait::async_trait;

use super::goals_model::{Goal, GoalStatus, NewGoal};
use crate::errors::Result;

/// Trait for goal repository operations.
#[async_trait]
pub trait GoalRepositoryTrait: Send + Sync {
    /// Persist a new goal: the store assigns the id, `created_at` is
    /// stamped, status starts `InProgress` with zero progress.
    async fn create(&self, new_goal: NewGoal) -> Result<Goal>;

    /// All goals owned by a user.
    async fn list(&self, user_id: &str) -> Result<Vec<Goal>>;

    async fn delete(&self, user_id: &str, goal_id: &str) -> Result<()>;

    /// Write only the status field (manual state changes).
    async fn update_status(&self, user_id: &str, goal_id: &str, status: GoalStatus)
        -> Result<()>;

    /// Write only the progress fraction.
    async fn update_progress(&self, user_id: &str, goal_id: &str, progress: f64) -> Result<()>;

    /// Write `{status: Completed, progress: 1.0}` in a single update.
    async fn complete(&self, user_id: &str, goal_id: &str) -> Result<()>;

    /// Write `{status: Expired, progress}` in a single update.
    async fn expire(&self, user_id: &str, goal_id: &str, progress: f64) -> Result<()>;
}

/// Trait for goal service operations.
#[async_trait]
pub trait GoalServiceTrait: Send + Sync {
    async fn create_goal(&self, new_goal: NewGoal) -> Result<Goal>;

    /// All goals for a user. Degrades to an empty list on store failure;
    /// an empty result is therefore ambiguous.
    async fn get_goals(&self, user_id: &str) -> Vec<Goal>;

    async fn delete_goal(&self, user_id: &str, goal_id: &str) -> Result<()>;

    /// Manual completion by the user. Writes the status only.
    async fn mark_completed(&self, user_id: &str, goal_id: &str) -> Result<()>;
}

/// Trait for the goal progress engine.
///
/// Callers invoke `reconcile` after any transaction mutation that could
/// affect goal progress; the store never triggers recomputation itself.
#[async_trait]
pub trait GoalProgressEngineTrait: Send + Sync {
    /// Recompute and persist progress/status for each goal in the batch.
    /// Per-goal failures are logged and never abort the batch.
    async fn reconcile(&self, user_id: &str, goals: &[Goal]);
}
