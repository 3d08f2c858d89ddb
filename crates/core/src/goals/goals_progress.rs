//! Goal progress engine - reconciliation of goal state against the
//! transaction history.
//!
//! Two progress metrics exist deliberately:
//!
//! - the **persisted** metric computed by [`GoalProgressEngine::reconcile`],
//!   which matches transactions by kind inside the goal's
//!   `[created_at, deadline]` window and drives status transitions;
//! - the **display** metric [`category_progress_percent`], computed
//!   synchronously from a locally cached list with exact category + kind
//!   matching, used for instantaneous UI feedback before reconciliation
//!   lands.
//!
//! The persisted metric is canonical; the display metric never writes.

use std::sync::Arc;

use async_trait::async_trait;
use chrono::Utc;
use log::{debug, error, warn};

use super::goals_model::{Goal, GoalStatus};
use super::goals_traits::{GoalProgressEngineTrait, GoalRepositoryTrait};
use crate::errors::Result;
use crate::transactions::{Transaction, TransactionRepositoryTrait};

/// Recomputes each goal's progress from the transaction history and
/// persists the minimal status/progress change.
pub struct GoalProgressEngine {
    transactions: Arc<dyn TransactionRepositoryTrait>,
    goals: Arc<dyn GoalRepositoryTrait>,
}

impl GoalProgressEngine {
    pub fn new(
        transactions: Arc<dyn TransactionRepositoryTrait>,
        goals: Arc<dyn GoalRepositoryTrait>,
    ) -> Self {
        Self { transactions, goals }
    }

    /// Deterministic variant of [`reconcile`](GoalProgressEngineTrait::reconcile)
    /// with an explicit clock, for tests and replays.
    pub async fn reconcile_at(&self, user_id: &str, goals: &[Goal], now_ms: i64) {
        for goal in goals {
            if goal.status == GoalStatus::Completed {
                continue;
            }
            // Blank ids cannot be addressed; ids containing a path
            // separator would escape the goal collection.
            if goal.id.trim().is_empty() || goal.id.contains('/') {
                warn!("Skipping goal with unusable id {:?}", goal.id);
                continue;
            }
            if goal.target_amount <= 0.0 {
                warn!(
                    "Skipping goal {} with non-positive target {}",
                    goal.id, goal.target_amount
                );
                continue;
            }
            if let Err(e) = self.reconcile_one(user_id, goal, now_ms).await {
                error!("Reconciling goal {} failed: {}", goal.id, e);
            }
        }
    }

    async fn reconcile_one(&self, user_id: &str, goal: &Goal, now_ms: i64) -> Result<()> {
        let matches = self
            .transactions
            .list_in_window(user_id, goal.kind, goal.created_at, goal.deadline)
            .await?;
        let total: f64 = matches.iter().map(|t| t.amount).sum();
        let progress = (total / goal.target_amount).min(1.0);
        debug!(
            "Goal {}: {} matching transactions, {} of {}",
            goal.id,
            matches.len(),
            total,
            goal.target_amount
        );

        if progress >= 1.0 {
            self.goals.complete(user_id, &goal.id).await?;
            debug!("Goal {} completed", goal.id);
        } else if now_ms > goal.deadline {
            self.goals.expire(user_id, &goal.id, progress).await?;
            debug!("Goal {} expired at {:.0}%", goal.id, progress * 100.0);
        } else {
            self.goals.update_progress(user_id, &goal.id, progress).await?;
        }
        Ok(())
    }
}

#[async_trait]
impl GoalProgressEngineTrait for GoalProgressEngine {
    async fn reconcile(&self, user_id: &str, goals: &[Goal]) {
        self.reconcile_at(user_id, goals, Utc::now().timestamp_millis())
            .await
    }
}

/// Display percentage (`0-100`, clamped) for a goal, computed from a
/// locally cached transaction list with exact category + kind + owner
/// matching. Independent of the persisted `progress` field.
pub fn category_progress_percent(goal: &Goal, transactions: &[Transaction]) -> f64 {
    if goal.target_amount <= 0.0 {
        return 0.0;
    }
    let total: f64 = transactions
        .iter()
        .filter(|t| {
            t.user_id == goal.user_id && t.category == goal.category && t.kind == goal.kind
        })
        .map(|t| t.amount)
        .sum();
    (total / goal.target_amount * 100.0).clamp(0.0, 100.0)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::goals::{LedgerGoalRepository, NewGoal};
    use crate::ledger::MemoryLedgerStore;
    use crate::transactions::{
        LedgerTransactionRepository, NewTransaction, TransactionKind,
    };

    struct Fixture {
        engine: GoalProgressEngine,
        goal_repo: Arc<LedgerGoalRepository>,
        txn_repo: Arc<LedgerTransactionRepository>,
    }

    fn fixture() -> Fixture {
        let store = Arc::new(MemoryLedgerStore::new());
        let goal_repo = Arc::new(LedgerGoalRepository::new(store.clone()));
        let txn_repo = Arc::new(LedgerTransactionRepository::new(store));
        let engine = GoalProgressEngine::new(txn_repo.clone(), goal_repo.clone());
        Fixture {
            engine,
            goal_repo,
            txn_repo,
        }
    }

    async fn add_saving(f: &Fixture, occurred_at: i64, amount: f64) {
        f.txn_repo
            .add(NewTransaction {
                user_id: "u1".into(),
                kind: TransactionKind::Saving,
                occurred_at,
                title: "aporte".into(),
                amount,
                description: String::new(),
                category: "Comida".into(),
            })
            .await
            .unwrap();
    }

    fn goal(id: &str, created_at: i64, deadline: i64) -> Goal {
        Goal {
            id: id.into(),
            user_id: "u1".into(),
            category: "Comida".into(),
            kind: TransactionKind::Saving,
            target_amount: 100.0,
            deadline,
            created_at,
            status: GoalStatus::InProgress,
            progress: 0.0,
        }
    }

    #[tokio::test]
    async fn test_partial_progress_is_persisted() {
        let f = fixture();
        let created = f
            .goal_repo
            .create(NewGoal {
                user_id: "u1".into(),
                category: "Comida".into(),
                kind: TransactionKind::Saving,
                target_amount: 100.0,
                deadline: i64::MAX,
            })
            .await
            .unwrap();
        add_saving(&f, created.created_at + 1, 40.0).await;

        f.engine
            .reconcile_at("u1", &[created.clone()], created.created_at + 2)
            .await;

        let goals = f.goal_repo.list("u1").await.unwrap();
        assert_eq!(goals[0].progress, 0.4);
        assert_eq!(goals[0].status, GoalStatus::InProgress);
    }

    #[tokio::test]
    async fn test_reaching_target_completes_and_caps_progress() {
        let f = fixture();
        let created = f
            .goal_repo
            .create(NewGoal {
                user_id: "u1".into(),
                category: "Comida".into(),
                kind: TransactionKind::Saving,
                target_amount: 100.0,
                deadline: i64::MAX,
            })
            .await
            .unwrap();
        add_saving(&f, created.created_at + 1, 40.0).await;
        add_saving(&f, created.created_at + 2, 70.0).await;

        f.engine
            .reconcile_at("u1", &[created.clone()], created.created_at + 3)
            .await;

        let goals = f.goal_repo.list("u1").await.unwrap();
        assert_eq!(goals[0].progress, 1.0);
        assert_eq!(goals[0].status, GoalStatus::Completed);
    }

    #[tokio::test]
    async fn test_blank_or_malformed_ids_are_skipped() {
        let f = fixture();
        // Neither goal exists in the store; a write attempt would fail,
        // and a skip leaves the store untouched and the log clean.
        f.engine
            .reconcile_at("u1", &[goal("", 0, 10), goal("a/b", 0, 10)], 5)
            .await;
        assert!(f.goal_repo.list("u1").await.unwrap().is_empty());
    }

    #[tokio::test]
    async fn test_completed_goals_are_not_touched() {
        let f = fixture();
        let created = f
            .goal_repo
            .create(NewGoal {
                user_id: "u1".into(),
                category: "Comida".into(),
                kind: TransactionKind::Saving,
                target_amount: 100.0,
                deadline: i64::MAX,
            })
            .await
            .unwrap();
        f.goal_repo.complete("u1", &created.id).await.unwrap();
        add_saving(&f, created.created_at + 1, 10.0).await;

        let snapshot = Goal {
            status: GoalStatus::Completed,
            progress: 1.0,
            ..created
        };
        f.engine
            .reconcile_at("u1", &[snapshot], i64::MAX)
            .await;

        let goals = f.goal_repo.list("u1").await.unwrap();
        assert_eq!(goals[0].progress, 1.0);
        assert_eq!(goals[0].status, GoalStatus::Completed);
    }

    #[tokio::test]
    async fn test_past_deadline_marks_expired() {
        let f = fixture();
        let created = f
            .goal_repo
            .create(NewGoal {
                user_id: "u1".into(),
                category: "Comida".into(),
                kind: TransactionKind::Saving,
                target_amount: 100.0,
                deadline: i64::MAX,
            })
            .await
            .unwrap();
        add_saving(&f, created.created_at + 1, 25.0).await;

        // Reconcile with a clock far past a shortened deadline.
        let stale = Goal {
            deadline: created.created_at + 10,
            ..created
        };
        // The transaction falls inside the window; the clock does not.
        f.engine
            .reconcile_at("u1", &[stale.clone()], stale.deadline + 1)
            .await;

        let goals = f.goal_repo.list("u1").await.unwrap();
        assert_eq!(goals[0].status, GoalStatus::Expired);
        assert_eq!(goals[0].progress, 0.25);
    }

    #[tokio::test]
    async fn test_one_failing_goal_does_not_abort_the_batch() {
        let f = fixture();
        let created = f
            .goal_repo
            .create(NewGoal {
                user_id: "u1".into(),
                category: "Comida".into(),
                kind: TransactionKind::Saving,
                target_amount: 100.0,
                deadline: i64::MAX,
            })
            .await
            .unwrap();
        add_saving(&f, created.created_at + 1, 40.0).await;

        // The first goal's update fails (unknown document id); the second
        // must still be reconciled.
        let ghost = goal("missing", created.created_at, i64::MAX);
        f.engine
            .reconcile_at("u1", &[ghost, created.clone()], created.created_at + 2)
            .await;

        let goals = f.goal_repo.list("u1").await.unwrap();
        assert_eq!(goals.len(), 1);
        assert_eq!(goals[0].progress, 0.4);
    }

    #[test]
    fn test_display_percent_is_category_scoped_and_clamped() {
        let g = goal("g1", 0, i64::MAX);
        let mk = |category: &str, kind, amount| Transaction {
            id: "t".into(),
            user_id: "u1".into(),
            kind,
            occurred_at: 1,
            title: "t".into(),
            amount,
            description: String::new(),
            category: category.into(),
        };
        let transactions = vec![
            mk("Comida", TransactionKind::Saving, 30.0),
            mk("Comida", TransactionKind::Expense, 99.0),
            mk("Ocio", TransactionKind::Saving, 99.0),
        ];
        assert_eq!(category_progress_percent(&g, &transactions), 30.0);

        let transactions = vec![mk("Comida", TransactionKind::Saving, 250.0)];
        assert_eq!(category_progress_percent(&g, &transactions), 100.0);
    }
}
