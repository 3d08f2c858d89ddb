//! End-to-end reconciliation scenarios over the in-memory ledger store.

use std::sync::Arc;

use budgetbuddy_core::goals::{
    GoalProgressEngine, GoalRepositoryTrait, GoalStatus, LedgerGoalRepository, NewGoal,
};
use budgetbuddy_core::ledger::MemoryLedgerStore;
use budgetbuddy_core::transactions::{
    LedgerTransactionRepository, NewTransaction, TransactionKind, TransactionRepositoryTrait,
};

const DAY_MS: i64 = 24 * 60 * 60 * 1000;

struct World {
    goal_repo: Arc<LedgerGoalRepository>,
    txn_repo: Arc<LedgerTransactionRepository>,
    engine: GoalProgressEngine,
}

fn world() -> World {
    let store = Arc::new(MemoryLedgerStore::new());
    let goal_repo = Arc::new(LedgerGoalRepository::new(store.clone()));
    let txn_repo = Arc::new(LedgerTransactionRepository::new(store));
    let engine = GoalProgressEngine::new(txn_repo.clone(), goal_repo.clone());
    World {
        goal_repo,
        txn_repo,
        engine,
    }
}

async fn log_saving(w: &World, occurred_at: i64, amount: f64) {
    w.txn_repo
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

/// Saving goal of 100 in "Comida": 40 + 70 inside the window completes it.
#[tokio::test]
async fn saving_goal_completes_when_window_sum_reaches_target() {
    let w = world();
    let goal = w
        .goal_repo
        .create(NewGoal {
            user_id: "u1".into(),
            category: "Comida".into(),
            kind: TransactionKind::Saving,
            target_amount: 100.0,
            deadline: 0, // fixed below relative to created_at
        })
        .await
        .unwrap();
    let t0 = goal.created_at;
    let goal = budgetbuddy_core::goals::Goal {
        deadline: t0 + 30 * DAY_MS,
        ..goal
    };

    log_saving(&w, t0 + DAY_MS, 40.0).await;
    log_saving(&w, t0 + 2 * DAY_MS, 70.0).await;

    w.engine.reconcile_at("u1", &[goal], t0 + 3 * DAY_MS).await;

    let stored = w.goal_repo.list("u1").await.unwrap();
    assert_eq!(stored[0].progress, 1.0);
    assert_eq!(stored[0].status, GoalStatus::Completed);
}

/// Same goal with only the 40-unit transaction stays in progress at 0.4.
#[tokio::test]
async fn saving_goal_partial_sum_stays_in_progress() {
    let w = world();
    let goal = w
        .goal_repo
        .create(NewGoal {
            user_id: "u1".into(),
            category: "Comida".into(),
            kind: TransactionKind::Saving,
            target_amount: 100.0,
            deadline: 0,
        })
        .await
        .unwrap();
    let t0 = goal.created_at;
    let goal = budgetbuddy_core::goals::Goal {
        deadline: t0 + 30 * DAY_MS,
        ..goal
    };

    log_saving(&w, t0 + DAY_MS, 40.0).await;

    w.engine.reconcile_at("u1", &[goal], t0 + 2 * DAY_MS).await;

    let stored = w.goal_repo.list("u1").await.unwrap();
    assert_eq!(stored[0].progress, 0.4);
    assert_eq!(stored[0].status, GoalStatus::InProgress);
}

/// Reconciliation matches by kind only: savings in another category still
/// count toward a saving goal.
#[tokio::test]
async fn reconciliation_window_matches_kind_not_category() {
    let w = world();
    let goal = w
        .goal_repo
        .create(NewGoal {
            user_id: "u1".into(),
            category: "Viaje".into(),
            kind: TransactionKind::Saving,
            target_amount: 100.0,
            deadline: 0,
        })
        .await
        .unwrap();
    let t0 = goal.created_at;
    let goal = budgetbuddy_core::goals::Goal {
        deadline: t0 + 30 * DAY_MS,
        ..goal
    };

    // "Comida" saving, not "Viaje" - still contributes.
    log_saving(&w, t0 + DAY_MS, 100.0).await;

    w.engine.reconcile_at("u1", &[goal], t0 + 2 * DAY_MS).await;

    let stored = w.goal_repo.list("u1").await.unwrap();
    assert_eq!(stored[0].status, GoalStatus::Completed);
}

/// Transactions outside the `[created_at, deadline]` window are ignored.
#[tokio::test]
async fn transactions_outside_window_do_not_count() {
    let w = world();
    let goal = w
        .goal_repo
        .create(NewGoal {
            user_id: "u1".into(),
            category: "Comida".into(),
            kind: TransactionKind::Saving,
            target_amount: 100.0,
            deadline: 0,
        })
        .await
        .unwrap();
    let t0 = goal.created_at;
    let goal = budgetbuddy_core::goals::Goal {
        deadline: t0 + 30 * DAY_MS,
        ..goal
    };

    log_saving(&w, t0 - DAY_MS, 100.0).await;
    log_saving(&w, t0 + 31 * DAY_MS, 100.0).await;

    w.engine.reconcile_at("u1", &[goal], t0 + DAY_MS).await;

    let stored = w.goal_repo.list("u1").await.unwrap();
    assert_eq!(stored[0].progress, 0.0);
    assert_eq!(stored[0].status, GoalStatus::InProgress);
}
