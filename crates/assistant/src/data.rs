//! Financial data provider seam.
//!
//! The assistant reads the user's finances through this trait so the
//! conversation layer can be tested without a ledger store, and so the
//! embedding application decides where the data comes from.

use std::sync::Arc;

use async_trait::async_trait;
use log::warn;

use budgetbuddy_core::categories::{Category, CategoryServiceTrait};
use budgetbuddy_core::goals::{Goal, GoalServiceTrait};
use budgetbuddy_core::transactions::{Transaction, TransactionServiceTrait};
use budgetbuddy_core::users::{UserProfile, UserProfileRepositoryTrait};

use crate::types::AssistantError;

/// Trait providing a user's financial data to the assistant.
///
/// List reads follow the core services' degradation contract: a store
/// failure yields an empty list, so an empty result is ambiguous. Only the
/// profile read reports failure, because the context snapshot is skipped
/// entirely when the profile is unavailable.
#[async_trait]
pub trait FinancialDataProvider: Send + Sync {
    async fn get_profile(&self, user_id: &str) -> Result<UserProfile, AssistantError>;
    async fn get_goals(&self, user_id: &str) -> Vec<Goal>;
    async fn get_transactions(&self, user_id: &str) -> Vec<Transaction>;
    async fn get_categories(&self, user_id: &str) -> Vec<Category>;
}

/// Provider backed by the core services and profile repository.
pub struct LedgerFinancialDataProvider {
    profiles: Arc<dyn UserProfileRepositoryTrait>,
    goals: Arc<dyn GoalServiceTrait>,
    transactions: Arc<dyn TransactionServiceTrait>,
    categories: Arc<dyn CategoryServiceTrait>,
}

impl LedgerFinancialDataProvider {
    pub fn new(
        profiles: Arc<dyn UserProfileRepositoryTrait>,
        goals: Arc<dyn GoalServiceTrait>,
        transactions: Arc<dyn TransactionServiceTrait>,
        categories: Arc<dyn CategoryServiceTrait>,
    ) -> Self {
        Self {
            profiles,
            goals,
            transactions,
            categories,
        }
    }
}

#[async_trait]
impl FinancialDataProvider for LedgerFinancialDataProvider {
    async fn get_profile(&self, user_id: &str) -> Result<UserProfile, AssistantError> {
        self.profiles
            .get(user_id)
            .await
            .map_err(|e| AssistantError::DataUnavailable(e.to_string()))
    }

    async fn get_goals(&self, user_id: &str) -> Vec<Goal> {
        self.goals.get_goals(user_id).await
    }

    async fn get_transactions(&self, user_id: &str) -> Vec<Transaction> {
        self.transactions.get_transactions(user_id).await
    }

    async fn get_categories(&self, user_id: &str) -> Vec<Category> {
        self.categories.get_categories(user_id).await
    }
}

/// Mock financial data provider for testing.
#[derive(Debug, Default, Clone)]
pub struct MockFinancialDataProvider {
    pub profile: Option<UserProfile>,
    pub goals: Vec<Goal>,
    pub transactions: Vec<Transaction>,
    pub categories: Vec<Category>,
}

impl MockFinancialDataProvider {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_profile(mut self, profile: UserProfile) -> Self {
        self.profile = Some(profile);
        self
    }

    pub fn with_goals(mut self, goals: Vec<Goal>) -> Self {
        self.goals = goals;
        self
    }

    pub fn with_transactions(mut self, transactions: Vec<Transaction>) -> Self {
        self.transactions = transactions;
        self
    }

    pub fn with_categories(mut self, categories: Vec<Category>) -> Self {
        self.categories = categories;
        self
    }
}

#[async_trait]
impl FinancialDataProvider for MockFinancialDataProvider {
    async fn get_profile(&self, user_id: &str) -> Result<UserProfile, AssistantError> {
        match &self.profile {
            Some(profile) => Ok(profile.clone()),
            None => {
                warn!("No profile configured for {}", user_id);
                Err(AssistantError::DataUnavailable(format!(
                    "no profile for {}",
                    user_id
                )))
            }
        }
    }

    async fn get_goals(&self, _user_id: &str) -> Vec<Goal> {
        self.goals.clone()
    }

    async fn get_transactions(&self, _user_id: &str) -> Vec<Transaction> {
        self.transactions.clone()
    }

    async fn get_categories(&self, _user_id: &str) -> Vec<Category> {
        self.categories.clone()
    }
}
