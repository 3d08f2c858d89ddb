//! Transactions module - domain models, repository, and service.

mod transactions_model;
mod transactions_repository;
mod transactions_service;
mod transactions_traits;

pub use transactions_model::{
    funds_delta_on_add, funds_delta_on_delete, NewTransaction, Transaction, TransactionKind,
};
pub use transactions_repository::LedgerTransactionRepository;
pub use transactions_service::TransactionService;
pub use transactions_traits::{TransactionRepositoryTrait, TransactionServiceTrait};
