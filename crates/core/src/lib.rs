//! Budget Buddy Core - Domain entities, services, and traits.
//!
//! This crate contains the core business logic for Budget Buddy: the
//! ledger-store abstraction, transaction/category/goal repositories and
//! services, the goal progress engine, and the per-category aggregation
//! used for charting. It is store-agnostic: the document database is
//! consumed through the `LedgerStore` trait and injected into every
//! component at construction.

pub mod analytics;
pub mod auth;
pub mod categories;
pub mod constants;
pub mod errors;
pub mod goals;
pub mod ledger;
pub mod transactions;
pub mod users;

// Re-export error types
pub use errors::Error;
pub use errors::Result;
