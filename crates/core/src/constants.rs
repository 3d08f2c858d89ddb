//! Shared constants for the finance-tracking core.

/// Per-user collection holding transactions.
pub const TRANSACTIONS_COLLECTION: &str = "transactions";

/// Per-user collection holding goals.
pub const GOALS_COLLECTION: &str = "goals";

/// Per-user collection holding categories.
pub const CATEGORIES_COLLECTION: &str = "categories";
