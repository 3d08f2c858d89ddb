//! Grouping of transactions into per-category saving/expense totals.

use std::collections::HashMap;

use serde::{Deserialize, Serialize};

use crate::transactions::{Transaction, TransactionKind};

/// Per-category totals for the grouped bar chart. A category with no
/// transactions of one kind reports `0.0` for that side.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct CategoryTotals {
    pub category: String,
    pub total_saving: f64,
    pub total_expense: f64,
}

/// Group transactions by exact category name (case-sensitive, no
/// trimming) and sum amounts per kind. Output order is first-seen input
/// order, so it is stable for a given input.
pub fn aggregate_by_category(transactions: &[Transaction]) -> Vec<CategoryTotals> {
    let mut totals: Vec<CategoryTotals> = Vec::new();
    let mut index: HashMap<&str, usize> = HashMap::new();

    for transaction in transactions {
        let slot = match index.get(transaction.category.as_str()) {
            Some(&i) => i,
            None => {
                totals.push(CategoryTotals {
                    category: transaction.category.clone(),
                    total_saving: 0.0,
                    total_expense: 0.0,
                });
                index.insert(transaction.category.as_str(), totals.len() - 1);
                totals.len() - 1
            }
        };
        match transaction.kind {
            TransactionKind::Saving => totals[slot].total_saving += transaction.amount,
            TransactionKind::Expense => totals[slot].total_expense += transaction.amount,
        }
    }

    totals
}
