//! Analytics module - per-category aggregation for charting.

mod category_totals;

pub use category_totals::{aggregate_by_category, CategoryTotals};
