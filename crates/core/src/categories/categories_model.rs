//! Category domain models.

use serde::{Deserialize, Serialize};

/// Domain model representing a spending/saving category.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct Category {
    #[serde(default)]
    pub id: String,
    pub user_id: String,
    pub name: String,
    #[serde(default)]
    pub budget: f64,
}

/// Input model for creating a new category.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct NewCategory {
    pub user_id: String,
    pub name: String,
    #[serde(default)]
    pub budget: f64,
}
