use serde::{Deserialize, Serialize};
use serde_json::Value;

use super::fields::{date_or_today, magnitude_or};

pub const DEFAULT_BUDGET_AMOUNT: f64 = 100_000.0;

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct BudgetConfig {
    pub amount: f64,
    /// Format: "YYYY-MM-DD"
    pub start_date: String,
}

impl BudgetConfig {
    pub fn new(amount: f64, start_date: String) -> Self {
        Self { amount, start_date }
    }

    pub fn validate(raw: &Value) -> Self {
        Self {
            amount: magnitude_or(raw.get("amount"), DEFAULT_BUDGET_AMOUNT),
            start_date: date_or_today(raw.get("startDate")),
        }
    }
}

impl Default for BudgetConfig {
    /// The start date is today at construction time, so a default built
    /// tomorrow differs from one built now.
    fn default() -> Self {
        Self {
            amount: DEFAULT_BUDGET_AMOUNT,
            start_date: super::today(),
        }
    }
}
