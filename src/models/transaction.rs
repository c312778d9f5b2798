use serde::{Deserialize, Serialize};
use serde_json::Value;

use super::fields::{date_or_today, magnitude_or, non_empty_str};

pub const DEFAULT_NAME: &str = "No description";

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum TransactionType {
    #[default]
    Expense,
    Income,
}

impl TransactionType {
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Expense => "expense",
            Self::Income => "income",
        }
    }

    /// Anything other than the two known tags is an expense.
    pub fn parse(s: &str) -> Self {
        match s {
            "income" => Self::Income,
            _ => Self::Expense,
        }
    }
}

impl std::fmt::Display for TransactionType {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Transaction {
    pub id: String,
    pub name: String,
    pub amount: f64,
    /// Format: "YYYY-MM-DD"
    pub date: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub category: Option<String>,
    #[serde(rename = "type")]
    pub kind: TransactionType,
}

impl Transaction {
    pub fn new(name: String, amount: f64, kind: TransactionType) -> Self {
        Self {
            id: new_id(),
            name,
            amount: amount.abs(),
            date: super::today(),
            category: None,
            kind,
        }
    }

    /// Build a well-formed transaction out of whatever was stored.
    ///
    /// Each field is checked on its own and replaced by its default when it
    /// does not match; fields this build does not know about are dropped.
    pub fn validate(raw: &Value) -> Self {
        let field = |name: &str| raw.get(name);

        let id = match field("id") {
            Some(Value::String(s)) if !s.is_empty() => s.clone(),
            Some(Value::Number(n)) => n.to_string(),
            _ => new_id(),
        };

        Self {
            id,
            name: non_empty_str(field("name"))
                .unwrap_or(DEFAULT_NAME)
                .to_string(),
            amount: magnitude_or(field("amount"), 0.0),
            date: date_or_today(field("date")),
            category: field("category").and_then(Value::as_str).map(str::to_string),
            kind: field("type")
                .and_then(Value::as_str)
                .map(TransactionType::parse)
                .unwrap_or_default(),
        }
    }

    pub fn is_income(&self) -> bool {
        self.kind == TransactionType::Income
    }

    pub fn is_expense(&self) -> bool {
        self.kind == TransactionType::Expense
    }
}

pub fn new_id() -> String {
    uuid::Uuid::new_v4().to_string()
}
