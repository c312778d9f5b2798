use serde_json::{Map, Value};

use super::collection::{Collection, PayloadKind};
use super::migrate::MigrationStep;
use crate::models::{default_categories, new_id, validate_categories, BudgetConfig, Transaction};

// ── Transactions ──────────────────────────────────────────────

const TRANSACTION_STEPS: &[MigrationStep] = &[transactions_v0_to_v1];

pub struct Transactions;

impl Collection for Transactions {
    type Value = Vec<Transaction>;

    const NAME: &'static str = "transactions";
    // The key predates income tracking, when every record was an expense
    const KEY: &'static str = "expenses";
    const PAYLOAD_KEY: &'static str = "transactions";
    const PAYLOAD_KIND: PayloadKind = PayloadKind::Array;

    fn migrations() -> &'static [MigrationStep] {
        TRANSACTION_STEPS
    }

    fn default_value() -> Self::Value {
        Vec::new()
    }

    fn validate(payload: &Value) -> Self::Value {
        payload
            .as_array()
            .map(|items| {
                items
                    .iter()
                    .filter(|item| item.is_object())
                    .map(Transaction::validate)
                    .collect()
            })
            .unwrap_or_default()
    }

    fn to_payload(value: &Self::Value) -> serde_json::Result<Value> {
        serde_json::to_value(value)
    }
}

/// Legacy records were bare objects with no `type` and often no `id`.
fn transactions_v0_to_v1(payload: Value) -> Value {
    let Value::Array(items) = payload else {
        return Value::Array(Vec::new());
    };

    let records = items
        .into_iter()
        .filter_map(|item| match item {
            Value::Object(mut record) => {
                let has_id = match record.get("id") {
                    Some(Value::String(s)) => !s.is_empty(),
                    Some(Value::Number(_)) => true,
                    _ => false,
                };
                if !has_id {
                    record.insert("id".into(), Value::String(new_id()));
                }
                record
                    .entry("type")
                    .or_insert_with(|| Value::String("expense".into()));
                Some(Value::Object(record))
            }
            _ => None,
        })
        .collect();

    Value::Array(records)
}

// ── Budget ────────────────────────────────────────────────────

const BUDGET_STEPS: &[MigrationStep] = &[budget_v0_to_v1];

pub struct Budget;

impl Collection for Budget {
    type Value = BudgetConfig;

    const NAME: &'static str = "budget";
    const KEY: &'static str = "budget";
    const PAYLOAD_KEY: &'static str = "budget";
    const PAYLOAD_KIND: PayloadKind = PayloadKind::Object;

    fn migrations() -> &'static [MigrationStep] {
        BUDGET_STEPS
    }

    /// Early builds stored just the amount as decimal text.
    fn is_legacy(raw: &Value) -> bool {
        raw.is_number()
    }

    fn default_value() -> Self::Value {
        BudgetConfig::default()
    }

    fn validate(payload: &Value) -> Self::Value {
        BudgetConfig::validate(payload)
    }

    fn to_payload(value: &Self::Value) -> serde_json::Result<Value> {
        serde_json::to_value(value)
    }
}

/// Wrap the bare amount. The start date is left out so the validator
/// supplies the date of the load rather than a date fixed by the step.
fn budget_v0_to_v1(payload: Value) -> Value {
    let mut config = Map::new();
    if payload.is_number() {
        config.insert("amount".into(), payload);
    }
    Value::Object(config)
}

// ── Categories ────────────────────────────────────────────────

const CATEGORY_STEPS: &[MigrationStep] = &[categories_v0_to_v1];

pub struct Categories;

impl Collection for Categories {
    type Value = Vec<String>;

    const NAME: &'static str = "categories";
    const KEY: &'static str = "categories";
    const PAYLOAD_KEY: &'static str = "categories";
    const PAYLOAD_KIND: PayloadKind = PayloadKind::Array;

    fn migrations() -> &'static [MigrationStep] {
        CATEGORY_STEPS
    }

    fn default_value() -> Self::Value {
        default_categories()
    }

    fn validate(payload: &Value) -> Self::Value {
        payload
            .as_array()
            .map(|items| validate_categories(items))
            .unwrap_or_else(default_categories)
    }

    fn to_payload(value: &Self::Value) -> serde_json::Result<Value> {
        serde_json::to_value(value)
    }
}

fn categories_v0_to_v1(payload: Value) -> Value {
    match payload {
        Value::Array(items) => Value::Array(items.into_iter().filter(Value::is_string).collect()),
        _ => Value::Array(Vec::new()),
    }
}

#[cfg(test)]
#[path = "collections_tests.rs"]
mod collections_tests;
