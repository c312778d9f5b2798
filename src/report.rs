use rust_decimal::prelude::FromPrimitive;
use rust_decimal::Decimal;

use crate::models::{BudgetConfig, Transaction};

/// Amounts that cannot be summed exactly.
#[derive(Debug, Clone, PartialEq, thiserror::Error)]
pub enum TotalsError {
    #[error("amount {amount} is too large to total")]
    OutOfRange { amount: f64 },
    #[error("{0} total is too large to represent")]
    Overflow(&'static str),
}

/// Budget period totals, summed in decimal so cents do not drift.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Totals {
    pub budget: Decimal,
    pub income: Decimal,
    pub expenses: Decimal,
    pub count: usize,
}

impl Totals {
    /// Sum the transactions dated on or after the budget's start date.
    pub fn compute(
        transactions: &[Transaction],
        budget: &BudgetConfig,
    ) -> Result<Self, TotalsError> {
        let mut totals = Self {
            budget: to_decimal(budget.amount)?,
            income: Decimal::ZERO,
            expenses: Decimal::ZERO,
            count: 0,
        };

        // ISO dates compare correctly as strings
        for txn in transactions
            .iter()
            .filter(|t| t.date.as_str() >= budget.start_date.as_str())
        {
            let amount = to_decimal(txn.amount)?;
            if txn.is_income() {
                totals.income = totals
                    .income
                    .checked_add(amount)
                    .ok_or(TotalsError::Overflow("income"))?;
            } else {
                totals.expenses = totals
                    .expenses
                    .checked_add(amount)
                    .ok_or(TotalsError::Overflow("expense"))?;
            }
            totals.count += 1;
        }

        Ok(totals)
    }

    pub fn remaining(&self) -> Result<Decimal, TotalsError> {
        self.budget
            .checked_add(self.income)
            .and_then(|available| available.checked_sub(self.expenses))
            .ok_or(TotalsError::Overflow("remaining"))
    }
}

fn to_decimal(amount: f64) -> Result<Decimal, TotalsError> {
    Decimal::from_f64(amount).ok_or(TotalsError::OutOfRange { amount })
}

#[cfg(test)]
#[path = "report_tests.rs"]
mod report_tests;
