mod budget;
mod category;
mod fields;
mod transaction;

pub use budget::{BudgetConfig, DEFAULT_BUDGET_AMOUNT};
pub use category::{default_categories, find_by_name, validate_categories};
pub use fields::{is_iso_date, today};
pub use transaction::new_id;
pub use transaction::{Transaction, TransactionType, DEFAULT_NAME};
