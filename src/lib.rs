//! Local budget data with versioned, self-migrating storage.
//!
//! Collections (transactions, the budget, categories) live in an embedded
//! key-value store. Whatever an older build left there is detected,
//! migrated forward and validated on load; every change is written back in
//! the current shape.

pub mod config;
pub mod db;
pub mod logging;
pub mod models;
pub mod persist;
pub mod report;
pub mod run;
pub mod session;
#[cfg(test)]
mod test_support;
