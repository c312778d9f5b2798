#![allow(clippy::unwrap_used)]

use std::cell::RefCell;
use std::rc::Rc;

use super::*;
use crate::db::{MemoryStore, SqliteStore, UnavailableStore};
use crate::models::{default_categories, Transaction, TransactionType};
use crate::persist::{Categories, Transactions};
use crate::test_support::capture_logs;

fn memory() -> (Rc<MemoryStore>, Rc<dyn KeyValueStore>) {
    let mem = Rc::new(MemoryStore::new());
    let backend: Rc<dyn KeyValueStore> = mem.clone();
    (mem, backend)
}

fn coffee() -> Transaction {
    Transaction::new("Coffee".into(), 5.0, TransactionType::Expense)
}

#[test]
fn test_open_seeds_from_storage() {
    let (mem, backend) = memory();
    mem.insert_raw("categories", r#"{"version": 1, "categories": ["Rent"]}"#);

    let store = CollectionStore::<Categories>::open(backend);
    assert_eq!(store.get(), &vec!["Rent".to_string()]);
    assert_eq!(store.load_outcome(), &LoadOutcome::Current { version: 1 });
}

#[test]
fn test_set_persists_and_survives_reopen() {
    let (_mem, backend) = memory();
    let txn = coffee();

    let mut store = CollectionStore::<Transactions>::open(backend.clone());
    store.set(vec![txn.clone()]);
    assert!(store.last_persist_error().is_none());

    let reopened = CollectionStore::<Transactions>::open(backend);
    assert_eq!(reopened.get(), &vec![txn]);
}

#[test]
fn test_removal_is_absence_from_next_write() {
    let (_mem, backend) = memory();
    let mut store = CollectionStore::<Transactions>::open(backend.clone());
    let first = coffee();
    let second = Transaction::new("Lunch".into(), 12.0, TransactionType::Expense);
    store.set(vec![first.clone(), second.clone()]);

    store.update(|txns| txns.retain(|t| t.id != first.id));

    let reopened = CollectionStore::<Transactions>::open(backend);
    assert_eq!(reopened.get(), &vec![second]);
}

#[test]
fn test_write_failure_keeps_value_in_memory() {
    let (mem, backend) = memory();
    let mut store = CollectionStore::<Transactions>::open(backend);
    mem.set_fail_writes(true);

    let txn = coffee();
    let (_, logs) = capture_logs(|| store.set(vec![txn.clone()]));

    assert_eq!(store.get(), &vec![txn.clone()]);
    assert!(matches!(
        store.last_persist_error(),
        Some(PersistenceError::StoreUnavailable(_))
    ));
    assert!(logs.contains("ERROR"), "{logs}");
    assert!(logs.contains("collection_persist_failed"), "{logs}");
    assert!(mem.get("expenses").unwrap().is_none());

    // The next successful write clears the error and saves everything
    mem.set_fail_writes(false);
    store.update(|txns| txns.push(coffee()));
    assert!(store.last_persist_error().is_none());
    assert!(mem.get("expenses").unwrap().unwrap().contains(&txn.id));
}

#[test]
fn test_quota_failure_keeps_value_in_memory() {
    let mem = Rc::new(MemoryStore::with_quota(64));
    let backend: Rc<dyn KeyValueStore> = mem.clone();
    let mut store = CollectionStore::<Categories>::open(backend);

    let many: Vec<String> = (0..50).map(|i| format!("Category {i}")).collect();
    store.set(many.clone());

    assert_eq!(store.get(), &many);
    assert!(matches!(
        store.last_persist_error(),
        Some(PersistenceError::WriteFailure { .. })
    ));
}

#[test]
fn test_unavailable_backend_runs_from_defaults() {
    let backend: Rc<dyn KeyValueStore> = Rc::new(UnavailableStore::new("read-only session"));
    let mut store = CollectionStore::<Categories>::open(backend);

    assert_eq!(store.get(), &default_categories());
    assert!(store.load_outcome().is_degraded());

    store.update(|cats| cats.push("Rent".into()));
    assert_eq!(store.get().last().map(String::as_str), Some("Rent"));
    assert!(store.last_persist_error().is_some());
}

#[test]
fn test_set_normalizes_value() {
    let (_mem, backend) = memory();
    let mut store = CollectionStore::<Transactions>::open(backend);
    let mut txn = coffee();
    txn.amount = -5.0;
    txn.date = "2024-1-1".into();
    store.set(vec![txn]);

    assert_eq!(store.get()[0].amount, 5.0);
    assert_eq!(store.get()[0].date, crate::models::today());
}

#[test]
fn test_subscribers_are_notified_in_order() {
    let (_mem, backend) = memory();
    let mut store = CollectionStore::<Categories>::open(backend);
    let seen = Rc::new(RefCell::new(Vec::new()));

    let first = seen.clone();
    store.subscribe(move |cats: &Vec<String>| first.borrow_mut().push(format!("a:{}", cats.len())));
    let second = seen.clone();
    store.subscribe(move |cats: &Vec<String>| second.borrow_mut().push(format!("b:{}", cats.len())));

    store.set(vec!["Rent".into()]);
    assert_eq!(*seen.borrow(), vec!["a:1", "b:1"]);
}

#[test]
fn test_subscribers_notified_even_when_write_fails() {
    let (mem, backend) = memory();
    let mut store = CollectionStore::<Categories>::open(backend);
    let count = Rc::new(RefCell::new(0));
    let counter = count.clone();
    store.subscribe(move |_| *counter.borrow_mut() += 1);

    mem.set_fail_writes(true);
    store.set(vec![]);
    assert_eq!(*count.borrow(), 1);
}

#[test]
fn test_unsubscribe() {
    let (_mem, backend) = memory();
    let mut store = CollectionStore::<Categories>::open(backend);
    let count = Rc::new(RefCell::new(0));
    let counter = count.clone();
    let id = store.subscribe(move |_| *counter.borrow_mut() += 1);

    store.set(vec!["A".into()]);
    assert!(store.unsubscribe(id));
    assert!(!store.unsubscribe(id));
    store.set(vec!["B".into()]);
    assert_eq!(*count.borrow(), 1);
}

// ── Write-back on open ────────────────────────────────────────

#[test]
fn test_ids_minted_for_legacy_records_survive_reopen() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("budgetkeep.db");
    {
        let seed = SqliteStore::open(&path, 0).unwrap();
        seed.set("expenses", r#"[{"name":"Coffee","amount":5}]"#)
            .unwrap();
    }

    let open = || {
        let backend: Rc<dyn KeyValueStore> = Rc::new(SqliteStore::open(&path, 0).unwrap());
        CollectionStore::<Transactions>::open(backend)
    };
    let first = open();
    assert_eq!(first.load_outcome(), &LoadOutcome::Migrated { from: 0, to: 1 });
    assert!(first.last_persist_error().is_none());
    let first_id = first.get()[0].id.clone();
    drop(first);
    let second = open();
    assert_eq!(second.load_outcome(), &LoadOutcome::Current { version: 1 });
    assert_eq!(second.get()[0].id, first_id);
    assert_eq!(second.get()[0].name, "Coffee");
}

#[test]
fn test_repaired_current_records_are_written_back() {
    let (mem, backend) = memory();
    mem.insert_raw(
        "expenses",
        r#"{"version": 1, "transactions": [{"name": "Tea", "amount": 2.0, "date": "2024-01-01", "type": "expense"}]}"#,
    );

    let store = CollectionStore::<Transactions>::open(backend.clone());
    let minted = store.get()[0].id.clone();
    assert!(mem.get("expenses").unwrap().unwrap().contains(&minted));

    let reopened = CollectionStore::<Transactions>::open(backend);
    assert_eq!(reopened.get()[0].id, minted);
}

#[test]
fn test_clean_current_data_is_not_rewritten() {
    let (mem, backend) = memory();
    let raw = r#"{"version": 1, "categories": ["Rent"]}"#;
    mem.insert_raw("categories", raw);

    let _store = CollectionStore::<Categories>::open(backend);
    assert_eq!(mem.get("categories").unwrap().as_deref(), Some(raw));
}

#[test]
fn test_future_version_data_is_not_rewritten_on_open() {
    let (mem, backend) = memory();
    let raw = r#"{"version": 3, "categories": ["Rent", 4]}"#;
    mem.insert_raw("categories", raw);

    let store = CollectionStore::<Categories>::open(backend);
    assert_eq!(store.get(), &vec!["Rent".to_string()]);
    assert_eq!(mem.get("categories").unwrap().as_deref(), Some(raw));
}

#[test]
fn test_failed_write_back_is_logged_and_recorded() {
    let (mem, backend) = memory();
    mem.insert_raw("expenses", r#"[{"name":"Coffee","amount":5}]"#);
    mem.set_fail_writes(true);

    let (store, logs) = capture_logs(|| CollectionStore::<Transactions>::open(backend));

    assert_eq!(store.get().len(), 1);
    assert!(store.last_persist_error().is_some());
    assert!(logs.contains("collection_persist_failed"), "{logs}");
    assert_eq!(
        mem.get("expenses").unwrap().as_deref(),
        Some(r#"[{"name":"Coffee","amount":5}]"#)
    );
}
