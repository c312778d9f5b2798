#![allow(clippy::unwrap_used)]

use super::*;

fn args(items: &[&str]) -> Vec<String> {
    items.iter().map(|s| s.to_string()).collect()
}

#[test]
fn test_take_flag() {
    let mut a = args(&["budgetkeep", "--db", "/tmp/x.db", "list"]);
    assert_eq!(take_flag(&mut a, "--db").unwrap().as_deref(), Some("/tmp/x.db"));
    assert_eq!(a, args(&["budgetkeep", "list"]));
}

#[test]
fn test_take_flag_absent() {
    let mut a = args(&["budgetkeep", "list"]);
    assert!(take_flag(&mut a, "--db").unwrap().is_none());
    assert_eq!(a.len(), 2);
}

#[test]
fn test_take_flag_missing_value() {
    let mut a = args(&["budgetkeep", "list", "--db"]);
    assert!(take_flag(&mut a, "--db").is_err());
}

#[test]
fn test_take_switch() {
    let mut a = args(&["add", "Pay", "100", "--income"]);
    assert!(take_switch(&mut a, "--income"));
    assert!(!take_switch(&mut a, "--income"));
    assert_eq!(a, args(&["add", "Pay", "100"]));
}

#[test]
fn test_resolve_prefers_flag() {
    let mut a = args(&["budgetkeep", "--db", "/tmp/flag.db"]);
    let config = Config::resolve(&mut a).unwrap();
    assert_eq!(config.db_path, Some(PathBuf::from("/tmp/flag.db")));
    assert_eq!(a, args(&["budgetkeep"]));
}
