use anyhow::{Context, Result};
use std::path::Path;

use crate::config::{take_flag, take_switch};
use crate::models::{find_by_name, is_iso_date, BudgetConfig, Transaction, TransactionType};
use crate::report::Totals;
use crate::session::Session;

pub fn as_cli(args: &[String], session: &mut Session) -> Result<()> {
    warn_degraded(session);

    let rest = args.get(2..).unwrap_or_default();
    let result = match args.get(1).map(String::as_str) {
        None | Some("summary" | "s") => cli_summary(session),
        Some("list" | "ls") => cli_list(session),
        Some("add") => cli_add(rest, session),
        Some("remove" | "rm") => cli_remove(rest, session),
        Some("budget") => cli_budget(rest, session),
        Some("categories" | "cats") => cli_categories(rest, session),
        Some("export") => cli_export(rest, session),
        Some("--help" | "-h" | "help") => {
            print_usage();
            Ok(())
        }
        Some("--version" | "-V" | "version") => {
            println!("budgetkeep {}", env!("CARGO_PKG_VERSION"));
            Ok(())
        }
        Some(other) => {
            print_usage();
            anyhow::bail!("Unknown command: {other}");
        }
    };

    if session.has_unsaved_changes() {
        eprintln!("Warning: changes are not saved (see the log for the storage error)");
    }
    result
}

fn print_usage() {
    println!("budgetkeep — local-only budget tracker");
    println!();
    println!("Usage: budgetkeep [--db <path>] [command]");
    println!();
    println!("Commands:");
    println!("  summary                       Budget, income, expenses and what is left (default)");
    println!("  list                          List transactions");
    println!("  add <name> <amount>           Add a transaction");
    println!("    --income                    Record income instead of an expense");
    println!("    --category <name>           Category label");
    println!("    --date <YYYY-MM-DD>         Date (default: today)");
    println!("  remove <id>                   Remove a transaction (a unique id prefix is enough)");
    println!("  budget [amount]               Show or set the budget");
    println!("    --start <YYYY-MM-DD>        Start of the budget period");
    println!("  categories [add|remove <name>]  List or edit categories");
    println!("  export [path]                 Export transactions to CSV");
    println!("  --help, -h                    Show this help");
    println!("  --version, -V                 Show version");
}

fn warn_degraded(session: &Session) {
    for (name, outcome) in session.degraded() {
        eprintln!("Warning: stored {name} could not be used as is ({outcome:?})");
    }
}

fn cli_summary(session: &mut Session) -> Result<()> {
    let budget = session.budget.get();
    let totals = Totals::compute(session.transactions.get(), budget)
        .context("Cannot summarize these amounts")?;
    let remaining = totals
        .remaining()
        .context("Cannot summarize these amounts")?;

    println!("budgetkeep — since {}", budget.start_date);
    println!("{}", "─".repeat(40));
    println!("  Budget:     ${:.2}", totals.budget);
    println!("  Income:     ${:.2}", totals.income);
    println!("  Expenses:   ${:.2}", totals.expenses);
    println!("  Remaining:  ${remaining:.2}");
    println!("  Total Txns: {}", totals.count);
    Ok(())
}

fn cli_list(session: &mut Session) -> Result<()> {
    let txns = session.transactions.get();
    if txns.is_empty() {
        println!("No transactions");
        return Ok(());
    }

    println!(
        "{:<8} {:<10} {:<24} {:<8} {:<16} {:>10}",
        "ID", "Date", "Name", "Type", "Category", "Amount"
    );
    println!("{}", "─".repeat(81));
    for txn in txns {
        println!(
            "{:<8} {:<10} {:<24} {:<8} {:<16} {:>10.2}",
            short_id(&txn.id),
            txn.date,
            txn.name,
            txn.kind.as_str(),
            txn.category.as_deref().unwrap_or("-"),
            txn.amount,
        );
    }
    Ok(())
}

fn cli_add(args: &[String], session: &mut Session) -> Result<()> {
    let mut args = args.to_vec();
    let kind = if take_switch(&mut args, "--income") {
        TransactionType::Income
    } else {
        TransactionType::Expense
    };
    let category = take_flag(&mut args, "--category")?;
    let date = take_flag(&mut args, "--date")?;

    let [name, amount] = args.as_slice() else {
        anyhow::bail!(
            "Usage: budgetkeep add <name> <amount> [--income] [--category <name>] [--date <YYYY-MM-DD>]"
        );
    };
    let amount = parse_amount(amount)?;

    let mut txn = Transaction::new(name.clone(), amount, kind);
    if let Some(date) = date {
        if !is_iso_date(&date) {
            anyhow::bail!("Invalid date '{date}', expected YYYY-MM-DD");
        }
        txn.date = date;
    }
    if let Some(category) = &category {
        if find_by_name(session.categories.get(), category).is_none() {
            println!("Note: '{category}' is not in your category list");
        }
    }
    txn.category = category;

    println!("Added {} {} ({})", txn.kind, txn.name, short_id(&txn.id));
    session.transactions.update(|txns| txns.push(txn));
    Ok(())
}

fn cli_remove(args: &[String], session: &mut Session) -> Result<()> {
    let Some(prefix) = args.first() else {
        anyhow::bail!("Usage: budgetkeep remove <id>");
    };

    let matches: Vec<&Transaction> = session
        .transactions
        .get()
        .iter()
        .filter(|t| t.id.starts_with(prefix.as_str()))
        .collect();
    let id = match matches.as_slice() {
        [] => anyhow::bail!("No transaction with id '{prefix}'"),
        [txn] => txn.id.clone(),
        _ => anyhow::bail!(
            "'{prefix}' matches {} transactions; use more of the id",
            matches.len()
        ),
    };

    session.transactions.update(|txns| txns.retain(|t| t.id != id));
    println!("Removed {}", short_id(&id));
    Ok(())
}

fn cli_budget(args: &[String], session: &mut Session) -> Result<()> {
    let mut args = args.to_vec();
    let start = take_flag(&mut args, "--start")?;

    if args.is_empty() && start.is_none() {
        let budget = session.budget.get();
        println!("Budget: ${:.2} since {}", budget.amount, budget.start_date);
        return Ok(());
    }

    let current = session.budget.get();
    let amount = match args.first() {
        Some(raw) => parse_amount(raw)?,
        None => current.amount,
    };
    let start_date = match start {
        Some(date) if is_iso_date(&date) => date,
        Some(date) => anyhow::bail!("Invalid date '{date}', expected YYYY-MM-DD"),
        None => current.start_date.clone(),
    };

    session.budget.set(BudgetConfig::new(amount, start_date));
    let budget = session.budget.get();
    println!("Budget set to ${:.2} since {}", budget.amount, budget.start_date);
    Ok(())
}

fn cli_categories(args: &[String], session: &mut Session) -> Result<()> {
    match args.first().map(String::as_str) {
        None => {
            for name in session.categories.get() {
                println!("{name}");
            }
            Ok(())
        }
        Some("add") => {
            let name = args[1..].join(" ");
            if name.trim().is_empty() {
                anyhow::bail!("Usage: budgetkeep categories add <name>");
            }
            if find_by_name(session.categories.get(), &name).is_some() {
                println!("Category '{name}' already exists");
                return Ok(());
            }
            session.categories.update(|cats| cats.push(name.trim().to_string()));
            println!("Added category '{}'", name.trim());
            Ok(())
        }
        Some("remove" | "rm") => {
            let name = args[1..].join(" ");
            let Some(existing) = find_by_name(session.categories.get(), &name).cloned() else {
                anyhow::bail!("No category named '{name}'");
            };
            session.categories.update(|cats| cats.retain(|c| *c != existing));
            println!("Removed category '{existing}'");
            Ok(())
        }
        Some(other) => anyhow::bail!("Unknown categories action: {other}"),
    }
}

fn cli_export(args: &[String], session: &mut Session) -> Result<()> {
    let output_path = args
        .first()
        .filter(|a| !a.starts_with('-'))
        .map(|a| shellexpand(a))
        .unwrap_or_else(|| {
            let home = std::env::var("HOME").unwrap_or_else(|_| ".".into());
            let today = crate::models::today();
            format!("{home}/budgetkeep-export-{today}.csv")
        });

    let count = export_to_csv(Path::new(&output_path), session.transactions.get())?;
    if count == 0 {
        println!("No transactions to export");
    } else {
        println!("Exported {count} transactions to {output_path}");
    }
    Ok(())
}

pub fn export_to_csv(path: &Path, txns: &[Transaction]) -> Result<usize> {
    let mut wtr = csv::Writer::from_path(path)
        .with_context(|| format!("Failed to create CSV file: {}", path.display()))?;
    wtr.write_record(["id", "date", "name", "type", "category", "amount"])?;
    for txn in txns {
        wtr.write_record([
            txn.id.as_str(),
            txn.date.as_str(),
            txn.name.as_str(),
            txn.kind.as_str(),
            txn.category.as_deref().unwrap_or(""),
            &txn.amount.to_string(),
        ])?;
    }
    wtr.flush().context("Failed to write CSV file")?;
    Ok(txns.len())
}

fn parse_amount(raw: &str) -> Result<f64> {
    let amount: f64 = raw
        .trim()
        .trim_start_matches('$')
        .replace(',', "")
        .parse()
        .with_context(|| format!("Invalid amount: {raw}"))?;
    if !amount.is_finite() || amount < 0.0 {
        anyhow::bail!("Amount must be a non-negative number, got {raw}");
    }
    Ok(amount)
}

fn short_id(id: &str) -> &str {
    id.get(..8).unwrap_or(id)
}

pub fn shellexpand(path: &str) -> String {
    if let Some(rest) = path.strip_prefix("~/") {
        let home = std::env::var("HOME").unwrap_or_else(|_| ".".into());
        format!("{home}/{rest}")
    } else {
        path.to_string()
    }
}

#[cfg(test)]
#[path = "cli_tests.rs"]
mod cli_tests;
