use anyhow::{Context, Result};
use chrono::{Local, NaiveDateTime};
use std::fmt::Write as _;

use crate::aggregate::{trend_series, MonthTotals};
use crate::config;
use crate::export;
use crate::ledger::{high_value_flag, DeleteOutcome, Ledger, Snapshot};
use crate::models::{Category, Expense};
use crate::ui::util::{format_amount, format_stored_amount, remaining_label, truncate};

pub(crate) fn as_cli(args: &[String], ledger: &mut Ledger) -> Result<()> {
    match args[1].as_str() {
        "add" | "a" => cli_add(&args[2..], ledger),
        "list" | "ls" => cli_list(ledger),
        "delete" | "rm" => cli_delete(&args[2..], ledger),
        "budget" | "b" => cli_budget(&args[2..], ledger),
        "summary" | "s" => cli_summary(ledger),
        "monthly" | "m" => cli_monthly(&args[2..], ledger),
        "trend" => cli_trend(ledger),
        "export" => cli_export(&args[2..], ledger),
        "--help" | "-h" | "help" => {
            print_usage();
            Ok(())
        }
        "--version" | "-V" | "version" => {
            println!("expense-ledger {}", env!("CARGO_PKG_VERSION"));
            Ok(())
        }
        other => {
            print_usage();
            anyhow::bail!("Unknown command: {other}");
        }
    }
}

fn print_usage() {
    println!("expense-ledger: local expense tracker with a monthly budget");
    println!();
    println!("Usage: expense-ledger [command]");
    println!();
    println!("Commands:");
    println!("  (none)                                  Launch interactive TUI");
    println!("  add <amount> <category> <description>   Record an expense");
    println!("  list                                    List expenses (* = high value)");
    println!("  delete <date> <time> <amount> <category> <description>");
    println!("                                          Delete the first matching expense");
    println!("  budget [amount]                         Show or set the monthly budget");
    println!("  summary                                 Totals for the current month");
    println!("  monthly [month]                         Breakdown by month, category and day");
    println!("  trend                                   Daily totals, oldest first");
    println!("  export [path]                           Export to .xlsx (default) or .csv");
    println!("  --help, -h                              Show this help");
    println!("  --version, -V                           Show version");
    println!();
    let presets: Vec<&str> = Category::all().iter().map(|c| c.as_str()).collect();
    println!("Categories: {}", presets.join(", "));
    println!(
        "Data directory: ${} or the platform data dir",
        config::DATA_DIR_ENV
    );
}

fn cli_add(args: &[String], ledger: &mut Ledger) -> Result<()> {
    if args.len() < 3 {
        anyhow::bail!("Usage: expense-ledger add <amount> <category> <description>");
    }
    let description = args[2..].join(" ");
    let added = ledger.add_expense(&description, &args[0], &args[1])?;
    println!(
        "Added {} {} ({}) at {}",
        format_stored_amount(&added.amount),
        added.description,
        added.category,
        added.timestamp
    );
    Ok(())
}

fn cli_list(ledger: &mut Ledger) -> Result<()> {
    let snap = ledger.snapshot(Local::now().naive_local())?;
    if snap.expenses.is_empty() {
        println!("No expenses recorded");
        return Ok(());
    }
    print!("{}", format_list(&snap.expenses));
    Ok(())
}

fn cli_delete(args: &[String], ledger: &mut Ledger) -> Result<()> {
    let target = parse_delete_target(args).ok_or_else(|| {
        anyhow::anyhow!(
            "Usage: expense-ledger delete <YYYY-MM-DD> <HH:MM> <amount> <category> <description>"
        )
    })?;
    if target.timestamp_value().is_err() {
        anyhow::bail!("Expected <YYYY-MM-DD> <HH:MM>, got '{}'", target.timestamp);
    }
    match ledger.delete_expense(&target)? {
        DeleteOutcome::Removed => println!("Deleted {} ({})", target.description, target.amount),
        DeleteOutcome::NotFound => println!("No matching expense; nothing removed"),
    }
    Ok(())
}

/// `<date> <time> <amount> <category> <description…>`; a quoted
/// `"<date> <time>"` first argument is accepted too.
fn parse_delete_target(args: &[String]) -> Option<Expense> {
    let (timestamp, rest) = match args.first() {
        Some(first) if first.contains(' ') => (first.clone(), &args[1..]),
        Some(first) => (format!("{first} {}", args.get(1)?), args.get(2..)?),
        None => return None,
    };
    if rest.len() < 3 {
        return None;
    }
    Some(Expense {
        timestamp,
        description: rest[2..].join(" "),
        amount: rest[0].clone(),
        category: Category::normalize(&rest[1]),
    })
}

fn cli_budget(args: &[String], ledger: &mut Ledger) -> Result<()> {
    let now = Local::now().naive_local();
    if let Some(value) = args.first() {
        let remaining = ledger.set_budget_at(value, now)?;
        println!("{}", remaining_label(Some(remaining)));
        return Ok(());
    }
    match ledger.budget() {
        Some(budget) => {
            println!("Monthly budget: {}", format_amount(budget));
            println!("{}", remaining_label(ledger.remaining(now)?));
        }
        None => println!("No budget set"),
    }
    Ok(())
}

fn cli_summary(ledger: &mut Ledger) -> Result<()> {
    let now = Local::now().naive_local();
    let snap = ledger.snapshot(now)?;
    print!("{}", format_summary(&snap, now));
    Ok(())
}

fn cli_monthly(args: &[String], ledger: &mut Ledger) -> Result<()> {
    let snap = ledger.snapshot(Local::now().naive_local())?;
    if snap.monthly.is_empty() {
        println!("No expenses recorded");
        return Ok(());
    }
    match args.first() {
        Some(month) => match snap.monthly.get(month) {
            Some(totals) => print!("{}", format_month(month, totals)),
            None => println!("No expenses in {month}"),
        },
        None => print!("{}", format_monthly(&snap)),
    }
    Ok(())
}

fn cli_trend(ledger: &mut Ledger) -> Result<()> {
    let snap = ledger.snapshot(Local::now().naive_local())?;
    if snap.daily_totals.is_empty() {
        println!("No expenses recorded");
        return Ok(());
    }
    print!("{}", format_trend(&snap));
    Ok(())
}

fn cli_export(args: &[String], ledger: &mut Ledger) -> Result<()> {
    let records = ledger.expenses()?;
    if records.is_empty() {
        println!("No expenses to export");
        return Ok(());
    }
    let path = args
        .first()
        .map(|a| config::shellexpand(a))
        .unwrap_or_else(config::default_export_path);
    let count = export::export(&records, &path)
        .with_context(|| format!("Failed to export to {}", path.display()))?;
    println!("Exported {count} expenses to {}", path.display());
    Ok(())
}

// ── Formatting ───────────────────────────────────────────────

pub(crate) fn format_list(expenses: &[Expense]) -> String {
    let mut out = String::new();
    let _ = writeln!(
        out,
        "  {:<17} {:<30} {:>14}  Category",
        "Date", "Description", "Amount"
    );
    let _ = writeln!(out, "{}", "─".repeat(76));
    for e in expenses {
        let marker = if high_value_flag(e) { '*' } else { ' ' };
        let _ = writeln!(
            out,
            "{marker} {:<17} {:<30} {:>14}  {}",
            e.timestamp,
            truncate(&e.description, 30),
            format_stored_amount(&e.amount),
            e.category
        );
    }
    out
}

/// `now` must be the instant `snap` was taken at so the heading names the
/// month the figures cover.
pub(crate) fn format_summary(snap: &Snapshot, now: NaiveDateTime) -> String {
    let mut out = String::new();
    let month = now.format("%B %Y");
    let _ = writeln!(out, "Expense summary: {month}");
    let _ = writeln!(out, "{}", "─".repeat(40));
    let _ = writeln!(out, "  Spent this month: {}", format_amount(snap.month_spent));
    let budget = snap
        .budget
        .map_or_else(|| "not set".to_string(), format_amount);
    let _ = writeln!(out, "  Monthly budget:   {budget}");
    let _ = writeln!(out, "  {}", remaining_label(snap.remaining));
    let _ = writeln!(
        out,
        "  Top category:     {}",
        snap.highest_category.as_deref().unwrap_or("none")
    );
    let _ = writeln!(out, "  Transactions:     {}", snap.transaction_count);

    if !snap.category_totals.is_empty() {
        let _ = writeln!(out);
        let _ = writeln!(out, "Spending by Category:");
        for (name, amount) in &snap.category_totals {
            let _ = writeln!(out, "  {name:<24} {}", format_amount(*amount));
        }
    }
    out
}

/// One line per day with a bar scaled against the busiest day.
pub(crate) fn format_trend(snap: &Snapshot) -> String {
    const WIDTH: f64 = 40.0;
    let (dates, values) = trend_series(&snap.daily_totals);
    let max = values.iter().copied().fold(0.0_f64, f64::max);

    let mut out = String::new();
    for ((date, value), total) in dates.iter().zip(&values).zip(snap.daily_totals.values()) {
        let len = if max > 0.0 && *value > 0.0 {
            ((value / max) * WIDTH).round() as usize
        } else {
            0
        };
        let _ = writeln!(out, "{date}  {:>14}  {}", format_amount(*total), "█".repeat(len));
    }
    out
}

pub(crate) fn format_monthly(snap: &Snapshot) -> String {
    snap.monthly
        .iter()
        .map(|(name, totals)| format_month(name, totals))
        .collect()
}

pub(crate) fn format_month(name: &str, totals: &MonthTotals) -> String {
    let mut out = String::new();
    let _ = writeln!(out, "{name}: {}", format_amount(totals.total()));
    for (category, amount) in &totals.by_category {
        let _ = writeln!(out, "  {category:<22} {}", format_amount(*amount));
    }
    for (day, amount) in &totals.by_day {
        let _ = writeln!(out, "    day {day:>2}              {}", format_amount(*amount));
    }
    out
}

#[cfg(test)]
#[path = "cli_tests.rs"]
mod tests;
