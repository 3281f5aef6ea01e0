use std::collections::HashMap;
use std::sync::LazyLock;

use tracing::warn;

use super::app::{App, InputMode, PendingAction, Screen};
use super::util::{format_amount, remaining_label};
use crate::config;
use crate::error::LedgerError;
use crate::export;
use crate::ledger::Ledger;
use crate::models::Category;

pub(crate) struct Command {
    pub(crate) description: &'static str,
    pub(crate) run: fn(&str, &mut App, &mut Ledger) -> anyhow::Result<()>,
}

macro_rules! register_command {
    ($name:expr, $desc:expr, $func:expr, $registry:expr) => {{
        $registry.insert(
            $name,
            Command {
                description: $desc,
                run: $func,
            },
        );
    }};
}

pub(crate) static COMMANDS: LazyLock<HashMap<&str, Command>> = LazyLock::new(|| {
    let mut r: HashMap<&str, Command> = HashMap::new();

    register_command!("q", "Quit", cmd_quit, r);
    register_command!("quit", "Quit", cmd_quit, r);
    register_command!("e", "Go to Expenses", cmd_expenses, r);
    register_command!("expenses", "Go to Expenses", cmd_expenses, r);
    register_command!("d", "Go to Dashboard", cmd_dashboard, r);
    register_command!("dashboard", "Go to Dashboard", cmd_dashboard, r);
    register_command!("m", "Go to Monthly breakdown", cmd_monthly, r);
    register_command!("monthly", "Go to Monthly breakdown", cmd_monthly, r);
    register_command!("help", "Show available commands", cmd_help, r);
    register_command!("h", "Show available commands", cmd_help, r);
    register_command!(
        "add",
        "Add expense (e.g. :add 250 Food Lunch with team)",
        cmd_add,
        r
    );
    register_command!("a", "Add expense (e.g. :a 250 Food Lunch)", cmd_add, r);
    register_command!(
        "budget",
        "Set monthly budget (e.g. :budget 3000)",
        cmd_budget,
        r
    );
    register_command!("b", "Set monthly budget (e.g. :b 3000)", cmd_budget, r);
    register_command!("delete", "Delete selected expense", cmd_delete, r);
    register_command!(
        "export",
        "Export to Excel or CSV (e.g. :export ~/spend.xlsx)",
        cmd_export,
        r
    );
    register_command!("reload", "Re-read the ledger file", cmd_reload, r);

    r
});

pub(crate) fn handle_command(input: &str, app: &mut App, ledger: &mut Ledger) -> anyhow::Result<()> {
    let trimmed = input.trim();
    let mut parts = trimmed.splitn(2, ' ');
    let cmd_name = parts.next().unwrap_or("");
    let args = parts.next().unwrap_or("").trim();

    if let Some(cmd) = COMMANDS.get(cmd_name) {
        if let Err(e) = (cmd.run)(args, app, ledger) {
            let validation = e
                .downcast_ref::<LedgerError>()
                .is_some_and(LedgerError::is_validation);
            if validation {
                app.set_status(e.to_string());
            } else {
                warn!(command = cmd_name, error = %format!("{e:#}"), "command failed");
                app.set_status(format!("Error: {e:#}"));
            }
        }
        app.sync(ledger)?;
    } else {
        // Try fuzzy match
        let suggestion = find_closest(cmd_name);
        app.set_status(format!(
            "Unknown command: :{cmd_name}. Did you mean :{suggestion}?"
        ));
    }

    Ok(())
}

fn find_closest(input: &str) -> String {
    let mut names: Vec<&&str> = COMMANDS.keys().filter(|k| k.len() > 1).collect();
    // HashMap order is random; sort so ties resolve the same way every time
    names.sort();
    names
        .into_iter()
        .min_by_key(|k| levenshtein(input, k))
        .map_or_else(|| "help".to_string(), |k| k.to_string())
}

/// Full-length command names and descriptions, sorted, for the help popup.
pub(crate) fn help_entries() -> Vec<(&'static str, &'static str)> {
    let mut entries: Vec<(&'static str, &'static str)> = COMMANDS
        .iter()
        .filter(|(name, _)| name.len() > 1)
        .map(|(name, cmd)| (*name, cmd.description))
        .collect();
    entries.sort_unstable();
    entries
}

fn levenshtein(a: &str, b: &str) -> usize {
    let (a, b) = (a.as_bytes(), b.as_bytes());
    let mut prev: Vec<usize> = (0..=b.len()).collect();
    let mut curr = vec![0; b.len() + 1];

    for i in 1..=a.len() {
        curr[0] = i;
        for j in 1..=b.len() {
            let cost = if a[i - 1] == b[j - 1] { 0 } else { 1 };
            curr[j] = (prev[j] + 1).min(curr[j - 1] + 1).min(prev[j - 1] + cost);
        }
        std::mem::swap(&mut prev, &mut curr);
    }

    prev[b.len()]
}

// ── Command implementations ──────────────────────────────────

fn cmd_quit(_args: &str, app: &mut App, _ledger: &mut Ledger) -> anyhow::Result<()> {
    app.running = false;
    Ok(())
}

fn cmd_expenses(_args: &str, app: &mut App, ledger: &mut Ledger) -> anyhow::Result<()> {
    app.screen = Screen::Expenses;
    app.refresh(ledger)
}

fn cmd_dashboard(_args: &str, app: &mut App, ledger: &mut Ledger) -> anyhow::Result<()> {
    app.screen = Screen::Dashboard;
    app.refresh(ledger)
}

fn cmd_monthly(_args: &str, app: &mut App, ledger: &mut Ledger) -> anyhow::Result<()> {
    app.screen = Screen::Monthly;
    app.refresh(ledger)
}

fn cmd_help(_args: &str, app: &mut App, _ledger: &mut Ledger) -> anyhow::Result<()> {
    app.show_help = true;
    Ok(())
}

fn cmd_reload(_args: &str, app: &mut App, ledger: &mut Ledger) -> anyhow::Result<()> {
    app.refresh(ledger)?;
    app.set_status(format!("{} expenses loaded", app.snapshot.transaction_count));
    Ok(())
}

fn cmd_add(args: &str, app: &mut App, ledger: &mut Ledger) -> anyhow::Result<()> {
    if args.is_empty() {
        let presets: Vec<&str> = Category::all().iter().map(|c| c.as_str()).collect();
        app.set_status(format!(
            "Usage: :add <amount> <category> <description>. Categories: {}",
            presets.join(", ")
        ));
        return Ok(());
    }

    let mut parts = args.splitn(3, char::is_whitespace);
    let amount = parts.next().unwrap_or("");
    let category = parts.next().unwrap_or("");
    let description = parts.next().unwrap_or("");

    ledger.add_expense(description, amount, category)?;
    app.screen = Screen::Expenses;
    Ok(())
}

fn cmd_budget(args: &str, app: &mut App, ledger: &mut Ledger) -> anyhow::Result<()> {
    if args.is_empty() {
        let msg = match ledger.budget() {
            Some(b) => format!(
                "Budget {}. {}",
                format_amount(b),
                remaining_label(app.snapshot.remaining)
            ),
            None => "No budget set. Usage: :budget <amount>".to_string(),
        };
        app.set_status(msg);
        return Ok(());
    }

    let remaining = ledger.set_budget(args)?;
    app.refresh(ledger)?;
    app.set_status(remaining_label(Some(remaining)));
    // Status already shows the remaining amount; drop the generic event text
    ledger.drain_events();
    Ok(())
}

fn cmd_delete(_args: &str, app: &mut App, _ledger: &mut Ledger) -> anyhow::Result<()> {
    if app.screen != Screen::Expenses || app.snapshot.expenses.is_empty() {
        app.set_status("Navigate to Expenses and select one first");
        return Ok(());
    }

    if let Some(expense) = app.selected_expense().cloned() {
        app.confirm_message = format!(
            "Delete '{}' ({}, {})?",
            expense.description, expense.category, expense.amount
        );
        app.pending_action = Some(PendingAction::DeleteExpense(expense));
        app.input_mode = InputMode::Confirm;
    }

    Ok(())
}

fn cmd_export(args: &str, app: &mut App, ledger: &mut Ledger) -> anyhow::Result<()> {
    let records = ledger.expenses()?;
    if records.is_empty() {
        app.set_status("No expenses to export");
        return Ok(());
    }

    let path = if args.is_empty() {
        config::default_export_path()
    } else {
        config::shellexpand(args)
    };

    let count = export::export(&records, &path)?;
    app.set_status(format!("Exported {count} expenses to {}", path.display()));
    Ok(())
}

#[cfg(test)]
#[path = "commands_tests.rs"]
mod tests;
