#![allow(clippy::unwrap_used)]

use super::*;
use crate::config::AppPaths;

fn setup() -> (tempfile::TempDir, App, Ledger) {
    let dir = tempfile::tempdir().unwrap();
    let ledger = Ledger::open(&AppPaths::with_data_dir(dir.path())).unwrap();
    let mut app = App::new();
    app.refresh(&ledger).unwrap();
    (dir, app, ledger)
}

#[test]
fn test_levenshtein() {
    assert_eq!(levenshtein("quit", "quit"), 0);
    assert_eq!(levenshtein("quti", "quit"), 2);
    assert_eq!(levenshtein("", "add"), 3);
}

#[test]
fn test_find_closest_skips_aliases() {
    assert_eq!(find_closest("expnses"), "expenses");
    assert_eq!(find_closest("budgte"), "budget");
}

#[test]
fn test_help_entries_list_full_names_once() {
    let names: Vec<&str> = help_entries().into_iter().map(|(name, _)| name).collect();
    assert_eq!(
        names,
        vec![
            "add",
            "budget",
            "dashboard",
            "delete",
            "expenses",
            "export",
            "help",
            "monthly",
            "quit",
            "reload"
        ]
    );
}

#[test]
fn test_unknown_command_suggests() {
    let (_dir, mut app, mut ledger) = setup();
    handle_command("quti", &mut app, &mut ledger).unwrap();
    assert_eq!(
        app.status_message,
        "Unknown command: :quti. Did you mean :quit?"
    );
    assert!(app.running);
}

#[test]
fn test_quit() {
    let (_dir, mut app, mut ledger) = setup();
    handle_command("q", &mut app, &mut ledger).unwrap();
    assert!(!app.running);
}

#[test]
fn test_screen_switch() {
    let (_dir, mut app, mut ledger) = setup();
    handle_command("dashboard", &mut app, &mut ledger).unwrap();
    assert_eq!(app.screen, Screen::Dashboard);
    handle_command("m", &mut app, &mut ledger).unwrap();
    assert_eq!(app.screen, Screen::Monthly);
}

#[test]
fn test_add_refreshes_snapshot() {
    let (_dir, mut app, mut ledger) = setup();
    app.screen = Screen::Monthly;
    handle_command("add 250 food Lunch with team", &mut app, &mut ledger).unwrap();

    assert_eq!(app.screen, Screen::Expenses);
    assert_eq!(app.snapshot.expenses.len(), 1);
    let added = &app.snapshot.expenses[0];
    assert_eq!(added.category, "Food");
    assert_eq!(added.description, "Lunch with team");
    assert_eq!(added.amount, "250");
    assert!(app.status_message.starts_with("Added: Lunch with team"));
}

#[test]
fn test_add_validation_message_shown() {
    let (_dir, mut app, mut ledger) = setup();
    handle_command("add abc Food Lunch", &mut app, &mut ledger).unwrap();
    assert_eq!(app.status_message, "Amount must be a number");

    handle_command("add 250 Food", &mut app, &mut ledger).unwrap();
    assert_eq!(app.status_message, "All fields required");
    assert!(ledger.expenses().unwrap().is_empty());
}

#[test]
fn test_add_without_args_shows_usage() {
    let (_dir, mut app, mut ledger) = setup();
    handle_command("add", &mut app, &mut ledger).unwrap();
    assert!(app.status_message.starts_with("Usage: :add"));
    assert!(app.status_message.contains("Food, Travel, Shopping, Other"));
}

#[test]
fn test_budget_reports_remaining() {
    let (_dir, mut app, mut ledger) = setup();
    handle_command("budget 3000", &mut app, &mut ledger).unwrap();
    assert_eq!(app.status_message, "Remaining this month: ₹3,000.00");
    assert_eq!(app.snapshot.budget, ledger.budget());
}

#[test]
fn test_budget_rejects_text() {
    let (_dir, mut app, mut ledger) = setup();
    handle_command("budget plenty", &mut app, &mut ledger).unwrap();
    assert_eq!(app.status_message, "Enter numeric budget");
    assert_eq!(ledger.budget(), None);
}

#[test]
fn test_delete_asks_for_confirmation() {
    let (_dir, mut app, mut ledger) = setup();
    handle_command("add 250 Food Lunch", &mut app, &mut ledger).unwrap();
    handle_command("delete", &mut app, &mut ledger).unwrap();

    assert_eq!(app.input_mode, InputMode::Confirm);
    assert!(matches!(
        app.pending_action,
        Some(PendingAction::DeleteExpense(ref e)) if e.description == "Lunch"
    ));
    // Nothing removed until confirmed
    assert_eq!(ledger.expenses().unwrap().len(), 1);
}

#[test]
fn test_delete_requires_expenses_screen() {
    let (_dir, mut app, mut ledger) = setup();
    handle_command("add 250 Food Lunch", &mut app, &mut ledger).unwrap();
    app.screen = Screen::Dashboard;
    handle_command("delete", &mut app, &mut ledger).unwrap();
    assert_eq!(app.input_mode, InputMode::Normal);
    assert!(app.pending_action.is_none());
}

#[test]
fn test_export_empty_ledger() {
    let (_dir, mut app, mut ledger) = setup();
    handle_command("export", &mut app, &mut ledger).unwrap();
    assert_eq!(app.status_message, "No expenses to export");
}

#[test]
fn test_export_to_path() {
    let (dir, mut app, mut ledger) = setup();
    handle_command("add 250 Food Lunch", &mut app, &mut ledger).unwrap();
    let target = dir.path().join("out.csv");
    handle_command(
        &format!("export {}", target.display()),
        &mut app,
        &mut ledger,
    )
    .unwrap();
    assert!(app.status_message.starts_with("Exported 1 expenses"));
    assert!(target.exists());
}
