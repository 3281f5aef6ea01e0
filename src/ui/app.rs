use anyhow::Result;
use chrono::Local;

use crate::ledger::{Ledger, LedgerEvent, Snapshot};
use crate::models::Expense;
use crate::ui::util::{format_amount, ListCursor};

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub(crate) enum Screen {
    Expenses,
    Dashboard,
    Monthly,
}

impl Screen {
    pub(crate) fn all() -> &'static [Screen] {
        &[Self::Expenses, Self::Dashboard, Self::Monthly]
    }

    pub(crate) fn next(self) -> Self {
        match self {
            Self::Expenses => Self::Dashboard,
            Self::Dashboard => Self::Monthly,
            Self::Monthly => Self::Expenses,
        }
    }
}

impl std::fmt::Display for Screen {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Expenses => write!(f, "Expenses"),
            Self::Dashboard => write!(f, "Dashboard"),
            Self::Monthly => write!(f, "Monthly"),
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub(crate) enum InputMode {
    Normal,
    Command,
    Confirm,
}

impl std::fmt::Display for InputMode {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Normal => write!(f, "NORMAL"),
            Self::Command => write!(f, "COMMAND"),
            Self::Confirm => write!(f, "CONFIRM"),
        }
    }
}

/// Pending action that requires user confirmation.
#[derive(Debug, Clone)]
pub(crate) enum PendingAction {
    DeleteExpense(Expense),
}

pub(crate) struct App {
    pub(crate) running: bool,
    pub(crate) screen: Screen,
    pub(crate) input_mode: InputMode,
    pub(crate) command_input: String,
    pub(crate) status_message: String,
    pub(crate) show_help: bool,

    pub(crate) snapshot: Snapshot,

    // Expenses list
    pub(crate) expense_cursor: ListCursor,

    // Monthly table
    pub(crate) month_index: usize,

    // Confirmation
    pub(crate) pending_action: Option<PendingAction>,
    pub(crate) confirm_message: String,

    // Layout (updated each render frame)
    pub(crate) visible_rows: usize,
}

impl App {
    pub(crate) fn new() -> Self {
        Self {
            running: true,
            screen: Screen::Expenses,
            input_mode: InputMode::Normal,
            command_input: String::new(),
            status_message: String::new(),
            show_help: false,

            snapshot: Snapshot::default(),

            expense_cursor: ListCursor::default(),

            month_index: 0,

            pending_action: None,
            confirm_message: String::new(),

            visible_rows: 20,
        }
    }

    /// Re-read the ledger and clamp cursors to the new row counts.
    pub(crate) fn refresh(&mut self, ledger: &Ledger) -> Result<()> {
        self.snapshot = ledger.snapshot(Local::now().naive_local())?;

        self.expense_cursor.clamp(self.snapshot.expenses.len());
        let months = self.snapshot.monthly.len();
        if self.month_index >= months {
            self.month_index = months.saturating_sub(1);
        }
        Ok(())
    }

    /// Consume queued ledger events; refresh once if anything changed.
    pub(crate) fn sync(&mut self, ledger: &mut Ledger) -> Result<()> {
        let events = ledger.drain_events();
        if events.is_empty() {
            return Ok(());
        }
        if let Some(last) = events.last() {
            self.status_message = describe_event(last);
        }
        self.refresh(ledger)
    }

    pub(crate) fn selected_expense(&self) -> Option<&Expense> {
        self.snapshot.expenses.get(self.expense_cursor.index)
    }

    pub(crate) fn set_status(&mut self, msg: impl Into<String>) {
        self.status_message = msg.into();
    }
}

pub(crate) fn describe_event(event: &LedgerEvent) -> String {
    match event {
        LedgerEvent::ExpenseAdded(e) => format!(
            "Added: {} ({}, {})",
            e.description, e.category, e.amount
        ),
        LedgerEvent::ExpenseDeleted(e) => format!("Deleted: {} ({})", e.description, e.amount),
        LedgerEvent::BudgetChanged(value) => {
            format!("Monthly budget set to {}", format_amount(*value))
        }
    }
}
