use chrono::{Local, NaiveDate, NaiveDateTime};
use rust_decimal::Decimal;
use std::collections::BTreeMap;
use std::path::{Path, PathBuf};

use tracing::info;

use crate::aggregate::{self, MonthlyBreakdown};
use crate::config::AppPaths;
use crate::error::{LedgerError, LedgerResult};
use crate::models::{parse_decimal, Category, Expense};
use crate::store::{BudgetStore, RecordStore};

/// Rows at or above this amount are highlighted in listings.
pub(crate) const HIGH_VALUE_THRESHOLD: Decimal = Decimal::from_parts(5000, 0, 0, false, 0);

/// Changes the presentation layer should react to.
#[derive(Debug, Clone, PartialEq)]
pub(crate) enum LedgerEvent {
    ExpenseAdded(Expense),
    ExpenseDeleted(Expense),
    BudgetChanged(Decimal),
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub(crate) enum DeleteOutcome {
    Removed,
    NotFound,
}

/// Everything a screen needs, computed from a single read of the ledger file.
#[derive(Debug, Clone, Default)]
pub(crate) struct Snapshot {
    /// Display order, see [`sort_for_display`].
    pub(crate) expenses: Vec<Expense>,
    pub(crate) category_totals: BTreeMap<String, Decimal>,
    pub(crate) daily_totals: BTreeMap<NaiveDate, Decimal>,
    pub(crate) monthly: MonthlyBreakdown,
    pub(crate) month_spent: Decimal,
    pub(crate) budget: Option<Decimal>,
    pub(crate) remaining: Option<Decimal>,
    pub(crate) highest_category: Option<String>,
    pub(crate) transaction_count: usize,
}

/// Entry point for the UI and CLI. Owns both stores and the current budget.
pub(crate) struct Ledger {
    records: RecordStore,
    budget_store: BudgetStore,
    budget: Option<Decimal>,
    events: Vec<LedgerEvent>,
}

impl Ledger {
    pub(crate) fn open(paths: &AppPaths) -> LedgerResult<Self> {
        Self::open_at(paths.ledger_file(), paths.budget_file())
    }

    pub(crate) fn open_at(
        ledger_path: impl Into<PathBuf>,
        budget_path: impl Into<PathBuf>,
    ) -> LedgerResult<Self> {
        let records = RecordStore::new(ledger_path);
        records.initialize()?;
        let budget_store = BudgetStore::new(budget_path);
        let budget = budget_store.load();
        Ok(Self {
            records,
            budget_store,
            budget,
            events: Vec::new(),
        })
    }

    pub(crate) fn ledger_path(&self) -> &Path {
        self.records.path()
    }

    pub(crate) fn budget_path(&self) -> &Path {
        self.budget_store.path()
    }

    pub(crate) fn budget(&self) -> Option<Decimal> {
        self.budget
    }

    /// Validate and record a new expense stamped with the current local time.
    pub(crate) fn add_expense(
        &mut self,
        description: &str,
        amount_text: &str,
        category: &str,
    ) -> LedgerResult<Expense> {
        self.add_expense_at(description, amount_text, category, Local::now().naive_local())
    }

    pub(crate) fn add_expense_at(
        &mut self,
        description: &str,
        amount_text: &str,
        category: &str,
        now: NaiveDateTime,
    ) -> LedgerResult<Expense> {
        let (description, amount_text, category) =
            (description.trim(), amount_text.trim(), category.trim());
        if description.is_empty() || amount_text.is_empty() || category.is_empty() {
            return Err(LedgerError::Validation("All fields required".into()));
        }
        let amount = parse_decimal(amount_text)
            .ok_or_else(|| LedgerError::Validation("Amount must be a number".into()))?;

        let expense = Expense::new(
            now,
            description.to_string(),
            amount,
            Category::normalize(category),
        );
        self.records.append(&expense)?;
        info!(category = %expense.category, amount = %expense.amount, "expense added");
        self.events.push(LedgerEvent::ExpenseAdded(expense.clone()));
        Ok(expense)
    }

    /// Remove the first stored row equal to `expense`.
    pub(crate) fn delete_expense(&mut self, expense: &Expense) -> LedgerResult<DeleteOutcome> {
        if self.records.delete_first_matching(expense)? {
            self.events.push(LedgerEvent::ExpenseDeleted(expense.clone()));
            Ok(DeleteOutcome::Removed)
        } else {
            Ok(DeleteOutcome::NotFound)
        }
    }

    /// Persist a new monthly budget and return what is left of it this month.
    pub(crate) fn set_budget(&mut self, amount_text: &str) -> LedgerResult<Decimal> {
        self.set_budget_at(amount_text, Local::now().naive_local())
    }

    pub(crate) fn set_budget_at(
        &mut self,
        amount_text: &str,
        now: NaiveDateTime,
    ) -> LedgerResult<Decimal> {
        let value = parse_decimal(amount_text)
            .ok_or_else(|| LedgerError::Validation("Enter numeric budget".into()))?;
        let spent = aggregate::current_month_spent(&self.records.load_all()?, now);
        let remaining = value
            .checked_sub(spent)
            .ok_or_else(|| LedgerError::Validation("Budget is out of range".into()))?;

        self.budget_store.save(value)?;
        self.budget = Some(value);
        info!(budget = %value, "monthly budget set");
        self.events.push(LedgerEvent::BudgetChanged(value));
        Ok(remaining)
    }

    /// All stored rows in file order.
    pub(crate) fn expenses(&self) -> LedgerResult<Vec<Expense>> {
        self.records.load_all()
    }

    pub(crate) fn remaining(&self, now: NaiveDateTime) -> LedgerResult<Option<Decimal>> {
        let spent = aggregate::current_month_spent(&self.records.load_all()?, now);
        Ok(aggregate::budget_remaining(self.budget, spent))
    }

    pub(crate) fn snapshot(&self, now: NaiveDateTime) -> LedgerResult<Snapshot> {
        let records = self.records.load_all()?;
        let category_totals = aggregate::totals_by_category(&records);
        let month_spent = aggregate::current_month_spent(&records, now);
        Ok(Snapshot {
            highest_category: aggregate::highest_category(&category_totals),
            daily_totals: aggregate::totals_by_day(&records),
            monthly: aggregate::monthly_breakdown(&records),
            transaction_count: aggregate::transaction_count(&records),
            remaining: aggregate::budget_remaining(self.budget, month_spent),
            budget: self.budget,
            month_spent,
            category_totals,
            expenses: sort_for_display(&records),
        })
    }

    pub(crate) fn drain_events(&mut self) -> Vec<LedgerEvent> {
        std::mem::take(&mut self.events)
    }
}

/// Stable sort by category name; rows in the same category keep file order.
pub(crate) fn sort_for_display(records: &[Expense]) -> Vec<Expense> {
    let mut sorted = records.to_vec();
    sorted.sort_by(|a, b| a.category.cmp(&b.category));
    sorted
}

pub(crate) fn high_value_flag(expense: &Expense) -> bool {
    expense
        .amount_value()
        .is_ok_and(|amount| amount >= HIGH_VALUE_THRESHOLD)
}
