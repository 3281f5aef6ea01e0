//! Totals and cross-tabulations over a snapshot of ledger rows.
//!
//! Every function is pure. Rows whose amount or date does not parse, or whose
//! amount would push a total past the `Decimal` range, are left out of the
//! result and the rest of the aggregation carries on.

use chrono::{Datelike, NaiveDate};
use rust_decimal::prelude::ToPrimitive;
use rust_decimal::Decimal;
use std::collections::BTreeMap;

use tracing::debug;

use crate::models::{Expense, DATE_FORMAT};

pub(crate) const MONTH_NAMES: [&str; 12] = [
    "January",
    "February",
    "March",
    "April",
    "May",
    "June",
    "July",
    "August",
    "September",
    "October",
    "November",
    "December",
];

/// Rows with a usable date and amount.
fn valued(records: &[Expense]) -> impl Iterator<Item = (&Expense, NaiveDate, Decimal)> {
    records.iter().filter_map(|e| match (e.date(), e.amount_value()) {
        (Ok(date), Ok(amount)) => Some((e, date, amount)),
        (Err(err), _) | (_, Err(err)) => {
            debug!(%err, "skipping row in aggregate");
            None
        }
    })
}

/// Adds `amount` into `slot` unless the sum overflows, in which case `slot`
/// is left as it was and the row is logged and dropped.
fn accumulate(slot: &mut Decimal, amount: Decimal, e: &Expense) {
    match slot.checked_add(amount) {
        Some(sum) => *slot = sum,
        None => {
            debug!(timestamp = %e.timestamp, amount = %e.amount, "skipping row that overflows a total");
        }
    }
}

pub(crate) fn totals_by_category(records: &[Expense]) -> BTreeMap<String, Decimal> {
    let mut totals = BTreeMap::new();
    for (e, _, amount) in valued(records) {
        accumulate(
            totals.entry(e.category.clone()).or_insert(Decimal::ZERO),
            amount,
            e,
        );
    }
    totals
}

pub(crate) fn totals_by_day(records: &[Expense]) -> BTreeMap<NaiveDate, Decimal> {
    let mut totals = BTreeMap::new();
    for (e, date, amount) in valued(records) {
        accumulate(totals.entry(date).or_insert(Decimal::ZERO), amount, e);
    }
    totals
}

/// Spend in the calendar month containing `now`.
pub(crate) fn current_month_spent(records: &[Expense], now: impl Datelike) -> Decimal {
    let mut spent = Decimal::ZERO;
    for (e, _, amount) in valued(records)
        .filter(|(_, date, _)| date.year() == now.year() && date.month() == now.month())
    {
        accumulate(&mut spent, amount, e);
    }
    spent
}

/// `None` while no budget is set. Negative means over budget; the figure is
/// clamped to the `Decimal` range.
pub(crate) fn budget_remaining(budget: Option<Decimal>, spent: Decimal) -> Option<Decimal> {
    budget.map(|b| b.saturating_sub(spent))
}

#[derive(Debug, Clone, Default, PartialEq)]
pub(crate) struct MonthTotals {
    pub(crate) by_category: BTreeMap<String, Decimal>,
    /// Keyed by day of month, 1-31.
    pub(crate) by_day: BTreeMap<u32, Decimal>,
    total: Decimal,
}

impl MonthTotals {
    pub(crate) fn total(&self) -> Decimal {
        self.total
    }
}

/// Per-month totals keyed by month name only. Rows from different years that
/// share a month land in the same entry.
#[derive(Debug, Clone, Default)]
pub(crate) struct MonthlyBreakdown {
    months: BTreeMap<u32, MonthTotals>,
}

impl MonthlyBreakdown {
    pub(crate) fn get(&self, month_name: &str) -> Option<&MonthTotals> {
        let idx = MONTH_NAMES
            .iter()
            .position(|m| m.eq_ignore_ascii_case(month_name))?;
        self.months.get(&(idx as u32 + 1))
    }

    /// Months in calendar order.
    pub(crate) fn iter(&self) -> impl Iterator<Item = (&'static str, &MonthTotals)> {
        self.months
            .iter()
            .map(|(m, totals)| (MONTH_NAMES[(*m - 1) as usize], totals))
    }

    pub(crate) fn is_empty(&self) -> bool {
        self.months.is_empty()
    }

    pub(crate) fn len(&self) -> usize {
        self.months.len()
    }
}

pub(crate) fn monthly_breakdown(records: &[Expense]) -> MonthlyBreakdown {
    let mut breakdown = MonthlyBreakdown::default();
    for (e, date, amount) in valued(records) {
        let month = breakdown.months.entry(date.month()).or_default();
        let category = month.by_category.get(&e.category).copied().unwrap_or_default();
        let day = month.by_day.get(&date.day()).copied().unwrap_or_default();
        // A row lands in all three totals or none of them.
        match (
            month.total.checked_add(amount),
            category.checked_add(amount),
            day.checked_add(amount),
        ) {
            (Some(total), Some(category), Some(day)) => {
                month.total = total;
                month.by_category.insert(e.category.clone(), category);
                month.by_day.insert(date.day(), day);
            }
            _ => {
                debug!(timestamp = %e.timestamp, amount = %e.amount, "skipping row that overflows a monthly total");
            }
        }
    }
    breakdown
}

/// Category with the largest total. Ties go to the name that sorts first.
pub(crate) fn highest_category(totals: &BTreeMap<String, Decimal>) -> Option<String> {
    let mut best: Option<(&String, Decimal)> = None;
    for (name, amount) in totals {
        if best.map_or(true, |(_, top)| *amount > top) {
            best = Some((name, *amount));
        }
    }
    best.map(|(name, _)| name.clone())
}

/// Number of data rows in the snapshot, parseable or not.
pub(crate) fn transaction_count(records: &[Expense]) -> usize {
    records.len()
}

/// Labels and values for a category chart.
pub(crate) fn category_series(totals: &BTreeMap<String, Decimal>) -> (Vec<String>, Vec<f64>) {
    totals
        .iter()
        .map(|(name, amount)| (name.clone(), amount.to_f64().unwrap_or(0.0)))
        .unzip()
}

/// Ascending ISO dates and the spend on each, for a trend line.
pub(crate) fn trend_series(daily: &BTreeMap<NaiveDate, Decimal>) -> (Vec<String>, Vec<f64>) {
    daily
        .iter()
        .map(|(date, amount)| {
            (
                date.format(DATE_FORMAT).to_string(),
                amount.to_f64().unwrap_or(0.0),
            )
        })
        .unzip()
}

#[cfg(test)]
mod tests;
