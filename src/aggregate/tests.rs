#![allow(clippy::unwrap_used)]

use chrono::NaiveDate;
use rust_decimal::Decimal;
use rust_decimal_macros::dec;

use super::*;

fn expense(timestamp: &str, description: &str, amount: &str, category: &str) -> Expense {
    Expense {
        timestamp: timestamp.into(),
        description: description.into(),
        amount: amount.into(),
        category: category.into(),
    }
}

fn scenario() -> Vec<Expense> {
    vec![
        expense("2024-01-05 10:00", "Lunch", "500", "Food"),
        expense("2024-01-06 09:00", "Taxi", "1200", "Travel"),
        expense("2024-01-07 11:00", "Lunch2", "5000", "Food"),
    ]
}

fn date(y: i32, m: u32, d: u32) -> NaiveDate {
    NaiveDate::from_ymd_opt(y, m, d).unwrap()
}

// ── totals_by_category ────────────────────────────────────────

#[test]
fn test_totals_by_category_scenario() {
    let totals = totals_by_category(&scenario());
    assert_eq!(totals.len(), 2);
    assert_eq!(totals["Food"], dec!(5500));
    assert_eq!(totals["Travel"], dec!(1200));
}

#[test]
fn test_totals_by_category_order_invariant() {
    let mut records = scenario();
    let forward = totals_by_category(&records);
    records.reverse();
    assert_eq!(totals_by_category(&records), forward);
}

#[test]
fn test_totals_by_category_accepts_unknown_names() {
    let records = vec![expense("2024-01-05 10:00", "Rent", "900", "Housing")];
    assert_eq!(totals_by_category(&records)["Housing"], dec!(900));
}

#[test]
fn test_bad_rows_are_skipped_not_fatal() {
    let mut records = scenario();
    records.push(expense("2024-01-08 10:00", "Broken", "abc", "Food"));
    records.push(expense("someday", "NoDate", "10", "Food"));
    assert_eq!(totals_by_category(&records)["Food"], dec!(5500));
    assert_eq!(totals_by_day(&records).len(), 3);
    assert_eq!(monthly_breakdown(&records).get("January").unwrap().total(), dec!(6700));
}

// ── totals_by_day ─────────────────────────────────────────────

#[test]
fn test_totals_by_day_merges_same_date() {
    let records = vec![
        expense("2024-01-05 10:00", "Lunch", "500", "Food"),
        expense("2024-01-05 19:30", "Cab", "250.50", "Travel"),
        expense("2024-01-03 08:00", "Coffee", "80", "Food"),
    ];
    let daily = totals_by_day(&records);
    let keys: Vec<NaiveDate> = daily.keys().copied().collect();
    assert_eq!(keys, vec![date(2024, 1, 3), date(2024, 1, 5)]);
    assert_eq!(daily[&date(2024, 1, 5)], dec!(750.50));
}

#[test]
fn test_category_and_day_grand_totals_agree() {
    let mut records = scenario();
    records.push(expense("2024-02-11 12:00", "Shoes", "1999.99", "Shopping"));
    records.push(expense("2023-12-31 23:59", "Gift", "-20", "Other"));
    let by_cat: Decimal = totals_by_category(&records).values().copied().sum();
    let by_day: Decimal = totals_by_day(&records).values().copied().sum();
    assert_eq!(by_cat, by_day);
}

// ── current_month_spent / budget_remaining ────────────────────

#[test]
fn test_current_month_spent_filters_year_and_month() {
    let mut records = scenario();
    records.push(expense("2023-01-20 10:00", "Old", "999", "Food"));
    records.push(expense("2024-02-01 00:00", "Next", "1", "Food"));
    assert_eq!(current_month_spent(&records, date(2024, 1, 31)), dec!(6700));
    assert_eq!(current_month_spent(&records, date(2024, 3, 1)), Decimal::ZERO);
}

#[test]
fn test_budget_remaining() {
    assert_eq!(budget_remaining(None, dec!(100)), None);
    assert_eq!(budget_remaining(Some(dec!(3000)), dec!(6700)), Some(dec!(-3700)));
    assert_eq!(budget_remaining(Some(dec!(500)), dec!(120.25)), Some(dec!(379.75)));
}

// ── monthly_breakdown ─────────────────────────────────────────

#[test]
fn test_monthly_breakdown_scenario() {
    let breakdown = monthly_breakdown(&scenario());
    assert_eq!(breakdown.len(), 1);
    let jan = breakdown.get("January").unwrap();
    assert_eq!(jan.by_category["Food"], dec!(5500));
    assert_eq!(jan.by_category["Travel"], dec!(1200));
    assert_eq!(jan.by_day[&5u32], dec!(500));
    assert_eq!(jan.by_day[&6u32], dec!(1200));
    assert_eq!(jan.by_day[&7u32], dec!(5000));
    assert!(breakdown.get("February").is_none());
}

#[test]
fn test_monthly_breakdown_merges_years() {
    let records = vec![
        expense("2023-03-02 10:00", "A", "10", "Food"),
        expense("2024-03-02 10:00", "B", "15", "Food"),
    ];
    let breakdown = monthly_breakdown(&records);
    let march = breakdown.get("march").unwrap();
    assert_eq!(march.by_category["Food"], dec!(25));
    assert_eq!(march.by_day[&2u32], dec!(25));
}

#[test]
fn test_monthly_breakdown_calendar_order() {
    let records = vec![
        expense("2024-11-02 10:00", "A", "1", "Food"),
        expense("2024-02-02 10:00", "B", "1", "Food"),
        expense("2024-07-02 10:00", "C", "1", "Food"),
    ];
    let names: Vec<&str> = monthly_breakdown(&records).iter().map(|(n, _)| n).collect();
    assert_eq!(names, vec!["February", "July", "November"]);
}

// ── overflow ──────────────────────────────────────────────────

const MAX_AMOUNT: &str = "79228162514264337593543950335";

fn overflowing() -> Vec<Expense> {
    vec![
        expense("2024-03-01 10:00", "Yacht", MAX_AMOUNT, "Food"),
        expense("2024-03-01 11:00", "Yacht", MAX_AMOUNT, "Food"),
        expense("2024-03-02 10:00", "Bus", "7", "Travel"),
    ]
}

#[test]
fn test_overflowing_rows_skipped_by_flat_totals() {
    let records = overflowing();
    let by_category = totals_by_category(&records);
    assert_eq!(by_category["Food"], Decimal::MAX);
    assert_eq!(by_category["Travel"], dec!(7));

    let by_day = totals_by_day(&records);
    assert_eq!(by_day[&date(2024, 3, 1)], Decimal::MAX);
    assert_eq!(by_day[&date(2024, 3, 2)], dec!(7));

    assert_eq!(current_month_spent(&records, date(2024, 3, 15)), Decimal::MAX);
}

#[test]
fn test_monthly_breakdown_drops_overflowing_row_everywhere() {
    let march = monthly_breakdown(&overflowing()).get("March").unwrap().clone();
    assert_eq!(march.total(), Decimal::MAX);
    assert_eq!(march.by_category.len(), 1);
    assert_eq!(march.by_category["Food"], Decimal::MAX);
    assert_eq!(march.by_day.len(), 1);
    assert_eq!(march.by_day[&1u32], Decimal::MAX);
}

#[test]
fn test_month_total_exact_with_mixed_signs() {
    let records = vec![
        expense("2024-03-01 10:00", "A", MAX_AMOUNT, "A"),
        expense("2024-03-01 11:00", "C", &format!("-{MAX_AMOUNT}"), "C"),
        expense("2024-03-01 12:00", "B", MAX_AMOUNT, "B"),
    ];
    let breakdown = monthly_breakdown(&records);
    assert_eq!(breakdown.get("March").unwrap().total(), Decimal::MAX);
}

#[test]
fn test_budget_remaining_clamps() {
    assert_eq!(
        budget_remaining(Some(Decimal::MAX), Decimal::MIN),
        Some(Decimal::MAX)
    );
    assert_eq!(
        budget_remaining(Some(Decimal::MIN), Decimal::MAX),
        Some(Decimal::MIN)
    );
}

// ── highest_category ──────────────────────────────────────────

#[test]
fn test_highest_category_scenario() {
    let totals = totals_by_category(&scenario());
    assert_eq!(highest_category(&totals).as_deref(), Some("Food"));
}

#[test]
fn test_highest_category_tie_goes_to_first_name() {
    let records = vec![
        expense("2024-01-05 10:00", "A", "100", "Travel"),
        expense("2024-01-05 10:00", "B", "100", "Shopping"),
    ];
    let totals = totals_by_category(&records);
    assert_eq!(highest_category(&totals).as_deref(), Some("Shopping"));
}

#[test]
fn test_highest_category_empty() {
    assert_eq!(highest_category(&BTreeMap::new()), None);
}

// ── transaction_count / series ────────────────────────────────

#[test]
fn test_transaction_count_includes_unparseable_rows() {
    let mut records = scenario();
    records.push(expense("2024-01-08 10:00", "Broken", "abc", "Food"));
    assert_eq!(transaction_count(&records), 4);
}

#[test]
fn test_category_series() {
    let (labels, values) = category_series(&totals_by_category(&scenario()));
    assert_eq!(labels, vec!["Food".to_string(), "Travel".to_string()]);
    assert_eq!(values, vec![5500.0, 1200.0]);
}

#[test]
fn test_trend_series_ascending() {
    let mut records = scenario();
    records.reverse();
    let (x, y) = trend_series(&totals_by_day(&records));
    assert_eq!(x, vec!["2024-01-05", "2024-01-06", "2024-01-07"]);
    assert_eq!(y, vec![500.0, 1200.0, 5000.0]);
}
