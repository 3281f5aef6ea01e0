#![allow(clippy::unwrap_used, clippy::panic)]

use calamine::{open_workbook_auto, Data, Reader};
use std::path::PathBuf;

use super::*;

fn expense(timestamp: &str, description: &str, amount: &str, category: &str) -> Expense {
    Expense {
        timestamp: timestamp.into(),
        description: description.into(),
        amount: amount.into(),
        category: category.into(),
    }
}

fn sample() -> Vec<Expense> {
    vec![
        expense("2024-01-05 10:00", "Lunch", "500", "Food"),
        expense("2024-01-06 09:00", "Taxi, airport", "1200.5", "Travel"),
        expense("2024-01-07 11:00", "Lunch2", "5000", "Food"),
    ]
}

fn read_sheet(path: &Path) -> Vec<Vec<Data>> {
    let mut workbook = open_workbook_auto(path).unwrap();
    let range = workbook.worksheet_range(SHEET_NAME).unwrap();
    range.rows().map(|r| r.to_vec()).collect()
}

#[test]
fn test_format_from_path() {
    assert_eq!(ExportFormat::from_path(Path::new("out.xlsx")), ExportFormat::Xlsx);
    assert_eq!(ExportFormat::from_path(Path::new("out.CSV")), ExportFormat::Csv);
    assert_eq!(ExportFormat::from_path(Path::new("out")), ExportFormat::Xlsx);
}

#[test]
fn test_xlsx_roundtrip_numeric_amounts() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("expenses.xlsx");
    assert_eq!(export(&sample(), &path).unwrap(), 3);

    let rows = read_sheet(&path);
    assert_eq!(rows.len(), 4);
    assert_eq!(
        rows[0],
        vec![
            Data::String("Date".into()),
            Data::String("Description".into()),
            Data::String("Amount".into()),
            Data::String("Category".into()),
        ]
    );

    let back: Vec<(String, String, f64, String)> = rows[1..]
        .iter()
        .map(|r| {
            let amount = match &r[2] {
                Data::Float(f) => *f,
                other => panic!("amount should be numeric, got {other:?}"),
            };
            (r[0].to_string(), r[1].to_string(), amount, r[3].to_string())
        })
        .collect();
    let expected: Vec<(String, String, f64, String)> = sample()
        .into_iter()
        .map(|e| {
            let amount = e.amount.parse::<f64>().unwrap();
            (e.timestamp, e.description, amount, e.category)
        })
        .collect();
    assert_eq!(back, expected);
}

#[test]
fn test_xlsx_unparseable_amount_stays_text() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("expenses.xlsx");
    export_xlsx(&[expense("2024-01-05 10:00", "Odd", "n/a", "Other")], &path).unwrap();
    let rows = read_sheet(&path);
    assert_eq!(rows[1][2], Data::String("n/a".into()));
}

#[test]
fn test_xlsx_empty_ledger_has_header_only() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("empty.xlsx");
    assert_eq!(export_xlsx(&[], &path).unwrap(), 0);
    assert_eq!(read_sheet(&path).len(), 1);
}

#[test]
fn test_csv_export_matches_ledger_layout() {
    let dir = tempfile::tempdir().unwrap();
    let path: PathBuf = dir.path().join("expenses.csv");
    assert_eq!(export(&sample(), &path).unwrap(), 3);

    let mut rdr = csv::Reader::from_path(&path).unwrap();
    let headers: Vec<String> = rdr.headers().unwrap().iter().map(String::from).collect();
    assert_eq!(headers, HEADER.to_vec());
    let back: Vec<Expense> = rdr
        .records()
        .map(|r| Expense::from_fields(r.unwrap().iter()).unwrap())
        .collect();
    assert_eq!(back, sample());
}

#[test]
fn test_export_to_missing_dir_fails() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("missing").join("out.csv");
    assert!(matches!(export(&sample(), &path), Err(LedgerError::Io { .. })));
}
