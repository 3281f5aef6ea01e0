use rust_decimal::prelude::ToPrimitive;
use rust_xlsxwriter::{Format, Workbook};
use std::path::Path;

use tracing::info;

use crate::error::{LedgerError, LedgerResult};
use crate::models::{Expense, HEADER};

pub(crate) const SHEET_NAME: &str = "Expenses";

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub(crate) enum ExportFormat {
    Xlsx,
    Csv,
}

impl ExportFormat {
    /// `.csv` selects CSV; anything else gets a workbook.
    pub(crate) fn from_path(path: &Path) -> Self {
        match path.extension().and_then(|e| e.to_str()) {
            Some(ext) if ext.eq_ignore_ascii_case("csv") => Self::Csv,
            _ => Self::Xlsx,
        }
    }
}

/// Write `records` to `path` in the format implied by its extension.
/// Returns the number of data rows written.
pub(crate) fn export(records: &[Expense], path: &Path) -> LedgerResult<usize> {
    let count = match ExportFormat::from_path(path) {
        ExportFormat::Xlsx => export_xlsx(records, path)?,
        ExportFormat::Csv => export_csv(records, path)?,
    };
    info!(path = %path.display(), count, "exported expenses");
    Ok(count)
}

/// Four-column sheet; amounts become numeric cells when they parse.
pub(crate) fn export_xlsx(records: &[Expense], path: &Path) -> LedgerResult<usize> {
    let mut workbook = Workbook::new();
    let bold = Format::new().set_bold();
    let sheet = workbook.add_worksheet();
    sheet.set_name(SHEET_NAME)?;

    for (col, title) in HEADER.iter().enumerate() {
        sheet.write_string_with_format(0, col as u16, *title, &bold)?;
    }
    for (i, expense) in records.iter().enumerate() {
        let row = (i + 1) as u32;
        sheet.write_string(row, 0, &expense.timestamp)?;
        sheet.write_string(row, 1, &expense.description)?;
        match expense.amount_value().ok().and_then(|a| a.to_f64()) {
            Some(value) => sheet.write_number(row, 2, value)?,
            None => sheet.write_string(row, 2, &expense.amount)?,
        };
        sheet.write_string(row, 3, &expense.category)?;
    }
    sheet.set_column_width(0, 18)?;
    sheet.set_column_width(1, 30)?;

    workbook.save(path)?;
    Ok(records.len())
}

/// Same columns as the ledger file, amounts exactly as stored.
pub(crate) fn export_csv(records: &[Expense], path: &Path) -> LedgerResult<usize> {
    let mut wtr = csv::Writer::from_path(path).map_err(|e| LedgerError::csv(path, e))?;
    wtr.write_record(HEADER)
        .map_err(|e| LedgerError::csv(path, e))?;
    for expense in records {
        wtr.write_record(expense.fields())
            .map_err(|e| LedgerError::csv(path, e))?;
    }
    wtr.flush().map_err(|e| LedgerError::io(path, e))?;
    Ok(records.len())
}

#[cfg(test)]
mod tests;
