use std::fs::{self, File, OpenOptions};
use std::path::{Path, PathBuf};

use tracing::{debug, info, warn};

use crate::error::{LedgerError, LedgerResult};
use crate::models::{Expense, HEADER};

/// The ledger CSV file. Sole writer of that file.
pub(crate) struct RecordStore {
    path: PathBuf,
}

impl RecordStore {
    pub(crate) fn new(path: impl Into<PathBuf>) -> Self {
        Self { path: path.into() }
    }

    pub(crate) fn path(&self) -> &Path {
        &self.path
    }

    /// Create the file holding only the header. An existing file is left alone.
    pub(crate) fn initialize(&self) -> LedgerResult<()> {
        if self.path.exists() {
            return Ok(());
        }
        if let Some(parent) = self.path.parent().filter(|p| !p.as_os_str().is_empty()) {
            fs::create_dir_all(parent).map_err(|e| LedgerError::io(parent, e))?;
        }
        let file = File::create(&self.path).map_err(|e| LedgerError::io(&self.path, e))?;
        let mut wtr = csv::Writer::from_writer(file);
        wtr.write_record(HEADER)
            .map_err(|e| LedgerError::csv(&self.path, e))?;
        self.finish(wtr)?;
        info!(path = %self.path.display(), "initialized ledger file");
        Ok(())
    }

    /// Append one row. Flushed and synced before returning.
    pub(crate) fn append(&self, expense: &Expense) -> LedgerResult<()> {
        let needs_header = fs::metadata(&self.path).map_or(true, |m| m.len() == 0);
        if needs_header {
            if let Some(parent) = self.path.parent().filter(|p| !p.as_os_str().is_empty()) {
                fs::create_dir_all(parent).map_err(|e| LedgerError::io(parent, e))?;
            }
        }

        let file = OpenOptions::new()
            .create(true)
            .append(true)
            .open(&self.path)
            .map_err(|e| LedgerError::io(&self.path, e))?;
        let mut wtr = csv::Writer::from_writer(file);
        if needs_header {
            wtr.write_record(HEADER)
                .map_err(|e| LedgerError::csv(&self.path, e))?;
        }
        wtr.write_record(expense.fields())
            .map_err(|e| LedgerError::csv(&self.path, e))?;
        self.finish(wtr)?;
        debug!(timestamp = %expense.timestamp, amount = %expense.amount, "appended expense");
        Ok(())
    }

    /// Every row in file order, header skipped. A missing file is an empty ledger.
    /// Rows without exactly four fields are skipped.
    pub(crate) fn load_all(&self) -> LedgerResult<Vec<Expense>> {
        let Some(rows) = self.read_rows()? else {
            return Ok(Vec::new());
        };

        let mut expenses = Vec::with_capacity(rows.len());
        for (i, row) in rows.iter().enumerate() {
            match Expense::from_fields(row.iter()) {
                Some(expense) => expenses.push(expense),
                // +2: one for the header, one for 1-based line numbers
                None => warn!(line = i + 2, fields = row.len(), "skipping malformed ledger row"),
            }
        }
        Ok(expenses)
    }

    /// Rewrite the file without the first row equal to `target`. Returns
    /// whether a row was removed; all other rows are kept as they were.
    pub(crate) fn delete_first_matching(&self, target: &Expense) -> LedgerResult<bool> {
        let Some(rows) = self.read_rows()? else {
            return Ok(false);
        };

        let position = rows.iter().position(|row| {
            Expense::from_fields(row.iter()).is_some_and(|e| e.matches(target))
        });
        let Some(position) = position else {
            debug!(description = %target.description, "no matching row to delete");
            return Ok(false);
        };

        let dir = self
            .path
            .parent()
            .filter(|p| !p.as_os_str().is_empty())
            .unwrap_or_else(|| Path::new("."));
        let tmp = tempfile::NamedTempFile::new_in(dir).map_err(|e| LedgerError::io(dir, e))?;
        {
            let mut wtr = csv::WriterBuilder::new()
                .flexible(true)
                .from_writer(tmp.as_file());
            wtr.write_record(HEADER)
                .map_err(|e| LedgerError::csv(&self.path, e))?;
            for (i, row) in rows.iter().enumerate() {
                if i != position {
                    wtr.write_record(row)
                        .map_err(|e| LedgerError::csv(&self.path, e))?;
                }
            }
            wtr.flush().map_err(|e| LedgerError::io(&self.path, e))?;
        }
        tmp.as_file()
            .sync_all()
            .map_err(|e| LedgerError::io(&self.path, e))?;
        tmp.persist(&self.path)
            .map_err(|e| LedgerError::io(&self.path, e.error))?;

        info!(description = %target.description, "deleted expense");
        Ok(true)
    }

    /// Raw data rows, or `None` when the file does not exist.
    fn read_rows(&self) -> LedgerResult<Option<Vec<csv::StringRecord>>> {
        let file = match File::open(&self.path) {
            Ok(f) => f,
            Err(e) if e.kind() == std::io::ErrorKind::NotFound => return Ok(None),
            Err(e) => return Err(LedgerError::io(&self.path, e)),
        };
        let mut rdr = csv::ReaderBuilder::new()
            .has_headers(true)
            .flexible(true)
            .from_reader(file);

        let mut rows = Vec::new();
        for result in rdr.records() {
            rows.push(result.map_err(|e| LedgerError::csv(&self.path, e))?);
        }
        Ok(Some(rows))
    }

    fn finish(&self, wtr: csv::Writer<File>) -> LedgerResult<()> {
        let file = wtr
            .into_inner()
            .map_err(|e| LedgerError::io(&self.path, e.into_error()))?;
        file.sync_all().map_err(|e| LedgerError::io(&self.path, e))
    }
}
