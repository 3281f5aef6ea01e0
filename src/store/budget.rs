use rust_decimal::Decimal;
use std::fs;
use std::path::{Path, PathBuf};

use tracing::{debug, warn};

use crate::error::{LedgerError, LedgerResult};
use crate::models::parse_decimal;

/// Single-value file holding the monthly budget.
pub(crate) struct BudgetStore {
    path: PathBuf,
}

impl BudgetStore {
    pub(crate) fn new(path: impl Into<PathBuf>) -> Self {
        Self { path: path.into() }
    }

    pub(crate) fn path(&self) -> &Path {
        &self.path
    }

    /// The saved budget. A missing or unparseable file reads as unset.
    pub(crate) fn load(&self) -> Option<Decimal> {
        let content = match fs::read_to_string(&self.path) {
            Ok(c) => c,
            Err(e) => {
                if e.kind() != std::io::ErrorKind::NotFound {
                    warn!(path = %self.path.display(), error = %e, "budget file unreadable, treating as unset");
                }
                return None;
            }
        };
        let value = parse_decimal(&content);
        if value.is_none() {
            warn!(path = %self.path.display(), "budget file does not hold a number, treating as unset");
        }
        value
    }

    /// Overwrite the stored value.
    pub(crate) fn save(&self, value: Decimal) -> LedgerResult<()> {
        if let Some(parent) = self.path.parent().filter(|p| !p.as_os_str().is_empty()) {
            fs::create_dir_all(parent).map_err(|e| LedgerError::io(parent, e))?;
        }
        fs::write(&self.path, format!("{value}\n")).map_err(|e| LedgerError::io(&self.path, e))?;
        debug!(%value, "saved monthly budget");
        Ok(())
    }
}
