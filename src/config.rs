//! Data directory resolution.
//!
//! 1. `EXPENSE_LEDGER_DATA_DIR` environment variable, if set
//! 2. the platform data directory from `directories`

use anyhow::{Context, Result};
use std::path::{Path, PathBuf};

pub(crate) const DATA_DIR_ENV: &str = "EXPENSE_LEDGER_DATA_DIR";

const LEDGER_FILE: &str = "expenses.csv";
const BUDGET_FILE: &str = "budget.txt";
const LOG_FILE: &str = "expense-ledger.log";

#[derive(Debug, Clone)]
pub(crate) struct AppPaths {
    data_dir: PathBuf,
}

impl AppPaths {
    /// Resolve and create the data directory.
    pub(crate) fn resolve() -> Result<Self> {
        let data_dir = match std::env::var_os(DATA_DIR_ENV) {
            Some(custom) if !custom.is_empty() => PathBuf::from(custom),
            _ => directories::ProjectDirs::from("com", "expense-ledger", "ExpenseLedger")
                .ok_or_else(|| anyhow::anyhow!("Could not determine data directory"))?
                .data_dir()
                .to_path_buf(),
        };
        std::fs::create_dir_all(&data_dir).with_context(|| {
            format!("Failed to create data directory: {}", data_dir.display())
        })?;
        Ok(Self::with_data_dir(data_dir))
    }

    pub(crate) fn with_data_dir(data_dir: impl Into<PathBuf>) -> Self {
        Self {
            data_dir: data_dir.into(),
        }
    }

    pub(crate) fn data_dir(&self) -> &Path {
        &self.data_dir
    }

    pub(crate) fn ledger_file(&self) -> PathBuf {
        self.data_dir.join(LEDGER_FILE)
    }

    pub(crate) fn budget_file(&self) -> PathBuf {
        self.data_dir.join(BUDGET_FILE)
    }

    pub(crate) fn log_file(&self) -> PathBuf {
        self.data_dir.join(LOG_FILE)
    }
}

/// Default export target in the user's home directory.
pub(crate) fn default_export_path() -> PathBuf {
    let home = directories::UserDirs::new()
        .map(|d| d.home_dir().to_path_buf())
        .unwrap_or_else(|| PathBuf::from("."));
    home.join("expenses-export.xlsx")
}

/// Expand a leading `~/` to the home directory.
pub(crate) fn shellexpand(path: &str) -> PathBuf {
    if let Some(rest) = path.strip_prefix("~/") {
        if let Some(dirs) = directories::UserDirs::new() {
            return dirs.home_dir().join(rest);
        }
    }
    PathBuf::from(path)
}
