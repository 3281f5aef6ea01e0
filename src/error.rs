use std::path::{Path, PathBuf};

use thiserror::Error;

/// Failures surfaced by the ledger core.
#[derive(Debug, Error)]
pub(crate) enum LedgerError {
    /// User input rejected before any store is touched.
    #[error("{0}")]
    Validation(String),
    #[error("I/O error on {}: {source}", path.display())]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },
    /// A stored value that does not parse. Aggregations skip the record instead
    /// of returning this.
    #[error("Malformed value: {0}")]
    Parse(String),
    #[error("Export failed: {0}")]
    Export(String),
}

pub(crate) type LedgerResult<T> = Result<T, LedgerError>;

impl LedgerError {
    pub(crate) fn io(path: &Path, source: std::io::Error) -> Self {
        Self::Io {
            path: path.to_path_buf(),
            source,
        }
    }

    /// CSV framing and I/O errors both end up as `Io` for the file they came from.
    pub(crate) fn csv(path: &Path, err: csv::Error) -> Self {
        Self::io(path, std::io::Error::other(err))
    }

    pub(crate) fn is_validation(&self) -> bool {
        matches!(self, Self::Validation(_))
    }
}

impl From<rust_xlsxwriter::XlsxError> for LedgerError {
    fn from(err: rust_xlsxwriter::XlsxError) -> Self {
        Self::Export(err.to_string())
    }
}
