use anyhow::{Context, Result};
use std::fs::OpenOptions;
use std::sync::{Mutex, Once};

use tracing_subscriber::{fmt, EnvFilter};

use crate::config::AppPaths;

static TRACING_INIT: Once = Once::new();

const DEFAULT_DIRECTIVE: &str = "expense_ledger=info";

pub(crate) enum LogTarget {
    /// Append to the log file in the data directory; the terminal belongs to the TUI.
    File,
    Stderr,
}

/// Install the global subscriber. `RUST_LOG` overrides the default directive.
pub(crate) fn init_tracing(paths: &AppPaths, target: LogTarget) -> Result<()> {
    let writer = match target {
        LogTarget::File => {
            let path = paths.log_file();
            let file = OpenOptions::new()
                .create(true)
                .append(true)
                .open(&path)
                .with_context(|| format!("Failed to open log file: {}", path.display()))?;
            Some(Mutex::new(file))
        }
        LogTarget::Stderr => None,
    };

    TRACING_INIT.call_once(|| {
        let filter = EnvFilter::try_from_default_env()
            .unwrap_or_else(|_| EnvFilter::new(DEFAULT_DIRECTIVE));

        match writer {
            Some(file) => fmt()
                .with_env_filter(filter)
                .with_ansi(false)
                .with_writer(file)
                .init(),
            None => fmt()
                .with_env_filter(filter)
                .with_writer(std::io::stderr)
                .init(),
        }
    });
    Ok(())
}
