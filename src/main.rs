mod aggregate;
mod config;
mod error;
mod export;
mod ledger;
mod logging;
mod models;
mod run;
mod store;
mod ui;

use anyhow::{Context, Result};

use logging::LogTarget;

fn main() -> Result<()> {
    let args: Vec<String> = std::env::args().collect();
    let paths = config::AppPaths::resolve()?;

    let target = if args.len() == 1 {
        LogTarget::File
    } else {
        LogTarget::Stderr
    };
    logging::init_tracing(&paths, target)?;

    let mut ledger = ledger::Ledger::open(&paths).with_context(|| {
        format!(
            "Failed to open ledger in {}",
            paths.data_dir().display()
        )
    })?;

    match args.len() {
        1 => run::as_tui(&mut ledger),
        _ => run::as_cli(&args, &mut ledger),
    }
}
