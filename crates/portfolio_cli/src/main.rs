//! CLI entry point.
//!
//! # Responsibility
//! - Print core linkage info when run without arguments.
//! - Given a config and a baseline document, print the merged snapshot of
//!   every collection as JSON.

use portfolio_core::db::{open_db, open_db_in_memory};
use portfolio_core::{
    init_logging, BaselineDataset, CareerStore, PortfolioConfig, SqliteKvStore, SystemClock,
};
use std::error::Error;
use std::process::ExitCode;
use std::sync::Arc;

const USAGE: &str = "usage: portfolio_cli [<config.json> <baseline.json>]";

fn main() -> ExitCode {
    let args: Vec<String> = std::env::args().skip(1).collect();
    match args.as_slice() {
        [] => {
            println!("portfolio_core ping={}", portfolio_core::ping());
            println!("portfolio_core version={}", portfolio_core::core_version());
            ExitCode::SUCCESS
        }
        [config_path, baseline_path] => match export(config_path, baseline_path) {
            Ok(snapshot) => {
                println!("{snapshot}");
                ExitCode::SUCCESS
            }
            Err(err) => {
                eprintln!("error: {err}");
                ExitCode::FAILURE
            }
        },
        _ => {
            eprintln!("{USAGE}");
            ExitCode::from(2)
        }
    }
}

fn export(config_path: &str, baseline_path: &str) -> Result<String, Box<dyn Error>> {
    let config = PortfolioConfig::from_path(config_path)?;
    if let Some(log_dir) = &config.log_dir {
        init_logging(&config.log_level, log_dir)?;
    }

    let baseline = BaselineDataset::from_path(baseline_path)?;
    let conn = match &config.db_path {
        Some(path) => open_db(path)?,
        None => open_db_in_memory()?,
    };
    let store = SqliteKvStore::try_new(&conn)?;
    let career = CareerStore::new(&store, &baseline, Arc::new(SystemClock))
        .with_sections(config.sections.clone());

    log::info!(
        "event=snapshot_export module=cli status=ok records={}",
        baseline.total_records()
    );
    Ok(serde_json::to_string_pretty(&career.export_snapshot())?)
}
