use crate::cli::commands::open_tracker;
use crate::cli::parser::Cli;
use crate::config::Config;
use crate::db::log::ttlog_quiet;
use crate::errors::AppResult;
use crate::ui::messages::{info, success};
use chrono::NaiveDate;

/// Handle the `init` command
///
/// This initializes:
///  - the config directory and file (skipped in test mode)
///  - the SQLite database and its migrations
///  - the first-run backfill of day records
pub fn handle(cli: &Cli, today: NaiveDate) -> AppResult<()> {
    let db_path = Config::init_all(cli.db.clone(), cli.test)?;

    let cfg = Config {
        database: db_path.clone(),
        ..Config::load()?
    };

    info("Initializing studycal…");

    let mut tracker = open_tracker(&cfg, today)?;
    let report = tracker.ensure_window_materialized(today)?;

    if report.backfilled > 0 {
        success(format!("Created {} day records.", report.backfilled));
    }

    ttlog_quiet(
        &tracker.store().pool().conn,
        "init",
        "Database initialized",
        &format!("Database initialized at {}", db_path),
    );

    success("studycal initialization completed!");
    Ok(())
}
