use crate::cli::parser::Commands;
use crate::config::Config;
use crate::db::db_utils::{check_integrity, vacuum as vacuum_db};
use crate::db::migrate::run_pending_migrations;
use crate::db::pool::DbPool;
use crate::db::stats;
use crate::errors::AppResult;
use crate::ui::messages::{info, success, warning};

pub fn handle(cmd: &Commands, cfg: &Config) -> AppResult<()> {
    if let Commands::Db {
        migrate,
        check,
        vacuum,
        info: show_info,
    } = cmd
    {
        // opening already runs pending migrations
        let pool = DbPool::new(&cfg.database)?;

        if *migrate {
            info("Running migrations…");
            run_pending_migrations(&pool.conn)?;
            success("Migration completed.");
        }

        if *show_info {
            stats::print_db_info(&pool, &cfg.database)?;
        }

        if *check {
            let report = check_integrity(&pool.conn)?;

            if report.is_healthy() {
                success("Database is healthy: integrity ok, no duplicate days.");
            } else {
                for line in report.sqlite.iter().filter(|l| *l != "ok") {
                    warning(line);
                }
                for (date, n) in &report.duplicates {
                    warning(format!("{date}: {n} records"));
                }
                if !report.duplicates.is_empty() {
                    info("Run `studycal show --month <YYYY-MM>` on the affected months to repair them.");
                }
            }
        }

        if *vacuum {
            vacuum_db(&pool.conn)?;
            success("Database optimized.");
        }
    }

    Ok(())
}
