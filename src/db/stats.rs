use crate::db::pool::DbPool;
use ansi_term::Colour::{Cyan, Green, Yellow};
use std::fs;

/// Aggregate numbers shown by `db --info`.
#[derive(Debug, Default)]
pub struct DbStats {
    pub file_size: u64,
    pub total_days: i64,
    pub studied_days: i64,
    pub first_date: Option<String>,
    pub last_date: Option<String>,
}

pub fn collect(pool: &DbPool, db_path: &str) -> rusqlite::Result<DbStats> {
    let file_size = fs::metadata(db_path).map(|m| m.len()).unwrap_or(0);

    let (total_days, studied_days): (i64, i64) = pool.conn.query_row(
        "SELECT COUNT(*), COALESCE(SUM(studied), 0) FROM days",
        [],
        |row| Ok((row.get(0)?, row.get(1)?)),
    )?;

    let first_date: Option<String> = pool
        .conn
        .query_row("SELECT MIN(date) FROM days", [], |row| {
            row.get::<_, Option<String>>(0)
        })?;

    let last_date: Option<String> = pool
        .conn
        .query_row("SELECT MAX(date) FROM days", [], |row| {
            row.get::<_, Option<String>>(0)
        })?;

    Ok(DbStats {
        file_size,
        total_days,
        studied_days,
        first_date,
        last_date,
    })
}

pub fn print_db_info(pool: &DbPool, db_path: &str) -> rusqlite::Result<()> {
    let stats = collect(pool, db_path)?;
    let file_mb = (stats.file_size as f64) / (1024.0 * 1024.0);

    println!();
    println!("{} {}", Cyan.paint("• File:"), Yellow.paint(db_path));
    println!("{} {:.2} MB", Cyan.paint("• Size:"), file_mb);
    println!(
        "{} {}",
        Cyan.paint("• Days recorded:"),
        Green.paint(stats.total_days.to_string())
    );
    println!(
        "{} {}",
        Cyan.paint("• Days studied:"),
        Green.paint(stats.studied_days.to_string())
    );

    println!("{}", Cyan.paint("• Date range:"));
    println!("    from: {}", stats.first_date.as_deref().unwrap_or("--"));
    println!("    to:   {}", stats.last_date.as_deref().unwrap_or("--"));
    println!();

    Ok(())
}
