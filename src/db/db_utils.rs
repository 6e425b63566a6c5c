use crate::db::queries::duplicate_dates;
use crate::errors::AppResult;
use rusqlite::Connection;

/// Result of `db --check`.
#[derive(Debug, Default)]
pub struct IntegrityReport {
    /// Lines returned by `PRAGMA integrity_check` ("ok" when healthy).
    pub sqlite: Vec<String>,
    /// Dates with more than one row, and how many rows each.
    pub duplicates: Vec<(String, i64)>,
}

impl IntegrityReport {
    pub fn is_healthy(&self) -> bool {
        self.sqlite.iter().all(|l| l == "ok") && self.duplicates.is_empty()
    }
}

pub fn check_integrity(conn: &Connection) -> AppResult<IntegrityReport> {
    let sqlite: Vec<String> = {
        let mut stmt = conn.prepare("PRAGMA integrity_check")?;
        stmt.query_map([], |row| row.get::<_, String>(0))?
            .collect::<rusqlite::Result<_>>()?
    };

    Ok(IntegrityReport {
        sqlite,
        duplicates: duplicate_dates(conn)?,
    })
}

pub fn vacuum(conn: &Connection) -> AppResult<()> {
    conn.execute_batch("VACUUM;")?;
    Ok(())
}
