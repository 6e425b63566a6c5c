use crate::errors::AppError;
use crate::models::day_record::DayRecord;
use chrono::NaiveDate;
use rusqlite::{Connection, OptionalExtension, Result, Row, params};

const DATE_FMT: &str = "%Y-%m-%d";

fn date_to_db(d: &NaiveDate) -> String {
    d.format(DATE_FMT).to_string()
}

pub fn map_row(row: &Row) -> Result<DayRecord> {
    let date_str: String = row.get("date")?;

    let date = NaiveDate::parse_from_str(&date_str, DATE_FMT).map_err(|_| {
        rusqlite::Error::FromSqlConversionFailure(
            0,
            rusqlite::types::Type::Text,
            Box::new(AppError::InvalidDate(date_str.clone())),
        )
    })?;

    Ok(DayRecord {
        id: row.get("id")?,
        date,
        studied: row.get::<_, i64>("studied")? != 0,
        created_at: row.get("created_at")?,
    })
}

/// Records with `start <= date <= end`, ordered by date then id.
pub fn load_days_in_range(
    conn: &Connection,
    start: &NaiveDate,
    end: &NaiveDate,
) -> Result<Vec<DayRecord>> {
    let mut stmt = conn.prepare_cached(
        "SELECT id, date, studied, created_at FROM days
         WHERE date >= ?1 AND date <= ?2
         ORDER BY date ASC, id ASC",
    )?;

    let rows = stmt.query_map(params![date_to_db(start), date_to_db(end)], map_row)?;

    let mut out = Vec::new();
    for r in rows {
        out.push(r?);
    }
    Ok(out)
}

pub fn load_all_days(conn: &Connection) -> Result<Vec<DayRecord>> {
    let mut stmt = conn.prepare_cached(
        "SELECT id, date, studied, created_at FROM days
         ORDER BY date ASC, id ASC",
    )?;

    let rows = stmt.query_map([], map_row)?;

    let mut out = Vec::new();
    for r in rows {
        out.push(r?);
    }
    Ok(out)
}

pub fn count_days(conn: &Connection) -> Result<usize> {
    let n: i64 = conn.query_row("SELECT COUNT(*) FROM days", [], |row| row.get(0))?;
    Ok(n as usize)
}

pub fn day_exists(conn: &Connection, date: &NaiveDate) -> Result<bool> {
    let found: Option<i64> = conn
        .query_row(
            "SELECT id FROM days WHERE date = ?1 LIMIT 1",
            [date_to_db(date)],
            |row| row.get(0),
        )
        .optional()?;
    Ok(found.is_some())
}

pub fn insert_day(conn: &Connection, day: &DayRecord) -> Result<i64> {
    conn.execute(
        "INSERT INTO days (date, studied, created_at) VALUES (?1, ?2, ?3)",
        params![
            day.date_str(),
            if day.studied { 1 } else { 0 },
            day.created_at
        ],
    )?;
    Ok(conn.last_insert_rowid())
}

/// Raise `studied` from 0 to 1 for every row on `date`. Never lowers it.
/// Returns the number of rows changed.
pub fn raise_studied(conn: &Connection, date: &NaiveDate) -> Result<usize> {
    conn.execute(
        "UPDATE days SET studied = 1 WHERE date = ?1 AND studied = 0",
        [date_to_db(date)],
    )
}

/// Explicit user write: set `studied` on every row for `date`.
pub fn set_studied(conn: &Connection, date: &NaiveDate, studied: bool) -> Result<usize> {
    conn.execute(
        "UPDATE days SET studied = ?1 WHERE date = ?2",
        params![if studied { 1 } else { 0 }, date_to_db(date)],
    )
}

pub fn delete_day(conn: &Connection, id: i64) -> Result<()> {
    conn.execute("DELETE FROM days WHERE id = ?1", [id])?;
    Ok(())
}

/// Dates carrying more than one row, with their row count.
pub fn duplicate_dates(conn: &Connection) -> Result<Vec<(String, i64)>> {
    let mut stmt = conn.prepare(
        "SELECT date, COUNT(*) FROM days
         GROUP BY date HAVING COUNT(*) > 1
         ORDER BY date ASC",
    )?;

    let rows = stmt.query_map([], |row| Ok((row.get(0)?, row.get(1)?)))?;

    let mut out = Vec::new();
    for r in rows {
        out.push(r?);
    }
    Ok(out)
}
