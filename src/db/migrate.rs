use crate::ui::messages::{success, warning};
use rusqlite::{Connection, Error, OptionalExtension, Result};

/// Ensure that the `log` table exists.
fn ensure_log_table(conn: &Connection) -> Result<()> {
    conn.execute_batch(
        r#"
        CREATE TABLE IF NOT EXISTS log (
            id        INTEGER PRIMARY KEY AUTOINCREMENT,
            date      TEXT NOT NULL,
            operation TEXT NOT NULL,
            target    TEXT DEFAULT '',
            message   TEXT NOT NULL
        );
        "#,
    )?;
    Ok(())
}

/// Check if the `days` table exists.
fn days_table_exists(conn: &Connection) -> Result<bool> {
    let mut stmt =
        conn.prepare("SELECT name FROM sqlite_master WHERE type='table' AND name='days'")?;
    let exists: Option<String> = stmt.query_row([], |row| row.get(0)).optional()?;
    Ok(exists.is_some())
}

/// Check if the `days` table has a given column.
fn days_has_column(conn: &Connection, column: &str) -> Result<bool> {
    let mut stmt = conn.prepare("PRAGMA table_info('days')")?;
    let cols = stmt.query_map([], |row| row.get::<_, String>(1))?;

    for c in cols {
        if c? == column {
            return Ok(true);
        }
    }
    Ok(false)
}

/// Create the `days` table with the current schema.
///
/// `date` is deliberately not UNIQUE: uniqueness per day is enforced by the
/// window materializer, which must be able to see and repair duplicates.
fn create_days_table(conn: &Connection) -> Result<()> {
    conn.execute_batch(
        r#"
        CREATE TABLE IF NOT EXISTS days (
            id          INTEGER PRIMARY KEY AUTOINCREMENT,
            date        TEXT NOT NULL,
            studied     INTEGER NOT NULL DEFAULT 0 CHECK(studied IN (0, 1)),
            created_at  TEXT NOT NULL DEFAULT ''
        );

        CREATE INDEX IF NOT EXISTS idx_days_date ON days(date);
        "#,
    )?;
    Ok(())
}

fn migration_applied(conn: &Connection, version: &str) -> Result<bool> {
    let mut chk = conn.prepare(
        "SELECT 1 FROM log
         WHERE operation = 'migration_applied' AND target = ?1
         LIMIT 1",
    )?;
    Ok(chk.query_row([version], |_| Ok(())).optional()?.is_some())
}

fn mark_applied(conn: &Connection, version: &str, message: &str) -> Result<()> {
    conn.execute(
        "INSERT INTO log (date, operation, target, message)
         VALUES (datetime('now'), 'migration_applied', ?1, ?2)",
        [version, message],
    )?;
    Ok(())
}

fn backup_before_migration(db_path: &str, version: &str) -> Result<()> {
    use chrono::Local;
    use std::fs::{self, File};
    use std::io::Write;
    use zip::CompressionMethod;
    use zip::ZipWriter;
    use zip::write::FileOptions;

    let to_sql_err = |stage: &str, e: &dyn std::fmt::Display| {
        Error::ToSqlConversionFailure(Box::new(std::io::Error::other(format!(
            "Backup failed ({stage}): {e}"
        ))))
    };

    let backup_name = format!(
        "{}-backup_db_pre_{}.zip",
        Local::now().format("%Y%m%d_%H%M%S"),
        version
    );

    let db = std::path::Path::new(db_path);
    let backup_path = match db.parent() {
        Some(dir) => dir.join(&backup_name),
        None => std::path::PathBuf::from(&backup_name),
    };

    let file = File::create(&backup_path).map_err(|e| to_sql_err("create", &e))?;
    let mut zip = ZipWriter::new(file);

    let options: FileOptions<'_, ()> =
        FileOptions::default().compression_method(CompressionMethod::Deflated);

    zip.start_file("database.sqlite", options)
        .map_err(|e| to_sql_err("start_file", &e))?;

    let db_content = fs::read(db_path).map_err(|e| to_sql_err("read", &e))?;
    zip.write_all(&db_content)
        .map_err(|e| to_sql_err("write_all", &e))?;
    zip.finish().map_err(|e| to_sql_err("finish", &e))?;

    success(format!("📦 Backup created: {}", backup_path.display()));
    Ok(())
}

/// Legacy `days` tables (no `created_at`) get the column added and stamped.
fn migrate_add_created_at_to_days(conn: &Connection) -> Result<()> {
    let version = "20250301_0001_add_created_at_to_days";

    if migration_applied(conn, version)? {
        return Ok(());
    }

    if !days_has_column(conn, "created_at")? {
        let db_path: String = conn
            .query_row("PRAGMA database_list;", [], |row| row.get::<_, String>(2))
            .unwrap_or_default();

        if db_path.is_empty() {
            warning("Could not determine DB path, backup skipped.");
        } else {
            warning("Legacy schema detected, creating safety backup before migration...");
            backup_before_migration(&db_path, version)?;
        }

        conn.execute_batch(
            r#"
            ALTER TABLE days ADD COLUMN created_at TEXT NOT NULL DEFAULT '';
            UPDATE days SET created_at = datetime('now') WHERE created_at = '';
            "#,
        )
        .map_err(|e| {
            Error::SqliteFailure(
                rusqlite::ffi::Error::new(1),
                Some(format!("Failed to add 'created_at' column: {}", e)),
            )
        })?;

        success(format!(
            "Migration applied: {} → added 'created_at' to days table",
            version
        ));
    }

    mark_applied(conn, version, "Added created_at to days")?;
    Ok(())
}

/// Public entry point: run all pending migrations.
///
/// Invoked by `DbPool` every time a database is opened.
pub fn run_pending_migrations(conn: &Connection) -> Result<()> {
    ensure_log_table(conn)?;

    if !days_table_exists(conn)? {
        create_days_table(conn)?;
        success("Created days table.");
    } else {
        conn.execute_batch("CREATE INDEX IF NOT EXISTS idx_days_date ON days(date);")?;
    }

    migrate_add_created_at_to_days(conn)?;

    Ok(())
}
