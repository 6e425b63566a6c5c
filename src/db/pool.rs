//! SQLite connection wrapper (lightweight for CLI usage).

use crate::db::migrate::run_pending_migrations;
use crate::errors::{AppError, AppResult};
use rusqlite::Connection;
use std::path::Path;

pub struct DbPool {
    pub conn: Connection,
}

/// Schema creation and upgrades all go through the migration engine.
fn prepare(conn: Connection) -> AppResult<DbPool> {
    run_pending_migrations(&conn).map_err(|e| AppError::Migration(e.to_string()))?;
    Ok(DbPool { conn })
}

impl DbPool {
    /// Open the database file and bring its schema up to date.
    pub fn new(path: &str) -> AppResult<Self> {
        prepare(Connection::open(Path::new(path))?)
    }

    /// Private in-memory database with the current schema.
    pub fn in_memory() -> AppResult<Self> {
        prepare(Connection::open_in_memory()?)
    }
}
