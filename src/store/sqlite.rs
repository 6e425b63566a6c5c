use super::DayStore;
use crate::db::log::ttlog_quiet;
use crate::db::pool::DbPool;
use crate::db::queries;
use crate::errors::AppResult;
use crate::models::day_record::DayRecord;
use chrono::NaiveDate;

/// `DayStore` backed by the `days` table.
pub struct SqliteStore {
    pool: DbPool,
}

impl SqliteStore {
    pub fn open(path: &str) -> AppResult<Self> {
        Ok(Self {
            pool: DbPool::new(path)?,
        })
    }

    pub fn in_memory() -> AppResult<Self> {
        Ok(Self {
            pool: DbPool::in_memory()?,
        })
    }

    pub fn from_pool(pool: DbPool) -> Self {
        Self { pool }
    }

    pub fn pool(&self) -> &DbPool {
        &self.pool
    }
}

impl DayStore for SqliteStore {
    fn fetch_range(&self, start: NaiveDate, end: NaiveDate) -> AppResult<Vec<DayRecord>> {
        Ok(queries::load_days_in_range(&self.pool.conn, &start, &end)?)
    }

    fn fetch_all(&self) -> AppResult<Vec<DayRecord>> {
        Ok(queries::load_all_days(&self.pool.conn)?)
    }

    fn count(&self) -> AppResult<usize> {
        Ok(queries::count_days(&self.pool.conn)?)
    }

    fn upsert(&mut self, date: NaiveDate, studied: bool) -> AppResult<bool> {
        let conn = &self.pool.conn;

        if queries::day_exists(conn, &date)? {
            if studied {
                return Ok(queries::raise_studied(conn, &date)? > 0);
            }
            return Ok(false);
        }

        let mut day = DayRecord::new(date);
        day.studied = studied;
        queries::insert_day(conn, &day)?;
        Ok(true)
    }

    fn set_studied(&mut self, date: NaiveDate, studied: bool) -> AppResult<()> {
        queries::set_studied(&self.pool.conn, &date, studied)?;
        Ok(())
    }

    fn delete(&mut self, record: &DayRecord) -> AppResult<()> {
        queries::delete_day(&self.pool.conn, record.id)?;
        Ok(())
    }

    fn atomically<T, F>(&mut self, f: F) -> AppResult<T>
    where
        F: FnOnce(&mut Self) -> AppResult<T>,
    {
        // already inside a transaction: join it
        if !self.pool.conn.is_autocommit() {
            return f(self);
        }

        self.pool.conn.execute_batch("BEGIN IMMEDIATE")?;

        match f(self) {
            Ok(v) => {
                if let Err(e) = self.pool.conn.execute_batch("COMMIT") {
                    let _ = self.pool.conn.execute_batch("ROLLBACK");
                    return Err(e.into());
                }
                Ok(v)
            }
            Err(e) => {
                let _ = self.pool.conn.execute_batch("ROLLBACK");
                Err(e)
            }
        }
    }

    fn audit(&mut self, operation: &str, target: &str, message: &str) {
        ttlog_quiet(&self.pool.conn, operation, target, message);
    }
}
