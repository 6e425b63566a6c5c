//! Day-record store adapter.
//!
//! The core only talks to `DayStore`; `SqliteStore` persists to the
//! application database, `MemoryStore` keeps everything in a `Vec`.
//! All keys are normalized local dates.

pub mod memory;
pub mod sqlite;

use crate::errors::AppResult;
use crate::models::day_record::DayRecord;
use chrono::NaiveDate;

pub use memory::MemoryStore;
pub use sqlite::SqliteStore;

pub trait DayStore {
    /// Records with `start <= date <= end`, ascending by date then id.
    /// Damaged data may yield more than one record for a date.
    fn fetch_range(&self, start: NaiveDate, end: NaiveDate) -> AppResult<Vec<DayRecord>>;

    /// Every record, ascending by date then id.
    fn fetch_all(&self) -> AppResult<Vec<DayRecord>>;

    fn count(&self) -> AppResult<usize>;

    /// Create the record for `date` if absent. An existing record may only be
    /// raised from not studied to studied, never lowered.
    /// Returns whether anything was written.
    fn upsert(&mut self, date: NaiveDate, studied: bool) -> AppResult<bool>;

    /// Explicit user write of the studied flag for `date`.
    fn set_studied(&mut self, date: NaiveDate, studied: bool) -> AppResult<()>;

    /// Remove one record by id. Only used to repair duplicates.
    fn delete(&mut self, record: &DayRecord) -> AppResult<()>;

    /// Run `f` as one unit: no other writer may interleave, and a failure
    /// leaves the store as it was.
    fn atomically<T, F>(&mut self, f: F) -> AppResult<T>
    where
        F: FnOnce(&mut Self) -> AppResult<T>,
        Self: Sized;

    /// Record an audit line. Stores without an audit trail ignore it.
    fn audit(&mut self, _operation: &str, _target: &str, _message: &str) {}
}
