use super::DayStore;
use crate::errors::AppResult;
use crate::models::day_record::DayRecord;
use chrono::NaiveDate;

/// `DayStore` kept in memory. Counts every write so callers can check
/// that a pass was a no-op.
#[derive(Debug, Default, Clone)]
pub struct MemoryStore {
    records: Vec<DayRecord>,
    next_id: i64,
    writes: usize,
}

impl MemoryStore {
    pub fn new() -> Self {
        Self::default()
    }

    /// Insert a record without any uniqueness check. Lets callers reproduce
    /// damaged data (two rows for one day). Not counted as a write.
    pub fn insert_raw(&mut self, date: NaiveDate, studied: bool) -> i64 {
        self.next_id += 1;
        let mut day = DayRecord::new(date);
        day.id = self.next_id;
        day.studied = studied;
        self.records.push(day);
        self.next_id
    }

    pub fn writes(&self) -> usize {
        self.writes
    }

    pub fn records_for(&self, date: NaiveDate) -> Vec<&DayRecord> {
        self.records.iter().filter(|r| r.date == date).collect()
    }

    fn sorted(mut out: Vec<DayRecord>) -> Vec<DayRecord> {
        out.sort_by_key(|r| (r.date, r.id));
        out
    }
}

impl DayStore for MemoryStore {
    fn fetch_range(&self, start: NaiveDate, end: NaiveDate) -> AppResult<Vec<DayRecord>> {
        Ok(Self::sorted(
            self.records
                .iter()
                .filter(|r| start <= r.date && r.date <= end)
                .cloned()
                .collect(),
        ))
    }

    fn fetch_all(&self) -> AppResult<Vec<DayRecord>> {
        Ok(Self::sorted(self.records.clone()))
    }

    fn count(&self) -> AppResult<usize> {
        Ok(self.records.len())
    }

    fn upsert(&mut self, date: NaiveDate, studied: bool) -> AppResult<bool> {
        let mut existing = self.records.iter_mut().filter(|r| r.date == date).peekable();

        if existing.peek().is_some() {
            let mut changed = false;
            if studied {
                for r in existing.filter(|r| !r.studied) {
                    r.studied = true;
                    changed = true;
                }
            }
            if changed {
                self.writes += 1;
            }
            return Ok(changed);
        }

        self.insert_raw(date, studied);
        self.writes += 1;
        Ok(true)
    }

    fn set_studied(&mut self, date: NaiveDate, studied: bool) -> AppResult<()> {
        for r in self.records.iter_mut().filter(|r| r.date == date) {
            r.studied = studied;
        }
        self.writes += 1;
        Ok(())
    }

    fn delete(&mut self, record: &DayRecord) -> AppResult<()> {
        self.records.retain(|r| r.id != record.id);
        self.writes += 1;
        Ok(())
    }

    fn atomically<T, F>(&mut self, f: F) -> AppResult<T>
    where
        F: FnOnce(&mut Self) -> AppResult<T>,
    {
        let snapshot = self.clone();
        let result = f(self);
        if result.is_err() {
            *self = snapshot;
        }
        result
    }
}
