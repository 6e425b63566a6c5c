use chrono::{Datelike, Local, NaiveDate};
use serde::Serialize;

/// One "did I study" entry for a local calendar day.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct DayRecord {
    pub id: i64,            // ⇔ days.id (store-assigned)
    pub date: NaiveDate,    // ⇔ days.date (TEXT "YYYY-MM-DD")
    pub studied: bool,      // ⇔ days.studied (INT 0/1, default 0)
    pub created_at: String, // ⇔ days.created_at (TEXT, ISO8601)
}

impl DayRecord {
    /// Default record for a day that has never been touched.
    /// `id = 0` until the store assigns one.
    pub fn new(date: NaiveDate) -> Self {
        Self {
            id: 0,
            date,
            studied: false,
            created_at: Local::now().to_rfc3339(),
        }
    }

    pub fn date_str(&self) -> String {
        self.date.format("%Y-%m-%d").to_string()
    }

    pub fn weekday_str(&self) -> String {
        self.date.weekday().to_string()
    }
}
