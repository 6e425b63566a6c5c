// src/export/model.rs

use crate::models::day_record::DayRecord;
use serde::Serialize;

/// Flat row written by the CSV and JSON exporters.
#[derive(Serialize, Clone, Debug, PartialEq, Eq)]
pub struct DayExport {
    pub date: String,
    pub weekday: String,
    pub studied: bool,
}

impl From<&DayRecord> for DayExport {
    fn from(r: &DayRecord) -> Self {
        Self {
            date: r.date_str(),
            weekday: r.weekday_str(),
            studied: r.studied,
        }
    }
}
