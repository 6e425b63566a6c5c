use crate::errors::{AppError, AppResult};
use crate::store::DayStore;
use chrono::{Days, NaiveDate};
use serde::Serialize;
use std::fmt;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub enum RejectReason {
    FutureDate,
}

impl fmt::Display for RejectReason {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            RejectReason::FutureDate => write!(f, "future date"),
        }
    }
}

/// Result of a toggle request.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub enum ToggleOutcome {
    Toggled { new_value: bool },
    Rejected { reason: RejectReason },
}

impl ToggleOutcome {
    /// Turn a rejection into `AppError::InvalidOperation`.
    pub fn into_result(self, date: NaiveDate) -> AppResult<bool> {
        match self {
            ToggleOutcome::Toggled { new_value } => Ok(new_value),
            ToggleOutcome::Rejected { reason } => Err(AppError::InvalidOperation(format!(
                "cannot toggle {date}: {reason}"
            ))),
        }
    }
}

/// True for `date` on or after the day following `today`.
pub fn is_future(date: NaiveDate, today: NaiveDate) -> bool {
    match today.checked_add_days(Days::new(1)) {
        Some(tomorrow) => date >= tomorrow,
        None => date > today,
    }
}

pub struct ToggleLogic;

impl ToggleLogic {
    /// Flip the studied flag of `date`.
    ///
    /// Days from tomorrow on are rejected without touching the store. A
    /// missing record is created first. The streak is not recomputed here.
    pub fn apply<S: DayStore>(
        store: &mut S,
        date: NaiveDate,
        today: NaiveDate,
    ) -> AppResult<ToggleOutcome> {
        if is_future(date, today) {
            return Ok(ToggleOutcome::Rejected {
                reason: RejectReason::FutureDate,
            });
        }

        let new_value = store.atomically(|s| {
            let records = s.fetch_range(date, date)?;
            if records.is_empty() {
                s.upsert(date, false)?;
            }

            let current = records.iter().any(|r| r.studied);
            s.set_studied(date, !current)?;
            Ok(!current)
        })?;

        store.audit(
            "toggle",
            &date.format("%Y-%m-%d").to_string(),
            if new_value {
                "Marked as studied"
            } else {
                "Marked as not studied"
            },
        );

        Ok(ToggleOutcome::Toggled { new_value })
    }
}
