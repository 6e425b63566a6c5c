//! Window materialization: make sure every day of a padded month window
//! has exactly one record before anybody reads it.

use crate::calendar::{self, WeekStart};
use crate::errors::{AppError, AppResult};
use crate::models::day_record::DayRecord;
use crate::models::settings::BackfillPolicy;
use crate::models::window::CalendarWindow;
use crate::store::DayStore;
use chrono::{Datelike, NaiveDate};
use std::collections::BTreeMap;

/// What a materialization pass changed.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct MaterializeReport {
    /// Default records created for window days that had none.
    pub created: usize,
    /// Duplicate records removed.
    pub removed: usize,
    /// Records created by the first-run backfill.
    pub backfilled: usize,
}

impl MaterializeReport {
    pub fn is_noop(&self) -> bool {
        self.created == 0 && self.removed == 0 && self.backfilled == 0
    }
}

pub struct MaterializeLogic;

impl MaterializeLogic {
    /// Ensure one record per day in the window of `reference`.
    ///
    /// On an empty store the whole backfill range is created first. Runs as
    /// a single atomic unit on the store.
    pub fn ensure_window<S: DayStore>(
        store: &mut S,
        reference: NaiveDate,
        week_start: WeekStart,
        policy: &BackfillPolicy,
    ) -> AppResult<MaterializeReport> {
        let window = calendar::window(reference, week_start)?;

        let report = store.atomically(|s| {
            let backfilled = if s.count()? == 0 {
                Self::backfill(s, reference, week_start, policy)?
            } else {
                0
            };

            let (created, removed) = Self::materialize_range(s, &window)?;

            Ok(MaterializeReport {
                created,
                removed,
                backfilled,
            })
        })?;

        if report.backfilled > 0 {
            store.audit(
                "backfill",
                &reference.format("%Y").to_string(),
                &format!("Created {} day records on first run", report.backfilled),
            );
        }
        if report.removed > 0 {
            store.audit(
                "repair",
                &window.title(),
                &format!("Removed {} duplicate day records", report.removed),
            );
        }

        Ok(report)
    }

    /// First and last day covered by the first-run backfill around `reference`.
    pub fn backfill_bounds(
        reference: NaiveDate,
        week_start: WeekStart,
        policy: &BackfillPolicy,
    ) -> AppResult<(NaiveDate, NaiveDate)> {
        let year = reference.year();
        let first_year = i32::try_from(policy.years_back)
            .ok()
            .and_then(|back| year.checked_sub(back))
            .ok_or_else(|| {
                AppError::InvalidDate(format!("backfill of {} years back", policy.years_back))
            })?;
        let last_year = i32::try_from(policy.years_forward)
            .ok()
            .and_then(|fwd| year.checked_add(fwd))
            .ok_or_else(|| {
                AppError::InvalidDate(format!(
                    "backfill of {} years forward",
                    policy.years_forward
                ))
            })?;

        let jan = NaiveDate::from_ymd_opt(first_year, 1, 1)
            .ok_or_else(|| AppError::InvalidDate(format!("year {first_year}")))?;
        let dec = NaiveDate::from_ymd_opt(last_year, 12, 1)
            .ok_or_else(|| AppError::InvalidDate(format!("year {last_year}")))?;

        Ok((
            calendar::start_of_calendar_with_prefix_days(jan, week_start)?,
            calendar::end_of_calendar_with_suffix_days(dec, week_start)?,
        ))
    }

    fn backfill<S: DayStore>(
        store: &mut S,
        reference: NaiveDate,
        week_start: WeekStart,
        policy: &BackfillPolicy,
    ) -> AppResult<usize> {
        let (start, end) = Self::backfill_bounds(reference, week_start, policy)?;

        let mut created = 0;
        for d in calendar::days_between(start, end) {
            if store.upsert(d, false)? {
                created += 1;
            }
        }
        Ok(created)
    }

    /// Repair duplicates, then fill the gaps. Returns (created, removed).
    fn materialize_range<S: DayStore>(
        store: &mut S,
        window: &CalendarWindow,
    ) -> AppResult<(usize, usize)> {
        let existing = store.fetch_range(window.start, window.end)?;

        let mut by_date: BTreeMap<NaiveDate, Vec<DayRecord>> = BTreeMap::new();
        for r in existing {
            by_date.entry(r.date).or_default().push(r);
        }

        let mut removed = 0;
        for records in by_date.values().filter(|v| v.len() > 1) {
            let keep = survivor(records);
            for r in records.iter().filter(|r| r.id != keep) {
                store.delete(r)?;
                removed += 1;
            }
        }

        let mut created = 0;
        for d in window.days() {
            if !by_date.contains_key(&d) && store.upsert(d, false)? {
                created += 1;
            }
        }

        Ok((created, removed))
    }
}

/// Id of the record kept among duplicates for one day: the first studied
/// one, otherwise the oldest.
fn survivor(records: &[DayRecord]) -> i64 {
    records
        .iter()
        .find(|r| r.studied)
        .or_else(|| records.iter().min_by_key(|r| r.id))
        .map(|r| r.id)
        .unwrap_or_default()
}
