//! `Tracker`: the operations the CLI (or any other front end) calls.

use crate::calendar;
use crate::core::materialize::{MaterializeLogic, MaterializeReport};
use crate::core::streak::current_streak;
use crate::core::toggle::{ToggleLogic, ToggleOutcome, is_future};
use crate::errors::AppResult;
use crate::models::day_record::DayRecord;
use crate::models::settings::{BackfillPolicy, DisplaySettings};
use crate::models::window::CalendarWindow;
use crate::store::DayStore;
use crate::utils::date;
use chrono::NaiveDate;
use std::collections::BTreeMap;

type Clock = Box<dyn Fn() -> NaiveDate>;

pub struct Tracker<S: DayStore> {
    store: S,
    settings: DisplaySettings,
    policy: BackfillPolicy,
    clock: Clock,
}

impl<S: DayStore> Tracker<S> {
    pub fn new(store: S, settings: DisplaySettings, policy: BackfillPolicy) -> Self {
        Self {
            store,
            settings,
            policy,
            clock: Box::new(date::today),
        }
    }

    /// Replace the local-date clock, e.g. to pin "today".
    pub fn with_clock<F>(mut self, clock: F) -> Self
    where
        F: Fn() -> NaiveDate + 'static,
    {
        self.clock = Box::new(clock);
        self
    }

    pub fn today(&self) -> NaiveDate {
        (self.clock)()
    }

    pub fn settings(&self) -> &DisplaySettings {
        &self.settings
    }

    pub fn store(&self) -> &S {
        &self.store
    }

    pub fn get_window(&self, reference: NaiveDate) -> AppResult<CalendarWindow> {
        calendar::window(reference, self.settings.week_start)
    }

    pub fn ensure_window_materialized(
        &mut self,
        reference: NaiveDate,
    ) -> AppResult<MaterializeReport> {
        MaterializeLogic::ensure_window(
            &mut self.store,
            reference,
            self.settings.week_start,
            &self.policy,
        )
    }

    /// One record per window day, ascending. Materializes first.
    pub fn get_days_in_window(&mut self, reference: NaiveDate) -> AppResult<Vec<DayRecord>> {
        self.ensure_window_materialized(reference)?;
        self.window_days(reference)
    }

    /// Read the window without materializing: days with no record are
    /// simply absent.
    pub fn window_days(&self, reference: NaiveDate) -> AppResult<Vec<DayRecord>> {
        let window = self.get_window(reference)?;
        let mut by_date: BTreeMap<NaiveDate, DayRecord> = BTreeMap::new();

        // keep the studied row if a duplicate appeared after materializing
        for r in self.store.fetch_range(window.start, window.end)? {
            let replace = by_date
                .get(&r.date)
                .is_none_or(|kept| !kept.studied && r.studied);
            if replace {
                by_date.insert(r.date, r);
            }
        }

        Ok(by_date.into_values().collect())
    }

    pub fn get_current_streak(&self) -> AppResult<u32> {
        let history = self.store.fetch_all()?;
        Ok(current_streak(&history, self.today()))
    }

    /// Flip `date`. A toggle that would be the first write to an empty
    /// store runs the materializer first, so the first-run backfill is not
    /// lost.
    pub fn toggle_studied(&mut self, date: NaiveDate) -> AppResult<ToggleOutcome> {
        let today = self.today();

        if !is_future(date, today) && self.store.count()? == 0 {
            self.ensure_window_materialized(date)?;
        }

        ToggleLogic::apply(&mut self.store, date, today)
    }
}
