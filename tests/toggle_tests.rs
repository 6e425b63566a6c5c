use studycal::calendar::{self, WeekStart};
use studycal::core::materialize::MaterializeLogic;
use studycal::core::toggle::{RejectReason, ToggleLogic, ToggleOutcome};
use studycal::core::tracker::Tracker;
use studycal::errors::AppError;
use studycal::models::settings::{BackfillPolicy, DisplaySettings};
use studycal::store::{DayStore, MemoryStore};

mod common;
use common::date;

#[test]
fn test_toggle_is_an_involution() {
    let mut store = MemoryStore::new();
    let today = date(2025, 3, 12);
    let d = date(2025, 3, 10);
    store.insert_raw(d, false);

    let first = ToggleLogic::apply(&mut store, d, today).unwrap();
    assert_eq!(first, ToggleOutcome::Toggled { new_value: true });

    let second = ToggleLogic::apply(&mut store, d, today).unwrap();
    assert_eq!(second, ToggleOutcome::Toggled { new_value: false });

    assert!(!store.records_for(d)[0].studied);
}

#[test]
fn test_toggle_today_is_allowed() {
    let mut store = MemoryStore::new();
    let today = date(2025, 3, 12);

    let outcome = ToggleLogic::apply(&mut store, today, today).unwrap();
    assert_eq!(outcome, ToggleOutcome::Toggled { new_value: true });
}

#[test]
fn test_toggle_future_is_rejected_without_writes() {
    let mut store = MemoryStore::new();
    let today = date(2025, 3, 12);
    store.insert_raw(date(2025, 3, 13), false);

    for d in [date(2025, 3, 13), date(2025, 4, 1), date(2030, 1, 1)] {
        let outcome = ToggleLogic::apply(&mut store, d, today).unwrap();
        assert_eq!(
            outcome,
            ToggleOutcome::Rejected {
                reason: RejectReason::FutureDate
            }
        );
    }

    assert_eq!(store.writes(), 0);
    assert!(!store.records_for(date(2025, 3, 13))[0].studied);
    assert_eq!(store.count().unwrap(), 1);
}

#[test]
fn test_rejection_maps_to_invalid_operation() {
    let outcome = ToggleOutcome::Rejected {
        reason: RejectReason::FutureDate,
    };
    let err = outcome.into_result(date(2025, 3, 13)).unwrap_err();
    assert!(matches!(err, AppError::InvalidOperation(msg) if msg.contains("future date")));
}

#[test]
fn test_toggle_materializes_missing_record() {
    let mut store = MemoryStore::new();
    let today = date(2025, 3, 12);
    let d = date(2024, 7, 4);

    let outcome = ToggleLogic::apply(&mut store, d, today).unwrap();
    assert_eq!(outcome, ToggleOutcome::Toggled { new_value: true });

    let rows = store.records_for(d);
    assert_eq!(rows.len(), 1);
    assert!(rows[0].studied);
}

#[test]
fn test_tracker_streak_follows_toggles() {
    let today = date(2025, 3, 12);
    let mut tracker = Tracker::new(
        MemoryStore::new(),
        DisplaySettings::default(),
        BackfillPolicy::default(),
    )
    .with_clock(move || today);

    let days = tracker.get_days_in_window(today).unwrap();
    assert_eq!(days.len(), 42);
    assert_eq!(tracker.get_current_streak().unwrap(), 0);

    tracker.toggle_studied(date(2025, 3, 10)).unwrap();
    tracker.toggle_studied(date(2025, 3, 11)).unwrap();
    // grace: today not studied yet
    assert_eq!(tracker.get_current_streak().unwrap(), 2);

    tracker.toggle_studied(today).unwrap();
    assert_eq!(tracker.get_current_streak().unwrap(), 3);

    let rejected = tracker.toggle_studied(date(2025, 3, 13)).unwrap();
    assert!(matches!(rejected, ToggleOutcome::Rejected { .. }));
    assert_eq!(tracker.get_current_streak().unwrap(), 3);

    tracker.toggle_studied(date(2025, 3, 11)).unwrap();
    assert_eq!(tracker.get_current_streak().unwrap(), 1);
}

#[test]
fn test_tracker_window_days_are_unique_and_ordered() {
    let today = date(2025, 3, 12);
    let mut store = MemoryStore::new();
    store.insert_raw(date(2025, 3, 3), false);
    store.insert_raw(date(2025, 3, 3), true);

    let mut tracker = Tracker::new(store, DisplaySettings::default(), BackfillPolicy::default())
        .with_clock(move || today);

    let days = tracker.get_days_in_window(date(2025, 3, 1)).unwrap();
    assert_eq!(days.len(), 42);
    assert!(days.windows(2).all(|w| w[0].date < w[1].date));
    assert!(days.iter().find(|r| r.date == date(2025, 3, 3)).unwrap().studied);

    let window = tracker.get_window(date(2025, 3, 1)).unwrap();
    assert_eq!(days.first().unwrap().date, window.start);
    assert_eq!(days.last().unwrap().date, window.end);
}

#[test]
fn test_first_toggle_on_empty_store_runs_backfill() {
    let today = date(2025, 3, 12);
    let policy = BackfillPolicy::default();
    let mut tracker = Tracker::new(MemoryStore::new(), DisplaySettings::default(), policy)
        .with_clock(move || today);

    let outcome = tracker.toggle_studied(today).unwrap();
    assert_eq!(outcome, ToggleOutcome::Toggled { new_value: true });

    let (start, end) =
        MaterializeLogic::backfill_bounds(today, WeekStart::Sunday, &policy).unwrap();
    let expected = calendar::days_between(start, end).len();
    assert_eq!(tracker.store().count().unwrap(), expected);

    // a later pass has nothing left to backfill
    let report = tracker.ensure_window_materialized(today).unwrap();
    assert!(report.is_noop());
    assert_eq!(tracker.get_current_streak().unwrap(), 1);
}

#[test]
fn test_rejected_toggle_on_empty_store_writes_nothing() {
    let today = date(2025, 3, 12);
    let mut tracker = Tracker::new(
        MemoryStore::new(),
        DisplaySettings::default(),
        BackfillPolicy::default(),
    )
    .with_clock(move || today);

    tracker.toggle_studied(date(2025, 3, 13)).unwrap();
    assert_eq!(tracker.store().count().unwrap(), 0);
    assert_eq!(tracker.store().writes(), 0);
}

#[test]
fn test_window_days_reads_without_writing() {
    let today = date(2025, 3, 12);
    let mut store = MemoryStore::new();
    store.insert_raw(date(2025, 3, 5), true);

    let tracker = Tracker::new(store, DisplaySettings::default(), BackfillPolicy::default())
        .with_clock(move || today);

    let days = tracker.window_days(today).unwrap();
    assert_eq!(days.len(), 1);
    assert!(days[0].studied);
    assert_eq!(tracker.store().writes(), 0);
}
