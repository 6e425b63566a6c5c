use rusqlite::Connection;
use studycal::calendar::WeekStart;
use studycal::core::log::LogLogic;
use studycal::core::materialize::MaterializeLogic;
use studycal::core::toggle::{ToggleLogic, ToggleOutcome};
use studycal::db::db_utils::check_integrity;
use studycal::db::pool::DbPool;
use studycal::db::queries;
use studycal::errors::AppError;
use studycal::models::settings::BackfillPolicy;
use studycal::store::{DayStore, SqliteStore};

mod common;
use common::{date, rec, test_dir};

#[test]
fn test_upsert_creates_then_never_lowers() {
    let mut store = SqliteStore::in_memory().unwrap();
    let d = date(2025, 3, 12);

    assert!(store.upsert(d, false).unwrap());
    assert!(!store.upsert(d, false).unwrap());
    assert!(store.upsert(d, true).unwrap());
    assert!(!store.upsert(d, false).unwrap());

    let rows = store.fetch_range(d, d).unwrap();
    assert_eq!(rows.len(), 1);
    assert!(rows[0].studied);
}

#[test]
fn test_fetch_is_ordered_and_inclusive() {
    let mut store = SqliteStore::in_memory().unwrap();
    for d in [date(2025, 3, 3), date(2025, 3, 1), date(2025, 3, 2), date(2025, 3, 4)] {
        store.upsert(d, false).unwrap();
    }

    let range = store.fetch_range(date(2025, 3, 1), date(2025, 3, 3)).unwrap();
    let dates: Vec<_> = range.iter().map(|r| r.date).collect();
    assert_eq!(dates, vec![date(2025, 3, 1), date(2025, 3, 2), date(2025, 3, 3)]);

    assert_eq!(store.fetch_all().unwrap().len(), 4);
    assert_eq!(store.count().unwrap(), 4);
}

#[test]
fn test_materialize_on_sqlite_is_idempotent() {
    let mut store = SqliteStore::in_memory().unwrap();
    let policy = BackfillPolicy::default();
    let reference = date(2025, 3, 12);

    let first =
        MaterializeLogic::ensure_window(&mut store, reference, WeekStart::Sunday, &policy).unwrap();
    assert!(first.backfilled > 0);

    let count = store.count().unwrap();
    let second =
        MaterializeLogic::ensure_window(&mut store, reference, WeekStart::Sunday, &policy).unwrap();
    assert!(second.is_noop());
    assert_eq!(store.count().unwrap(), count);

    let entries = LogLogic::load(store.pool()).unwrap();
    assert_eq!(
        entries.iter().filter(|e| e.operation == "backfill").count(),
        1
    );
}

#[test]
fn test_duplicate_repair_on_sqlite() {
    let mut store = SqliteStore::in_memory().unwrap();
    let d = date(2025, 3, 7);

    // damaged data written straight into the table
    let conn = &store.pool().conn;
    queries::insert_day(conn, &rec(0, date(2001, 1, 1), false)).unwrap();
    queries::insert_day(conn, &rec(0, d, false)).unwrap();
    queries::insert_day(conn, &rec(0, d, true)).unwrap();

    assert_eq!(check_integrity(conn).unwrap().duplicates.len(), 1);

    let report = MaterializeLogic::ensure_window(
        &mut store,
        date(2025, 3, 12),
        WeekStart::Sunday,
        &BackfillPolicy::default(),
    )
    .unwrap();
    assert_eq!(report.removed, 1);

    let rows = store.fetch_range(d, d).unwrap();
    assert_eq!(rows.len(), 1);
    assert!(rows[0].studied);

    let health = check_integrity(&store.pool().conn).unwrap();
    assert!(health.is_healthy());

    let entries = LogLogic::load(store.pool()).unwrap();
    assert!(entries.iter().any(|e| e.operation == "repair"));
}

#[test]
fn test_atomically_rolls_back_on_error() {
    let mut store = SqliteStore::in_memory().unwrap();

    let result: Result<(), AppError> = store.atomically(|s| {
        s.upsert(date(2025, 3, 1), false)?;
        s.upsert(date(2025, 3, 2), false)?;
        Err(AppError::InvalidOperation("boom".into()))
    });

    assert!(result.is_err());
    assert_eq!(store.count().unwrap(), 0);
}

#[test]
fn test_failed_commit_leaves_no_open_transaction() {
    let mut store = SqliteStore::in_memory().unwrap();
    store
        .pool()
        .conn
        .execute_batch(
            r#"
            PRAGMA foreign_keys = ON;
            CREATE TABLE parent (id INTEGER PRIMARY KEY);
            CREATE TABLE child (
                pid INTEGER REFERENCES parent(id) DEFERRABLE INITIALLY DEFERRED
            );
            "#,
        )
        .unwrap();

    // the deferred foreign key only fails at COMMIT
    let result: Result<(), AppError> = store.atomically(|s| {
        s.upsert(date(2025, 3, 1), false)?;
        s.pool().conn.execute("INSERT INTO child (pid) VALUES (99)", [])?;
        Ok(())
    });

    assert!(result.is_err());
    assert!(store.pool().conn.is_autocommit());
    assert_eq!(store.count().unwrap(), 0);

    // the next unit runs in its own transaction and commits
    store
        .atomically(|s| s.upsert(date(2025, 3, 2), false))
        .unwrap();
    assert!(store.pool().conn.is_autocommit());
    assert_eq!(store.count().unwrap(), 1);
}

#[test]
fn test_toggle_on_sqlite_is_logged() {
    let mut store = SqliteStore::in_memory().unwrap();
    let today = date(2025, 3, 12);

    let outcome = ToggleLogic::apply(&mut store, today, today).unwrap();
    assert_eq!(outcome, ToggleOutcome::Toggled { new_value: true });

    let entries = LogLogic::load(store.pool()).unwrap();
    let last = entries.last().unwrap();
    assert_eq!(last.operation, "toggle");
    assert_eq!(last.target, "2025-03-12");
    assert_eq!(last.op_target(), "toggle (2025-03-12)");
}

#[test]
fn test_legacy_schema_is_migrated_with_backup() {
    let dir = test_dir("legacy_schema");
    let db_path = dir.join("legacy.sqlite");

    {
        let conn = Connection::open(&db_path).unwrap();
        conn.execute_batch(
            r#"
            CREATE TABLE days (
                id      INTEGER PRIMARY KEY AUTOINCREMENT,
                date    TEXT NOT NULL,
                studied INTEGER NOT NULL DEFAULT 0
            );
            INSERT INTO days (date, studied) VALUES ('2025-03-10', 1);
            INSERT INTO days (date, studied) VALUES ('2025-03-11', 0);
            "#,
        )
        .unwrap();
    }

    let pool = DbPool::new(&db_path.to_string_lossy()).unwrap();

    let has_created_at: bool = {
        let mut stmt = pool.conn.prepare("PRAGMA table_info('days')").unwrap();
        let cols: Vec<String> = stmt
            .query_map([], |row| row.get::<_, String>(1))
            .unwrap()
            .map(|c| c.unwrap())
            .collect();
        cols.iter().any(|c| c == "created_at")
    };
    assert!(has_created_at);

    let store = SqliteStore::from_pool(pool);
    let rows = store.fetch_all().unwrap();
    assert_eq!(rows.len(), 2);
    assert!(rows[0].studied);
    assert!(!rows[0].created_at.is_empty());

    let backups = std::fs::read_dir(&dir)
        .unwrap()
        .filter_map(|e| e.ok())
        .filter(|e| e.file_name().to_string_lossy().ends_with(".zip"))
        .count();
    assert_eq!(backups, 1);

    // reopening does not migrate (or back up) again
    drop(store);
    DbPool::new(&db_path.to_string_lossy()).unwrap();
    let backups_after = std::fs::read_dir(&dir)
        .unwrap()
        .filter_map(|e| e.ok())
        .filter(|e| e.file_name().to_string_lossy().ends_with(".zip"))
        .count();
    assert_eq!(backups_after, 1);
}
