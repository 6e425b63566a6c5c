use predicates::str::contains;
use serde_json::Value;
use std::fs;

mod common;
use common::{cal, init_db, setup_test_db};

const TODAY: &str = "2025-03-12";

fn run(db: &str, home: &str, args: &[&str]) -> assert_cmd::assert::Assert {
    cal(home)
        .args(["--db", db, "--test", "--today", TODAY])
        .args(args)
        .assert()
}

#[test]
fn test_init_creates_database() {
    let (db, home) = setup_test_db("cli_init");

    cal(&home)
        .args(["--db", &db, "--test", "--today", TODAY, "init"])
        .assert()
        .success()
        .stdout(contains("studycal initialization completed!"));

    assert!(fs::metadata(&db).is_ok());
    // test mode leaves the config file alone
    assert!(!std::path::Path::new(&home).join(".studycal").join("studycal.conf").exists());
}

#[test]
fn test_toggle_and_streak() {
    let (db, home) = setup_test_db("cli_toggle_streak");
    init_db(&db, &home, TODAY);

    run(&db, &home, &["toggle", "yesterday"])
        .success()
        .stdout(contains("2025-03-11 marked as studied."));

    run(&db, &home, &["toggle", "today"])
        .success()
        .stdout(contains("Current streak: 2"));

    run(&db, &home, &["streak"])
        .success()
        .stdout(contains("Current streak: 2"));

    run(&db, &home, &["toggle", "2025-03-12"])
        .success()
        .stdout(contains("marked as not studied"));

    // today still pending: yesterday's run survives
    run(&db, &home, &["streak"])
        .success()
        .stdout(contains("Current streak: 1"));
}

#[test]
fn test_toggle_future_date_fails() {
    let (db, home) = setup_test_db("cli_toggle_future");
    init_db(&db, &home, TODAY);

    run(&db, &home, &["toggle", "2025-03-11"]).success();

    run(&db, &home, &["toggle", "2025-03-13"])
        .failure()
        .stderr(contains("future date"));

    run(&db, &home, &["streak"])
        .success()
        .stdout(contains("Current streak: 1"));
}

#[test]
fn test_toggle_rejects_bad_date() {
    let (db, home) = setup_test_db("cli_toggle_bad_date");
    init_db(&db, &home, TODAY);

    run(&db, &home, &["toggle", "2025-02-30"]).failure();
}

#[test]
fn test_show_month_grid() {
    let (db, home) = setup_test_db("cli_show");
    init_db(&db, &home, TODAY);

    run(&db, &home, &["toggle", "today"]).success();

    run(&db, &home, &["show", "--month", "2025-03"])
        .success()
        .stdout(contains("March 2025"))
        .stdout(contains("[12*]"))
        .stdout(contains("Current streak: 1"))
        .stdout(contains("--month 2025-04"));
}

#[test]
fn test_show_invalid_month_fails() {
    let (db, home) = setup_test_db("cli_show_invalid");
    init_db(&db, &home, TODAY);

    run(&db, &home, &["show", "--month", "2025-13"]).failure();
}

#[test]
fn test_list_studied_days() {
    let (db, home) = setup_test_db("cli_list");
    init_db(&db, &home, TODAY);

    run(&db, &home, &["toggle", "2025-03-12"]).success();
    run(&db, &home, &["toggle", "2025-03-03"]).success();

    run(&db, &home, &["list", "--studied"])
        .success()
        .stdout(contains("2025-03-03 Mon studied"))
        .stdout(contains("2025-03-12 Wed studied"))
        .stdout(contains("2 days, 2 studied"));

    run(&db, &home, &["list", "--period", "2025-03-01:2025-03-02"])
        .success()
        .stdout(contains("2025-03-01 Sat -"))
        .stdout(contains("2 days, 0 studied"));
}

#[test]
fn test_export_json() {
    let (db, home) = setup_test_db("cli_export_json");
    init_db(&db, &home, TODAY);

    run(&db, &home, &["toggle", "2025-03-10"]).success();

    let out = std::path::Path::new(&home).join("march.json");
    let out_str = out.to_string_lossy().to_string();

    run(
        &db,
        &home,
        &[
            "export", "--format", "json", "--file", &out_str, "--range", "2025-03", "--force",
        ],
    )
    .success()
    .stdout(contains("JSON export completed"));

    let parsed: Value = serde_json::from_str(&fs::read_to_string(&out).unwrap()).unwrap();
    let days = parsed.as_array().unwrap();
    assert_eq!(days.len(), 31);

    let tenth = days
        .iter()
        .find(|d| d["date"] == "2025-03-10")
        .expect("2025-03-10 exported");
    assert_eq!(tenth["weekday"], "Mon");
    assert_eq!(tenth["studied"], true);
}

#[test]
fn test_export_csv_header() {
    let (db, home) = setup_test_db("cli_export_csv");
    init_db(&db, &home, TODAY);

    let out = std::path::Path::new(&home).join("day.csv");
    let out_str = out.to_string_lossy().to_string();

    run(
        &db,
        &home,
        &["export", "--file", &out_str, "--range", "2025-03-12", "--force"],
    )
    .success();

    let content = fs::read_to_string(&out).unwrap();
    let mut lines = content.lines();
    assert_eq!(lines.next(), Some("date,weekday,studied"));
    assert_eq!(lines.next(), Some("2025-03-12,Wed,false"));
}

#[test]
fn test_db_check_and_log() {
    let (db, home) = setup_test_db("cli_db_check");
    init_db(&db, &home, TODAY);

    run(&db, &home, &["toggle", "today"]).success();

    run(&db, &home, &["db", "--check"]).success();

    run(&db, &home, &["log", "--print"])
        .success()
        .stdout(contains("toggle"))
        .stdout(contains("backfill"));
}

#[test]
fn test_backup_copies_database() {
    let (db, home) = setup_test_db("cli_backup");
    init_db(&db, &home, TODAY);

    let dest = std::path::Path::new(&home).join("copy.sqlite");
    let dest_str = dest.to_string_lossy().to_string();

    run(&db, &home, &["backup", "--file", &dest_str])
        .success()
        .stdout(contains("Backup created"));

    assert!(dest.exists());
}
