#![allow(dead_code)]
use assert_cmd::{Command, cargo_bin_cmd};
use chrono::NaiveDate;
use std::env;
use std::fs;
use std::path::PathBuf;
use studycal::models::day_record::DayRecord;

/// `studycal` binary with HOME pointed at `home`, so no real config is read.
pub fn cal(home: &str) -> Command {
    let mut cmd = cargo_bin_cmd!("studycal");
    cmd.env("HOME", home);
    cmd
}

/// Fresh per-test directory inside the system temp dir.
pub fn test_dir(name: &str) -> PathBuf {
    let mut path: PathBuf = env::temp_dir();
    path.push("studycal_tests");
    path.push(name);
    fs::remove_dir_all(&path).ok();
    fs::create_dir_all(&path).expect("create test dir");
    path
}

/// Returns (db path, home dir) for a CLI test.
pub fn setup_test_db(name: &str) -> (String, String) {
    let dir = test_dir(name);
    let db = dir.join("studycal.sqlite");
    (
        db.to_string_lossy().to_string(),
        dir.to_string_lossy().to_string(),
    )
}

/// Run `init` in test mode against `db`.
pub fn init_db(db: &str, home: &str, today: &str) {
    cal(home)
        .args(["--db", db, "--test", "--today", today, "init"])
        .assert()
        .success();
}

pub fn date(y: i32, m: u32, d: u32) -> NaiveDate {
    NaiveDate::from_ymd_opt(y, m, d).expect("valid date")
}

pub fn rec(id: i64, d: NaiveDate, studied: bool) -> DayRecord {
    let mut r = DayRecord::new(d);
    r.id = id;
    r.studied = studied;
    r
}
