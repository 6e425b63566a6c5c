pub mod backup;
pub mod config;
pub mod db;
pub mod export;
pub mod init;
pub mod list;
pub mod log;
pub mod show;
pub mod streak;
pub mod toggle;

use crate::config::Config;
use crate::core::tracker::Tracker;
use crate::errors::AppResult;
use crate::models::settings::{BackfillPolicy, DisplaySettings};
use crate::store::SqliteStore;
use chrono::NaiveDate;

/// Open the configured database and wrap it in a tracker pinned to `today`.
pub(crate) fn open_tracker(cfg: &Config, today: NaiveDate) -> AppResult<Tracker<SqliteStore>> {
    let store = SqliteStore::open(&cfg.database)?;
    Ok(Tracker::new(
        store,
        DisplaySettings::from_config(cfg),
        BackfillPolicy::from_config(cfg),
    )
    .with_clock(move || today))
}
