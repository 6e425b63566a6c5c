use crate::cli::commands::open_tracker;
use crate::config::Config;
use crate::errors::AppResult;
use chrono::NaiveDate;

pub fn handle(cfg: &Config, today: NaiveDate) -> AppResult<()> {
    let tracker = open_tracker(cfg, today)?;
    let streak = tracker.get_current_streak()?;

    println!("Current streak: {streak}");
    Ok(())
}
