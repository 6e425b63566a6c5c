use crate::cli::commands::open_tracker;
use crate::cli::parser::Commands;
use crate::config::Config;
use crate::errors::AppResult;
use crate::store::DayStore;
use crate::utils::date::{month_bounds, parse_period};
use chrono::NaiveDate;

pub fn handle(cmd: &Commands, cfg: &Config, today: NaiveDate) -> AppResult<()> {
    if let Commands::List { period, studied } = cmd {
        let (start, end) = match period.as_deref() {
            Some(p) => parse_period(p)?,
            None => month_bounds(today)?,
        };

        let tracker = open_tracker(cfg, today)?;
        let records = tracker.store().fetch_range(start, end)?;

        let shown: Vec<_> = records.iter().filter(|r| !*studied || r.studied).collect();

        if shown.is_empty() {
            println!("No days recorded between {start} and {end}.");
            return Ok(());
        }

        for r in &shown {
            println!(
                "{} {} {}",
                r.date_str(),
                r.weekday_str(),
                if r.studied { "studied" } else { "-" }
            );
        }

        let total_studied = shown.iter().filter(|r| r.studied).count();
        println!("\n{} days, {} studied", shown.len(), total_studied);
    }
    Ok(())
}
