use crate::cli::commands::open_tracker;
use crate::cli::parser::Commands;
use crate::config::Config;
use crate::core::toggle::ToggleOutcome;
use crate::errors::AppResult;
use crate::ui::messages::{success, warning};
use crate::utils::date::parse_day_arg;
use chrono::NaiveDate;

pub fn handle(cmd: &Commands, cfg: &Config, today: NaiveDate) -> AppResult<()> {
    if let Commands::Toggle { date: date_arg } = cmd {
        let date = parse_day_arg(date_arg, today)?;

        let mut tracker = open_tracker(cfg, today)?;
        let outcome = tracker.toggle_studied(date)?;

        if let ToggleOutcome::Rejected { reason } = outcome {
            warning(format!("{date} was not changed ({reason})."));
        }

        let studied = outcome.into_result(date)?;
        if studied {
            success(format!("{date} marked as studied."));
        } else {
            success(format!("{date} marked as not studied."));
        }

        println!("Current streak: {}", tracker.get_current_streak()?);
    }

    Ok(())
}
