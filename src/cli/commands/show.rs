use crate::calendar;
use crate::cli::commands::open_tracker;
use crate::cli::parser::Commands;
use crate::config::Config;
use crate::errors::AppResult;
use crate::ui::grid;
use crate::ui::messages::{header, info};
use ansi_term::Colour;
use chrono::NaiveDate;
use std::io::IsTerminal;

pub fn handle(cmd: &Commands, cfg: &Config, today: NaiveDate) -> AppResult<()> {
    if let Commands::Show {
        month,
        only_month_days,
    } = cmd
    {
        let reference = match month {
            Some(m) => calendar::parse_month(m)?,
            None => today,
        };

        let mut tracker = open_tracker(cfg, today)?;
        let report = tracker.ensure_window_materialized(reference)?;

        if report.backfilled > 0 {
            info(format!("First run: created {} day records.", report.backfilled));
        }
        if report.removed > 0 {
            info(format!("Repaired {} duplicate day records.", report.removed));
        }

        let days = tracker.window_days(reference)?;
        let window = tracker.get_window(reference)?;

        let mut settings = *tracker.settings();
        settings.show_only_month_days |= *only_month_days;

        header(window.title());

        let colour = std::io::stdout().is_terminal();
        for line in grid::render(&window, &days, today, &settings, colour) {
            println!("{line}");
        }

        let streak = tracker.get_current_streak()?;
        println!();
        println!(
            "🔥 Current streak: {}",
            if streak > 0 {
                Colour::RGB(255, 153, 51).bold().paint(streak.to_string())
            } else {
                Colour::Red.paint(streak.to_string())
            }
        );

        if settings.show_month_nav {
            let prev = calendar::start_of_previous_month(reference)?;
            let next = calendar::start_of_next_month(reference)?;
            println!("{}", grid::month_nav(prev, next));
        }
    }

    Ok(())
}
