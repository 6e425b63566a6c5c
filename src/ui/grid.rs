//! Plain-text month grid: one row per week, seven 5-char cells per row.
//!
//! Cell layout: `[dd*]` for today, ` dd* ` for other days, where `*` marks
//! a studied day. Padding days are blank when `show_only_month_days` is set.

use crate::models::day_record::DayRecord;
use crate::models::settings::DisplaySettings;
use crate::models::window::CalendarWindow;
use ansi_term::Colour;
use chrono::{Datelike, NaiveDate};
use std::collections::HashMap;

const STUDIED: Colour = Colour::RGB(255, 153, 51);
const PADDING: Colour = Colour::Fixed(244);
const BLANK_CELL: &str = "     ";

fn cell(date: NaiveDate, studied: bool, today: NaiveDate) -> String {
    let mark = if studied { '*' } else { ' ' };
    if date == today {
        format!("[{:>2}{}]", date.day(), mark)
    } else {
        format!(" {:>2}{} ", date.day(), mark)
    }
}

/// Render the window as text lines: the weekday header, then one line per
/// week. `records` is expected to hold one record per window day; missing
/// days are drawn as not studied.
pub fn render(
    window: &CalendarWindow,
    records: &[DayRecord],
    today: NaiveDate,
    settings: &DisplaySettings,
    colour: bool,
) -> Vec<String> {
    let studied: HashMap<NaiveDate, bool> = records
        .iter()
        .map(|r| (r.date, r.studied))
        .collect();

    let mut lines = Vec::with_capacity(window.weeks() as usize + 1);

    lines.push(
        settings
            .week_start
            .labels()
            .iter()
            .map(|l| format!("  {l}  "))
            .collect::<String>()
            .trim_end()
            .to_string(),
    );

    for week in window.days().chunks(7) {
        let mut line = String::new();

        for &d in week {
            let in_month = window.is_in_month(d);

            if !in_month && settings.show_only_month_days {
                line.push_str(BLANK_CELL);
                continue;
            }

            let did_study = studied.get(&d).copied().unwrap_or(false);
            let text = cell(d, did_study, today);

            let painted = match (colour, did_study, in_month) {
                (false, _, _) => text,
                (true, true, _) => STUDIED.bold().paint(text).to_string(),
                (true, false, false) => PADDING.paint(text).to_string(),
                (true, false, true) => text,
            };
            line.push_str(&painted);
        }

        lines.push(line.trim_end().to_string());
    }

    lines
}

/// "‹ September 2026 | November 2026 ›" style navigation hint.
pub fn month_nav(previous: NaiveDate, next: NaiveDate) -> String {
    format!(
        "‹ {} {}  (--month {})   |   {} {} ›  (--month {})",
        previous.format("%B"),
        previous.year(),
        previous.format("%Y-%m"),
        next.format("%B"),
        next.year(),
        next.format("%Y-%m"),
    )
}
