//! Current study streak.
//!
//! The streak is the run of consecutive studied days ending today, or
//! ending yesterday when today has not been studied yet (same-day grace).

use crate::models::day_record::DayRecord;
use chrono::{Days, NaiveDate};

fn studied_on(records: &[&DayRecord], date: NaiveDate) -> bool {
    records.iter().any(|r| r.date == date && r.studied)
}

/// Length of the streak ending at `today` (or yesterday, see module doc).
///
/// `records` may be in any order and may contain gaps or several rows for
/// the same day; a day counts once if any of its rows is studied. Records
/// after `today` never count.
pub fn current_streak(records: &[DayRecord], today: NaiveDate) -> u32 {
    if records.is_empty() {
        return 0;
    }

    let Some(yesterday) = today.checked_sub_days(Days::new(1)) else {
        return 0;
    };

    // newest first; studied rows before unstudied ones on the same day
    let mut history: Vec<&DayRecord> = records.iter().collect();
    history.sort_by(|a, b| b.date.cmp(&a.date).then(b.studied.cmp(&a.studied)));

    let today_studied = studied_on(&history, today);
    let yesterday_studied = studied_on(&history, yesterday);

    if !today_studied && !yesterday_studied {
        return 0;
    }

    let mut expected = if today_studied { today } else { yesterday };
    let mut streak = 0u32;

    for day in history {
        if day.date > expected {
            // future rows, or a second row for a day already counted
            continue;
        }
        if day.date < expected {
            break;
        }

        if day.studied {
            streak += 1;
            match expected.checked_sub_days(Days::new(1)) {
                Some(prev) => expected = prev,
                None => break,
            }
        } else if day.date != today {
            break;
        }
    }

    streak
}
