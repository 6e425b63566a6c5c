use crate::calendar::WeekStart;
use crate::config::Config;

/// Display options handed to window queries and the grid renderer.
/// They never change which records exist.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct DisplaySettings {
    pub show_only_month_days: bool,
    pub show_month_nav: bool,
    pub week_start: WeekStart,
}

impl DisplaySettings {
    pub fn from_config(cfg: &Config) -> Self {
        Self {
            show_only_month_days: cfg.show_only_month_days,
            show_month_nav: cfg.show_month_nav,
            week_start: cfg.week_start,
        }
    }
}

/// How far the first-run backfill reaches around the reference year.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct BackfillPolicy {
    pub years_back: u32,
    pub years_forward: u32,
}

impl Default for BackfillPolicy {
    fn default() -> Self {
        Self {
            years_back: 1,
            years_forward: 1,
        }
    }
}

impl BackfillPolicy {
    pub fn from_config(cfg: &Config) -> Self {
        Self {
            years_back: cfg.backfill_years_back,
            years_forward: cfg.backfill_years_forward,
        }
    }
}
