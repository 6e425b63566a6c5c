// src/export/logic.rs

use crate::db::log::ttlog_quiet;
use crate::errors::AppResult;
use crate::export::ExportFormat;
use crate::export::fs_utils::ensure_writable;
use crate::export::json_csv::{export_csv, export_json};
use crate::export::model::DayExport;
use crate::store::{DayStore, SqliteStore};
use crate::ui::messages::warning;
use crate::utils::date::parse_period;
use std::path::Path;

pub struct ExportLogic;

impl ExportLogic {
    /// Export day records.
    ///
    /// - `range`: `None`, `"all"` or a period accepted by `parse_period`
    ///   (`YYYY`, `YYYY-MM`, `YYYY-MM-DD`, or two of them joined by `:`)
    ///
    /// Returns the number of exported days.
    pub fn export(
        store: &SqliteStore,
        format: ExportFormat,
        file: &str,
        range: &Option<String>,
        force: bool,
    ) -> AppResult<usize> {
        let path = Path::new(file);

        ensure_writable(path, force)?;

        let records = match range.as_deref() {
            None => store.fetch_all()?,
            Some(r) if r.eq_ignore_ascii_case("all") => store.fetch_all()?,
            Some(r) => {
                let (start, end) = parse_period(r)?;
                store.fetch_range(start, end)?
            }
        };

        if records.is_empty() {
            warning("No days found for selected range.");
            return Ok(0);
        }

        let rows: Vec<DayExport> = records.iter().map(DayExport::from).collect();

        match format {
            ExportFormat::Csv => export_csv(&rows, path)?,
            ExportFormat::Json => export_json(&rows, path)?,
        }

        ttlog_quiet(
            &store.pool().conn,
            "export",
            &path.to_string_lossy(),
            &format!("Exported {} days as {}", rows.len(), format.as_str()),
        );

        Ok(rows.len())
    }
}
