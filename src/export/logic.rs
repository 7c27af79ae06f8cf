use crate::core::aggregate::filter_by_window;
use crate::db::log::audit_quiet;
use crate::errors::{AppError, AppResult};
use crate::export::ExportFormat;
use crate::export::fs_utils::ensure_writable;
use crate::export::json_csv::{export_csv, export_json};
use crate::export::model::ShiftExport;
use crate::export::pdf_export::export_pdf;
use crate::export::range::parse_range;
use crate::export::xlsx::export_xlsx;
use crate::state::AppState;
use crate::ui::messages::warning;
use crate::utils::date::{end_of_day, month_name, start_of_day};
use chrono::NaiveDate;
use rusqlite::Connection;
use std::path::Path;

pub struct ExportLogic;

impl ExportLogic {
    /// Export the shifts of the active user.
    ///
    /// `range` is `None`, `"all"`, or anything `parse_range` accepts.
    /// Returns the number of exported rows.
    pub fn export(
        conn: &Connection,
        state: &AppState,
        format: ExportFormat,
        file: &str,
        range: Option<&str>,
        force: bool,
    ) -> AppResult<usize> {
        let path = Path::new(file);

        if !path.is_absolute() {
            return Err(AppError::Export(format!(
                "output file path must be absolute: {file}"
            )));
        }

        let bounds: Option<(NaiveDate, NaiveDate)> = match range {
            None => None,
            Some(r) if r.eq_ignore_ascii_case("all") => None,
            Some(r) => Some(parse_range(r)?),
        };

        let rows = collect_rows(state, bounds);
        if rows.is_empty() {
            warning("No shifts found for the selected range.");
            return Ok(0);
        }

        ensure_writable(path, force)?;

        match format {
            ExportFormat::Csv => export_csv(&rows, path)?,
            ExportFormat::Json => export_json(&rows, path)?,
            ExportFormat::Xlsx => export_xlsx(&rows, path)?,
            ExportFormat::Pdf => {
                let title = build_pdf_title(range);
                export_pdf(&rows, path, &title, state.preferences.currency_symbol())?
            }
        }

        audit_quiet(
            conn,
            "export",
            &path.to_string_lossy(),
            &format!("{} shifts as {}", rows.len(), format.as_str()),
        );

        Ok(rows.len())
    }
}

/// Shifts in chronological order, restricted to `bounds` when given.
pub(crate) fn collect_rows(state: &AppState, bounds: Option<(NaiveDate, NaiveDate)>) -> Vec<ShiftExport> {
    let mut shifts = match bounds {
        Some((from, to)) => filter_by_window(&state.shifts, start_of_day(from), end_of_day(to)),
        None => state.shifts.clone(),
    };
    shifts.sort_by_key(|s| s.date);

    shifts
        .iter()
        .map(|s| ShiftExport::from_shift(state, s))
        .collect()
}

fn build_pdf_title(range: Option<&str>) -> String {
    let Some(r) = range.filter(|r| !r.eq_ignore_ascii_case("all")) else {
        return "Tip history".to_string();
    };

    match r.len() {
        4 => format!("Tips for year {r}"),
        7 => format!(
            "Tips for {} {}",
            month_name(r.get(5..7).unwrap_or("")),
            r.get(0..4).unwrap_or(r)
        ),
        10 => format!("Tips for {r}"),
        _ => match r.split_once(':') {
            Some((a, b)) => format!("Tips from {a} to {b}"),
            None => "Tip history".to_string(),
        },
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn pdf_titles() {
        assert_eq!(build_pdf_title(None), "Tip history");
        assert_eq!(build_pdf_title(Some("all")), "Tip history");
        assert_eq!(build_pdf_title(Some("2025")), "Tips for year 2025");
        assert_eq!(build_pdf_title(Some("2025-03")), "Tips for March 2025");
        assert_eq!(
            build_pdf_title(Some("2025-01:2025-03")),
            "Tips from 2025-01 to 2025-03"
        );
    }
}
