use crate::errors::{AppError, AppResult};
use crate::export::{ShiftExport, notify_export_success};
use crate::ui::messages::info;
use std::fs;
use std::path::Path;

pub(crate) fn export_json(shifts: &[ShiftExport], path: &Path) -> AppResult<()> {
    info(format!("Exporting to JSON: {}", path.display()));

    let json_data = serde_json::to_string_pretty(shifts)?;
    fs::write(path, json_data)?;

    notify_export_success("JSON", path);
    Ok(())
}

/// CSV with a header row derived from the serde field names.
pub(crate) fn export_csv(shifts: &[ShiftExport], path: &Path) -> AppResult<()> {
    info(format!("Exporting to CSV: {}", path.display()));

    let csv_err = |e: csv::Error| AppError::Export(format!("CSV error: {e}"));

    let mut wtr = csv::Writer::from_path(path).map_err(csv_err)?;
    for item in shifts {
        wtr.serialize(item).map_err(csv_err)?;
    }
    wtr.flush()?;

    notify_export_success("CSV", path);
    Ok(())
}
