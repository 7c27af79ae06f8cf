use crate::errors::{AppError, AppResult};
use crate::export::model::shifts_to_table;
use crate::export::pdf::PdfManager;
use crate::export::{ShiftExport, notify_export_success};
use crate::ui::messages::info;
use crate::utils::formatting::money;
use std::path::Path;

pub(crate) fn export_pdf(
    shifts: &[ShiftExport],
    path: &Path,
    title: &str,
    currency_symbol: &str,
) -> AppResult<()> {
    info(format!("Exporting to PDF: {}", path.display()));

    let (headers, rows) = shifts_to_table(shifts);

    let total_tips: f64 = shifts.iter().map(|s| s.total_tips).sum();
    let total_hours: f64 = shifts.iter().map(|s| s.hours_worked).sum();
    let footer = format!(
        "{} shifts, {:.2} hours, {} in tips",
        shifts.len(),
        total_hours,
        money(currency_symbol, total_tips)
    );

    let mut pdf = PdfManager::new();
    pdf.write_table(title, &headers, &rows, Some(&footer));

    pdf.save(path)
        .map_err(|e| AppError::Export(format!("PDF export error: {e}")))?;

    notify_export_success("PDF", path);
    Ok(())
}
