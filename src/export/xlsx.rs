use crate::errors::{AppError, AppResult};
use crate::export::excel_date::{DATE_TIME_NUM_FORMAT, parse_to_excel_serial};
use crate::export::model::get_headers;
use crate::export::{ShiftExport, notify_export_success};
use crate::ui::messages::info;
use rust_xlsxwriter::{Color, Format, FormatAlign, FormatBorder, FormatPattern, Workbook, Worksheet};
use std::path::Path;
use unicode_width::UnicodeWidthStr;

const MONEY_FORMAT: &str = "#,##0.00";

enum Cell<'a> {
    Text(&'a str),
    DateTime(&'a str),
    Number(f64),
}

fn cells(s: &ShiftExport) -> [Cell<'_>; 9] {
    [
        Cell::Text(&s.id),
        Cell::DateTime(&s.date),
        Cell::Text(&s.workplace),
        Cell::Text(&s.position),
        Cell::Number(s.hours_worked),
        Cell::Number(s.cash_tips),
        Cell::Number(s.card_tips),
        Cell::Number(s.total_tips),
        Cell::Number(s.hourly_wage),
    ]
}

/// Styled workbook: bold header, frozen first row, banded rows,
/// a totals row and columns sized to their content.
pub(crate) fn export_xlsx(shifts: &[ShiftExport], path: &Path) -> AppResult<()> {
    info(format!("Exporting to XLSX: {}", path.display()));

    let mut workbook = Workbook::new();
    let worksheet = workbook.add_worksheet();
    worksheet.set_name("Shifts").map_err(xlsx_err)?;

    let headers = get_headers();

    let header_format = Format::new()
        .set_bold()
        .set_font_color(Color::RGB(0xFFFFFF))
        .set_background_color(Color::RGB(0x2F75B5))
        .set_pattern(FormatPattern::Solid)
        .set_border(FormatBorder::Thin);

    for (col, header) in headers.iter().enumerate() {
        worksheet
            .write_with_format(0, col as u16, *header, &header_format)
            .map_err(xlsx_err)?;
    }
    worksheet.set_freeze_panes(1, 0).map_err(xlsx_err)?;

    let mut col_widths: Vec<usize> = headers.iter().map(|h| UnicodeWidthStr::width(*h)).collect();

    for (row_index, shift) in shifts.iter().enumerate() {
        let row = (row_index + 1) as u32;
        let band = if row_index % 2 == 0 {
            Color::RGB(0xEAF3FB)
        } else {
            Color::RGB(0xFFFFFF)
        };

        for (col, cell) in cells(shift).iter().enumerate() {
            let width = write_cell(worksheet, row, col as u16, cell, band)?;
            col_widths[col] = col_widths[col].max(width);
        }
    }

    write_totals(worksheet, shifts)?;

    for (c, w) in col_widths.iter().enumerate() {
        worksheet
            .set_column_width(c as u16, *w as f64 + 2.0)
            .map_err(xlsx_err)?;
    }

    let path_str = path
        .to_str()
        .ok_or_else(|| AppError::Export(format!("invalid path: {}", path.display())))?;
    workbook.save(path_str).map_err(xlsx_err)?;

    notify_export_success("XLSX", path);
    Ok(())
}

/// Write one cell and return its display width.
fn write_cell(ws: &mut Worksheet, row: u32, col: u16, cell: &Cell, bg: Color) -> AppResult<usize> {
    let base = Format::new()
        .set_background_color(bg)
        .set_pattern(FormatPattern::Solid)
        .set_border(FormatBorder::Thin);

    match cell {
        Cell::DateTime(s) => match parse_to_excel_serial(s) {
            Some(serial) => {
                let fmt = base.set_num_format(DATE_TIME_NUM_FORMAT);
                ws.write_with_format(row, col, serial, &fmt).map_err(xlsx_err)?;
                Ok(DATE_TIME_NUM_FORMAT.len())
            }
            None => {
                ws.write_with_format(row, col, *s, &base).map_err(xlsx_err)?;
                Ok(UnicodeWidthStr::width(*s))
            }
        },
        Cell::Number(n) => {
            let fmt = base.set_num_format(MONEY_FORMAT).set_align(FormatAlign::Right);
            ws.write_with_format(row, col, *n, &fmt).map_err(xlsx_err)?;
            Ok(format!("{n:.2}").len())
        }
        Cell::Text(s) => {
            ws.write_with_format(row, col, *s, &base).map_err(xlsx_err)?;
            Ok(UnicodeWidthStr::width(*s))
        }
    }
}

fn write_totals(ws: &mut Worksheet, shifts: &[ShiftExport]) -> AppResult<()> {
    let row = (shifts.len() + 1) as u32;
    let bold = Format::new().set_bold().set_border(FormatBorder::Thin);
    let bold_num = bold.clone().set_num_format(MONEY_FORMAT).set_align(FormatAlign::Right);

    ws.write_with_format(row, 0, "Total", &bold).map_err(xlsx_err)?;

    let sums = [
        (4u16, shifts.iter().map(|s| s.hours_worked).sum::<f64>()),
        (5, shifts.iter().map(|s| s.cash_tips).sum()),
        (6, shifts.iter().map(|s| s.card_tips).sum()),
        (7, shifts.iter().map(|s| s.total_tips).sum()),
    ];
    for (col, value) in sums {
        ws.write_with_format(row, col, value, &bold_num)
            .map_err(xlsx_err)?;
    }
    Ok(())
}

fn xlsx_err<E: std::fmt::Display>(e: E) -> AppError {
    AppError::Export(format!("XLSX error: {e}"))
}
