//! Shift rows.

use crate::errors::{AppError, AppResult};
use crate::models::{Shift, ShiftUpdate};
use chrono::Local;
use rusqlite::{Connection, OptionalExtension, Result, Row, params};

const SHIFT_COLUMNS: &str =
    "id, user_id, date, workplace_id, position_id, hours_worked, cash_tips, card_tips, hourly_wage";

pub fn map_row(row: &Row) -> Result<Shift> {
    let date_str: String = row.get("date")?;

    let date = Shift::parse_db_date(&date_str).ok_or_else(|| {
        rusqlite::Error::FromSqlConversionFailure(
            0,
            rusqlite::types::Type::Text,
            Box::new(AppError::InvalidDate(date_str.clone())),
        )
    })?;

    Ok(Shift {
        id: row.get("id")?,
        user_id: row.get("user_id")?,
        date,
        workplace_id: row.get("workplace_id")?,
        position_id: row.get("position_id")?,
        hours_worked: row.get("hours_worked")?,
        cash_tips: row.get("cash_tips")?,
        card_tips: row.get("card_tips")?,
        hourly_wage: row.get("hourly_wage")?,
    })
}

pub fn load_shifts_for_user(conn: &Connection, user_id: &str) -> AppResult<Vec<Shift>> {
    let mut stmt = conn.prepare_cached(&format!(
        "SELECT {SHIFT_COLUMNS} FROM shifts
         WHERE user_id = ?1
         ORDER BY date ASC"
    ))?;

    let rows = stmt.query_map([user_id], map_row)?;

    let mut out = Vec::new();
    for r in rows {
        out.push(r?);
    }
    Ok(out)
}

pub fn load_shift(conn: &Connection, shift_id: &str) -> AppResult<Option<Shift>> {
    let mut stmt =
        conn.prepare_cached(&format!("SELECT {SHIFT_COLUMNS} FROM shifts WHERE id = ?1"))?;
    Ok(stmt.query_row([shift_id], map_row).optional()?)
}

pub fn insert_shift(conn: &Connection, s: &Shift) -> AppResult<()> {
    conn.execute(
        "INSERT INTO shifts (id, user_id, date, workplace_id, position_id,
                             hours_worked, cash_tips, card_tips, hourly_wage, created_at)
         VALUES (?1, ?2, ?3, ?4, ?5, ?6, ?7, ?8, ?9, ?10)",
        params![
            s.id,
            s.user_id,
            s.to_db_date(),
            s.workplace_id,
            s.position_id,
            s.hours_worked,
            s.cash_tips,
            s.card_tips,
            s.hourly_wage,
            Local::now().to_rfc3339(),
        ],
    )?;
    Ok(())
}

/// Apply a partial update. Fails with `ShiftNotFound` when the id is unknown.
pub fn update_shift(conn: &Connection, shift_id: &str, upd: &ShiftUpdate) -> AppResult<()> {
    let mut shift =
        load_shift(conn, shift_id)?.ok_or_else(|| AppError::ShiftNotFound(shift_id.to_string()))?;

    upd.apply_to(&mut shift);

    conn.execute(
        "UPDATE shifts
         SET date = ?1, workplace_id = ?2, position_id = ?3,
             hours_worked = ?4, cash_tips = ?5, card_tips = ?6,
             hourly_wage = ?7
         WHERE id = ?8",
        params![
            shift.to_db_date(),
            shift.workplace_id,
            shift.position_id,
            shift.hours_worked,
            shift.cash_tips,
            shift.card_tips,
            shift.hourly_wage,
            shift.id,
        ],
    )?;
    Ok(())
}

pub fn delete_shift(conn: &Connection, shift_id: &str) -> AppResult<()> {
    let n = conn.execute("DELETE FROM shifts WHERE id = ?1", [shift_id])?;
    if n == 0 {
        return Err(AppError::ShiftNotFound(shift_id.to_string()));
    }
    Ok(())
}
