//! Workplace and position rows.

use crate::errors::{AppError, AppResult};
use crate::models::{Position, Workplace, WorkplaceUpdate};
use chrono::Local;
use rusqlite::{Connection, OptionalExtension, Row, params};

fn map_position(row: &Row) -> rusqlite::Result<Position> {
    Ok(Position {
        id: row.get("id")?,
        title: row.get("title")?,
        hourly_wage: row.get("hourly_wage")?,
    })
}

fn load_positions(conn: &Connection, workplace_id: &str) -> AppResult<Vec<Position>> {
    let mut stmt = conn.prepare_cached(
        "SELECT id, title, hourly_wage FROM positions
         WHERE workplace_id = ?1
         ORDER BY title ASC",
    )?;
    let rows = stmt.query_map([workplace_id], map_position)?;

    let mut out = Vec::new();
    for r in rows {
        out.push(r?);
    }
    Ok(out)
}

fn map_workplace(row: &Row) -> rusqlite::Result<Workplace> {
    Ok(Workplace {
        id: row.get("id")?,
        user_id: row.get("user_id")?,
        name: row.get("name")?,
        location: row.get("location")?,
        positions: Vec::new(),
    })
}

pub fn load_workplaces_for_user(conn: &Connection, user_id: &str) -> AppResult<Vec<Workplace>> {
    let mut stmt = conn.prepare_cached(
        "SELECT id, user_id, name, location FROM workplaces
         WHERE user_id = ?1
         ORDER BY name ASC",
    )?;
    let rows = stmt.query_map([user_id], map_workplace)?;

    let mut out = Vec::new();
    for r in rows {
        let mut w = r?;
        w.positions = load_positions(conn, &w.id)?;
        out.push(w);
    }
    Ok(out)
}

pub fn load_workplace(conn: &Connection, workplace_id: &str) -> AppResult<Option<Workplace>> {
    let mut stmt = conn.prepare_cached(
        "SELECT id, user_id, name, location FROM workplaces WHERE id = ?1",
    )?;

    match stmt.query_row([workplace_id], map_workplace).optional()? {
        Some(mut w) => {
            w.positions = load_positions(conn, &w.id)?;
            Ok(Some(w))
        }
        None => Ok(None),
    }
}

/// Insert the workplace and all its positions atomically.
pub fn insert_workplace(conn: &Connection, w: &Workplace) -> AppResult<()> {
    let tx = conn.unchecked_transaction()?;

    tx.execute(
        "INSERT INTO workplaces (id, user_id, name, location, created_at)
         VALUES (?1, ?2, ?3, ?4, ?5)",
        params![w.id, w.user_id, w.name, w.location, Local::now().to_rfc3339()],
    )?;

    for p in &w.positions {
        insert_position_row(&tx, &w.id, p)?;
    }

    tx.commit()?;
    Ok(())
}

fn insert_position_row(conn: &Connection, workplace_id: &str, p: &Position) -> AppResult<()> {
    conn.execute(
        "INSERT INTO positions (id, workplace_id, title, hourly_wage)
         VALUES (?1, ?2, ?3, ?4)",
        params![p.id, workplace_id, p.title, p.hourly_wage],
    )?;
    Ok(())
}

pub fn update_workplace(conn: &Connection, workplace_id: &str, upd: &WorkplaceUpdate) -> AppResult<()> {
    let mut w = load_workplace(conn, workplace_id)?
        .ok_or_else(|| AppError::WorkplaceNotFound(workplace_id.to_string()))?;

    upd.apply_to(&mut w);

    conn.execute(
        "UPDATE workplaces SET name = ?1, location = ?2 WHERE id = ?3",
        params![w.name, w.location, w.id],
    )?;
    Ok(())
}

/// Delete a workplace and its positions. Shifts pointing at it are left alone.
pub fn delete_workplace(conn: &Connection, workplace_id: &str) -> AppResult<()> {
    let tx = conn.unchecked_transaction()?;

    tx.execute("DELETE FROM positions WHERE workplace_id = ?1", [workplace_id])?;
    let n = tx.execute("DELETE FROM workplaces WHERE id = ?1", [workplace_id])?;
    if n == 0 {
        return Err(AppError::WorkplaceNotFound(workplace_id.to_string()));
    }

    tx.commit()?;
    Ok(())
}

pub fn add_position(conn: &Connection, workplace_id: &str, p: &Position) -> AppResult<()> {
    if load_workplace(conn, workplace_id)?.is_none() {
        return Err(AppError::WorkplaceNotFound(workplace_id.to_string()));
    }
    insert_position_row(conn, workplace_id, p)
}

pub fn delete_position(conn: &Connection, position_id: &str) -> AppResult<()> {
    let n = conn.execute("DELETE FROM positions WHERE id = ?1", [position_id])?;
    if n == 0 {
        return Err(AppError::UnknownPosition(position_id.to_string()));
    }
    Ok(())
}
