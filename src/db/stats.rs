use crate::db::migrate::applied_versions;
use crate::db::pool::DbPool;
use crate::errors::AppResult;
use crate::utils::colors::{CYAN, GREEN, GREY, RESET, YELLOW};
use rusqlite::{Connection, OptionalExtension};
use std::fs;

fn count(conn: &Connection, table: &str) -> rusqlite::Result<i64> {
    conn.query_row(&format!("SELECT COUNT(*) FROM {table}"), [], |row| row.get(0))
}

/// Day span of the stored shifts (`YYYY-MM-DD`), oldest and newest.
fn shift_range(conn: &Connection) -> rusqlite::Result<Option<(String, String)>> {
    conn.query_row(
        "SELECT MIN(substr(date, 1, 10)), MAX(substr(date, 1, 10)) FROM shifts",
        [],
        |row| {
            let first: Option<String> = row.get(0)?;
            let last: Option<String> = row.get(1)?;
            Ok(first.zip(last))
        },
    )
    .optional()
    .map(Option::flatten)
}

pub fn print_db_info(pool: &DbPool, db_path: &str) -> AppResult<()> {
    let conn = &pool.conn;
    println!();

    let file_size = fs::metadata(db_path).map(|m| m.len()).unwrap_or(0);
    let file_mb = (file_size as f64) / (1024.0 * 1024.0);

    println!("{}• File:{} {}{}{}", CYAN, RESET, YELLOW, db_path, RESET);
    println!("{}• Size:{} {:.2} MB", CYAN, RESET, file_mb);

    let users = count(conn, "users")?;
    let workplaces = count(conn, "workplaces")?;
    let shifts = count(conn, "shifts")?;
    println!("{}• Users:{} {}{}{}", CYAN, RESET, GREEN, users, RESET);
    println!("{}• Workplaces:{} {}{}{}", CYAN, RESET, GREEN, workplaces, RESET);
    println!("{}• Shifts:{} {}{}{}", CYAN, RESET, GREEN, shifts, RESET);

    let range = shift_range(conn)?;
    let (fmt_first, fmt_last) = match &range {
        Some((f, l)) => (f.clone(), l.clone()),
        None => (format!("{GREY}--{RESET}"), format!("{GREY}--{RESET}")),
    };

    println!("{}• Shift dates:{}", CYAN, RESET);
    println!("    from: {}", fmt_first);
    println!("    to:   {}", fmt_last);

    if let Some((f, l)) = range
        && let (Some(d1), Some(d2)) = (
            crate::utils::date::parse_date(&f),
            crate::utils::date::parse_date(&l),
        )
    {
        let days = ((d2 - d1).num_days() + 1).max(1);
        let avg = shifts as f64 / days as f64;
        println!("{}• Average shifts/day:{} {:.2}", CYAN, RESET, avg);
    }

    let versions = applied_versions(conn)?;
    println!(
        "{}• Schema:{} {} migration(s), latest {}",
        CYAN,
        RESET,
        versions.len(),
        versions.last().map(String::as_str).unwrap_or("--")
    );

    println!();
    Ok(())
}
