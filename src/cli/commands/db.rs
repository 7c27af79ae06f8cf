use crate::cli::parser::Commands;
use crate::config::Config;
use crate::db::migrate::run_pending_migrations;
use crate::db::pool::DbPool;
use crate::db::stats;
use crate::errors::AppResult;
use crate::ui::messages::{info, success, warning};
use rusqlite::Connection;

/// Shifts whose workplace or position row no longer exists.
fn count_dangling_shifts(conn: &Connection) -> AppResult<(i64, i64)> {
    let workplaces = conn.query_row(
        "SELECT COUNT(*) FROM shifts s
         WHERE NOT EXISTS (SELECT 1 FROM workplaces w WHERE w.id = s.workplace_id)",
        [],
        |r| r.get(0),
    )?;
    let positions = conn.query_row(
        "SELECT COUNT(*) FROM shifts s
         WHERE NOT EXISTS (SELECT 1 FROM positions p WHERE p.id = s.position_id)",
        [],
        |r| r.get(0),
    )?;
    Ok((workplaces, positions))
}

pub fn handle(cmd: &Commands, cfg: &Config) -> AppResult<()> {
    let Commands::Db {
        migrate,
        check,
        vacuum,
        info: show_info,
    } = cmd
    else {
        return Ok(());
    };

    if !(*migrate || *check || *vacuum || *show_info) {
        info("Nothing to do: pass --migrate, --check, --vacuum or --info.");
        return Ok(());
    }

    let pool = DbPool::new(&cfg.database)?;

    if *migrate {
        match run_pending_migrations(&pool.conn)? {
            0 => info("Schema already up to date."),
            n => success(format!("{n} migration(s) applied.")),
        }
    }

    if *show_info {
        stats::print_db_info(&pool, &cfg.database)?;
    }

    if *check {
        let integrity: String = pool
            .conn
            .query_row("PRAGMA integrity_check;", [], |row| row.get(0))?;

        if integrity == "ok" {
            success("SQLite integrity check passed.");
        } else {
            warning(format!("SQLite integrity check failed: {integrity}"));
        }

        let (no_workplace, no_position) = count_dangling_shifts(&pool.conn)?;
        if no_workplace + no_position == 0 {
            success("Every shift points to an existing workplace and position.");
        } else {
            // workplace and position deletion never cascades to shifts
            info(format!(
                "{no_workplace} shift(s) reference a deleted workplace, {no_position} a deleted position."
            ));
        }
    }

    if *vacuum {
        pool.conn.execute_batch("VACUUM;")?;
        success("VACUUM completed.");
    }

    Ok(())
}
