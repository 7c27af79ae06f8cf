use crate::ui::messages::success;
use rusqlite::{Connection, OptionalExtension, Result, params};

/// A schema step, applied once and recorded in `log` as `migration_applied`.
struct Migration {
    version: &'static str,
    description: &'static str,
    sql: &'static str,
}

const MIGRATIONS: &[Migration] = &[
    Migration {
        version: "20250301_0001_create_core_tables",
        description: "Created users, preferences, workplaces, positions and shifts tables",
        sql: r#"
        CREATE TABLE IF NOT EXISTS users (
            id          TEXT PRIMARY KEY,
            email       TEXT NOT NULL UNIQUE,
            name        TEXT NOT NULL DEFAULT '',
            created_at  TEXT NOT NULL
        );

        CREATE TABLE IF NOT EXISTS preferences (
            user_id       TEXT PRIMARY KEY REFERENCES users(id) ON DELETE CASCADE,
            currency      TEXT NOT NULL DEFAULT 'USD',
            timezone      TEXT NOT NULL DEFAULT 'UTC',
            default_view  TEXT NOT NULL DEFAULT 'dashboard'
                          CHECK(default_view IN ('dashboard','calendar'))
        );

        CREATE TABLE IF NOT EXISTS workplaces (
            id          TEXT PRIMARY KEY,
            user_id     TEXT NOT NULL,
            name        TEXT NOT NULL,
            location    TEXT NOT NULL DEFAULT '',
            created_at  TEXT NOT NULL
        );

        CREATE TABLE IF NOT EXISTS positions (
            id            TEXT PRIMARY KEY,
            workplace_id  TEXT NOT NULL REFERENCES workplaces(id) ON DELETE CASCADE,
            title         TEXT NOT NULL,
            hourly_wage   REAL NOT NULL DEFAULT 0 CHECK(hourly_wage >= 0)
        );

        CREATE TABLE IF NOT EXISTS shifts (
            id            TEXT PRIMARY KEY,
            user_id       TEXT NOT NULL,
            date          TEXT NOT NULL,
            workplace_id  TEXT NOT NULL,
            position_id   TEXT NOT NULL,
            hours_worked  REAL NOT NULL CHECK(hours_worked >= 0),
            cash_tips     REAL NOT NULL DEFAULT 0 CHECK(cash_tips >= 0),
            card_tips     REAL NOT NULL DEFAULT 0 CHECK(card_tips >= 0),
            hourly_wage   REAL NOT NULL DEFAULT 0,
            created_at    TEXT NOT NULL
        );
        "#,
    },
    Migration {
        version: "20250412_0002_add_lookup_indexes",
        description: "Added indexes on shifts(user_id, date), workplaces(user_id), positions(workplace_id)",
        sql: r#"
        CREATE INDEX IF NOT EXISTS idx_shifts_user_date ON shifts(user_id, date);
        CREATE INDEX IF NOT EXISTS idx_workplaces_user ON workplaces(user_id);
        CREATE INDEX IF NOT EXISTS idx_positions_workplace ON positions(workplace_id);
        "#,
    },
    Migration {
        version: "20250520_0003_users_email_nocase",
        description: "Made users.email unique regardless of case",
        sql: r#"
        CREATE UNIQUE INDEX IF NOT EXISTS idx_users_email_nocase ON users(email COLLATE NOCASE);
        "#,
    },
];

/// Ensure that the `log` table exists: it also tracks applied migrations.
fn ensure_log_table(conn: &Connection) -> Result<()> {
    conn.execute_batch(
        r#"
        CREATE TABLE IF NOT EXISTS log (
            id        INTEGER PRIMARY KEY AUTOINCREMENT,
            date      TEXT NOT NULL,
            operation TEXT NOT NULL,
            target    TEXT DEFAULT '',
            message   TEXT NOT NULL
        );
        "#,
    )?;
    Ok(())
}

fn is_applied(conn: &Connection, version: &str) -> Result<bool> {
    let mut chk = conn.prepare(
        "SELECT 1 FROM log
         WHERE operation = 'migration_applied' AND target = ?1
         LIMIT 1",
    )?;
    Ok(chk.query_row([version], |_| Ok(())).optional()?.is_some())
}

fn apply(conn: &Connection, m: &Migration) -> Result<()> {
    let tx = conn.unchecked_transaction()?;

    tx.execute_batch(m.sql)?;
    tx.execute(
        "INSERT INTO log (date, operation, target, message)
         VALUES (?1, 'migration_applied', ?2, ?3)",
        params![chrono::Local::now().to_rfc3339(), m.version, m.description],
    )?;

    tx.commit()
}

/// Versions already recorded as applied, oldest first.
pub fn applied_versions(conn: &Connection) -> Result<Vec<String>> {
    ensure_log_table(conn)?;

    let mut stmt = conn.prepare(
        "SELECT target FROM log WHERE operation = 'migration_applied' ORDER BY id ASC",
    )?;
    let rows = stmt.query_map([], |row| row.get::<_, String>(0))?;

    let mut out = Vec::new();
    for r in rows {
        out.push(r?);
    }
    Ok(out)
}

/// Public entry point: run all pending migrations.
/// Returns how many were applied by this call.
///
/// Invoked by db::init_db() and `db --migrate`.
pub fn run_pending_migrations(conn: &Connection) -> Result<usize> {
    ensure_log_table(conn)?;

    let mut applied = 0;
    for m in MIGRATIONS {
        if is_applied(conn, m.version)? {
            continue;
        }

        apply(conn, m)?;
        tracing::info!(version = m.version, "migration applied");
        success(format!("Migration applied: {}", m.version));
        applied += 1;
    }

    Ok(applied)
}
