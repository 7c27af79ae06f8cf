//! User and preference rows.

use crate::errors::{AppError, AppResult};
use crate::models::{DefaultView, User, UserPreferences};
use rusqlite::{Connection, ErrorCode, OptionalExtension, Row, params};

fn map_user(row: &Row) -> rusqlite::Result<User> {
    Ok(User {
        id: row.get("id")?,
        email: row.get("email")?,
        name: row.get("name")?,
        created_at: row.get("created_at")?,
    })
}

fn is_unique_violation(e: &rusqlite::Error) -> bool {
    matches!(
        e,
        rusqlite::Error::SqliteFailure(err, _) if err.code == ErrorCode::ConstraintViolation
    )
}

/// Insert the user and its default preferences in one transaction.
pub fn insert_user(conn: &Connection, user: &User) -> AppResult<()> {
    let tx = conn.unchecked_transaction()?;

    let res = tx.execute(
        "INSERT INTO users (id, email, name, created_at) VALUES (?1, ?2, ?3, ?4)",
        params![user.id, user.email, user.name, user.created_at],
    );
    if let Err(e) = res {
        if is_unique_violation(&e) {
            return Err(AppError::DuplicateUser(user.email.clone()));
        }
        return Err(e.into());
    }

    write_preferences(&tx, &user.id, &UserPreferences::default())?;

    tx.commit()?;
    Ok(())
}

pub fn find_user_by_email(conn: &Connection, email: &str) -> AppResult<Option<User>> {
    let mut stmt = conn.prepare_cached(
        "SELECT id, email, name, created_at FROM users WHERE email = ?1 COLLATE NOCASE",
    )?;
    Ok(stmt.query_row([email], map_user).optional()?)
}

pub fn load_users(conn: &Connection) -> AppResult<Vec<User>> {
    let mut stmt =
        conn.prepare_cached("SELECT id, email, name, created_at FROM users ORDER BY email ASC")?;
    let rows = stmt.query_map([], map_user)?;

    let mut out = Vec::new();
    for r in rows {
        out.push(r?);
    }
    Ok(out)
}

pub fn load_preferences(conn: &Connection, user_id: &str) -> AppResult<Option<UserPreferences>> {
    let mut stmt = conn.prepare_cached(
        "SELECT currency, timezone, default_view FROM preferences WHERE user_id = ?1",
    )?;

    let row = stmt
        .query_row([user_id], |row| {
            Ok((
                row.get::<_, String>(0)?,
                row.get::<_, String>(1)?,
                row.get::<_, String>(2)?,
            ))
        })
        .optional()?;

    Ok(row.map(|(currency, timezone, view)| UserPreferences {
        currency,
        timezone,
        default_view: DefaultView::from_db_str(&view).unwrap_or_default(),
    }))
}

/// Upsert the full preference row.
pub fn write_preferences(conn: &Connection, user_id: &str, prefs: &UserPreferences) -> AppResult<()> {
    conn.execute(
        "INSERT INTO preferences (user_id, currency, timezone, default_view)
         VALUES (?1, ?2, ?3, ?4)
         ON CONFLICT(user_id) DO UPDATE SET
             currency = excluded.currency,
             timezone = excluded.timezone,
             default_view = excluded.default_view",
        params![
            user_id,
            prefs.currency,
            prefs.timezone,
            prefs.default_view.to_db_str()
        ],
    )?;
    Ok(())
}
