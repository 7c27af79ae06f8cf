//! SQLite implementation of the repository traits.

use crate::db::log::audit_quiet;
use crate::db::pool::DbPool;
use crate::db::{queries, users, workplaces};
use crate::errors::AppResult;
use crate::models::{
    Position, Shift, ShiftUpdate, User, UserPreferences, Workplace, WorkplaceUpdate,
};
use crate::store::{PreferencesRepository, ShiftRepository, UserRepository, WorkplaceRepository};
use rusqlite::Connection;

pub struct SqliteStore {
    pool: DbPool,
}

impl SqliteStore {
    pub fn new(pool: DbPool) -> Self {
        Self { pool }
    }

    pub fn conn(&self) -> &Connection {
        &self.pool.conn
    }
}

impl ShiftRepository for SqliteStore {
    fn list_shifts_for_user(&self, user_id: &str) -> AppResult<Vec<Shift>> {
        queries::load_shifts_for_user(self.conn(), user_id)
    }

    fn get_shift(&self, shift_id: &str) -> AppResult<Option<Shift>> {
        queries::load_shift(self.conn(), shift_id)
    }

    fn create_shift(&self, shift: &Shift) -> AppResult<()> {
        queries::insert_shift(self.conn(), shift)?;
        audit_quiet(
            self.conn(),
            "shift_add",
            &shift.id,
            &format!(
                "{} {:.2}h tips {:.2}",
                shift.date_str(),
                shift.hours_worked,
                shift.total_tips()
            ),
        );
        Ok(())
    }

    fn update_shift(&self, shift_id: &str, update: &ShiftUpdate) -> AppResult<()> {
        queries::update_shift(self.conn(), shift_id, update)?;
        audit_quiet(self.conn(), "shift_edit", shift_id, "Shift updated");
        Ok(())
    }

    fn delete_shift(&self, shift_id: &str) -> AppResult<()> {
        queries::delete_shift(self.conn(), shift_id)?;
        audit_quiet(self.conn(), "shift_del", shift_id, "Shift deleted");
        Ok(())
    }
}

impl WorkplaceRepository for SqliteStore {
    fn list_workplaces_for_user(&self, user_id: &str) -> AppResult<Vec<Workplace>> {
        workplaces::load_workplaces_for_user(self.conn(), user_id)
    }

    fn get_workplace(&self, workplace_id: &str) -> AppResult<Option<Workplace>> {
        workplaces::load_workplace(self.conn(), workplace_id)
    }

    fn create_workplace(&self, workplace: &Workplace) -> AppResult<()> {
        workplaces::insert_workplace(self.conn(), workplace)?;
        audit_quiet(
            self.conn(),
            "workplace_add",
            &workplace.id,
            &format!(
                "{} ({} positions)",
                workplace.name,
                workplace.positions.len()
            ),
        );
        Ok(())
    }

    fn update_workplace(&self, workplace_id: &str, update: &WorkplaceUpdate) -> AppResult<()> {
        workplaces::update_workplace(self.conn(), workplace_id, update)?;
        audit_quiet(self.conn(), "workplace_edit", workplace_id, "Workplace updated");
        Ok(())
    }

    fn delete_workplace(&self, workplace_id: &str) -> AppResult<()> {
        workplaces::delete_workplace(self.conn(), workplace_id)?;
        audit_quiet(self.conn(), "workplace_del", workplace_id, "Workplace deleted");
        Ok(())
    }

    fn add_position(&self, workplace_id: &str, position: &Position) -> AppResult<()> {
        workplaces::add_position(self.conn(), workplace_id, position)?;
        audit_quiet(
            self.conn(),
            "position_add",
            &position.id,
            &format!("{} @ {:.2}/h", position.title, position.hourly_wage),
        );
        Ok(())
    }

    fn delete_position(&self, position_id: &str) -> AppResult<()> {
        workplaces::delete_position(self.conn(), position_id)?;
        audit_quiet(self.conn(), "position_del", position_id, "Position deleted");
        Ok(())
    }
}

impl PreferencesRepository for SqliteStore {
    fn get_preferences(&self, user_id: &str) -> AppResult<UserPreferences> {
        Ok(users::load_preferences(self.conn(), user_id)?.unwrap_or_default())
    }

    fn save_preferences(&self, user_id: &str, prefs: &UserPreferences) -> AppResult<()> {
        users::write_preferences(self.conn(), user_id, prefs)?;
        audit_quiet(
            self.conn(),
            "prefs",
            user_id,
            &format!(
                "currency={} timezone={} view={}",
                prefs.currency,
                prefs.timezone,
                prefs.default_view.to_db_str()
            ),
        );
        Ok(())
    }
}

impl UserRepository for SqliteStore {
    fn create_user(&self, user: &User) -> AppResult<()> {
        users::insert_user(self.conn(), user)?;
        audit_quiet(self.conn(), "user_add", &user.id, &user.email);
        Ok(())
    }

    fn find_user(&self, email: &str) -> AppResult<Option<User>> {
        users::find_user_by_email(self.conn(), email)
    }

    fn list_users(&self) -> AppResult<Vec<User>> {
        users::load_users(self.conn())
    }
}
