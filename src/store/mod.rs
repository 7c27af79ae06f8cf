//! Repository interfaces consumed by the application state.
//!
//! The aggregation code never touches a repository: it only receives the
//! shift list that `AppState` loaded through these traits.

use crate::errors::AppResult;
use crate::models::{
    Position, Shift, ShiftUpdate, User, UserPreferences, Workplace, WorkplaceUpdate,
};

pub trait ShiftRepository {
    fn list_shifts_for_user(&self, user_id: &str) -> AppResult<Vec<Shift>>;
    fn get_shift(&self, shift_id: &str) -> AppResult<Option<Shift>>;
    /// Persist `shift` as given (the caller assigns the id).
    fn create_shift(&self, shift: &Shift) -> AppResult<()>;
    fn update_shift(&self, shift_id: &str, update: &ShiftUpdate) -> AppResult<()>;
    fn delete_shift(&self, shift_id: &str) -> AppResult<()>;
}

pub trait WorkplaceRepository {
    fn list_workplaces_for_user(&self, user_id: &str) -> AppResult<Vec<Workplace>>;
    fn get_workplace(&self, workplace_id: &str) -> AppResult<Option<Workplace>>;
    fn create_workplace(&self, workplace: &Workplace) -> AppResult<()>;
    fn update_workplace(&self, workplace_id: &str, update: &WorkplaceUpdate) -> AppResult<()>;
    /// Removes the workplace and its positions. Shifts referencing it are kept.
    fn delete_workplace(&self, workplace_id: &str) -> AppResult<()>;
    fn add_position(&self, workplace_id: &str, position: &Position) -> AppResult<()>;
    fn delete_position(&self, position_id: &str) -> AppResult<()>;
}

pub trait PreferencesRepository {
    /// Stored preferences, or the defaults when none were saved.
    fn get_preferences(&self, user_id: &str) -> AppResult<UserPreferences>;
    fn save_preferences(&self, user_id: &str, prefs: &UserPreferences) -> AppResult<()>;
}

pub trait UserRepository {
    /// Create the user together with its default preferences.
    fn create_user(&self, user: &User) -> AppResult<()>;
    fn find_user(&self, email: &str) -> AppResult<Option<User>>;
    fn list_users(&self) -> AppResult<Vec<User>>;
}

/// Everything the application state needs from a backend.
pub trait Store: ShiftRepository + WorkplaceRepository + PreferencesRepository + UserRepository {}

impl<T> Store for T where T: ShiftRepository + WorkplaceRepository + PreferencesRepository + UserRepository {}
