pub mod granularity;
pub mod preferences;
pub mod shift;
pub mod user;
pub mod workplace;

pub use granularity::{Granularity, WeekStart};
pub use preferences::{DefaultView, PreferencesUpdate, UserPreferences};
pub use shift::{Shift, ShiftInput, ShiftUpdate};
pub use user::User;
pub use workplace::{Position, Workplace, WorkplaceUpdate};

/// Generate a new opaque identifier for a stored record.
pub fn new_id() -> String {
    uuid::Uuid::new_v4().to_string()
}
