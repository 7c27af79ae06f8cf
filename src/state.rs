//! Application state for one user.
//!
//! Holds the user, its preferences, shifts and workplaces. Every mutation
//! goes through the store first and is mirrored in memory only when the
//! write succeeded.

use crate::errors::{AppError, AppResult};
use crate::models::{
    Position, PreferencesUpdate, Shift, ShiftInput, ShiftUpdate, User, UserPreferences, Workplace,
    WorkplaceUpdate, new_id,
};
use crate::store::Store;

pub struct AppState<'a> {
    store: &'a dyn Store,
    pub user: User,
    pub preferences: UserPreferences,
    pub shifts: Vec<Shift>,
    pub workplaces: Vec<Workplace>,
}

impl<'a> AppState<'a> {
    pub fn load(store: &'a dyn Store, user: User) -> AppResult<Self> {
        let preferences = store.get_preferences(&user.id)?;
        let shifts = store.list_shifts_for_user(&user.id)?;
        let workplaces = store.list_workplaces_for_user(&user.id)?;

        tracing::debug!(
            user = %user.email,
            shifts = shifts.len(),
            workplaces = workplaces.len(),
            "state loaded"
        );

        Ok(Self {
            store,
            user,
            preferences,
            shifts,
            workplaces,
        })
    }

    // ---------------------------
    // Shifts
    // ---------------------------

    /// Create a shift, snapshotting the position's current hourly wage.
    pub fn add_shift(&mut self, input: ShiftInput) -> AppResult<Shift> {
        input.validate()?;

        let workplace = self
            .workplace(&input.workplace_id)
            .ok_or_else(|| AppError::UnknownWorkplace(input.workplace_id.clone()))?;
        let position = workplace
            .position(&input.position_id)
            .ok_or_else(|| AppError::UnknownPosition(input.position_id.clone()))?;

        let shift = Shift {
            id: new_id(),
            user_id: self.user.id.clone(),
            date: input.date,
            workplace_id: input.workplace_id,
            position_id: input.position_id,
            hours_worked: input.hours_worked,
            cash_tips: input.cash_tips,
            card_tips: input.card_tips,
            hourly_wage: position.hourly_wage,
        };

        self.store.create_shift(&shift)?;
        self.shifts.push(shift.clone());
        Ok(shift)
    }

    /// Apply a partial update. A new workplace or position must exist and
    /// belong together; a new position re-snapshots the hourly wage unless
    /// the update sets one explicitly.
    pub fn update_shift(&mut self, shift_id: &str, update: &ShiftUpdate) -> AppResult<()> {
        update.validate()?;
        let current = self
            .shift(shift_id)
            .ok_or_else(|| AppError::ShiftNotFound(shift_id.to_string()))?;

        let mut update = update.clone();

        if update.workplace_id.is_some() || update.position_id.is_some() {
            let workplace_id = update
                .workplace_id
                .as_deref()
                .unwrap_or(&current.workplace_id);
            let position_id = update
                .position_id
                .as_deref()
                .unwrap_or(&current.position_id);

            let workplace = self
                .workplace(workplace_id)
                .ok_or_else(|| AppError::UnknownWorkplace(workplace_id.to_string()))?;
            let position = workplace.position(position_id).ok_or_else(|| {
                AppError::UnknownPosition(format!(
                    "{position_id} is not a position of {}",
                    workplace.name
                ))
            })?;

            if update.hourly_wage.is_none() && position.id != current.position_id {
                update.hourly_wage = Some(position.hourly_wage);
            }
        }

        self.store.update_shift(shift_id, &update)?;
        for s in self.shifts.iter_mut().filter(|s| s.id == shift_id) {
            update.apply_to(s);
        }
        Ok(())
    }

    pub fn delete_shift(&mut self, shift_id: &str) -> AppResult<()> {
        if !self.shifts.iter().any(|s| s.id == shift_id) {
            return Err(AppError::ShiftNotFound(shift_id.to_string()));
        }

        self.store.delete_shift(shift_id)?;
        self.shifts.retain(|s| s.id != shift_id);
        Ok(())
    }

    pub fn shift(&self, shift_id: &str) -> Option<&Shift> {
        self.shifts.iter().find(|s| s.id == shift_id)
    }

    /// Full id of the shift whose id is `key` or starts with it.
    /// An ambiguous prefix is rejected.
    pub fn resolve_shift_id(&self, key: &str) -> AppResult<String> {
        if let Some(s) = self.shift(key) {
            return Ok(s.id.clone());
        }

        let mut matches = self.shifts.iter().filter(|s| s.id.starts_with(key));
        match (matches.next(), matches.next()) {
            (Some(s), None) if !key.is_empty() => Ok(s.id.clone()),
            (Some(_), Some(_)) => Err(AppError::InvalidValue(format!(
                "shift id prefix '{key}' is ambiguous"
            ))),
            _ => Err(AppError::ShiftNotFound(key.to_string())),
        }
    }

    // ---------------------------
    // Workplaces
    // ---------------------------

    pub fn add_workplace(
        &mut self,
        name: &str,
        location: &str,
        positions: Vec<Position>,
    ) -> AppResult<Workplace> {
        if name.trim().is_empty() {
            return Err(AppError::InvalidValue("workplace name cannot be empty".into()));
        }

        let workplace = Workplace {
            id: new_id(),
            user_id: self.user.id.clone(),
            name: name.trim().to_string(),
            location: location.trim().to_string(),
            positions,
        };

        self.store.create_workplace(&workplace)?;
        self.workplaces.push(workplace.clone());
        Ok(workplace)
    }

    pub fn update_workplace(&mut self, workplace_id: &str, update: &WorkplaceUpdate) -> AppResult<()> {
        if self.workplace(workplace_id).is_none() {
            return Err(AppError::WorkplaceNotFound(workplace_id.to_string()));
        }

        self.store.update_workplace(workplace_id, update)?;
        for w in self.workplaces.iter_mut().filter(|w| w.id == workplace_id) {
            update.apply_to(w);
        }
        Ok(())
    }

    /// Shifts recorded at the workplace are kept and show a missing workplace.
    pub fn delete_workplace(&mut self, workplace_id: &str) -> AppResult<()> {
        if self.workplace(workplace_id).is_none() {
            return Err(AppError::WorkplaceNotFound(workplace_id.to_string()));
        }

        self.store.delete_workplace(workplace_id)?;
        self.workplaces.retain(|w| w.id != workplace_id);
        Ok(())
    }

    pub fn add_position(&mut self, workplace_id: &str, title: &str, hourly_wage: f64) -> AppResult<Position> {
        crate::models::shift::validate_amount("hourly wage", hourly_wage)?;
        if title.trim().is_empty() {
            return Err(AppError::InvalidValue("position title cannot be empty".into()));
        }
        if self.workplace(workplace_id).is_none() {
            return Err(AppError::WorkplaceNotFound(workplace_id.to_string()));
        }

        let position = Position {
            id: new_id(),
            title: title.trim().to_string(),
            hourly_wage,
        };

        self.store.add_position(workplace_id, &position)?;
        if let Some(w) = self.workplaces.iter_mut().find(|w| w.id == workplace_id) {
            w.positions.push(position.clone());
        }
        Ok(position)
    }

    pub fn delete_position(&mut self, position_id: &str) -> AppResult<()> {
        let owned = self
            .workplaces
            .iter()
            .any(|w| w.position(position_id).is_some());
        if !owned {
            return Err(AppError::UnknownPosition(position_id.to_string()));
        }

        self.store.delete_position(position_id)?;
        for w in self.workplaces.iter_mut() {
            w.positions.retain(|p| p.id != position_id);
        }
        Ok(())
    }

    pub fn workplace(&self, workplace_id: &str) -> Option<&Workplace> {
        self.workplaces.iter().find(|w| w.id == workplace_id)
    }

    /// Match a workplace by id or (case-insensitive) name.
    pub fn find_workplace(&self, key: &str) -> Option<&Workplace> {
        self.workplace(key).or_else(|| {
            self.workplaces
                .iter()
                .find(|w| w.name.eq_ignore_ascii_case(key))
        })
    }

    pub fn resolve_workplace(&self, key: &str) -> AppResult<&Workplace> {
        self.find_workplace(key)
            .ok_or_else(|| AppError::UnknownWorkplace(key.to_string()))
    }

    pub fn workplace_name(&self, shift: &Shift) -> Option<&str> {
        self.workplace(&shift.workplace_id).map(|w| w.name.as_str())
    }

    pub fn position_title(&self, shift: &Shift) -> Option<&str> {
        self.workplace(&shift.workplace_id)
            .and_then(|w| w.position(&shift.position_id))
            .map(|p| p.title.as_str())
    }

    // ---------------------------
    // Preferences
    // ---------------------------

    pub fn update_preferences(&mut self, update: &PreferencesUpdate) -> AppResult<()> {
        let merged = self.preferences.merged(update);
        self.store.save_preferences(&self.user.id, &merged)?;
        self.preferences = merged;
        Ok(())
    }

    // ---------------------------
    // History search
    // ---------------------------

    /// Shifts matching `term` (date, workplace name or position title),
    /// optionally restricted to one workplace, newest first.
    pub fn search_shifts(&self, term: &str, workplace_id: Option<&str>) -> Vec<&Shift> {
        let needle = term.trim().to_lowercase();

        let mut out: Vec<&Shift> = self
            .shifts
            .iter()
            .filter(|s| workplace_id.is_none_or(|w| s.workplace_id == w))
            .filter(|s| {
                if needle.is_empty() {
                    return true;
                }
                let date = s.date.format("%B %-d, %Y").to_string().to_lowercase();
                let workplace = self.workplace_name(s).unwrap_or("").to_lowercase();
                let position = self.position_title(s).unwrap_or("").to_lowercase();
                date.contains(&needle) || workplace.contains(&needle) || position.contains(&needle)
            })
            .collect();

        out.sort_by(|a, b| b.date.cmp(&a.date));
        out
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::db::initialize::init_db;
    use crate::db::{DbPool, SqliteStore};
    use crate::store::UserRepository;
    use chrono::NaiveDate;

    fn store() -> SqliteStore {
        let pool = DbPool::in_memory().unwrap();
        init_db(&pool.conn).unwrap();
        let s = SqliteStore::new(pool);
        s.create_user(&user()).unwrap();
        s
    }

    fn user() -> User {
        User {
            id: "u1".into(),
            email: "sam@example.com".into(),
            name: "Sam".into(),
            created_at: "2025-01-01T00:00:00+00:00".into(),
        }
    }

    fn input(w: &Workplace, day: u32, tips: f64) -> ShiftInput {
        ShiftInput {
            date: NaiveDate::from_ymd_opt(2025, 6, day)
                .unwrap()
                .and_hms_opt(17, 0, 0)
                .unwrap(),
            workplace_id: w.id.clone(),
            position_id: w.positions[0].id.clone(),
            hours_worked: 6.0,
            cash_tips: tips,
            card_tips: 0.0,
        }
    }

    fn server() -> Vec<Position> {
        vec![Position {
            id: "p-server".into(),
            title: "Server".into(),
            hourly_wage: 7.25,
        }]
    }

    #[test]
    fn add_shift_snapshots_wage_and_persists() {
        let s = store();
        let mut state = AppState::load(&s, user()).unwrap();
        let w = state.add_workplace("Blue Note", "Main St", server()).unwrap();

        let shift = state.add_shift(input(&w, 2, 80.0)).unwrap();
        assert_eq!(shift.hourly_wage, 7.25);

        let reloaded = AppState::load(&s, user()).unwrap();
        assert_eq!(reloaded.shifts, vec![shift]);
        assert_eq!(reloaded.workplaces.len(), 1);
    }

    #[test]
    fn add_shift_rejects_unknown_references() {
        let s = store();
        let mut state = AppState::load(&s, user()).unwrap();
        let w = state.add_workplace("Blue Note", "", server()).unwrap();

        let mut bad = input(&w, 2, 10.0);
        bad.workplace_id = "nope".into();
        assert!(matches!(
            state.add_shift(bad).unwrap_err(),
            AppError::UnknownWorkplace(_)
        ));

        let mut bad = input(&w, 2, 10.0);
        bad.position_id = "nope".into();
        assert!(matches!(
            state.add_shift(bad).unwrap_err(),
            AppError::UnknownPosition(_)
        ));
        assert!(state.shifts.is_empty());
    }

    #[test]
    fn update_and_delete_are_mirrored_in_memory() {
        let s = store();
        let mut state = AppState::load(&s, user()).unwrap();
        let w = state.add_workplace("Blue Note", "", server()).unwrap();
        let shift = state.add_shift(input(&w, 2, 80.0)).unwrap();

        let upd = ShiftUpdate {
            card_tips: Some(20.0),
            ..Default::default()
        };
        state.update_shift(&shift.id, &upd).unwrap();
        assert_eq!(state.shift(&shift.id).unwrap().total_tips(), 100.0);

        state.delete_shift(&shift.id).unwrap();
        assert!(state.shifts.is_empty());
        assert!(AppState::load(&s, user()).unwrap().shifts.is_empty());
    }

    #[test]
    fn changing_position_checks_ownership_and_resnapshots_wage() {
        let s = store();
        let mut state = AppState::load(&s, user()).unwrap();
        let mut positions = server();
        positions.push(Position {
            id: "p-bar".into(),
            title: "Bartender".into(),
            hourly_wage: 5.0,
        });
        let blue = state.add_workplace("Blue Note", "", positions).unwrap();
        let red = state
            .add_workplace(
                "Red Lion",
                "",
                vec![Position {
                    id: "p-host".into(),
                    title: "Host".into(),
                    hourly_wage: 4.0,
                }],
            )
            .unwrap();
        let shift = state.add_shift(input(&blue, 2, 80.0)).unwrap();

        // a workplace whose positions do not include the current one
        let err = state
            .update_shift(
                &shift.id,
                &ShiftUpdate {
                    workplace_id: Some(red.id.clone()),
                    ..Default::default()
                },
            )
            .unwrap_err();
        assert!(matches!(err, AppError::UnknownPosition(_)));

        let err = state
            .update_shift(
                &shift.id,
                &ShiftUpdate {
                    position_id: Some("p-host".into()),
                    ..Default::default()
                },
            )
            .unwrap_err();
        assert!(matches!(err, AppError::UnknownPosition(_)));
        assert_eq!(state.shift(&shift.id).unwrap().workplace_id, blue.id);

        state
            .update_shift(
                &shift.id,
                &ShiftUpdate {
                    position_id: Some("p-bar".into()),
                    ..Default::default()
                },
            )
            .unwrap();
        assert_eq!(state.shift(&shift.id).unwrap().hourly_wage, 5.0);

        // an explicit wage wins over the position's
        state
            .update_shift(
                &shift.id,
                &ShiftUpdate {
                    workplace_id: Some(red.id.clone()),
                    position_id: Some("p-host".into()),
                    hourly_wage: Some(6.5),
                    ..Default::default()
                },
            )
            .unwrap();

        let reloaded = AppState::load(&s, user()).unwrap();
        let moved = reloaded.shift(&shift.id).unwrap();
        assert_eq!(moved.workplace_id, red.id);
        assert_eq!(moved.position_id, "p-host");
        assert_eq!(moved.hourly_wage, 6.5);
    }

    #[test]
    fn deleted_workplace_leaves_dangling_shift() {
        let s = store();
        let mut state = AppState::load(&s, user()).unwrap();
        let w = state.add_workplace("Blue Note", "", server()).unwrap();
        let shift = state.add_shift(input(&w, 2, 80.0)).unwrap();

        assert_eq!(state.workplace_name(&shift), Some("Blue Note"));
        assert_eq!(state.position_title(&shift), Some("Server"));

        state.delete_workplace(&w.id).unwrap();
        assert_eq!(state.shifts.len(), 1);
        assert_eq!(state.workplace_name(&shift), None);
        assert_eq!(state.position_title(&shift), None);
    }

    #[test]
    fn preferences_merge() {
        let s = store();
        let mut state = AppState::load(&s, user()).unwrap();
        state
            .update_preferences(&PreferencesUpdate {
                currency: Some("gbp".into()),
                ..Default::default()
            })
            .unwrap();
        assert_eq!(state.preferences.currency, "GBP");

        let reloaded = AppState::load(&s, user()).unwrap();
        assert_eq!(reloaded.preferences.currency, "GBP");
        assert_eq!(reloaded.preferences.timezone, "UTC");
    }

    #[test]
    fn search_matches_date_workplace_and_position() {
        let s = store();
        let mut state = AppState::load(&s, user()).unwrap();
        let blue = state.add_workplace("Blue Note", "", server()).unwrap();
        let red = state
            .add_workplace(
                "Red Lion",
                "",
                vec![Position {
                    id: "p-bar".into(),
                    title: "Bartender".into(),
                    hourly_wage: 9.0,
                }],
            )
            .unwrap();

        let a = state.add_shift(input(&blue, 2, 10.0)).unwrap();
        let b = state.add_shift(input(&red, 14, 20.0)).unwrap();
        let c = state.add_shift(input(&blue, 20, 30.0)).unwrap();

        let ids = |v: Vec<&Shift>| v.into_iter().map(|s| s.id.clone()).collect::<Vec<_>>();

        assert_eq!(ids(state.search_shifts("", None)), vec![c.id.clone(), b.id.clone(), a.id.clone()]);
        assert_eq!(ids(state.search_shifts("BLUE", None)), vec![c.id.clone(), a.id.clone()]);
        assert_eq!(ids(state.search_shifts("bartender", None)), vec![b.id.clone()]);
        assert_eq!(ids(state.search_shifts("june 14", None)), vec![b.id.clone()]);
        assert_eq!(ids(state.search_shifts("", Some(&red.id))), vec![b.id]);
    }

    #[test]
    fn shift_ids_resolve_by_prefix() {
        let s = store();
        let mut state = AppState::load(&s, user()).unwrap();
        let w = state.add_workplace("Blue Note", "", server()).unwrap();
        let shift = state.add_shift(input(&w, 2, 10.0)).unwrap();

        assert_eq!(state.resolve_shift_id(&shift.id[..8]).unwrap(), shift.id);
        assert_eq!(state.resolve_shift_id(&shift.id).unwrap(), shift.id);
        assert!(matches!(
            state.resolve_shift_id("zzzz").unwrap_err(),
            AppError::ShiftNotFound(_)
        ));
        assert!(state.resolve_shift_id("").is_err());
    }
}
