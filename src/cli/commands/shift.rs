use crate::cli::commands::{active_user, open_store};
use crate::cli::parser::{Cli, Commands, ShiftAction};
use crate::config::Config;
use crate::errors::{AppError, AppResult};
use crate::models::{Shift, ShiftInput, ShiftUpdate};
use crate::state::AppState;
use crate::ui::messages::{confirm, info, success, warning};
use crate::utils::colors::or_missing;
use crate::utils::date::parse_date_time;
use crate::utils::formatting::{hours, money};
use crate::utils::table::{Column, Table};

fn parse_when(raw: &str) -> AppResult<chrono::NaiveDateTime> {
    parse_date_time(raw).ok_or_else(|| AppError::InvalidDate(raw.to_string()))
}

/// Position id inside the given workplace, by title or id.
fn resolve_position(state: &AppState, workplace_id: &str, key: &str) -> AppResult<String> {
    state
        .workplace(workplace_id)
        .and_then(|w| w.find_position(key))
        .map(|p| p.id.clone())
        .ok_or_else(|| AppError::UnknownPosition(key.to_string()))
}

pub fn handle(cli: &Cli, cfg: &Config) -> AppResult<()> {
    let Commands::Shift { action } = &cli.command else {
        return Ok(());
    };

    let store = open_store(cfg)?;
    let user = active_user(&store, cli, cfg)?;
    let mut state = AppState::load(&store, user)?;
    let symbol = state.preferences.currency_symbol().to_string();

    match action {
        ShiftAction::Add {
            date,
            workplace,
            position,
            hours: h,
            cash,
            card,
        } => {
            let workplace_id = state.resolve_workplace(workplace)?.id.clone();
            let position_id = resolve_position(&state, &workplace_id, position)?;

            let shift = state.add_shift(ShiftInput {
                date: parse_when(date)?,
                workplace_id,
                position_id,
                hours_worked: *h,
                cash_tips: *cash,
                card_tips: *card,
            })?;

            success(format!(
                "Shift added: {} ({}, {} in tips)",
                shift.id,
                hours(shift.hours_worked),
                money(&symbol, shift.total_tips())
            ));
        }

        ShiftAction::Edit {
            id,
            date,
            workplace,
            position,
            hours: h,
            cash,
            card,
            wage,
        } => {
            let shift_id = state.resolve_shift_id(id)?;
            let current_workplace = state
                .shift(&shift_id)
                .map(|s| s.workplace_id.clone())
                .unwrap_or_default();

            let workplace_id = match workplace {
                Some(w) => Some(state.resolve_workplace(w)?.id.clone()),
                None => None,
            };
            if position.is_none()
                && workplace_id
                    .as_deref()
                    .is_some_and(|w| w != current_workplace)
            {
                return Err(AppError::InvalidValue(
                    "--position is required when moving a shift to another workplace".into(),
                ));
            }
            let position_id = match position {
                Some(p) => Some(resolve_position(
                    &state,
                    workplace_id.as_deref().unwrap_or(&current_workplace),
                    p,
                )?),
                None => None,
            };

            let update = ShiftUpdate {
                date: date.as_deref().map(parse_when).transpose()?,
                workplace_id,
                position_id,
                hours_worked: *h,
                cash_tips: *cash,
                card_tips: *card,
                hourly_wage: *wage,
            };

            if update.is_empty() {
                warning("Nothing to update.");
                return Ok(());
            }

            state.update_shift(&shift_id, &update)?;
            success(format!("Shift {shift_id} updated."));
        }

        ShiftAction::Del { id, yes } => {
            let shift_id = state.resolve_shift_id(id)?;
            let label = state
                .shift(&shift_id)
                .map(|s| s.date.format("%Y-%m-%d %H:%M").to_string())
                .unwrap_or_default();

            if !*yes && !confirm(&format!("Delete the shift of {label}? This action is irreversible.")) {
                info("Operation cancelled.");
                return Ok(());
            }

            state.delete_shift(&shift_id)?;
            success(format!("Shift {shift_id} deleted."));
        }

        ShiftAction::List { search, workplace } => {
            let workplace_id = match workplace {
                Some(w) => Some(state.resolve_workplace(w)?.id.clone()),
                None => None,
            };

            let shifts = state.search_shifts(search.as_deref().unwrap_or(""), workplace_id.as_deref());
            if shifts.is_empty() {
                info("No shifts found.");
                return Ok(());
            }

            print!("{}", history_table(&state, &shifts, &symbol, cfg));

            let total: f64 = shifts.iter().map(|s| s.total_tips()).sum();
            let worked: f64 = shifts.iter().map(|s| s.hours_worked).sum();
            println!(
                "\n{} shifts, {}, {} in tips",
                shifts.len(),
                hours(worked),
                money(&symbol, total)
            );
        }
    }

    Ok(())
}

fn history_table(state: &AppState, shifts: &[&Shift], symbol: &str, cfg: &Config) -> String {
    let mut table = Table::new(
        vec![
            Column::left("ID"),
            Column::left("Date"),
            Column::left("Workplace"),
            Column::left("Position"),
            Column::right("Hours"),
            Column::right("Cash"),
            Column::right("Card"),
            Column::right("Total"),
        ],
        &cfg.separator_char,
    );

    for s in shifts {
        table.add_row(vec![
            s.id.chars().take(8).collect(),
            s.date.format("%a %Y-%m-%d %H:%M").to_string(),
            or_missing(state.workplace_name(s), cfg.color_output),
            or_missing(state.position_title(s), cfg.color_output),
            format!("{:.1}", s.hours_worked),
            money(symbol, s.cash_tips),
            money(symbol, s.card_tips),
            money(symbol, s.total_tips()),
        ]);
    }

    table.render()
}
