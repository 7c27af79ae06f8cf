use crate::cli::commands::{active_user, open_store};
use crate::cli::parser::{Cli, Commands, WorkplaceAction};
use crate::config::Config;
use crate::errors::{AppError, AppResult};
use crate::models::shift::validate_amount;
use crate::models::{Position, WorkplaceUpdate, new_id};
use crate::state::AppState;
use crate::ui::messages::{confirm, info, success, warning};
use crate::utils::formatting::money;
use crate::utils::table::{Column, Table};

/// Parse `TITLE:WAGE` (the wage part is optional and defaults to 0).
fn parse_position(raw: &str) -> AppResult<Position> {
    let (title, wage) = match raw.rsplit_once(':') {
        Some((t, w)) => {
            let wage: f64 = w
                .trim()
                .parse()
                .map_err(|_| AppError::InvalidAmount(format!("invalid wage in '{raw}'")))?;
            (t.trim(), wage)
        }
        None => (raw.trim(), 0.0),
    };

    if title.is_empty() {
        return Err(AppError::InvalidValue(format!("position title missing in '{raw}'")));
    }

    Ok(Position {
        id: new_id(),
        title: title.to_string(),
        hourly_wage: validate_amount("hourly wage", wage)?,
    })
}

pub fn handle(cli: &Cli, cfg: &Config) -> AppResult<()> {
    let Commands::Workplace { action } = &cli.command else {
        return Ok(());
    };

    let store = open_store(cfg)?;
    let user = active_user(&store, cli, cfg)?;
    let mut state = AppState::load(&store, user)?;
    let symbol = state.preferences.currency_symbol().to_string();

    match action {
        WorkplaceAction::Add {
            name,
            location,
            positions,
        } => {
            let positions = positions
                .iter()
                .map(|p| parse_position(p))
                .collect::<AppResult<Vec<_>>>()?;
            let w = state.add_workplace(name, location, positions)?;
            success(format!(
                "Workplace added: {} ({} positions)",
                w.name,
                w.positions.len()
            ));
        }

        WorkplaceAction::List => {
            if state.workplaces.is_empty() {
                info("No workplaces yet. Add one with `tiplogger workplace add <name>`.");
                return Ok(());
            }

            for w in &state.workplaces {
                if w.location.is_empty() {
                    println!("🏢 {}", w.name);
                } else {
                    println!("🏢 {} ({})", w.name, w.location);
                }

                if w.positions.is_empty() {
                    println!("   no positions\n");
                    continue;
                }

                let mut table = Table::new(
                    vec![Column::left("Position"), Column::right("Wage")],
                    &cfg.separator_char,
                );
                for p in &w.positions {
                    table.add_row(vec![p.title.clone(), format!("{}/h", money(&symbol, p.hourly_wage))]);
                }
                for line in table.render().lines() {
                    println!("   {line}");
                }
                println!();
            }
        }

        WorkplaceAction::Edit {
            workplace,
            name,
            location,
        } => {
            let id = state.resolve_workplace(workplace)?.id.clone();
            let update = WorkplaceUpdate {
                name: name.clone(),
                location: location.clone(),
            };
            if update.name.is_none() && update.location.is_none() {
                warning("Nothing to update: pass --name and/or --location.");
                return Ok(());
            }
            state.update_workplace(&id, &update)?;
            success("Workplace updated.");
        }

        WorkplaceAction::Del { workplace, yes } => {
            let w = state.resolve_workplace(workplace)?;
            let (id, name) = (w.id.clone(), w.name.clone());
            let kept = state.shifts.iter().filter(|s| s.workplace_id == id).count();

            if !*yes
                && !confirm(&format!(
                    "Delete workplace '{name}'? Its {kept} shift(s) are kept without a workplace."
                ))
            {
                info("Operation cancelled.");
                return Ok(());
            }

            state.delete_workplace(&id)?;
            success(format!("Workplace '{name}' deleted."));
        }

        WorkplaceAction::AddPosition {
            workplace,
            title,
            wage,
        } => {
            let id = state.resolve_workplace(workplace)?.id.clone();
            let p = state.add_position(&id, title, *wage)?;
            success(format!(
                "Position added: {} at {}/h",
                p.title,
                money(&symbol, p.hourly_wage)
            ));
        }

        WorkplaceAction::DelPosition {
            workplace,
            position,
            yes,
        } => {
            let w = state.resolve_workplace(workplace)?;
            let p = w
                .find_position(position)
                .ok_or_else(|| AppError::UnknownPosition(position.clone()))?;
            let (pid, title) = (p.id.clone(), p.title.clone());

            if !*yes && !confirm(&format!("Delete position '{title}'?")) {
                info("Operation cancelled.");
                return Ok(());
            }

            state.delete_position(&pid)?;
            success(format!("Position '{title}' deleted."));
        }
    }

    Ok(())
}
