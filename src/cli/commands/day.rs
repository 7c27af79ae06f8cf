use crate::cli::commands::{active_user, open_store};
use crate::cli::parser::{Cli, Commands};
use crate::config::Config;
use crate::core::calendar::day_details;
use crate::errors::{AppError, AppResult};
use crate::state::AppState;
use crate::ui::messages::{header, info};
use crate::utils::colors::or_missing;
use crate::utils::date::parse_date;
use crate::utils::formatting::{hours, money, rate};
use crate::utils::table::{Column, Table};

pub fn handle(cli: &Cli, cfg: &Config) -> AppResult<()> {
    if let Commands::Day { date } = &cli.command {
        let day = parse_date(date).ok_or_else(|| AppError::InvalidDate(date.clone()))?;

        let store = open_store(cfg)?;
        let user = active_user(&store, cli, cfg)?;
        let state = AppState::load(&store, user)?;
        let symbol = state.preferences.currency_symbol();

        let details = day_details(&state.shifts, day);

        header(
            format!("🗓️  {}", day.format("%A, %B %-d, %Y")),
            &cfg.separator_char,
        );

        if details.shifts.is_empty() {
            info("No shifts recorded on this day.");
            return Ok(());
        }

        let mut table = Table::new(
            vec![
                Column::left("Time"),
                Column::left("Workplace"),
                Column::left("Position"),
                Column::right("Hours"),
                Column::right("Cash"),
                Column::right("Card"),
                Column::right("Total"),
                Column::right("Tips/h"),
            ],
            &cfg.separator_char,
        );

        for s in &details.shifts {
            table.add_row(vec![
                s.date.format("%H:%M").to_string(),
                or_missing(state.workplace_name(s), cfg.color_output),
                or_missing(state.position_title(s), cfg.color_output),
                format!("{:.1}", s.hours_worked),
                money(symbol, s.cash_tips),
                money(symbol, s.card_tips),
                money(symbol, s.total_tips()),
                rate(symbol, s.total_tips() / s.hours_worked),
            ]);
        }
        print!("{}", table.render());

        println!(
            "\n  Day total: {} over {}",
            money(symbol, details.total_income),
            hours(details.total_hours)
        );
    }
    Ok(())
}
