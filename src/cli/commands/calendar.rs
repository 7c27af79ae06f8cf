use crate::cli::commands::{active_user, open_store};
use crate::cli::parser::{Cli, Commands};
use crate::config::Config;
use crate::core::calendar::{CalendarGrid, IncomeTier, month_grid};
use crate::core::clock::Clock;
use crate::errors::{AppError, AppResult};
use crate::models::Granularity;
use crate::state::AppState;
use crate::ui::messages::header;
use crate::utils::colors::{BLUE, GREEN, GREY, YELLOW, color_for_tier, paint};
use crate::utils::date::{parse_month, today};
use crate::utils::formatting::money;
use chrono::{Datelike, NaiveDate};

const CELL: usize = 8;

pub fn handle(cli: &Cli, cfg: &Config, clock: &dyn Clock) -> AppResult<()> {
    if let Commands::Calendar { month, offset } = &cli.command {
        let reference = match month {
            Some(m) => parse_month(m).ok_or_else(|| AppError::InvalidDate(m.clone()))?,
            None => today(clock),
        };

        let store = open_store(cfg)?;
        let user = active_user(&store, cli, cfg)?;
        let state = AppState::load(&store, user)?;

        render(&state, cfg, Granularity::Month.step(reference, *offset));
    }
    Ok(())
}

pub fn render(state: &AppState, cfg: &Config, reference: NaiveDate) {
    let grid = month_grid(&state.shifts, reference, cfg.week_start);
    let symbol = state.preferences.currency_symbol();

    header(
        format!("📅 {}", grid.month.format("%B %Y")),
        &cfg.separator_char,
    );
    print!("{}", render_grid(&grid, symbol, cfg.color_output));

    let worked = grid
        .weeks
        .iter()
        .flatten()
        .filter(|c| c.in_month && c.tier != IncomeTier::None)
        .count();

    println!();
    println!(
        "  Month total: {}  ({} days with tips)",
        money(symbol, grid.month_total()),
        worked
    );
    println!(
        "  Legend: {}  {}  {}",
        paint("> 200", GREEN, cfg.color_output),
        paint("> 100", BLUE, cfg.color_output),
        paint("<= 100", YELLOW, cfg.color_output)
    );
}

/// Two lines per week: day numbers, then the rounded income of each day.
fn render_grid(grid: &CalendarGrid, symbol: &str, color: bool) -> String {
    let mut out = String::new();

    for h in grid.week_start.headers() {
        out.push_str(&format!("{:>CELL$}", h));
    }
    out.push('\n');

    for week in &grid.weeks {
        for cell in week {
            let day = format!("{:>CELL$}", cell.day.day());
            let c = if cell.in_month { "" } else { GREY };
            out.push_str(&paint(&day, c, color));
        }
        out.push('\n');

        for cell in week {
            let amount = if cell.in_month && cell.income > 0.0 {
                format!("{symbol}{:.0}", cell.income)
            } else {
                String::new()
            };
            let text = format!("{:>CELL$}", amount);
            out.push_str(&paint(&text, color_for_tier(cell.tier), color && !amount.is_empty()));
        }
        out.push('\n');
    }

    out
}
