use crate::cli::commands::{active_user, open_store};
use crate::cli::parser::{Cli, Commands};
use crate::config::Config;
use crate::core::clock::Clock;
use crate::core::report::DashboardReport;
use crate::errors::{AppError, AppResult};
use crate::models::Granularity;
use crate::state::AppState;
use crate::ui::messages::header;
use crate::utils::colors::{GREEN, paint};
use crate::utils::date::{parse_date, today};
use crate::utils::formatting::{hours, money, rate};
use crate::utils::table::{Column, Table};
use chrono::NaiveDate;

const BAR_WIDTH: usize = 24;

pub fn handle(cli: &Cli, cfg: &Config, clock: &dyn Clock) -> AppResult<()> {
    if let Commands::Dashboard { view, date, offset } = &cli.command {
        let reference = reference_date(*view, date.as_deref(), *offset, clock)?;

        let store = open_store(cfg)?;
        let user = active_user(&store, cli, cfg)?;
        let state = AppState::load(&store, user)?;

        render(&state, cfg, *view, reference);
    }
    Ok(())
}

/// `date` (or today) moved by `offset` periods of `view`.
fn reference_date(
    view: Granularity,
    date: Option<&str>,
    offset: i32,
    clock: &dyn Clock,
) -> AppResult<NaiveDate> {
    let base = match date {
        Some(d) => parse_date(d).ok_or_else(|| AppError::InvalidDate(d.to_string()))?,
        None => today(clock),
    };
    Ok(view.step(base, offset))
}

/// Print summary figures and the per-bucket breakdown of one period.
pub fn render(state: &AppState, cfg: &Config, view: Granularity, reference: NaiveDate) {
    let report = DashboardReport::build(&state.shifts, view, reference, cfg.week_start);
    let symbol = state.preferences.currency_symbol();

    header(format!("📊 {}", report.title()), &cfg.separator_char);
    println!("  Total tips   : {}", money(symbol, report.summary.total_tips));
    println!("  Hours worked : {}", hours(report.summary.total_hours));
    println!("  Avg per hour : {}", rate(symbol, report.summary.average_per_hour));
    println!("  Shifts       : {}", report.summary.shift_count);
    println!();

    let max = report
        .buckets
        .iter()
        .map(|b| b.total)
        .fold(0.0_f64, f64::max);

    let mut table = Table::new(
        vec![
            Column::left(bucket_heading(view)),
            Column::right("Tips"),
            Column::right("Hours"),
            Column::right("Avg/h"),
            Column::left(""),
        ],
        &cfg.separator_char,
    );

    for b in &report.buckets {
        table.add_row(vec![
            b.label.clone(),
            money(symbol, b.total),
            format!("{:.1}", b.hours),
            money(symbol, b.average),
            paint(&bar(b.total, max), GREEN, cfg.color_output),
        ]);
    }

    print!("{}", table.render());
}

fn bucket_heading(view: Granularity) -> &'static str {
    match view {
        Granularity::Year => "Month",
        Granularity::Month => "Week",
        Granularity::Week | Granularity::Day => "Day",
    }
}

/// Horizontal bar proportional to `value / max`.
fn bar(value: f64, max: f64) -> String {
    if max <= 0.0 || value <= 0.0 {
        return String::new();
    }
    let n = ((value / max) * BAR_WIDTH as f64).round().max(1.0) as usize;
    "█".repeat(n.min(BAR_WIDTH))
}
