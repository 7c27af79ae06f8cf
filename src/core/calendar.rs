//! Month calendar grid and per-day details.

use crate::core::aggregate::income_for_day;
use crate::models::{Shift, WeekStart};
use crate::utils::date::{all_days_between, first_day_of_month, last_day_of_month};
use chrono::{Datelike, NaiveDate};

/// Colour band of a day's income in the calendar grid.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum IncomeTier {
    None,
    Low,
    Medium,
    High,
}

impl IncomeTier {
    pub fn for_income(income: f64) -> Self {
        if income == 0.0 {
            IncomeTier::None
        } else if income > 200.0 {
            IncomeTier::High
        } else if income > 100.0 {
            IncomeTier::Medium
        } else {
            IncomeTier::Low
        }
    }
}

#[derive(Debug, Clone, PartialEq)]
pub struct CalendarCell {
    pub day: NaiveDate,
    pub in_month: bool,
    pub income: f64,
    pub tier: IncomeTier,
}

#[derive(Debug, Clone)]
pub struct CalendarGrid {
    pub month: NaiveDate, // first day of the displayed month
    pub week_start: WeekStart,
    pub weeks: Vec<Vec<CalendarCell>>,
}

impl CalendarGrid {
    pub fn month_total(&self) -> f64 {
        self.weeks
            .iter()
            .flatten()
            .filter(|c| c.in_month)
            .map(|c| c.income)
            .sum()
    }
}

/// Full weeks covering the month of `reference`, each day annotated with its income.
pub fn month_grid(shifts: &[Shift], reference: NaiveDate, week_start: WeekStart) -> CalendarGrid {
    let month = first_day_of_month(reference);
    let grid_start = week_start.start_of_week(month);
    let grid_end = week_start.end_of_week(last_day_of_month(reference));

    let cells: Vec<CalendarCell> = all_days_between(grid_start, grid_end)
        .into_iter()
        .map(|day| {
            let income = income_for_day(shifts, day);
            CalendarCell {
                day,
                in_month: day.month() == month.month() && day.year() == month.year(),
                income,
                tier: IncomeTier::for_income(income),
            }
        })
        .collect();

    CalendarGrid {
        month,
        week_start,
        weeks: cells.chunks(7).map(|w| w.to_vec()).collect(),
    }
}

#[derive(Debug, Clone)]
pub struct DayDetails {
    pub day: NaiveDate,
    pub shifts: Vec<Shift>,
    pub total_income: f64,
    pub total_hours: f64,
}

/// Shifts of one calendar day in chronological order, with totals.
pub fn day_details(shifts: &[Shift], day: NaiveDate) -> DayDetails {
    let mut day_shifts: Vec<Shift> = shifts.iter().filter(|s| s.day() == day).cloned().collect();
    day_shifts.sort_by_key(|s| s.date);

    DayDetails {
        day,
        total_income: day_shifts.iter().map(Shift::total_tips).sum(),
        total_hours: day_shifts.iter().map(|s| s.hours_worked).sum(),
        shifts: day_shifts,
    }
}
