use chrono::{Days, Months, NaiveDate, Weekday};
use clap::ValueEnum;
use serde::{Deserialize, Serialize};

/// Calendar bucket size used for reporting.
#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Granularity {
    Day,
    Week,
    Month,
    Year,
}

impl Granularity {
    pub fn as_str(&self) -> &'static str {
        match self {
            Granularity::Day => "day",
            Granularity::Week => "week",
            Granularity::Month => "month",
            Granularity::Year => "year",
        }
    }

    /// Move `reference` by `n` periods of this granularity (negative = back).
    /// Month and year steps clamp the day-of-month (Jan 31 + 1 month = Feb 28/29).
    pub fn step(&self, reference: NaiveDate, n: i32) -> NaiveDate {
        let forward = n >= 0;
        let k = n.unsigned_abs();

        let moved = match self {
            Granularity::Day => shift_days(reference, k as u64, forward),
            Granularity::Week => shift_days(reference, k as u64 * 7, forward),
            Granularity::Month => shift_months(reference, k, forward),
            Granularity::Year => shift_months(reference, k * 12, forward),
        };

        moved.unwrap_or(reference)
    }
}

fn shift_days(d: NaiveDate, days: u64, forward: bool) -> Option<NaiveDate> {
    if forward {
        d.checked_add_days(Days::new(days))
    } else {
        d.checked_sub_days(Days::new(days))
    }
}

fn shift_months(d: NaiveDate, months: u32, forward: bool) -> Option<NaiveDate> {
    if forward {
        d.checked_add_months(Months::new(months))
    } else {
        d.checked_sub_months(Months::new(months))
    }
}

/// First day of the calendar week.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, ValueEnum, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum WeekStart {
    #[default]
    Sunday,
    Monday,
}

impl WeekStart {
    pub fn weekday(&self) -> Weekday {
        match self {
            WeekStart::Sunday => Weekday::Sun,
            WeekStart::Monday => Weekday::Mon,
        }
    }

    /// Weekday headers for a calendar grid, starting on this weekday.
    pub fn headers(&self) -> [&'static str; 7] {
        match self {
            WeekStart::Sunday => ["Sun", "Mon", "Tue", "Wed", "Thu", "Fri", "Sat"],
            WeekStart::Monday => ["Mon", "Tue", "Wed", "Thu", "Fri", "Sat", "Sun"],
        }
    }

    /// Start of the week containing `d`.
    pub fn start_of_week(&self, d: NaiveDate) -> NaiveDate {
        d.week(self.weekday()).first_day()
    }

    /// Last day of the week containing `d`.
    pub fn end_of_week(&self, d: NaiveDate) -> NaiveDate {
        d.week(self.weekday()).last_day()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn d(y: i32, m: u32, day: u32) -> NaiveDate {
        NaiveDate::from_ymd_opt(y, m, day).unwrap()
    }

    #[test]
    fn step_clamps_month_end() {
        assert_eq!(Granularity::Month.step(d(2024, 1, 31), 1), d(2024, 2, 29));
        assert_eq!(Granularity::Month.step(d(2024, 3, 31), -1), d(2024, 2, 29));
        assert_eq!(Granularity::Year.step(d(2024, 2, 29), 1), d(2025, 2, 28));
    }

    #[test]
    fn step_weeks_and_days() {
        assert_eq!(Granularity::Week.step(d(2025, 6, 4), -2), d(2025, 5, 21));
        assert_eq!(Granularity::Day.step(d(2025, 12, 31), 1), d(2026, 1, 1));
        assert_eq!(Granularity::Day.step(d(2025, 12, 31), 0), d(2025, 12, 31));
    }

    #[test]
    fn week_bounds_follow_week_start() {
        // 2025-06-04 is a Wednesday
        let wed = d(2025, 6, 4);
        assert_eq!(WeekStart::Sunday.start_of_week(wed), d(2025, 6, 1));
        assert_eq!(WeekStart::Sunday.end_of_week(wed), d(2025, 6, 7));
        assert_eq!(WeekStart::Monday.start_of_week(wed), d(2025, 6, 2));
        assert_eq!(WeekStart::Monday.end_of_week(wed), d(2025, 6, 8));

        // a Sunday starts its own week only when weeks start on Sunday
        let sun = d(2025, 6, 8);
        assert_eq!(WeekStart::Sunday.start_of_week(sun), sun);
        assert_eq!(WeekStart::Monday.start_of_week(sun), d(2025, 6, 2));
    }
}
