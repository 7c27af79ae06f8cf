//! Shift aggregation: reporting windows, summaries and time buckets.
//!
//! Everything here is a pure function over an in-memory slice of shifts.
//! Two averages coexist on purpose:
//! - [`summarize`] reports the mean of each shift's own tips/hours ratio;
//! - [`bucketize`] reports, per bucket, total tips divided by total hours.
//!
//! They give different numbers for the same input and both are part of the
//! reported figures, so they must not be unified.

use crate::models::{Granularity, Shift, WeekStart};
use crate::utils::date::{end_of_day, first_day_of_month, last_day_of_month, start_of_day};
use chrono::{Datelike, Days, Months, NaiveDate, NaiveDateTime};
use serde::Serialize;

/// Inclusive bounds of a reporting period.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct Window {
    pub start: NaiveDateTime,
    pub end: NaiveDateTime,
}

impl Window {
    pub fn contains(&self, at: NaiveDateTime) -> bool {
        at >= self.start && at <= self.end
    }

    pub fn first_day(&self) -> NaiveDate {
        self.start.date()
    }

    pub fn last_day(&self) -> NaiveDate {
        self.end.date()
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Default, Serialize)]
pub struct Summary {
    pub total_tips: f64,
    pub total_hours: f64,
    pub average_per_hour: f64,
    pub shift_count: usize,
}

/// Aggregated figures for one sub-period of a window.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Bucket {
    pub label: String,
    /// Representative date of the bucket (first day of the sub-period).
    pub date: NaiveDate,
    pub total: f64,
    pub hours: f64,
    pub average: f64,
}

/// Calendar period of the given granularity containing `reference`.
/// `start` is midnight of the first day, `end` is 23:59:59.999 of the last one.
pub fn compute_window(granularity: Granularity, reference: NaiveDate, week_start: WeekStart) -> Window {
    let (first, last) = match granularity {
        Granularity::Day => (reference, reference),
        Granularity::Week => (
            week_start.start_of_week(reference),
            week_start.end_of_week(reference),
        ),
        Granularity::Month => (first_day_of_month(reference), last_day_of_month(reference)),
        Granularity::Year => (
            reference.with_ordinal(1).unwrap_or(reference),
            NaiveDate::from_ymd_opt(reference.year(), 12, 31).unwrap_or(reference),
        ),
    };

    Window {
        start: start_of_day(first),
        end: end_of_day(last),
    }
}

/// Shifts whose date lies in `[start, end]` (both ends inclusive).
pub fn filter_by_window(shifts: &[Shift], start: NaiveDateTime, end: NaiveDateTime) -> Vec<Shift> {
    shifts
        .iter()
        .filter(|s| s.date >= start && s.date <= end)
        .cloned()
        .collect()
}

/// Totals plus the per-shift average of tips per hour.
///
/// A shift with `hours_worked == 0` is not guarded: its ratio is `inf`
/// (or `NaN` with zero tips) and that value propagates into the average.
pub fn summarize(shifts: &[Shift]) -> Summary {
    if shifts.is_empty() {
        return Summary::default();
    }

    let total_tips: f64 = shifts.iter().map(Shift::total_tips).sum();
    let total_hours: f64 = shifts.iter().map(|s| s.hours_worked).sum();
    let ratio_sum: f64 = shifts
        .iter()
        .map(|s| s.total_tips() / s.hours_worked)
        .sum();

    Summary {
        total_tips,
        total_hours,
        average_per_hour: ratio_sum / shifts.len() as f64,
        shift_count: shifts.len(),
    }
}

/// Split `[start, end]` into calendar sub-periods and aggregate each one.
///
/// - year  → one bucket per month
/// - month → one bucket per week whose first day is on or before `end`
/// - week  → one bucket per day
/// - day   → one bucket per day of the interval
///
/// A shift belongs to a bucket when it falls in the same calendar
/// month/week/day as the bucket's date. Membership is checked against the
/// whole `shifts` slice, so a week bucket overlapping the previous month
/// also counts the shifts of those leading days.
pub fn bucketize(
    shifts: &[Shift],
    start: NaiveDateTime,
    end: NaiveDateTime,
    granularity: Granularity,
    week_start: WeekStart,
) -> Vec<Bucket> {
    bucket_dates(start.date(), end.date(), granularity, week_start)
        .into_iter()
        .map(|date| {
            let (total, hours) = shifts
                .iter()
                .filter(|s| same_bucket(granularity, week_start, s.day(), date))
                .fold((0.0, 0.0), |(t, h), s| (t + s.total_tips(), h + s.hours_worked));

            let average = if hours > 0.0 { total / hours } else { 0.0 };

            Bucket {
                label: bucket_label(granularity, date),
                date,
                total,
                hours,
                average,
            }
        })
        .collect()
}

/// Tips earned on `day` (calendar-day match, not a 24h window).
pub fn income_for_day(shifts: &[Shift], day: NaiveDate) -> f64 {
    shifts
        .iter()
        .filter(|s| s.day() == day)
        .map(Shift::total_tips)
        .sum()
}

fn bucket_dates(
    first: NaiveDate,
    last: NaiveDate,
    granularity: Granularity,
    week_start: WeekStart,
) -> Vec<NaiveDate> {
    let mut out = Vec::new();

    let mut cursor = match granularity {
        Granularity::Year => first_day_of_month(first),
        Granularity::Month => week_start.start_of_week(first),
        Granularity::Week | Granularity::Day => first,
    };

    while cursor <= last {
        out.push(cursor);

        let next = match granularity {
            Granularity::Year => cursor.checked_add_months(Months::new(1)),
            Granularity::Month => cursor.checked_add_days(Days::new(7)),
            Granularity::Week | Granularity::Day => cursor.checked_add_days(Days::new(1)),
        };

        match next {
            Some(next) => cursor = next,
            None => break,
        }
    }

    out
}

fn same_bucket(granularity: Granularity, week_start: WeekStart, day: NaiveDate, bucket: NaiveDate) -> bool {
    match granularity {
        Granularity::Year => day.year() == bucket.year() && day.month() == bucket.month(),
        Granularity::Month => week_start.start_of_week(day) == week_start.start_of_week(bucket),
        Granularity::Week | Granularity::Day => day == bucket,
    }
}

fn bucket_label(granularity: Granularity, date: NaiveDate) -> String {
    let fmt = match granularity {
        Granularity::Year => "%b",
        Granularity::Month => "%b %-d",
        Granularity::Week => "%a",
        Granularity::Day => "%a %-d",
    };
    date.format(fmt).to_string()
}

#[cfg(test)]
mod tests {
    use super::*;

    fn d(y: i32, m: u32, day: u32) -> NaiveDate {
        NaiveDate::from_ymd_opt(y, m, day).unwrap()
    }

    fn at(y: i32, m: u32, day: u32, h: u32, min: u32) -> NaiveDateTime {
        d(y, m, day).and_hms_opt(h, min, 0).unwrap()
    }

    fn shift(date: NaiveDateTime, hours: f64, cash: f64, card: f64) -> Shift {
        Shift {
            id: format!("{date}-{hours}"),
            user_id: "u".into(),
            date,
            workplace_id: "w".into(),
            position_id: "p".into(),
            hours_worked: hours,
            cash_tips: cash,
            card_tips: card,
            hourly_wage: 10.0,
        }
    }

    #[test]
    fn summarize_empty_is_all_zero() {
        let s = summarize(&[]);
        assert_eq!(s.total_tips, 0.0);
        assert_eq!(s.total_hours, 0.0);
        assert_eq!(s.average_per_hour, 0.0);
        assert_eq!(s.shift_count, 0);
    }

    #[test]
    fn summarize_single_shift() {
        let s = summarize(&[shift(at(2025, 5, 2, 17, 0), 8.0, 120.0, 80.0)]);
        assert_eq!(s.total_tips, 200.0);
        assert_eq!(s.total_hours, 8.0);
        assert_eq!(s.average_per_hour, 25.0);
    }

    #[test]
    fn summarize_averages_per_shift_ratios() {
        let shifts = [
            shift(at(2025, 5, 2, 17, 0), 8.0, 200.0, 0.0),
            shift(at(2025, 5, 3, 17, 0), 6.0, 140.0, 100.0),
        ];
        let s = summarize(&shifts);
        assert_eq!(s.total_tips, 440.0);
        assert_eq!(s.total_hours, 14.0);
        assert_eq!(s.average_per_hour, 32.5);
        assert!((s.average_per_hour - 440.0 / 14.0).abs() > 1.0);
    }

    #[test]
    fn summarize_ignores_input_order() {
        let a = shift(at(2025, 5, 2, 17, 0), 8.0, 200.0, 0.0);
        let b = shift(at(2025, 5, 3, 17, 0), 6.0, 240.0, 0.0);
        let c = shift(at(2025, 5, 4, 12, 0), 4.0, 30.0, 22.0);
        let fwd = summarize(&[a.clone(), b.clone(), c.clone()]);
        let rev = summarize(&[c, b, a]);
        assert_eq!(fwd.total_tips, rev.total_tips);
        assert_eq!(fwd.total_hours, rev.total_hours);
        assert!((fwd.average_per_hour - rev.average_per_hour).abs() < 1e-9);
    }

    #[test]
    fn summarize_zero_hour_shift_pollutes_average() {
        let with_tips = summarize(&[
            shift(at(2025, 5, 2, 17, 0), 8.0, 80.0, 0.0),
            shift(at(2025, 5, 3, 17, 0), 0.0, 20.0, 0.0),
        ]);
        assert!(with_tips.average_per_hour.is_infinite());
        assert_eq!(with_tips.total_tips, 100.0);

        let without_tips = summarize(&[shift(at(2025, 5, 3, 17, 0), 0.0, 0.0, 0.0)]);
        assert!(without_tips.average_per_hour.is_nan());
    }

    #[test]
    fn window_month_and_year() {
        let w = compute_window(Granularity::Month, d(2024, 2, 17), WeekStart::Sunday);
        assert_eq!(w.start, at(2024, 2, 1, 0, 0));
        assert_eq!(w.last_day(), d(2024, 2, 29));
        assert_eq!(w.end, end_of_day(d(2024, 2, 29)));

        let y = compute_window(Granularity::Year, d(2025, 7, 4), WeekStart::Sunday);
        assert_eq!(y.first_day(), d(2025, 1, 1));
        assert_eq!(y.last_day(), d(2025, 12, 31));
    }

    #[test]
    fn window_week_uses_week_start() {
        // Thursday 2025-01-02 sits in a week spanning the new year
        let sun = compute_window(Granularity::Week, d(2025, 1, 2), WeekStart::Sunday);
        assert_eq!(sun.first_day(), d(2024, 12, 29));
        assert_eq!(sun.last_day(), d(2025, 1, 4));

        let mon = compute_window(Granularity::Week, d(2025, 1, 2), WeekStart::Monday);
        assert_eq!(mon.first_day(), d(2024, 12, 30));
        assert_eq!(mon.last_day(), d(2025, 1, 5));
    }

    #[test]
    fn filter_single_day_window_is_inclusive() {
        let shifts = vec![
            shift(at(2025, 3, 9, 23, 59), 5.0, 50.0, 0.0),
            shift(at(2025, 3, 10, 0, 0), 5.0, 60.0, 0.0),
            shift(at(2025, 3, 10, 23, 59), 5.0, 70.0, 0.0),
            shift(at(2025, 3, 11, 0, 0), 5.0, 80.0, 0.0),
        ];
        let w = compute_window(Granularity::Day, d(2025, 3, 10), WeekStart::Sunday);
        let got = filter_by_window(&shifts, w.start, w.end);
        assert_eq!(got.len(), 2);
        assert!(got.iter().all(|s| s.day() == d(2025, 3, 10)));
    }

    #[test]
    fn bucketize_month_yields_one_bucket_per_touched_week() {
        // June 2025: Sun 1st .. Mon 30th → weeks starting 1, 8, 15, 22, 29
        let w = compute_window(Granularity::Month, d(2025, 6, 12), WeekStart::Sunday);
        let shifts = vec![
            shift(at(2025, 6, 2, 18, 0), 5.0, 50.0, 25.0),
            shift(at(2025, 6, 7, 18, 0), 5.0, 25.0, 0.0),
            shift(at(2025, 6, 30, 18, 0), 4.0, 40.0, 0.0),
            shift(at(2025, 7, 3, 18, 0), 4.0, 60.0, 0.0),
        ];
        let buckets = bucketize(&shifts, w.start, w.end, Granularity::Month, WeekStart::Sunday);

        let dates: Vec<NaiveDate> = buckets.iter().map(|b| b.date).collect();
        assert_eq!(
            dates,
            vec![d(2025, 6, 1), d(2025, 6, 8), d(2025, 6, 15), d(2025, 6, 22), d(2025, 6, 29)]
        );
        assert_eq!(buckets[0].label, "Jun 1");
        assert_eq!(buckets[0].total, 100.0);
        assert_eq!(buckets[0].hours, 10.0);
        assert_eq!(buckets[0].average, 10.0);
        assert_eq!(buckets[1].total, 0.0);
        assert_eq!(buckets[1].average, 0.0);
        // the last week spills into July and counts that shift too
        assert_eq!(buckets[4].total, 100.0);
        assert_eq!(buckets[4].hours, 8.0);
    }

    #[test]
    fn bucketize_month_starting_midweek_includes_leading_week() {
        // May 2025 starts on a Thursday: first bucket is Sun Apr 27
        let w = compute_window(Granularity::Month, d(2025, 5, 20), WeekStart::Sunday);
        let shifts = vec![shift(at(2025, 4, 28, 12, 0), 2.0, 30.0, 0.0)];
        let buckets = bucketize(&shifts, w.start, w.end, Granularity::Month, WeekStart::Sunday);
        assert_eq!(buckets.len(), 5);
        assert_eq!(buckets[0].date, d(2025, 4, 27));
        assert_eq!(buckets[0].label, "Apr 27");
        assert_eq!(buckets[0].total, 30.0);
    }

    #[test]
    fn bucketize_year_uses_ratio_of_sums() {
        let w = compute_window(Granularity::Year, d(2025, 1, 1), WeekStart::Sunday);
        let shifts = vec![
            shift(at(2025, 3, 1, 18, 0), 8.0, 200.0, 0.0),
            shift(at(2025, 3, 20, 18, 0), 6.0, 240.0, 0.0),
            shift(at(2024, 3, 5, 18, 0), 6.0, 999.0, 0.0),
        ];
        let buckets = bucketize(&shifts, w.start, w.end, Granularity::Year, WeekStart::Sunday);
        assert_eq!(buckets.len(), 12);
        assert_eq!(buckets[0].label, "Jan");
        let march = &buckets[2];
        assert_eq!(march.label, "Mar");
        assert_eq!(march.total, 440.0);
        assert_eq!(march.hours, 14.0);
        assert!((march.average - 440.0 / 14.0).abs() < 1e-9);
    }

    #[test]
    fn bucketize_week_has_seven_days() {
        let w = compute_window(Granularity::Week, d(2025, 6, 4), WeekStart::Sunday);
        let shifts = vec![shift(at(2025, 6, 4, 9, 0), 0.0, 15.0, 0.0)];
        let buckets = bucketize(&shifts, w.start, w.end, Granularity::Week, WeekStart::Sunday);
        let labels: Vec<&str> = buckets.iter().map(|b| b.label.as_str()).collect();
        assert_eq!(labels, vec!["Sun", "Mon", "Tue", "Wed", "Thu", "Fri", "Sat"]);
        // zero hours in a bucket → average guarded to 0
        assert_eq!(buckets[3].total, 15.0);
        assert_eq!(buckets[3].average, 0.0);
    }

    #[test]
    fn income_for_day_matches_calendar_day_only() {
        let shifts = vec![
            shift(at(2025, 8, 1, 22, 0), 6.0, 100.0, 20.0),
            shift(at(2025, 8, 2, 1, 0), 3.0, 40.0, 0.0),
            shift(at(2025, 8, 2, 19, 0), 5.0, 10.0, 5.0),
        ];
        assert_eq!(income_for_day(&shifts, d(2025, 8, 1)), 120.0);
        assert_eq!(income_for_day(&shifts, d(2025, 8, 2)), 55.0);
        assert_eq!(income_for_day(&shifts, d(2025, 8, 3)), 0.0);
    }
}
