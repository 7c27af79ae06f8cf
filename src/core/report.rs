use crate::core::aggregate::{Bucket, Summary, Window, bucketize, compute_window, filter_by_window, summarize};
use crate::models::{Granularity, Shift, WeekStart};
use chrono::NaiveDate;
use serde::Serialize;

/// Everything the dashboard shows for one period.
#[derive(Debug, Clone, Serialize)]
pub struct DashboardReport {
    pub granularity: Granularity,
    pub window: Window,
    pub summary: Summary,
    pub buckets: Vec<Bucket>,
}

impl DashboardReport {
    pub fn build(
        shifts: &[Shift],
        granularity: Granularity,
        reference: NaiveDate,
        week_start: WeekStart,
    ) -> Self {
        let window = compute_window(granularity, reference, week_start);
        let in_window = filter_by_window(shifts, window.start, window.end);
        let summary = summarize(&in_window);
        let buckets = bucketize(shifts, window.start, window.end, granularity, week_start);

        Self {
            granularity,
            window,
            summary,
            buckets,
        }
    }

    /// Human title, e.g. "June 2025", "2025", "Week of Jun 1, 2025".
    pub fn title(&self) -> String {
        let first = self.window.first_day();
        match self.granularity {
            Granularity::Year => first.format("%Y").to_string(),
            Granularity::Month => first.format("%B %Y").to_string(),
            Granularity::Week => format!("Week of {}", first.format("%b %-d, %Y")),
            Granularity::Day => first.format("%A, %B %-d, %Y").to_string(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn shift(day: NaiveDate, hours: f64, tips: f64) -> Shift {
        Shift {
            id: day.to_string(),
            user_id: "u".into(),
            date: day.and_hms_opt(20, 0, 0).unwrap(),
            workplace_id: "w".into(),
            position_id: "p".into(),
            hours_worked: hours,
            cash_tips: tips,
            card_tips: 0.0,
            hourly_wage: 0.0,
        }
    }

    #[test]
    fn summary_is_window_only_but_buckets_see_all_shifts() {
        let d = |m, day| NaiveDate::from_ymd_opt(2025, m, day).unwrap();
        // May 2025 begins on Thursday; Apr 29 shares the first week bucket
        let shifts = vec![shift(d(4, 29), 4.0, 40.0), shift(d(5, 2), 8.0, 200.0)];

        let report = DashboardReport::build(&shifts, Granularity::Month, d(5, 15), WeekStart::Sunday);

        assert_eq!(report.summary.shift_count, 1);
        assert_eq!(report.summary.total_tips, 200.0);
        assert_eq!(report.buckets[0].total, 240.0);
        assert_eq!(report.title(), "May 2025");
    }

    #[test]
    fn titles() {
        let d = NaiveDate::from_ymd_opt(2025, 6, 4).unwrap();
        let week = DashboardReport::build(&[], Granularity::Week, d, WeekStart::Sunday);
        assert_eq!(week.title(), "Week of Jun 1, 2025");
        let year = DashboardReport::build(&[], Granularity::Year, d, WeekStart::Sunday);
        assert_eq!(year.title(), "2025");
        assert_eq!(year.buckets.len(), 12);
    }
}
