use chrono::{NaiveDate, NaiveDateTime};

pub(crate) const DATE_TIME_NUM_FORMAT: &str = "yyyy-mm-dd hh:mm";

/// Parse an exported shift date (`YYYY-MM-DD HH:MM`) into an Excel serial.
pub(crate) fn parse_to_excel_serial(s: &str) -> Option<f64> {
    NaiveDateTime::parse_from_str(s, "%Y-%m-%d %H:%M")
        .ok()
        .map(|dt| excel_serial(&dt))
}

/// Days since 1899-12-30, with the time of day as the fraction.
pub(crate) fn excel_serial(dt: &NaiveDateTime) -> f64 {
    let epoch = NaiveDate::from_ymd_opt(1899, 12, 30)
        .and_then(|d| d.and_hms_opt(0, 0, 0))
        .unwrap_or_default();

    let secs = (*dt - epoch).num_seconds() as f64;
    secs / 86_400.0
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn serial_matches_excel() {
        // 2025-01-01 is serial 45658 in Excel's 1900 date system
        assert_eq!(parse_to_excel_serial("2025-01-01 00:00"), Some(45658.0));
        assert_eq!(parse_to_excel_serial("2025-01-01 18:00"), Some(45658.75));
        assert_eq!(parse_to_excel_serial("2025-01-01"), None);
    }
}
