use crate::errors::{AppError, AppResult};
use crate::utils::date::{last_day_of_month, parse_date, parse_month};
use chrono::NaiveDate;

fn invalid(msg: &str, raw: &str) -> AppError {
    AppError::InvalidValue(format!("{msg}: '{raw}'"))
}

/// Bounds of a single range term: a year, a month or a day.
fn term_bounds(t: &str) -> AppResult<(NaiveDate, NaiveDate)> {
    match t.len() {
        // YYYY
        4 => {
            let y: i32 = t.parse().map_err(|_| invalid("invalid year", t))?;
            let first = NaiveDate::from_ymd_opt(y, 1, 1).ok_or_else(|| invalid("invalid year", t))?;
            let last = NaiveDate::from_ymd_opt(y, 12, 31).ok_or_else(|| invalid("invalid year", t))?;
            Ok((first, last))
        }
        // YYYY-MM
        7 => {
            let first = parse_month(t).ok_or_else(|| invalid("invalid month", t))?;
            Ok((first, last_day_of_month(first)))
        }
        // YYYY-MM-DD
        10 => {
            let d = parse_date(t).ok_or_else(|| AppError::InvalidDate(t.to_string()))?;
            Ok((d, d))
        }
        _ => Err(invalid("unsupported --range format", t)),
    }
}

/// Parse `--range` into inclusive day bounds.
///
/// Accepts `YYYY`, `YYYY-MM`, `YYYY-MM-DD` or a `start:end` pair of two
/// terms with the same format.
pub(crate) fn parse_range(r: &str) -> AppResult<(NaiveDate, NaiveDate)> {
    let Some((start_raw, end_raw)) = r.split_once(':') else {
        return term_bounds(r.trim());
    };

    let start = start_raw.trim();
    let end = end_raw.trim();

    if start.len() != end.len() {
        return Err(invalid("start and end must have the same format", r));
    }

    let (from, _) = term_bounds(start)?;
    let (_, to) = term_bounds(end)?;

    if from > to {
        return Err(invalid("range start is after its end", r));
    }

    Ok((from, to))
}
