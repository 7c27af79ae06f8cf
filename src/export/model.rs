use crate::models::Shift;
use crate::state::AppState;
use serde::Serialize;

/// Flat shift row written by every export format.
#[derive(Serialize, Clone, Debug, PartialEq)]
pub struct ShiftExport {
    pub id: String,
    pub date: String,
    pub workplace: String,
    pub position: String,
    pub hours_worked: f64,
    pub cash_tips: f64,
    pub card_tips: f64,
    pub total_tips: f64,
    pub hourly_wage: f64,
}

impl ShiftExport {
    /// Resolve names through the state; dangling references export as "-".
    pub fn from_shift(state: &AppState, s: &Shift) -> Self {
        Self {
            id: s.id.clone(),
            date: s.date.format("%Y-%m-%d %H:%M").to_string(),
            workplace: state.workplace_name(s).unwrap_or("-").to_string(),
            position: state.position_title(s).unwrap_or("-").to_string(),
            hours_worked: s.hours_worked,
            cash_tips: s.cash_tips,
            card_tips: s.card_tips,
            total_tips: s.total_tips(),
            hourly_wage: s.hourly_wage,
        }
    }
}

pub(crate) fn get_headers() -> Vec<&'static str> {
    vec![
        "id",
        "date",
        "workplace",
        "position",
        "hours_worked",
        "cash_tips",
        "card_tips",
        "total_tips",
        "hourly_wage",
    ]
}

pub(crate) fn shift_to_row(e: &ShiftExport) -> Vec<String> {
    vec![
        e.id.clone(),
        e.date.clone(),
        e.workplace.clone(),
        e.position.clone(),
        format!("{:.2}", e.hours_worked),
        format!("{:.2}", e.cash_tips),
        format!("{:.2}", e.card_tips),
        format!("{:.2}", e.total_tips),
        format!("{:.2}", e.hourly_wage),
    ]
}

/// Rows for the PDF table. The id column is dropped: uuids do not fit a page.
pub(crate) fn shifts_to_table(shifts: &[ShiftExport]) -> (Vec<&'static str>, Vec<Vec<String>>) {
    let headers = get_headers().into_iter().skip(1).collect();
    let rows = shifts
        .iter()
        .map(|s| shift_to_row(s).into_iter().skip(1).collect())
        .collect();
    (headers, rows)
}
