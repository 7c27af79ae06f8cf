use crate::errors::{AppError, AppResult};
use chrono::{NaiveDate, NaiveDateTime};
use serde::{Deserialize, Serialize};

/// Storage format for `shifts.date` (local wall-clock time).
pub const DATE_TIME_FMT: &str = "%Y-%m-%dT%H:%M:%S";

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Shift {
    pub id: String,
    pub user_id: String,
    pub date: NaiveDateTime,      // ⇔ shifts.date (TEXT "YYYY-MM-DDTHH:MM:SS")
    pub workplace_id: String,     // may dangle once the workplace is deleted
    pub position_id: String,      // may dangle once the position is deleted
    pub hours_worked: f64,        // >= 0
    pub cash_tips: f64,           // >= 0
    pub card_tips: f64,           // >= 0
    pub hourly_wage: f64,         // snapshot of the position wage at creation
}

impl Shift {
    /// Gratuity income of this shift (cash + card).
    pub fn total_tips(&self) -> f64 {
        self.cash_tips + self.card_tips
    }

    /// Calendar day the shift belongs to.
    pub fn day(&self) -> NaiveDate {
        self.date.date()
    }

    pub fn date_str(&self) -> String {
        self.date.format("%Y-%m-%d").to_string()
    }

    pub fn to_db_date(&self) -> String {
        self.date.format(DATE_TIME_FMT).to_string()
    }

    pub fn parse_db_date(s: &str) -> Option<NaiveDateTime> {
        NaiveDateTime::parse_from_str(s, DATE_TIME_FMT)
            .or_else(|_| NaiveDateTime::parse_from_str(s, "%Y-%m-%d %H:%M:%S"))
            .ok()
            .or_else(|| {
                NaiveDate::parse_from_str(s, "%Y-%m-%d")
                    .ok()
                    .and_then(|d| d.and_hms_opt(0, 0, 0))
            })
    }
}

/// User-supplied data for a new shift.
/// The hourly wage is not part of the input: it is snapshotted from the
/// selected position when the shift is created.
#[derive(Debug, Clone)]
pub struct ShiftInput {
    pub date: NaiveDateTime,
    pub workplace_id: String,
    pub position_id: String,
    pub hours_worked: f64,
    pub cash_tips: f64,
    pub card_tips: f64,
}

impl ShiftInput {
    pub fn validate(&self) -> AppResult<()> {
        validate_amount("hours", self.hours_worked)?;
        validate_amount("cash tips", self.cash_tips)?;
        validate_amount("card tips", self.card_tips)?;
        Ok(())
    }
}

/// Partial replacement of a stored shift. `None` leaves a field untouched.
#[derive(Debug, Clone, Default)]
pub struct ShiftUpdate {
    pub date: Option<NaiveDateTime>,
    pub workplace_id: Option<String>,
    pub position_id: Option<String>,
    pub hours_worked: Option<f64>,
    pub cash_tips: Option<f64>,
    pub card_tips: Option<f64>,
    pub hourly_wage: Option<f64>,
}

impl ShiftUpdate {
    pub fn is_empty(&self) -> bool {
        self.date.is_none()
            && self.workplace_id.is_none()
            && self.position_id.is_none()
            && self.hours_worked.is_none()
            && self.cash_tips.is_none()
            && self.card_tips.is_none()
            && self.hourly_wage.is_none()
    }

    pub fn validate(&self) -> AppResult<()> {
        if let Some(h) = self.hours_worked {
            validate_amount("hours", h)?;
        }
        if let Some(c) = self.cash_tips {
            validate_amount("cash tips", c)?;
        }
        if let Some(c) = self.card_tips {
            validate_amount("card tips", c)?;
        }
        if let Some(w) = self.hourly_wage {
            validate_amount("hourly wage", w)?;
        }
        Ok(())
    }

    /// Merge the update into `shift` (field-wise replacement).
    pub fn apply_to(&self, shift: &mut Shift) {
        if let Some(d) = self.date {
            shift.date = d;
        }
        if let Some(w) = &self.workplace_id {
            shift.workplace_id = w.clone();
        }
        if let Some(p) = &self.position_id {
            shift.position_id = p.clone();
        }
        if let Some(h) = self.hours_worked {
            shift.hours_worked = h;
        }
        if let Some(c) = self.cash_tips {
            shift.cash_tips = c;
        }
        if let Some(c) = self.card_tips {
            shift.card_tips = c;
        }
        if let Some(w) = self.hourly_wage {
            shift.hourly_wage = w;
        }
    }
}

/// Amounts (hours, tips, wages) must be finite and non-negative.
pub fn validate_amount(field: &str, value: f64) -> AppResult<f64> {
    if !value.is_finite() || value < 0.0 {
        return Err(AppError::InvalidAmount(format!(
            "{field} must be a non-negative number, got {value}"
        )));
    }
    Ok(value)
}
