//! Individual attendance report aggregation.
//!
//! The backend supplies the matched rows and the present-day count; this
//! module combines that count with the user-supplied total of working days
//! into a percentage and a pass/fail classification.

use chrono::NaiveDate;

use crate::error::ValidationError;

/// Minimum percentage for a passing classification, boundary inclusive.
pub const PASS_THRESHOLD: f64 = 75.0;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Classification {
    Pass,
    Fail,
}

/// Subject selection for an individual report. "All subjects" is a named
/// option that widens the match across every subject; it serializes as an
/// absent `subject_id` parameter.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SubjectScope {
    All,
    One(i64),
}

impl SubjectScope {
    pub fn wire_param(&self) -> Option<String> {
        match self {
            Self::All => None,
            Self::One(id) => Some(id.to_string()),
        }
    }
}

/// Optional date narrowing for an individual report. `Any` places no date
/// condition on the match.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum StudentDateFilter {
    Any,
    Year(i32),
    Month(u32),
    Date(NaiveDate),
}

impl StudentDateFilter {
    /// Select at most one narrowing from raw flag inputs.
    ///
    /// The backend applies a single date condition, so supplying more
    /// than one flag is ambiguous and rejected rather than silently
    /// resolved by precedence.
    pub fn from_flags(
        date: Option<NaiveDate>,
        month: Option<u32>,
        year: Option<i32>,
    ) -> Result<Self, ValidationError> {
        match (date, month, year) {
            (None, None, None) => Ok(Self::Any),
            (Some(d), None, None) => Ok(Self::Date(d)),
            (None, Some(m), None) => {
                if !(1..=12).contains(&m) {
                    return Err(ValidationError::InvalidInput(format!(
                        "month must be between 1 and 12, got {}",
                        m
                    )));
                }
                Ok(Self::Month(m))
            }
            (None, None, Some(y)) => Ok(Self::Year(y)),
            _ => Err(ValidationError::InvalidInput(
                "use only one of date, month, or year".to_string(),
            )),
        }
    }

    /// (`dateType`, value) pairs for the wire. The date value here is sent
    /// year-month-day; the backend converts it for the query.
    pub fn wire_params(&self) -> Vec<(&'static str, String)> {
        match self {
            Self::Any => vec![],
            Self::Year(year) => vec![("dateType", "year".to_string()), ("year", year.to_string())],
            Self::Month(month) => vec![
                ("dateType", "month".to_string()),
                ("month", format!("{:02}", month)),
            ],
            Self::Date(date) => vec![
                ("dateType", "date".to_string()),
                ("date", date.format("%Y-%m-%d").to_string()),
            ],
        }
    }
}

/// The derived attendance figures for one student.
#[derive(Debug, Clone, PartialEq)]
pub struct IndividualSummary {
    pub days_present: u32,
    pub total_working_days: u32,
    /// Unrounded ratio; rounding to two decimals happens only at display.
    pub percentage: f64,
    pub classification: Classification,
}

/// Reject a non-positive working-day total.
///
/// Callers run this before issuing the report request: validation errors
/// must block submission client-side, never travel to the backend, and
/// the total is never clamped.
pub fn validate_total_working_days(total_working_days: u32) -> Result<(), ValidationError> {
    if total_working_days == 0 {
        return Err(ValidationError::InvalidInput(
            "total working days must be a positive number".to_string(),
        ));
    }
    Ok(())
}

/// Combine the backend's present-day count with the user-supplied total.
///
/// `days_present` is trusted as provided, not recomputed from rows.
pub fn aggregate(
    days_present: u32,
    total_working_days: u32,
) -> Result<IndividualSummary, ValidationError> {
    validate_total_working_days(total_working_days)?;
    let percentage = f64::from(days_present) / f64::from(total_working_days) * 100.0;
    let classification = if percentage >= PASS_THRESHOLD {
        Classification::Pass
    } else {
        Classification::Fail
    };
    Ok(IndividualSummary {
        days_present,
        total_working_days,
        percentage,
        classification,
    })
}

impl IndividualSummary {
    /// Percentage rounded to two decimals, for display only.
    pub fn display_percentage(&self) -> String {
        format!("{:.2}%", self.percentage)
    }
}
