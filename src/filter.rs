//! Filter query construction for attendance reports.
//!
//! Turns a UI-selected filter mode plus raw parameters into a normalized
//! query descriptor, validating that exactly the parameters the mode needs
//! are present. Also owns the wire date boundary: pickers and internal
//! dates are year-month-day (`NaiveDate`), the backend speaks
//! day-month-year with hyphens, and every date leaving the client goes
//! through [`to_wire_date`].

use chrono::NaiveDate;

use crate::error::ValidationError;

/// Wire date format, day-month-year with hyphens.
pub const WIRE_DATE_FORMAT: &str = "%d-%m-%Y";

/// Convert an internal date to the backend's day-month-year form.
pub fn to_wire_date(date: NaiveDate) -> String {
    date.format(WIRE_DATE_FORMAT).to_string()
}

/// Parse a backend day-month-year date back to an internal date.
pub fn from_wire_date(s: &str) -> Result<NaiveDate, ValidationError> {
    NaiveDate::parse_from_str(s, WIRE_DATE_FORMAT)
        .map_err(|_| ValidationError::InvalidInput(format!("invalid wire date: {}", s)))
}

/// The three mutually exclusive report granularities.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FilterMode {
    Day,
    Month,
    Year,
}

impl FilterMode {
    /// The backend's `filter_type` literal.
    pub fn as_wire(&self) -> &'static str {
        match self {
            Self::Day => "date",
            Self::Month => "month",
            Self::Year => "year",
        }
    }
}

/// Raw parameter inputs as the user left them. Fields irrelevant to the
/// active mode may be populated; the builder ignores them.
#[derive(Debug, Clone, Copy, Default)]
pub struct FilterParams {
    pub date: Option<NaiveDate>,
    pub year: Option<i32>,
    pub month: Option<u32>,
}

/// A validated report query. Only the parameters required by `mode` are
/// populated; everything else is `None` regardless of the raw input.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FilterQuery {
    pub subject_id: i64,
    pub mode: FilterMode,
    pub date: Option<NaiveDate>,
    pub year: Option<i32>,
    pub month: Option<u32>,
}

impl FilterQuery {
    /// Build and validate a query for the given mode.
    ///
    /// - `Day` requires a date.
    /// - `Month` requires a year; a missing month means "all months" and
    ///   is carried as `None`, never zero.
    /// - `Year` requires a year.
    pub fn build(
        mode: FilterMode,
        subject_id: i64,
        params: FilterParams,
    ) -> Result<Self, ValidationError> {
        match mode {
            FilterMode::Day => {
                let date = params
                    .date
                    .ok_or(ValidationError::MissingParameter("date"))?;
                Ok(Self {
                    subject_id,
                    mode,
                    date: Some(date),
                    year: None,
                    month: None,
                })
            }
            FilterMode::Month => {
                let year = params
                    .year
                    .ok_or(ValidationError::MissingParameter("year"))?;
                if let Some(month) = params.month {
                    if !(1..=12).contains(&month) {
                        return Err(ValidationError::InvalidInput(format!(
                            "month must be between 1 and 12, got {}",
                            month
                        )));
                    }
                }
                Ok(Self {
                    subject_id,
                    mode,
                    date: None,
                    year: Some(year),
                    month: params.month,
                })
            }
            FilterMode::Year => {
                let year = params
                    .year
                    .ok_or(ValidationError::MissingParameter("year"))?;
                Ok(Self {
                    subject_id,
                    mode,
                    date: None,
                    year: Some(year),
                    month: None,
                })
            }
        }
    }

    /// Query-string pairs in the shape the backend expects. Months are
    /// zero-padded to two digits; an "all months" month is omitted.
    pub fn wire_params(&self) -> Vec<(&'static str, String)> {
        let mut params = vec![
            ("subject_id", self.subject_id.to_string()),
            ("filter_type", self.mode.as_wire().to_string()),
        ];
        if let Some(date) = self.date {
            params.push(("date", to_wire_date(date)));
        }
        if let Some(year) = self.year {
            params.push(("year", year.to_string()));
        }
        if let Some(month) = self.month {
            params.push(("month", format!("{:02}", month)));
        }
        params
    }
}
