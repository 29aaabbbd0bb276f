use serde::{Deserialize, Serialize};

use super::AttendanceStatus;

/// One denormalized row of a filtered attendance report.
///
/// Day-mode queries omit the date (the single day is implicit); month and
/// year queries carry it. Dates stay in the wire day-month-year form since
/// these rows exist only to be rendered and are discarded afterwards.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct ReportRow {
    #[serde(default)]
    pub date: Option<String>,
    pub roll_no: String,
    pub name: String,
    pub status: AttendanceStatus,
}

/// One row of an individual student's detailed report.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct StudentReportRow {
    pub date: String,
    pub subject: String,
    pub status: AttendanceStatus,
}

/// The matched student in an individual report response.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct StudentSummary {
    pub id: i64,
    pub roll_no: String,
    pub name: String,
}

/// Full individual report payload: the matched student (if any), the
/// backend-computed present-day count, and the matched rows.
#[derive(Debug, Clone, Deserialize)]
pub struct StudentReport {
    pub student: Option<StudentSummary>,
    pub days_present: u32,
    pub rows: Vec<StudentReportRow>,
}
