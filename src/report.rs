//! Report view selection and text rendering.
//!
//! Given a validated query and its result rows, pick the presentation
//! shape: an explicit "no records" view, the day-mode "never taken"
//! message, or a table. Day-mode backend queries return one row per roster
//! member even for days with no saved marks, defaulting each to
//! `Absent Uninformed`; an all-default day must not present synthetic
//! defaults as real records. Month and year aggregates mix real and absent
//! rows meaningfully, so no suppression applies there.

use crate::filter::{FilterMode, FilterQuery};
use crate::models::{AttendanceStatus, ReportRow};

/// Placeholder rendered when a dated row arrives without its date.
pub const MISSING_DATE: &str = "(missing)";

/// A numbered day-view row. No date column: the single day is implicit.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DayRow {
    pub serial: usize,
    pub roll_no: String,
    pub name: String,
    pub status: AttendanceStatus,
}

/// A numbered multi-day row carrying its own date.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DatedRow {
    pub serial: usize,
    pub date: String,
    pub roll_no: String,
    pub name: String,
    pub status: AttendanceStatus,
}

/// The selected presentation for one report query.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum RenderedReport {
    /// The query matched nothing.
    NoRecords,
    /// Day mode only: every row was the `Absent Uninformed` default, so
    /// attendance was never actually taken for this day.
    NeverTaken,
    DayTable(Vec<DayRow>),
    DatedTable(Vec<DatedRow>),
}

/// Select the presentation shape for a query result.
///
/// Serial numbers are 1-based display order, not derived from any input
/// identifier.
pub fn render(query: &FilterQuery, rows: Vec<ReportRow>) -> RenderedReport {
    if rows.is_empty() {
        return RenderedReport::NoRecords;
    }

    match query.mode {
        FilterMode::Day => {
            let all_default = rows
                .iter()
                .all(|r| r.status == AttendanceStatus::AbsentUninformed);
            if all_default {
                return RenderedReport::NeverTaken;
            }
            let table = rows
                .into_iter()
                .enumerate()
                .map(|(i, r)| DayRow {
                    serial: i + 1,
                    roll_no: r.roll_no,
                    name: r.name,
                    status: r.status,
                })
                .collect();
            RenderedReport::DayTable(table)
        }
        FilterMode::Month | FilterMode::Year => {
            let table = rows
                .into_iter()
                .enumerate()
                .map(|(i, r)| DatedRow {
                    serial: i + 1,
                    // Month/year rows always carry a date on this wire; a
                    // missing one is a malformed response and must stay
                    // visible rather than render as a blank cell.
                    date: r.date.unwrap_or_else(|| MISSING_DATE.to_string()),
                    roll_no: r.roll_no,
                    name: r.name,
                    status: r.status,
                })
                .collect();
            RenderedReport::DatedTable(table)
        }
    }
}

impl RenderedReport {
    /// Render the view as text for the terminal.
    pub fn to_text(&self) -> String {
        match self {
            Self::NoRecords => "No records found for the selected criteria.\n".to_string(),
            Self::NeverTaken => "No attendance has been taken for this date.\n".to_string(),
            Self::DayTable(rows) => {
                let cells: Vec<Vec<String>> = rows
                    .iter()
                    .map(|r| {
                        vec![
                            r.serial.to_string(),
                            r.roll_no.clone(),
                            r.name.clone(),
                            r.status.as_str().to_string(),
                        ]
                    })
                    .collect();
                render_table(&["S.No", "Roll No", "Name", "Status"], &cells)
            }
            Self::DatedTable(rows) => {
                let cells: Vec<Vec<String>> = rows
                    .iter()
                    .map(|r| {
                        vec![
                            r.serial.to_string(),
                            r.date.clone(),
                            r.roll_no.clone(),
                            r.name.clone(),
                            r.status.as_str().to_string(),
                        ]
                    })
                    .collect();
                render_table(&["S.No", "Date", "Roll No", "Name", "Status"], &cells)
            }
        }
    }
}

/// Render a padded text table with a header rule.
pub fn render_table(headers: &[&str], rows: &[Vec<String>]) -> String {
    let mut widths: Vec<usize> = headers.iter().map(|h| h.len()).collect();
    for row in rows {
        for (i, cell) in row.iter().enumerate() {
            if cell.len() > widths[i] {
                widths[i] = cell.len();
            }
        }
    }

    let mut output = String::new();
    push_row(
        &mut output,
        &headers.iter().map(|h| h.to_string()).collect::<Vec<_>>(),
        &widths,
    );
    let rule: Vec<String> = widths.iter().map(|w| "-".repeat(*w)).collect();
    push_row(&mut output, &rule, &widths);
    for row in rows {
        push_row(&mut output, row, &widths);
    }
    output
}

fn push_row(output: &mut String, cells: &[String], widths: &[usize]) {
    for (i, cell) in cells.iter().enumerate() {
        if i > 0 {
            output.push_str("  ");
        }
        output.push_str(cell);
        // Pad all but the last column
        if i < widths.len() - 1 {
            for _ in cell.len()..widths[i] {
                output.push(' ');
            }
        }
    }
    output.push('\n');
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn table_pads_columns() {
        let rows = vec![
            vec!["1".to_string(), "24820001".to_string(), "Present".to_string()],
            vec!["2".to_string(), "2".to_string(), "Absent Informed".to_string()],
        ];
        let text = render_table(&["S.No", "Roll No", "Status"], &rows);
        let lines: Vec<&str> = text.lines().collect();
        assert_eq!(lines[0], "S.No  Roll No   Status");
        assert_eq!(lines[1], "----  --------  ---------------");
        assert_eq!(lines[2], "1     24820001  Present");
        assert_eq!(lines[3], "2     2         Absent Informed");
    }
}
