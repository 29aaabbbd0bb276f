use chrono::NaiveDate;
use serde::{Deserialize, Serialize};

/// Completion state of a homework item for the current student.
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq)]
pub enum HomeworkStatus {
    Pending,
    Completed,
}

impl HomeworkStatus {
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Pending => "Pending",
            Self::Completed => "Completed",
        }
    }

    pub fn from_str(s: &str) -> Option<Self> {
        match s {
            "Pending" => Some(Self::Pending),
            "Completed" => Some(Self::Completed),
            _ => None,
        }
    }

    /// The opposite state, used when a toggle flips the local view.
    pub fn toggled(&self) -> Self {
        match self {
            Self::Pending => Self::Completed,
            Self::Completed => Self::Pending,
        }
    }
}

/// A homework assignment as listed by the backend.
///
/// Dates arrive in the wire day-month-year format and are render-only, so
/// they stay as strings here.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct HomeworkItem {
    pub id: i64,
    pub subject_id: i64,
    pub subject: String,
    pub description: String,
    #[serde(default)]
    pub posted_date: Option<String>,
    pub due_date: String,
    pub status: HomeworkStatus,
}

/// Input for creating or updating a homework assignment.
///
/// The due date is sent year-month-day; the backend converts it to the
/// wire day-month-year form on write. This is the one date field that is
/// not converted client-side.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct HomeworkInput {
    pub subject_id: i64,
    pub description: String,
    pub due_date: NaiveDate,
}
