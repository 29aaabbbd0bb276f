use serde::{Deserialize, Serialize};

/// The attendance state of one student for one subject on one date.
///
/// The wire literals are exact and case-sensitive. `None` is special: the
/// backend synthesizes it for roster members with no saved row, and it must
/// never appear in a save payload — it means "no mark has ever been saved",
/// not a fourth kind of mark.
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq)]
pub enum AttendanceStatus {
    Present,
    #[serde(rename = "Absent Informed")]
    AbsentInformed,
    #[serde(rename = "Absent Uninformed")]
    AbsentUninformed,
    #[serde(rename = "none")]
    None,
}

impl AttendanceStatus {
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Present => "Present",
            Self::AbsentInformed => "Absent Informed",
            Self::AbsentUninformed => "Absent Uninformed",
            Self::None => "none",
        }
    }

    pub fn from_str(s: &str) -> Option<Self> {
        match s {
            "Present" => Some(Self::Present),
            "Absent Informed" => Some(Self::AbsentInformed),
            "Absent Uninformed" => Some(Self::AbsentUninformed),
            "none" => Some(Self::None),
            _ => None,
        }
    }

    /// True for the three statuses that may be persisted.
    pub fn is_selectable(&self) -> bool {
        !matches!(self, Self::None)
    }
}

/// One saved (or synthesized) mark for a student, scoped to a subject and
/// date by the request that produced it.
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq)]
pub struct AttendanceMark {
    pub student_id: i64,
    pub status: AttendanceStatus,
}
