//! Attendance reconciliation: merging previously saved marks into a
//! freshly rendered roster so existing state is visible and editable
//! rather than re-entered.
//!
//! `reconcile` is a pure function of (roster, saved marks); re-running it
//! with the same inputs yields an identical view. Selection state lives in
//! the returned [`RosterView`] rather than in any ambient UI state, so the
//! form-completeness gate and the save payload can be evaluated without a
//! rendered page.

use std::collections::BTreeMap;

use crate::error::ValidationError;
use crate::models::{AttendanceMark, AttendanceStatus, Student};

/// What the backend already knows about this subject/date.
///
/// `NoData` (the store query returned no rows at all) and `NotRecorded`
/// (rows came back but every status was `none`) drive different
/// user-facing messages and must not be conflated.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ExistingRecord {
    NoData,
    Recorded,
    NotRecorded,
}

/// Editable per-student selection state for one subject/date.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RosterView {
    /// Roster order, preserved for rendering and the save payload.
    order: Vec<i64>,
    selections: BTreeMap<i64, Option<AttendanceStatus>>,
    existing: ExistingRecord,
}

/// Merge saved marks into a roster.
///
/// Every roster member gets an entry; a saved mark pre-selects its status
/// unless it is the `none` placeholder. Marks for students not on the
/// roster are ignored.
pub fn reconcile(roster: &[Student], saved: &[AttendanceMark]) -> RosterView {
    let by_student: BTreeMap<i64, AttendanceStatus> = saved
        .iter()
        .map(|mark| (mark.student_id, mark.status))
        .collect();

    let mut order = Vec::with_capacity(roster.len());
    let mut selections = BTreeMap::new();
    let mut any_mark_present = false;

    for student in roster {
        let selection = match by_student.get(&student.id) {
            Some(status) if status.is_selectable() => {
                any_mark_present = true;
                Some(*status)
            }
            _ => None,
        };
        order.push(student.id);
        selections.insert(student.id, selection);
    }

    let existing = if saved.is_empty() {
        ExistingRecord::NoData
    } else if any_mark_present {
        ExistingRecord::Recorded
    } else {
        ExistingRecord::NotRecorded
    };

    RosterView {
        order,
        selections,
        existing,
    }
}

impl RosterView {
    pub fn existing(&self) -> ExistingRecord {
        self.existing
    }

    pub fn selection(&self, student_id: i64) -> Option<AttendanceStatus> {
        self.selections.get(&student_id).copied().flatten()
    }

    /// Set a selection for a roster member. Returns false (and changes
    /// nothing) for unknown students or the `none` placeholder.
    pub fn set(&mut self, student_id: i64, status: AttendanceStatus) -> bool {
        if !status.is_selectable() {
            return false;
        }
        match self.selections.get_mut(&student_id) {
            Some(slot) => {
                *slot = Some(status);
                true
            }
            None => false,
        }
    }

    /// True iff every roster member has a selected status. Gates save
    /// submission; nothing is auto-filled.
    pub fn is_complete(&self) -> bool {
        !self.order.is_empty() && self.selections.values().all(|s| s.is_some())
    }

    /// Roster members still missing a selection, in roster order.
    pub fn missing(&self) -> Vec<i64> {
        self.order
            .iter()
            .filter(|id| self.selection(**id).is_none())
            .copied()
            .collect()
    }

    /// Build the save payload. Fails unless the form is complete, so a
    /// `none` status can never leak into a write.
    pub fn marks_for_save(&self) -> Result<Vec<AttendanceMark>, ValidationError> {
        self.order
            .iter()
            .map(|id| {
                self.selection(*id)
                    .map(|status| AttendanceMark {
                        student_id: *id,
                        status,
                    })
                    .ok_or_else(|| {
                        ValidationError::InvalidInput(format!(
                            "student {} has no status selected",
                            id
                        ))
                    })
            })
            .collect()
    }

    /// The user-facing summary for this subject/date, phrased per the
    /// existence state.
    pub fn status_message(&self, wire_date: &str) -> String {
        match self.existing {
            ExistingRecord::Recorded => format!(
                "Attendance for {} already exists. You can edit it.",
                wire_date
            ),
            ExistingRecord::NotRecorded => format!(
                "No attendance found for {}. Please mark it below.",
                wire_date
            ),
            ExistingRecord::NoData => "No data available for the selected criteria.".to_string(),
        }
    }
}
