//! Data shapes shared with the backend API.
//!
//! Everything here is transient and session-scoped: loaded from the backend
//! per query, rendered, and discarded. There is no client-side persistence.
//!
//! - [`Student`], [`Subject`]: immutable once loaded.
//! - [`AttendanceStatus`], [`AttendanceMark`]: one mark per
//!   (student, subject, date); the `none` status only ever arrives from the
//!   backend and is never written back.
//! - [`HomeworkItem`], [`HomeworkStatus`]: mutated by the optimistic toggle
//!   controller and the manage operations.
//! - [`ReportRow`], [`StudentReportRow`]: denormalized, render-only.

mod attendance;
mod homework;
mod report;
mod student;
mod subject;

pub use attendance::*;
pub use homework::*;
pub use report::*;
pub use student::*;
pub use subject::*;
