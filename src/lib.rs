//! Client-side core of a classroom attendance and homework tracker.
//!
//! The backend API owns persistence and query execution; this crate owns
//! everything between user input and the rendered view:
//!
//! - [`filter`]: validated report queries across three granularities and
//!   the day-month-year wire date boundary.
//! - [`reconcile`]: merging previously saved marks into a fresh roster so
//!   existing state is edited rather than re-entered.
//! - [`report`]: choosing and rendering the presentation shape for a
//!   query result, including the "attendance was never taken" case.
//! - [`individual`]: attendance percentage and pass/fail classification
//!   for one student.
//! - [`homework`]: optimistic completion toggling with rollback.
//! - [`view`]: last-request-wins guarding for the report area.
//! - [`client`]: the typed async HTTP client for the backend contract.

pub mod client;
pub mod error;
pub mod filter;
pub mod homework;
pub mod individual;
pub mod models;
pub mod reconcile;
pub mod report;
pub mod view;
