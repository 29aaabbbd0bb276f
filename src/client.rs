//! HTTP client for the classroom backend API.
//!
//! Configuration is via environment variables:
//! - `CLASSTRACK_URL` - Base URL (default: `http://localhost:5000/api`)
//!
//! Two response conventions exist on this wire: the subject and student
//! lists are bare JSON arrays, everything else is an `{ok, error?, ...}`
//! envelope. `ok: false` and non-success HTTP statuses both surface as
//! [`ClientError::Backend`]; transport failures as [`ClientError::Http`].
//! Nothing is retried.

use chrono::NaiveDate;
use reqwest::Client;
use serde::de::DeserializeOwned;
use serde::Deserialize;
use thiserror::Error;

use crate::filter::{to_wire_date, FilterQuery};
use crate::individual::{StudentDateFilter, SubjectScope};
use crate::models::{
    AttendanceMark, HomeworkInput, HomeworkItem, HomeworkStatus, ReportRow, Student,
    StudentReport, StudentReportRow, StudentSummary, Subject,
};

/// Default URL for local development.
const DEFAULT_URL: &str = "http://localhost:5000/api";

/// HTTP client errors.
#[derive(Debug, Error)]
pub enum ClientError {
    #[error("request failed: {0}")]
    Http(#[from] reqwest::Error),

    #[error("backend error: {0}")]
    Backend(String),
}

#[derive(Debug, Deserialize)]
struct Envelope {
    ok: bool,
    #[serde(default)]
    error: Option<String>,
}

#[derive(Debug, Deserialize)]
#[serde(bound(deserialize = "T: serde::Deserialize<'de>"))]
struct RecordsResponse<T> {
    ok: bool,
    #[serde(default)]
    error: Option<String>,
    #[serde(default)]
    records: Vec<T>,
}

#[derive(Debug, Deserialize)]
struct AddHomeworkResponse {
    ok: bool,
    #[serde(default)]
    error: Option<String>,
    #[serde(default)]
    new_id: Option<i64>,
}

#[derive(Debug, Deserialize)]
struct StudentReportResponse {
    ok: bool,
    #[serde(default)]
    error: Option<String>,
    #[serde(default)]
    student: Option<StudentSummary>,
    #[serde(default)]
    days_present: u32,
    #[serde(default)]
    rows: Vec<StudentReportRow>,
}

/// HTTP client for the classroom backend API.
#[derive(Debug, Clone)]
pub struct TrackerClient {
    base_url: String,
    client: Client,
}

impl TrackerClient {
    /// Create client from environment variables.
    pub fn from_env() -> Self {
        let base_url = std::env::var("CLASSTRACK_URL").unwrap_or_else(|_| DEFAULT_URL.to_string());
        Self::new(base_url)
    }

    /// Create with an explicit base URL.
    pub fn new(base_url: impl Into<String>) -> Self {
        Self {
            base_url: base_url.into(),
            client: Client::new(),
        }
    }

    fn url(&self, path: &str) -> String {
        format!("{}{}", self.base_url, path)
    }

    /// Parse a successful response body, converting HTTP errors to
    /// ClientError first.
    async fn handle_response<T: DeserializeOwned>(
        &self,
        response: reqwest::Response,
    ) -> Result<T, ClientError> {
        let status = response.status();
        if status.is_success() {
            Ok(response.json().await?)
        } else {
            // Error bodies are envelopes when the backend produced them;
            // fall back to the raw text for anything else.
            let body = response.text().await.unwrap_or_default();
            let message = serde_json::from_str::<Envelope>(&body)
                .ok()
                .and_then(|e| e.error)
                .unwrap_or(body);
            Err(ClientError::Backend(format!("{}: {}", status, message)))
        }
    }

    fn check_envelope(ok: bool, error: Option<String>) -> Result<(), ClientError> {
        if ok {
            Ok(())
        } else {
            Err(ClientError::Backend(
                error.unwrap_or_else(|| "unknown error".to_string()),
            ))
        }
    }

    /// List all subjects.
    pub async fn subjects(&self) -> Result<Vec<Subject>, ClientError> {
        let response = self.client.get(self.url("/subjects")).send().await?;
        self.handle_response(response).await
    }

    /// List the full roster.
    pub async fn students(&self) -> Result<Vec<Student>, ClientError> {
        let response = self.client.get(self.url("/students")).send().await?;
        self.handle_response(response).await
    }

    /// Fetch saved marks for one subject/date, for reconciliation into the
    /// entry form. Students with no saved row come back with status `none`.
    pub async fn attendance_for_store(
        &self,
        subject_id: i64,
        date: NaiveDate,
    ) -> Result<Vec<AttendanceMark>, ClientError> {
        let response = self
            .client
            .get(self.url("/get_attendance_for_store"))
            .query(&[
                ("subject_id", subject_id.to_string()),
                ("date", to_wire_date(date)),
            ])
            .send()
            .await?;
        let body: RecordsResponse<AttendanceMark> = self.handle_response(response).await?;
        Self::check_envelope(body.ok, body.error)?;
        Ok(body.records)
    }

    /// Persist a full day's marks for one subject.
    pub async fn save_attendance(
        &self,
        date: NaiveDate,
        subject_id: i64,
        marks: &[AttendanceMark],
    ) -> Result<(), ClientError> {
        let response = self
            .client
            .post(self.url("/save_attendance"))
            .json(&serde_json::json!({
                "date": to_wire_date(date),
                "subject_id": subject_id,
                "marks": marks,
            }))
            .send()
            .await?;
        let body: Envelope = self.handle_response(response).await?;
        Self::check_envelope(body.ok, body.error)
    }

    /// Run a filtered attendance report.
    pub async fn attendance_report(
        &self,
        query: &FilterQuery,
    ) -> Result<Vec<ReportRow>, ClientError> {
        let response = self
            .client
            .get(self.url("/get_attendance"))
            .query(&query.wire_params())
            .send()
            .await?;
        let body: RecordsResponse<ReportRow> = self.handle_response(response).await?;
        Self::check_envelope(body.ok, body.error)?;
        Ok(body.records)
    }

    /// Fetch an individual student's report by name or roll-number search.
    pub async fn student_report(
        &self,
        query: &str,
        scope: SubjectScope,
        date_filter: &StudentDateFilter,
    ) -> Result<StudentReport, ClientError> {
        let mut params = vec![("query", query.to_string())];
        if let Some(subject_id) = scope.wire_param() {
            params.push(("subject_id", subject_id));
        }
        params.extend(date_filter.wire_params());

        let response = self
            .client
            .get(self.url("/student_report"))
            .query(&params)
            .send()
            .await?;
        let body: StudentReportResponse = self.handle_response(response).await?;
        Self::check_envelope(body.ok, body.error)?;
        Ok(StudentReport {
            student: body.student,
            days_present: body.days_present,
            rows: body.rows,
        })
    }

    /// List homework assignments with the current student's status.
    pub async fn list_homework(&self) -> Result<Vec<HomeworkItem>, ClientError> {
        let response = self.client.get(self.url("/homework")).send().await?;
        let body: RecordsResponse<HomeworkItem> = self.handle_response(response).await?;
        Self::check_envelope(body.ok, body.error)?;
        Ok(body.records)
    }

    /// Post a new homework assignment. Returns the new item's id.
    pub async fn add_homework(&self, input: &HomeworkInput) -> Result<i64, ClientError> {
        let response = self
            .client
            .post(self.url("/homework"))
            .json(input)
            .send()
            .await?;
        let body: AddHomeworkResponse = self.handle_response(response).await?;
        Self::check_envelope(body.ok, body.error)?;
        body.new_id
            .ok_or_else(|| ClientError::Backend("missing new_id in response".to_string()))
    }

    /// Update an existing homework assignment.
    pub async fn update_homework(
        &self,
        homework_id: i64,
        input: &HomeworkInput,
    ) -> Result<(), ClientError> {
        let response = self
            .client
            .post(self.url(&format!("/homework/{}", homework_id)))
            .json(input)
            .send()
            .await?;
        let body: Envelope = self.handle_response(response).await?;
        Self::check_envelope(body.ok, body.error)
    }

    /// Delete a homework assignment.
    pub async fn delete_homework(&self, homework_id: i64) -> Result<(), ClientError> {
        let response = self
            .client
            .delete(self.url(&format!("/homework/{}", homework_id)))
            .send()
            .await?;
        let body: Envelope = self.handle_response(response).await?;
        Self::check_envelope(body.ok, body.error)
    }

    /// Set the completion status of a homework item.
    pub async fn set_homework_status(
        &self,
        homework_id: i64,
        status: HomeworkStatus,
    ) -> Result<(), ClientError> {
        let response = self
            .client
            .post(self.url("/homework_status"))
            .json(&serde_json::json!({
                "homework_id": homework_id,
                "status": status,
            }))
            .send()
            .await?;
        let body: Envelope = self.handle_response(response).await?;
        Self::check_envelope(body.ok, body.error)
    }
}
