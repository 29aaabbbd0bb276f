use thiserror::Error;

/// Client-side validation failures, raised before any network call.
///
/// These are reported inline near the offending input; they never reach
/// the backend.
#[derive(Debug, Clone, Error, PartialEq, Eq)]
pub enum ValidationError {
    #[error("missing required parameter: {0}")]
    MissingParameter(&'static str),

    #[error("invalid input: {0}")]
    InvalidInput(String),
}
