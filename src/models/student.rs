use serde::{Deserialize, Serialize};

/// A student on the roster. Immutable once loaded for a session.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct Student {
    pub id: i64,
    pub roll_no: String,
    pub name: String,
}
