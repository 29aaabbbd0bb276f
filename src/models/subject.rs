use serde::{Deserialize, Serialize};

/// A taught subject. Immutable once loaded for a session.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct Subject {
    pub id: i64,
    pub name: String,
}
