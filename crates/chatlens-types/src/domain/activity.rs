use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// Category of a context-affecting event shown in the recent-activity list
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ActivityKind {
    Project,
    Model,
    Insight,
    Job,
}

/// One entry in the bounded recent-activity log.
///
/// Entries are deduplicated by (kind, name) against the most recent few and
/// evicted oldest-first once the log is full; the store owns both policies.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct RecentActivity {
    pub id: String,

    #[serde(rename = "type")]
    pub kind: ActivityKind,

    pub name: String,
    pub timestamp: DateTime<Utc>,
}

impl RecentActivity {
    pub fn new(kind: ActivityKind, id: impl Into<String>, name: impl Into<String>) -> Self {
        Self {
            id: id.into(),
            kind,
            name: name.into(),
            timestamp: Utc::now(),
        }
    }
}
