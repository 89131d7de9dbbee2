use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

/// Lifecycle states of a server-side background job
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum JobStatus {
    Pending,
    Running,
    Completed,
    Failed,
    Cancelled,
}

impl JobStatus {
    /// Terminal states: the server will never transition out of these
    pub fn is_terminal(&self) -> bool {
        matches!(
            self,
            JobStatus::Completed | JobStatus::Failed | JobStatus::Cancelled
        )
    }

    /// Active = still worth polling (pending or running)
    pub fn is_active(&self) -> bool {
        !self.is_terminal()
    }
}

/// A background job as reported by `GET /api/v1/jobs/{id}`.
///
/// Server-owned; the client polls and mirrors this verbatim.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Job {
    pub job_id: Uuid,
    pub job_type: String,
    pub status: JobStatus,

    /// Completion fraction, clamped to 0.0..=1.0 by the server
    pub progress: f64,

    /// Human-readable stage line (e.g. "modeling: 12/20 models")
    #[serde(default)]
    pub message: String,

    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub error: Option<String>,
}
