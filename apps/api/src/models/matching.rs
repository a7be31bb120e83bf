use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use sqlx::FromRow;
use uuid::Uuid;

/// Reason recorded when a run keeps no job for a résumé.
pub const NO_MATCH_REASON: &str = "No match found";

#[derive(Debug, Clone, Serialize, Deserialize, FromRow)]
pub struct MatchRow {
    pub id: Uuid,
    pub resume_id: Uuid,
    pub job_id: Uuid,
    pub score: i32,
    pub matched_at: DateTime<Utc>,
}

#[derive(Debug, Clone, Serialize, Deserialize, FromRow)]
pub struct WaitlistRow {
    pub id: Uuid,
    pub resume_id: Uuid,
    pub reason: String,
    pub created_at: DateTime<Utc>,
}

/// A match joined with its job, as shown to the job's recruiter.
#[derive(Debug, Clone, Serialize, Deserialize, FromRow)]
pub struct MatchSummary {
    pub score: i32,
    pub resume_id: Uuid,
    pub job_id: Uuid,
    pub title: String,
    pub location: Option<String>,
    pub matched_at: DateTime<Utc>,
}

/// A score about to be persisted for one job of the résumé being run.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct NewMatch {
    pub job_id: Uuid,
    pub score: i32,
}
