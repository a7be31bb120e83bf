use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use sqlx::FromRow;
use uuid::Uuid;

#[derive(Debug, Clone, Serialize, Deserialize, FromRow)]
pub struct ResumeRow {
    pub id: Uuid,
    pub user_id: Uuid,
    pub filename: String,
    pub text: Option<String>,
    pub created_at: DateTime<Utc>,
}

#[derive(Debug, Clone, Serialize, Deserialize, FromRow)]
pub struct JobRow {
    pub id: Uuid,
    pub recruiter_id: Uuid,
    pub title: String,
    pub description: Option<String>,
    pub requirements: Option<String>,
    pub location: Option<String>,
    pub created_at: DateTime<Utc>,
}

impl JobRow {
    /// Text a résumé is scored against: requirements then description, space-joined.
    pub fn scoring_text(&self) -> String {
        format!(
            "{} {}",
            self.requirements.as_deref().unwrap_or(""),
            self.description.as_deref().unwrap_or("")
        )
    }
}
