//! Storage seams for the match engine.
//!
//! The engine only sees these traits; `postgres::PgStore` is the production
//! implementation and tests use in-memory stand-ins.

use async_trait::async_trait;
use uuid::Uuid;

use crate::errors::AppError;
use crate::models::document::{JobRow, ResumeRow};
use crate::models::matching::{MatchRow, MatchSummary, NewMatch, WaitlistRow};

pub mod postgres;

#[async_trait]
pub trait DocumentStore: Send + Sync {
    async fn get_resume(&self, id: Uuid) -> Result<Option<ResumeRow>, AppError>;

    /// Every job, in a stable load order.
    async fn list_jobs(&self) -> Result<Vec<JobRow>, AppError>;
}

#[async_trait]
pub trait MatchStore: Send + Sync {
    /// Returns the number of rows removed.
    async fn delete_matches(&self, resume_id: Uuid) -> Result<u64, AppError>;

    async fn insert_match(
        &self,
        resume_id: Uuid,
        job_id: Uuid,
        score: i32,
    ) -> Result<MatchRow, AppError>;

    /// Drops every match of `resume_id` and records `matches` in their place.
    ///
    /// The default is delete-then-insert with no atomicity; stores with
    /// transactions should override it.
    async fn replace_matches(
        &self,
        resume_id: Uuid,
        matches: &[NewMatch],
    ) -> Result<Vec<MatchRow>, AppError> {
        self.delete_matches(resume_id).await?;
        let mut rows = Vec::with_capacity(matches.len());
        for m in matches {
            rows.push(self.insert_match(resume_id, m.job_id, m.score).await?);
        }
        Ok(rows)
    }

    /// Matches on jobs owned by `recruiter_id`, newest first.
    async fn matches_by_owner(&self, recruiter_id: Uuid) -> Result<Vec<MatchSummary>, AppError>;
}

#[async_trait]
pub trait WaitlistStore: Send + Sync {
    async fn find_waitlist(&self, resume_id: Uuid) -> Result<Option<WaitlistRow>, AppError>;

    async fn insert_waitlist(&self, resume_id: Uuid, reason: &str)
        -> Result<WaitlistRow, AppError>;
}
