use async_trait::async_trait;
use sqlx::PgPool;
use tracing::debug;
use uuid::Uuid;

use crate::errors::AppError;
use crate::models::document::{JobRow, ResumeRow};
use crate::models::matching::{MatchRow, MatchSummary, NewMatch, WaitlistRow};
use crate::store::{DocumentStore, MatchStore, WaitlistStore};

/// PostgreSQL-backed implementation of every store trait.
#[derive(Clone)]
pub struct PgStore {
    pool: PgPool,
}

impl PgStore {
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }
}

const INSERT_MATCH_SQL: &str =
    "INSERT INTO matches (resume_id, job_id, score) VALUES ($1, $2, $3) RETURNING *";

#[async_trait]
impl DocumentStore for PgStore {
    async fn get_resume(&self, id: Uuid) -> Result<Option<ResumeRow>, AppError> {
        Ok(
            sqlx::query_as::<_, ResumeRow>("SELECT * FROM resumes WHERE id = $1")
                .bind(id)
                .fetch_optional(&self.pool)
                .await?,
        )
    }

    async fn list_jobs(&self) -> Result<Vec<JobRow>, AppError> {
        Ok(
            sqlx::query_as::<_, JobRow>("SELECT * FROM jobs ORDER BY created_at ASC, id ASC")
                .fetch_all(&self.pool)
                .await?,
        )
    }
}

#[async_trait]
impl MatchStore for PgStore {
    async fn delete_matches(&self, resume_id: Uuid) -> Result<u64, AppError> {
        let result = sqlx::query("DELETE FROM matches WHERE resume_id = $1")
            .bind(resume_id)
            .execute(&self.pool)
            .await?;
        Ok(result.rows_affected())
    }

    async fn insert_match(
        &self,
        resume_id: Uuid,
        job_id: Uuid,
        score: i32,
    ) -> Result<MatchRow, AppError> {
        Ok(sqlx::query_as::<_, MatchRow>(INSERT_MATCH_SQL)
            .bind(resume_id)
            .bind(job_id)
            .bind(score)
            .fetch_one(&self.pool)
            .await?)
    }

    /// Delete and inserts share one transaction: readers see the previous
    /// generation or the new one, never a mix.
    async fn replace_matches(
        &self,
        resume_id: Uuid,
        matches: &[NewMatch],
    ) -> Result<Vec<MatchRow>, AppError> {
        let mut tx = self.pool.begin().await?;

        let deleted = sqlx::query("DELETE FROM matches WHERE resume_id = $1")
            .bind(resume_id)
            .execute(&mut *tx)
            .await?
            .rows_affected();

        let mut rows = Vec::with_capacity(matches.len());
        for m in matches {
            let row = sqlx::query_as::<_, MatchRow>(INSERT_MATCH_SQL)
                .bind(resume_id)
                .bind(m.job_id)
                .bind(m.score)
                .fetch_one(&mut *tx)
                .await?;
            rows.push(row);
        }

        tx.commit().await?;
        debug!(
            "Replaced {deleted} matches with {} for resume {resume_id}",
            rows.len()
        );
        Ok(rows)
    }

    async fn matches_by_owner(&self, recruiter_id: Uuid) -> Result<Vec<MatchSummary>, AppError> {
        Ok(sqlx::query_as::<_, MatchSummary>(
            r#"
            SELECT
                m.score,
                r.id AS resume_id,
                j.id AS job_id,
                j.title,
                j.location,
                m.matched_at
            FROM matches m
            JOIN resumes r ON m.resume_id = r.id
            JOIN jobs j ON m.job_id = j.id
            WHERE j.recruiter_id = $1
            ORDER BY m.matched_at DESC, m.id ASC
            "#,
        )
        .bind(recruiter_id)
        .fetch_all(&self.pool)
        .await?)
    }
}

#[async_trait]
impl WaitlistStore for PgStore {
    async fn find_waitlist(&self, resume_id: Uuid) -> Result<Option<WaitlistRow>, AppError> {
        Ok(
            sqlx::query_as::<_, WaitlistRow>("SELECT * FROM waitlist WHERE resume_id = $1")
                .bind(resume_id)
                .fetch_optional(&self.pool)
                .await?,
        )
    }

    async fn insert_waitlist(
        &self,
        resume_id: Uuid,
        reason: &str,
    ) -> Result<WaitlistRow, AppError> {
        Ok(sqlx::query_as::<_, WaitlistRow>(
            "INSERT INTO waitlist (resume_id, reason) VALUES ($1, $2) RETURNING *",
        )
        .bind(resume_id)
        .bind(reason)
        .fetch_one(&self.pool)
        .await?)
    }
}
