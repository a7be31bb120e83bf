//! Match engine — re-scores one résumé against every job and records the outcome.
//!
//! A run scores all jobs first, then swaps the résumé's match rows in a single
//! `replace_matches` call, so only the latest generation of results survives.
//! Runs for the same résumé are serialised; a waitlist entry is written once
//! for a résumé whose run keeps nothing and is never removed afterwards.

use std::sync::Arc;

use serde::Serialize;
use tracing::info;
use uuid::Uuid;

use crate::errors::AppError;
use crate::matching::locks::KeyedLocks;
use crate::matching::scorer::{to_percent, SimilarityScorer};
use crate::models::document::JobRow;
use crate::models::matching::{MatchSummary, NewMatch, NO_MATCH_REASON};
use crate::store::{DocumentStore, MatchStore, WaitlistStore};

/// A job kept by a run, with its 1–100 score.
#[derive(Debug, Clone, Serialize)]
pub struct RankedMatch {
    pub job: JobRow,
    pub score: i32,
}

/// Result of one run: a ranking, or the "nothing matched" signal.
#[derive(Debug, Clone, Serialize)]
#[serde(tag = "status", rename_all = "snake_case")]
pub enum MatchOutcome {
    Matched {
        resume_id: Uuid,
        results: Vec<RankedMatch>,
    },
    NoMatch {
        resume_id: Uuid,
        reason: String,
    },
}

impl MatchOutcome {
    #[allow(dead_code)]
    pub fn results(&self) -> &[RankedMatch] {
        match self {
            MatchOutcome::Matched { results, .. } => results,
            MatchOutcome::NoMatch { .. } => &[],
        }
    }
}

pub struct MatchEngine {
    documents: Arc<dyn DocumentStore>,
    matches: Arc<dyn MatchStore>,
    waitlist: Arc<dyn WaitlistStore>,
    scorer: SimilarityScorer,
    runs: KeyedLocks,
}

impl MatchEngine {
    pub fn new(
        documents: Arc<dyn DocumentStore>,
        matches: Arc<dyn MatchStore>,
        waitlist: Arc<dyn WaitlistStore>,
        scorer: SimilarityScorer,
    ) -> Self {
        Self {
            documents,
            matches,
            waitlist,
            scorer,
            runs: KeyedLocks::default(),
        }
    }

    pub fn scorer(&self) -> &SimilarityScorer {
        &self.scorer
    }

    /// Scores `resume_id` against every job, persists the non-zero scores and
    /// returns them best first. Equal scores keep job load order.
    pub async fn run_match(&self, resume_id: Uuid) -> Result<MatchOutcome, AppError> {
        let _run = self.runs.acquire(resume_id).await;

        let resume = self
            .documents
            .get_resume(resume_id)
            .await?
            .ok_or_else(|| AppError::NotFound(format!("Resume {resume_id} not found")))?;

        let jobs = self.documents.list_jobs().await?;
        let job_count = jobs.len();
        info!("Matching resume {resume_id} against {job_count} jobs");

        // The résumé side is expanded once and reused for every job.
        let resume_vector = self
            .scorer
            .vectorize(resume.text.as_deref().unwrap_or(""))
            .await;

        let mut ranked = Vec::new();
        if !resume_vector.is_empty() {
            for job in jobs {
                let job_vector = self.scorer.vectorize(&job.scoring_text()).await;
                let score = to_percent(self.scorer.similarity(&resume_vector, &job_vector));
                if score > 0 {
                    ranked.push(RankedMatch { job, score });
                }
            }
        }

        let new_matches: Vec<NewMatch> = ranked
            .iter()
            .map(|r| NewMatch {
                job_id: r.job.id,
                score: r.score,
            })
            .collect();
        self.matches.replace_matches(resume_id, &new_matches).await?;

        if ranked.is_empty() {
            let reason = match self.waitlist.find_waitlist(resume_id).await? {
                Some(existing) => existing.reason,
                None => {
                    let entry = self
                        .waitlist
                        .insert_waitlist(resume_id, NO_MATCH_REASON)
                        .await?;
                    info!("Resume {resume_id} matched no jobs; added to waitlist");
                    entry.reason
                }
            };
            return Ok(MatchOutcome::NoMatch { resume_id, reason });
        }

        // Stable: ties stay in job load order.
        ranked.sort_by(|a, b| b.score.cmp(&a.score));

        info!(
            "Resume {resume_id}: kept {} of {job_count} jobs (top score {})",
            ranked.len(),
            ranked[0].score
        );

        Ok(MatchOutcome::Matched {
            resume_id,
            results: ranked,
        })
    }

    /// Matches on jobs owned by `recruiter_id`, newest first.
    pub async fn history(&self, recruiter_id: Uuid) -> Result<Vec<MatchSummary>, AppError> {
        self.matches.matches_by_owner(recruiter_id).await
    }
}
