//! In-memory stores and a scripted synonym source for unit tests.

use std::collections::{HashMap, HashSet};
use std::sync::atomic::{AtomicBool, AtomicI64, Ordering};
use std::sync::{Arc, Mutex};
use std::time::Duration;

use async_trait::async_trait;
use chrono::{DateTime, TimeZone, Utc};
use uuid::Uuid;

use crate::config::Config;
use crate::errors::AppError;
use crate::matching::engine::MatchEngine;
use crate::matching::scorer::SimilarityScorer;
use crate::matching::synonyms::{SynonymCache, SynonymExpander, SynonymSource};
use crate::matching::weights::KeywordWeights;
use crate::models::document::{JobRow, ResumeRow};
use crate::models::matching::{MatchRow, MatchSummary, WaitlistRow};
use crate::store::{DocumentStore, MatchStore, WaitlistStore};
use crate::synonym_client::SynonymError;

pub fn test_config() -> Config {
    Config {
        database_url: "postgres://localhost/matcher_test".to_string(),
        port: 0,
        rust_log: "debug".to_string(),
        synonym_api_url: "http://synonyms.test/words".to_string(),
        synonym_timeout: Duration::from_secs(5),
        synonym_cache_capacity: std::num::NonZeroUsize::new(1000),
        keyword_weights_path: None,
    }
}

pub fn tokens(words: &[&str]) -> Vec<String> {
    words.iter().map(|w| w.to_string()).collect()
}

// ────────────────────────────────────────────────────────────────────────────
// Synonym source
// ────────────────────────────────────────────────────────────────────────────

/// Answers from a fixed table (unknown terms get no synonyms) and counts calls.
#[derive(Default)]
pub struct CountingSynonyms {
    table: HashMap<String, Vec<String>>,
    failing: HashSet<String>,
    delay: Option<Duration>,
    calls: Mutex<HashMap<String, usize>>,
}

impl CountingSynonyms {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with(mut self, term: &str, words: &[&str]) -> Self {
        self.table.insert(term.to_string(), tokens(words));
        self
    }

    pub fn failing(mut self, term: &str) -> Self {
        self.failing.insert(term.to_string());
        self
    }

    pub fn delayed(mut self, delay: Duration) -> Self {
        self.delay = Some(delay);
        self
    }

    pub fn calls_for(&self, term: &str) -> usize {
        self.calls.lock().unwrap().get(term).copied().unwrap_or(0)
    }

    pub fn total_calls(&self) -> usize {
        self.calls.lock().unwrap().values().sum()
    }
}

#[async_trait]
impl SynonymSource for CountingSynonyms {
    async fn related_words(&self, term: &str) -> Result<Vec<String>, SynonymError> {
        *self
            .calls
            .lock()
            .unwrap()
            .entry(term.to_string())
            .or_insert(0) += 1;

        if let Some(delay) = self.delay {
            tokio::time::sleep(delay).await;
        }

        if self.failing.contains(term) {
            return Err(SynonymError::Api {
                status: 503,
                message: "service unavailable".to_string(),
            });
        }
        Ok(self.table.get(term).cloned().unwrap_or_default())
    }
}

pub fn scorer_with(source: CountingSynonyms) -> (SimilarityScorer, Arc<CountingSynonyms>) {
    let source = Arc::new(source);
    let expander = SynonymExpander::new(
        source.clone(),
        Arc::new(SynonymCache::unbounded()),
        Duration::from_secs(5),
    );
    let scorer = SimilarityScorer::new(Arc::new(expander), Arc::new(KeywordWeights::default()));
    (scorer, source)
}

pub fn engine_with(
    store: Arc<MemoryStore>,
    source: CountingSynonyms,
) -> (MatchEngine, Arc<CountingSynonyms>) {
    let (scorer, source) = scorer_with(source);
    let engine = MatchEngine::new(store.clone(), store.clone(), store, scorer);
    (engine, source)
}

// ────────────────────────────────────────────────────────────────────────────
// Store
// ────────────────────────────────────────────────────────────────────────────

/// Every store trait over plain vectors. Timestamps come from a private clock
/// that ticks one second per write, so ordering is deterministic.
#[derive(Default)]
pub struct MemoryStore {
    resumes: Mutex<Vec<ResumeRow>>,
    jobs: Mutex<Vec<JobRow>>,
    matches: Mutex<Vec<MatchRow>>,
    waitlist: Mutex<Vec<WaitlistRow>>,
    clock: AtomicI64,
    fail_writes: AtomicBool,
}

impl MemoryStore {
    pub fn new() -> Self {
        Self::default()
    }

    fn tick(&self) -> DateTime<Utc> {
        let seconds = self.clock.fetch_add(1, Ordering::SeqCst);
        Utc.with_ymd_and_hms(2026, 1, 1, 0, 0, 0).unwrap() + chrono::Duration::seconds(seconds)
    }

    fn check_writable(&self) -> Result<(), AppError> {
        if self.fail_writes.load(Ordering::SeqCst) {
            return Err(AppError::Internal(anyhow::anyhow!("storage unavailable")));
        }
        Ok(())
    }

    pub fn fail_writes(&self, fail: bool) {
        self.fail_writes.store(fail, Ordering::SeqCst);
    }

    pub fn add_resume(&self, text: &str) -> Uuid {
        let id = Uuid::new_v4();
        let created_at = self.tick();
        self.resumes.lock().unwrap().push(ResumeRow {
            id,
            user_id: Uuid::new_v4(),
            filename: format!("{id}.pdf"),
            text: Some(text.to_string()),
            created_at,
        });
        id
    }

    pub fn set_resume_text(&self, id: Uuid, text: &str) {
        let mut resumes = self.resumes.lock().unwrap();
        let resume = resumes.iter_mut().find(|r| r.id == id).unwrap();
        resume.text = Some(text.to_string());
    }

    pub fn add_job(&self, recruiter_id: Uuid, title: &str, requirements: &str, description: &str) -> Uuid {
        let id = Uuid::new_v4();
        let created_at = self.tick();
        self.jobs.lock().unwrap().push(JobRow {
            id,
            recruiter_id,
            title: title.to_string(),
            description: Some(description.to_string()),
            requirements: Some(requirements.to_string()),
            location: Some("Remote".to_string()),
            created_at,
        });
        id
    }

    pub fn matches_for(&self, resume_id: Uuid) -> Vec<MatchRow> {
        self.matches
            .lock()
            .unwrap()
            .iter()
            .filter(|m| m.resume_id == resume_id)
            .cloned()
            .collect()
    }

    pub fn all_matches(&self) -> Vec<MatchRow> {
        self.matches.lock().unwrap().clone()
    }

    pub fn waitlist_for(&self, resume_id: Uuid) -> Vec<WaitlistRow> {
        self.waitlist
            .lock()
            .unwrap()
            .iter()
            .filter(|w| w.resume_id == resume_id)
            .cloned()
            .collect()
    }
}

#[async_trait]
impl DocumentStore for MemoryStore {
    async fn get_resume(&self, id: Uuid) -> Result<Option<ResumeRow>, AppError> {
        Ok(self.resumes.lock().unwrap().iter().find(|r| r.id == id).cloned())
    }

    async fn list_jobs(&self) -> Result<Vec<JobRow>, AppError> {
        Ok(self.jobs.lock().unwrap().clone())
    }
}

#[async_trait]
impl MatchStore for MemoryStore {
    async fn delete_matches(&self, resume_id: Uuid) -> Result<u64, AppError> {
        self.check_writable()?;
        let mut matches = self.matches.lock().unwrap();
        let before = matches.len();
        matches.retain(|m| m.resume_id != resume_id);
        Ok((before - matches.len()) as u64)
    }

    async fn insert_match(
        &self,
        resume_id: Uuid,
        job_id: Uuid,
        score: i32,
    ) -> Result<MatchRow, AppError> {
        self.check_writable()?;
        let row = MatchRow {
            id: Uuid::new_v4(),
            resume_id,
            job_id,
            score,
            matched_at: self.tick(),
        };
        self.matches.lock().unwrap().push(row.clone());
        Ok(row)
    }

    async fn matches_by_owner(&self, recruiter_id: Uuid) -> Result<Vec<MatchSummary>, AppError> {
        let jobs = self.jobs.lock().unwrap().clone();
        let resumes = self.resumes.lock().unwrap();
        let mut summaries: Vec<MatchSummary> = self
            .matches
            .lock()
            .unwrap()
            .iter()
            .filter(|m| resumes.iter().any(|r| r.id == m.resume_id))
            .filter_map(|m| {
                let job = jobs
                    .iter()
                    .find(|j| j.id == m.job_id && j.recruiter_id == recruiter_id)?;
                Some(MatchSummary {
                    score: m.score,
                    resume_id: m.resume_id,
                    job_id: job.id,
                    title: job.title.clone(),
                    location: job.location.clone(),
                    matched_at: m.matched_at,
                })
            })
            .collect();
        summaries.sort_by(|a, b| b.matched_at.cmp(&a.matched_at));
        Ok(summaries)
    }
}

#[async_trait]
impl WaitlistStore for MemoryStore {
    async fn find_waitlist(&self, resume_id: Uuid) -> Result<Option<WaitlistRow>, AppError> {
        Ok(self
            .waitlist
            .lock()
            .unwrap()
            .iter()
            .find(|w| w.resume_id == resume_id)
            .cloned())
    }

    async fn insert_waitlist(
        &self,
        resume_id: Uuid,
        reason: &str,
    ) -> Result<WaitlistRow, AppError> {
        self.check_writable()?;
        let row = WaitlistRow {
            id: Uuid::new_v4(),
            resume_id,
            reason: reason.to_string(),
            created_at: self.tick(),
        };
        self.waitlist.lock().unwrap().push(row.clone());
        Ok(row)
    }
}
