//! Weighted cosine similarity between a résumé and a job posting.
//!
//! Both texts go through the same pipeline: tokenize, expand with synonyms,
//! count. Each term's count is multiplied by its keyword weight on both sides
//! before the dot product and magnitudes are taken.

use std::collections::BTreeSet;
use std::sync::Arc;

use crate::matching::synonyms::SynonymExpander;
use crate::matching::term_frequency::{build_tf, TermVector};
use crate::matching::tokenizer::tokenize;
use crate::matching::weights::KeywordWeights;

pub struct SimilarityScorer {
    expander: Arc<SynonymExpander>,
    weights: Arc<KeywordWeights>,
}

impl SimilarityScorer {
    pub fn new(expander: Arc<SynonymExpander>, weights: Arc<KeywordWeights>) -> Self {
        Self { expander, weights }
    }

    pub fn expander(&self) -> &SynonymExpander {
        &self.expander
    }

    /// Expanded term vector for one document. Blank text yields an empty
    /// vector without touching the synonym source.
    pub async fn vectorize(&self, text: &str) -> TermVector {
        let tokens = tokenize(text);
        if tokens.is_empty() {
            return TermVector::default();
        }
        let expanded = self.expander.expand(&tokens).await;
        build_tf(&expanded)
    }

    pub fn similarity(&self, resume: &TermVector, job: &TermVector) -> f64 {
        weighted_cosine(resume, job, &self.weights)
    }

    /// Similarity in `[0, 1]`; 0 when either text is empty.
    ///
    /// One-shot form of the engine's per-run path, which calls [`Self::vectorize`]
    /// once for the résumé and [`Self::similarity`] per job instead.
    #[allow(dead_code)]
    pub async fn score(&self, resume_text: &str, job_text: &str) -> f64 {
        if resume_text.trim().is_empty() || job_text.trim().is_empty() {
            return 0.0;
        }
        let resume = self.vectorize(resume_text).await;
        let job = self.vectorize(job_text).await;
        self.similarity(&resume, &job)
    }
}

/// Cosine similarity over weight-scaled counts.
///
/// The term union is walked in sorted order so the result does not depend on
/// argument order. A zero magnitude on either side floors the denominator to 1.
pub fn weighted_cosine(a: &TermVector, b: &TermVector, weights: &KeywordWeights) -> f64 {
    let union: BTreeSet<&str> = a.terms().chain(b.terms()).collect();

    let mut numerator = 0.0_f64;
    let mut a_mag = 0.0_f64;
    let mut b_mag = 0.0_f64;

    for term in union {
        let weight = f64::from(weights.weight(term));
        let aw = f64::from(a.count(term)) * weight;
        let bw = f64::from(b.count(term)) * weight;

        numerator += aw * bw;
        a_mag += aw * aw;
        b_mag += bw * bw;
    }

    let denominator = a_mag.sqrt() * b_mag.sqrt();
    let denominator = if denominator == 0.0 { 1.0 } else { denominator };

    (numerator / denominator).clamp(0.0, 1.0)
}

/// Integer percentage of a similarity: `round(similarity × 100)` with ties
/// rounded away from zero, clamped to 0–100.
pub fn to_percent(similarity: f64) -> i32 {
    (similarity * 100.0).round().clamp(0.0, 100.0) as i32
}
