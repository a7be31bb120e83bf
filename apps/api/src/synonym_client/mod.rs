/// Synonym client — related-word lookups against a Datamuse-compatible endpoint.
///
/// The endpoint is queried as `GET <endpoint>?ml=<term>` and answers with a JSON
/// array of candidates, each carrying a `word` field, best match first.
/// This client never retries: the expander caches failures as "no synonyms".
use std::time::Duration;

use async_trait::async_trait;
use reqwest::Client;
use serde::Deserialize;
use thiserror::Error;
use tracing::debug;

use crate::matching::synonyms::SynonymSource;

#[derive(Debug, Error)]
pub enum SynonymError {
    #[error("HTTP error: {0}")]
    Http(#[from] reqwest::Error),

    #[error("API error (status {status}): {message}")]
    Api { status: u16, message: String },

    #[error("JSON parse error: {0}")]
    Parse(#[from] serde_json::Error),

    #[error("Lookup timed out after {0:?}")]
    Timeout(Duration),
}

#[derive(Debug, Deserialize)]
struct Candidate {
    word: String,
}

/// HTTP-backed [`SynonymSource`].
#[derive(Clone)]
pub struct DatamuseClient {
    client: Client,
    endpoint: String,
    timeout: Duration,
}

impl DatamuseClient {
    pub fn new(endpoint: String, timeout: Duration) -> Result<Self, SynonymError> {
        Ok(Self {
            client: Client::builder().timeout(timeout).build()?,
            endpoint,
            timeout,
        })
    }

    pub fn endpoint(&self) -> &str {
        &self.endpoint
    }
}

#[async_trait]
impl SynonymSource for DatamuseClient {
    async fn related_words(&self, term: &str) -> Result<Vec<String>, SynonymError> {
        let response = self
            .client
            .get(&self.endpoint)
            .query(&[("ml", term)])
            .send()
            .await
            .map_err(|e| {
                if e.is_timeout() {
                    SynonymError::Timeout(self.timeout)
                } else {
                    SynonymError::Http(e)
                }
            })?;

        let status = response.status();
        let body = response.text().await?;

        if !status.is_success() {
            return Err(SynonymError::Api {
                status: status.as_u16(),
                message: body,
            });
        }

        let words = parse_related_words(&body)?;
        debug!("Synonym lookup '{term}' returned {} candidates", words.len());
        Ok(words)
    }
}

/// Extracts candidate words, in response order, from a lookup response body.
fn parse_related_words(body: &str) -> Result<Vec<String>, SynonymError> {
    let candidates: Vec<Candidate> = serde_json::from_str(body)?;
    Ok(candidates.into_iter().map(|c| c.word).collect())
}
