//! Keyword weight table: importance multipliers for domain terms.
//!
//! Lookups are exact on pre-lowercased tokens; any term not in the table weighs 1.

use std::collections::HashMap;
use std::path::Path;

use anyhow::{bail, Context, Result};

pub const DEFAULT_WEIGHT: u32 = 1;

const BUILTIN_WEIGHTS: &[(&str, u32)] = &[
    ("javascript", 3),
    ("node", 3),
    ("sql", 3),
    ("react", 3),
    ("api", 2),
    ("backend", 2),
    ("frontend", 2),
    ("internship", 2),
];

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct KeywordWeights {
    table: HashMap<String, u32>,
}

impl Default for KeywordWeights {
    fn default() -> Self {
        Self {
            table: BUILTIN_WEIGHTS
                .iter()
                .map(|(term, weight)| (term.to_string(), *weight))
                .collect(),
        }
    }
}

impl KeywordWeights {
    /// Builds a table from arbitrary entries. Keys are lowercased; weights below 1 are rejected.
    pub fn from_entries<I, S>(entries: I) -> Result<Self>
    where
        I: IntoIterator<Item = (S, u32)>,
        S: AsRef<str>,
    {
        let mut table = HashMap::new();
        for (term, weight) in entries {
            let term = term.as_ref().trim().to_lowercase();
            if term.is_empty() {
                bail!("keyword weight table contains an empty term");
            }
            if weight < 1 {
                bail!("keyword '{term}' has weight {weight}; weights must be at least 1");
            }
            table.insert(term, weight);
        }
        Ok(Self { table })
    }

    /// Loads a JSON object of `{"term": weight}` pairs.
    pub fn from_file(path: &Path) -> Result<Self> {
        let raw = std::fs::read_to_string(path)
            .with_context(|| format!("Failed to read keyword weights from {}", path.display()))?;
        let entries: HashMap<String, u32> = serde_json::from_str(&raw)
            .with_context(|| format!("Invalid keyword weights JSON in {}", path.display()))?;
        Self::from_entries(entries)
    }

    pub fn weight(&self, term: &str) -> u32 {
        self.table.get(term).copied().unwrap_or(DEFAULT_WEIGHT)
    }

    pub fn len(&self) -> usize {
        self.table.len()
    }
}
