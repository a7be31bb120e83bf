use std::collections::HashMap;

/// Term → occurrence count for one document. Absent terms count as zero.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct TermVector {
    counts: HashMap<String, u32>,
}

impl TermVector {
    pub fn count(&self, term: &str) -> u32 {
        self.counts.get(term).copied().unwrap_or(0)
    }

    pub fn terms(&self) -> impl Iterator<Item = &str> + '_ {
        self.counts.keys().map(String::as_str)
    }

    #[allow(dead_code)]
    pub fn len(&self) -> usize {
        self.counts.len()
    }

    pub fn is_empty(&self) -> bool {
        self.counts.is_empty()
    }
}

/// Counts occurrences of each token.
pub fn build_tf<S: AsRef<str>>(tokens: &[S]) -> TermVector {
    let mut counts = HashMap::new();
    for token in tokens {
        *counts.entry(token.as_ref().to_string()).or_insert(0) += 1;
    }
    TermVector { counts }
}
