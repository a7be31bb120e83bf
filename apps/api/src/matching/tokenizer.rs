//! Lowercase word tokenizer used on both sides of a match.
//!
//! Everything outside `[a-z0-9]` (after lowercasing) becomes a separator, so
//! "Node.js" yields `node`, `js`. No stemming and no stop-word removal.

/// Splits `text` into normalized word tokens. Empty or blank input yields no tokens.
pub fn tokenize(text: &str) -> Vec<String> {
    let normalized: String = text
        .to_lowercase()
        .chars()
        .map(|c| {
            if c.is_ascii_lowercase() || c.is_ascii_digit() || c.is_whitespace() {
                c
            } else {
                ' '
            }
        })
        .collect();

    normalized.split_whitespace().map(str::to_string).collect()
}
