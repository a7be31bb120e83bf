// Résumé-to-job relevance engine.
// Pipeline: tokenizer → synonym expansion → term frequency → weighted cosine,
// orchestrated per résumé by `engine::MatchEngine`.

pub mod engine;
pub mod handlers;
pub mod locks;
pub mod scorer;
pub mod synonyms;
pub mod term_frequency;
pub mod tokenizer;
pub mod weights;
