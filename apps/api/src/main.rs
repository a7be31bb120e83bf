mod config;
mod db;
mod errors;
mod matching;
mod models;
mod routes;
mod state;
mod store;
mod synonym_client;

#[cfg(test)]
mod test_support;

use anyhow::Result;
use std::net::SocketAddr;
use tower_http::{cors::CorsLayer, trace::TraceLayer};
use tracing::info;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt, EnvFilter};

use std::sync::Arc;

use crate::config::Config;
use crate::db::create_pool;
use crate::matching::engine::MatchEngine;
use crate::matching::scorer::SimilarityScorer;
use crate::matching::synonyms::{SynonymCache, SynonymExpander};
use crate::matching::weights::KeywordWeights;
use crate::routes::build_router;
use crate::state::AppState;
use crate::store::postgres::PgStore;
use crate::synonym_client::DatamuseClient;

#[tokio::main]
async fn main() -> Result<()> {
    // Load configuration first (fails on missing required env vars)
    let config = Config::from_env()?;

    // Initialize structured logging
    tracing_subscriber::registry()
        .with(EnvFilter::try_from_default_env().unwrap_or_else(|_| {
            EnvFilter::new(format!("{}={}", env!("CARGO_PKG_NAME"), &config.rust_log))
        }))
        .with(tracing_subscriber::fmt::layer())
        .init();

    info!("Starting matcher v{}", env!("CARGO_PKG_VERSION"));

    // Initialize PostgreSQL
    let db = create_pool(&config.database_url).await?;
    let store = Arc::new(PgStore::new(db));

    // Keyword weights: built-in table unless a file is configured
    let weights = match &config.keyword_weights_path {
        Some(path) => {
            let weights = KeywordWeights::from_file(path)?;
            info!(
                "Loaded {} keyword weights from {}",
                weights.len(),
                path.display()
            );
            weights
        }
        None => KeywordWeights::default(),
    };

    // Synonym lookups share one cache for the life of the process
    let synonyms = DatamuseClient::new(config.synonym_api_url.clone(), config.synonym_timeout)?;
    let cache = SynonymCache::new(config.synonym_cache_capacity);
    info!(
        "Synonym client initialized ({}, timeout {:?}, cache capacity {:?})",
        synonyms.endpoint(),
        config.synonym_timeout,
        config.synonym_cache_capacity
    );
    let expander = SynonymExpander::new(
        Arc::new(synonyms),
        Arc::new(cache),
        config.synonym_timeout,
    );

    let scorer = SimilarityScorer::new(Arc::new(expander), Arc::new(weights));
    let engine = MatchEngine::new(store.clone(), store.clone(), store, scorer);

    // Build app state
    let state = AppState {
        engine: Arc::new(engine),
        config: config.clone(),
    };

    // Build router
    let app = build_router(state)
        .layer(TraceLayer::new_for_http())
        .layer(CorsLayer::permissive());

    let addr: SocketAddr = format!("0.0.0.0:{}", config.port).parse()?;
    info!("Listening on {addr}");

    let listener = tokio::net::TcpListener::bind(addr).await?;
    axum::serve(listener, app).await?;

    Ok(())
}
