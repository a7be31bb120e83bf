use axum::{extract::State, Json};
use serde_json::{json, Value};

use crate::state::AppState;

/// GET /health
/// Returns service status, version and synonym cache usage.
pub async fn health_handler(State(state): State<AppState>) -> Json<Value> {
    let cached_terms = state.engine.scorer().expander().cache().len().await;
    Json(json!({
        "status": "ok",
        "version": env!("CARGO_PKG_VERSION"),
        "service": "matcher",
        "synonym_api_url": state.config.synonym_api_url,
        "synonym_cache_entries": cached_terms,
        "synonym_cache_capacity": state.config.synonym_cache_capacity.map(|c| c.get())
    }))
}
